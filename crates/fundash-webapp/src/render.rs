use crate::markup::{Fragment, Node, Tag};
use fundash_spider::Table;
use tracing::error;

pub const PAGE_TITLE: &str = "Análisis Financiero";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("'{0}'")]
    MissingColumn(String),
}

/// `table` markup for `table`: a header row of column names, then one row per data row.
pub fn table(table: &Table) -> Result<Node, RenderError> {
    let header = Node::new(
        Tag::Tr,
        table
            .columns()
            .iter()
            .map(|col| Node::new(Tag::Th, vec![Node::text(col.as_str())]))
            .collect(),
    );

    let mut rows = Vec::with_capacity(table.len() + 1);
    rows.push(header);
    for row in table.rows() {
        let cells = table
            .columns()
            .iter()
            .map(|col| match row.get(col) {
                Some(cell) => Ok(Node::new(Tag::Td, vec![Node::text(cell.to_string())])),
                None => Err(RenderError::MissingColumn(col.clone())),
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(Node::new(Tag::Tr, cells));
    }

    Ok(Node::new(Tag::Table, rows))
}

fn heading(title: &str) -> Node {
    Node::with_class(Tag::H2, "mt-5 mb-3", vec![Node::text(title)])
}

/// Assemble the dashboard: title, then metrics, balance sheet and income statement tables.
///
/// A lookup failure in any table replaces the whole output with one error message.
pub fn render(metrics: &Table, balance: &Table, income: &Table) -> Fragment {
    match layout(metrics, balance, income) {
        Ok(node) => Fragment(vec![node]),
        Err(err) => {
            error!("failed to render layout, error({err})");
            Fragment::message(format!("Error al generar el layout: {err}"))
        }
    }
}

fn layout(metrics: &Table, balance: &Table, income: &Table) -> Result<Node, RenderError> {
    let metrics_table = table(metrics)?;
    let balance_table = table(balance)?;
    let income_table = table(income)?;

    Ok(Node::new(
        Tag::Div,
        vec![
            Node::with_class(
                Tag::H1,
                "text-center mt-5 mb-4",
                vec![Node::text(PAGE_TITLE)],
            ),
            heading("Métricas"),
            metrics_table,
            heading("Balance Sheet"),
            balance_table,
            heading("Income Statement"),
            income_table,
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundash_spider::sheet::Row;
    use fundash_spider::Cell;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn single(columns: &[&str], record: Vec<Cell>) -> Table {
        Table::from_records(
            columns.iter().map(|c| c.to_string()).collect(),
            vec![record],
        )
    }

    #[test]
    fn metrics_table_has_header_and_body() {
        let metrics = single(&["Date", "Revenue"], vec![text("2023"), text("100")]);
        let node = table(&metrics).unwrap();

        assert_eq!(node.tag(), Some(Tag::Table));
        let rows = node.children();
        assert_eq!(rows.len(), 2);

        let header: Vec<_> = rows[0].children().iter().collect();
        assert_eq!(header.len(), 2);
        assert!(header.iter().all(|c| c.tag() == Some(Tag::Th)));
        assert_eq!(header[0].text_content(), "Date");
        assert_eq!(header[1].text_content(), "Revenue");

        let body: Vec<_> = rows[1].children().iter().collect();
        assert_eq!(body.len(), 2);
        assert!(body.iter().all(|c| c.tag() == Some(Tag::Td)));
        assert_eq!(body[0].text_content(), "2023");
        assert_eq!(body[1].text_content(), "100");
    }

    #[test]
    fn cells_are_not_formatted() {
        let t = single(
            &["a", "b", "c"],
            vec![Cell::Float(1234567.5), Cell::Empty, Cell::Int(7)],
        );
        assert_eq!(
            crate::markup::Fragment(vec![table(&t).unwrap()]).to_html(),
            "<table><tr><th>a</th><th>b</th><th>c</th></tr>\
             <tr><td>1234567.5</td><td></td><td>7</td></tr></table>"
        );
    }

    #[test]
    fn heading_order_is_fixed() {
        let metrics = single(&["m"], vec![text("1")]);
        let balance = single(&["b"], vec![text("2")]);
        let income = single(&["i"], vec![text("3")]);

        let fragment = render(&metrics, &balance, &income);
        let root = &fragment.nodes()[0];
        let headings: Vec<String> = root
            .children()
            .iter()
            .filter(|n| matches!(n.tag(), Some(Tag::H1 | Tag::H2)))
            .map(Node::text_content)
            .collect();
        assert_eq!(
            headings,
            ["Análisis Financiero", "Métricas", "Balance Sheet", "Income Statement"]
        );

        let tables: Vec<String> = root
            .children()
            .iter()
            .filter(|n| n.tag() == Some(Tag::Table))
            .map(Node::text_content)
            .collect();
        assert_eq!(tables, ["m1", "b2", "i3"]);
    }

    #[test]
    fn missing_column_yields_single_error_fragment() {
        let metrics = single(&["Date"], vec![text("2023")]);
        let mut row = Row::new();
        row.insert("Assets".to_string(), text("10"));
        let balance = Table::new(vec!["Assets".into(), "Liabilities".into()], vec![row]);
        let income = single(&["Date"], vec![text("2023")]);

        let fragment = render(&metrics, &balance, &income);

        assert_eq!(fragment.nodes().len(), 1);
        assert_eq!(fragment.nodes()[0].tag(), Some(Tag::Div));
        assert_eq!(
            fragment.to_html(),
            "<div>Error al generar el layout: &#x27;Liabilities&#x27;</div>"
        );
    }
}
