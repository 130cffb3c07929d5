use calamine::{open_workbook_auto, Data, DataType, Reader};
use std::collections::{HashMap as Map, HashSet as Set};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error, trace};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("no worksheet in {0:?}")]
    NoSheet(PathBuf),

    #[error("failed to read worksheet of {path:?}: {source}")]
    Sheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
}

/// A single spreadsheet value.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(chrono::NaiveDateTime),
    /// Formula error as written by the spreadsheet, e.g. `#DIV/0!`.
    Error(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) | Cell::Error(s) => f.write_str(s),
            Cell::Int(i) => write!(f, "{i}"),
            Cell::Float(x) => write!(f, "{x}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Int(i) => Cell::Int(*i),
            Data::Float(x) => Cell::Float(*x),
            Data::Bool(b) => Cell::Bool(*b),
            Data::Error(e) => Cell::Error(e.to_string()),
            Data::DateTime(_) => match data.as_datetime() {
                Some(dt) => Cell::DateTime(dt),
                None => Cell::Text(data.to_string()),
            },
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        }
    }
}

/// One data row, keyed by column name.
pub type Row = Map<String, Cell>;

/// An ordered set of named columns over ordered rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Build a table from positional rows; `rows[i][j]` belongs to `columns[j]`.
    pub fn from_records(columns: Vec<String>, records: Vec<Vec<Cell>>) -> Self {
        let rows = records
            .into_iter()
            .map(|record| {
                columns
                    .iter()
                    .cloned()
                    .zip(record.into_iter().chain(std::iter::repeat(Cell::Empty)))
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of `column` in row `row`, if both exist.
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }
}

/// Load the first worksheet of the spreadsheet at `path`.
///
/// The first row of the used range holds the column names. Blank names become `Unnamed: {i}`
/// and repeated names get a `.1`, `.2`, ... suffix, so every column stays addressable.
pub fn parse(path: impl AsRef<Path>) -> Result<Table, ParseError> {
    let path = path.as_ref();
    let time = std::time::Instant::now();

    trace!("opening workbook at {:?}", path);
    let mut workbook = open_workbook_auto(path).map_err(|source| {
        error!("failed to open workbook {:?}, error({source})", path);
        ParseError::Open {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|source| {
            error!("failed to read worksheet of {:?}, error({source})", path);
            ParseError::Sheet {
                path: path.to_path_buf(),
                source,
            }
        })?,
        None => {
            error!("no worksheet found in {:?}", path);
            return Err(ParseError::NoSheet(path.to_path_buf()));
        }
    };

    let mut rows = range.rows();
    let columns = match rows.next() {
        Some(header) => column_names(header),
        None => Vec::new(),
    };
    let records = rows
        .map(|row| row.iter().map(Cell::from).collect())
        .collect();

    let table = Table::from_records(columns, records);
    debug!(
        "parsed {:?}: {} columns, {} rows. {}",
        path,
        table.columns().len(),
        table.len(),
        crate::time_elapsed(time)
    );
    Ok(table)
}

fn column_names(header: &[Data]) -> Vec<String> {
    let mut seen: Set<String> = Set::new();
    header
        .iter()
        .enumerate()
        .map(|(i, data)| {
            let name = match Cell::from(data) {
                Cell::Empty => format!("Unnamed: {i}"),
                cell => cell.to_string(),
            };

            let mut unique = name.clone();
            let mut n = 1;
            while !seen.insert(unique.clone()) {
                unique = format!("{name}.{n}");
                n += 1;
            }
            unique
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_display() {
        assert_eq!(Cell::Empty.to_string(), "");
        assert_eq!(Cell::Float(100.0).to_string(), "100");
        assert_eq!(Cell::Float(0.25).to_string(), "0.25");
        assert_eq!(Cell::Int(-3).to_string(), "-3");
        assert_eq!(Cell::Text("2023".into()).to_string(), "2023");
        let dt = chrono::NaiveDate::from_ymd_opt(2023, 12, 31)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(Cell::DateTime(dt).to_string(), "2023-12-31 00:00:00");
    }

    #[test]
    fn header_names_are_unique() {
        let header = vec![
            Data::String("Date".into()),
            Data::Empty,
            Data::String("Date".into()),
            Data::String("Date".into()),
        ];
        assert_eq!(
            column_names(&header),
            vec!["Date", "Unnamed: 1", "Date.1", "Date.2"]
        );
    }

    #[test]
    fn short_records_are_padded() {
        let table = Table::from_records(
            vec!["a".into(), "b".into()],
            vec![vec![Cell::Int(1)]],
        );
        assert_eq!(table.get(0, "a"), Some(&Cell::Int(1)));
        assert_eq!(table.get(0, "b"), Some(&Cell::Empty));
        assert_eq!(table.get(1, "a"), None);
    }
}
