/// Elements the dashboard emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    Div,
    H1,
    H2,
    Table,
    Tr,
    Th,
    Td,
}

impl Tag {
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::Table => "table",
            Tag::Tr => "tr",
            Tag::Th => "th",
            Tag::Td => "td",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub class: Option<&'static str>,
    pub children: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn new(tag: Tag, children: Vec<Node>) -> Self {
        Node::Element(Element {
            tag,
            class: None,
            children,
        })
    }

    pub fn with_class(tag: Tag, class: &'static str, children: Vec<Node>) -> Self {
        Node::Element(Element {
            tag,
            class: Some(class),
            children,
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn tag(&self) -> Option<Tag> {
        match self {
            Node::Element(el) => Some(el.tag),
            Node::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(el) => &el.children,
            Node::Text(_) => &[],
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => el.children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&tera::escape_html(text)),
            Node::Element(el) => {
                out.push('<');
                out.push_str(el.tag.name());
                if let Some(class) = el.class {
                    out.push_str(" class=\"");
                    out.push_str(&tera::escape_html(class));
                    out.push('"');
                }
                out.push('>');
                el.children.iter().for_each(|c| c.write_html(out));
                out.push_str("</");
                out.push_str(el.tag.name());
                out.push('>');
            }
        }
    }
}

/// Whatever ends up in the page's output region; possibly nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fragment(pub Vec<Node>);

impl Fragment {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// A lone `div` holding `message`.
    pub fn message(message: impl Into<String>) -> Self {
        Self(vec![Node::new(Tag::Div, vec![Node::text(message)])])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.0
    }

    /// Serialize to HTML; all text is escaped.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.0.iter().for_each(|node| node.write_html(&mut out));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escapes_text() {
        let fragment = Fragment(vec![Node::with_class(
            Tag::H2,
            "mt-5 mb-3",
            vec![Node::text("R&D <expense>")],
        )]);
        assert_eq!(
            fragment.to_html(),
            "<h2 class=\"mt-5 mb-3\">R&amp;D &lt;expense&gt;</h2>"
        );
    }

    #[test]
    fn empty_fragment_renders_nothing() {
        assert_eq!(Fragment::empty().to_html(), "");
    }

    #[test]
    fn message_is_a_single_div() {
        let fragment = Fragment::message("boom");
        assert_eq!(fragment.nodes().len(), 1);
        assert_eq!(fragment.nodes()[0].tag(), Some(Tag::Div));
        assert_eq!(fragment.to_html(), "<div>boom</div>");
    }
}
