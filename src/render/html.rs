use std::fmt::Write as _;
use std::io::Write;

use eventlist_core::EventListResult;

use super::Renderer;
use crate::view::{Element, Node};

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["input", "br", "hr", "img", "meta", "link"];

/// Writes each rendered tree as an HTML fragment followed by a newline.
pub struct HtmlRenderer<W> {
    out: W,
}

impl<W: Write> HtmlRenderer<W> {
    pub fn new(out: W) -> Self {
        HtmlRenderer { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for HtmlRenderer<W> {
    fn render(&mut self, tree: &Node) -> EventListResult<()> {
        writeln!(self.out, "{}", to_html(tree))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Serialize a view tree to HTML.
pub fn to_html(tree: &Node) -> String {
    let mut html = String::new();
    write_node(tree, &mut html);
    html
}

fn write_node(node: &Node, html: &mut String) {
    match node {
        Node::Text(text) => html.push_str(&escape(text)),
        Node::Element(el) => write_element(el, html),
    }
}

fn write_element(el: &Element, html: &mut String) {
    html.push('<');
    html.push_str(el.tag);

    if let Some(id) = &el.id {
        let _ = write!(html, " id=\"{}\"", escape(id));
    }
    if !el.classes.is_empty() {
        let _ = write!(html, " class=\"{}\"", el.classes.join(" "));
    }
    for (name, value) in &el.attrs {
        let _ = write!(html, " {}=\"{}\"", name, escape(value));
    }
    html.push('>');

    if VOID_ELEMENTS.contains(&el.tag) {
        return;
    }

    for child in &el.children {
        write_node(child, html);
    }
    let _ = write!(html, "</{}>", el.tag);
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
