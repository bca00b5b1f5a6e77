//! Escaping markup builder and inline text markup.
//!
//! Every piece of entry text goes through `escape` before it reaches the
//! output. Raw fragments can only be attached from inside the crate, and only
//! ones this module produced.

use regex::Regex;
use std::sync::OnceLock;

static ITALIC: OnceLock<Regex> = OnceLock::new();
static SUBSCRIPT: OnceLock<Regex> = OnceLock::new();

/// Escape text for use in element content or a quoted attribute value
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Replace `*italic*` and `~subscript~` spans in already-escaped text.
///
/// Delimiters never span a line and must enclose at least one character.
pub fn inline_markup(escaped: &str) -> String {
    let italic = ITALIC.get_or_init(|| Regex::new(r"\*([^*\n]+)\*").expect("valid regex"));
    let subscript = SUBSCRIPT.get_or_init(|| Regex::new(r"~([^~\n]+)~").expect("valid regex"));

    let with_italic = italic.replace_all(escaped, "<em>$1</em>");
    subscript
        .replace_all(&with_italic, "<sub>$1</sub>")
        .into_owned()
}

/// Escape then apply inline markup
pub fn rich_text(raw: &str) -> String {
    inline_markup(&escape(raw))
}

/// Child of an `Element`
#[derive(Debug, Clone, PartialEq)]
enum Node {
    /// Escaped at render time
    Text(String),
    /// Already safe markup
    Trusted(String),
    Element(Element),
}

/// HTML element with escaped attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
    void: bool,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
            void: false,
        }
    }

    /// Element without content or closing tag, such as `br`
    pub fn void(tag: &'static str) -> Self {
        Self {
            void: true,
            ..Self::new(tag)
        }
    }

    pub fn attr(mut self, name: &'static str, value: &str) -> Self {
        self.attrs.push((name, value.to_string()));
        self
    }

    pub fn class(self, value: &str) -> Self {
        self.attr("class", value)
    }

    /// Append text that will be escaped
    pub fn text(mut self, text: &str) -> Self {
        self.children.push(Node::Text(text.to_string()));
        self
    }

    /// Append text with inline markup applied after escaping
    pub fn rich(self, text: &str) -> Self {
        let markup = rich_text(text);
        self.trusted(markup)
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn children<I: IntoIterator<Item = Element>>(mut self, children: I) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    // Only for fragments rendered by this module.
    pub(crate) fn trusted(mut self, markup: String) -> Self {
        if !markup.is_empty() {
            self.children.push(Node::Trusted(markup));
        }
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    pub fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        out.push('>');
        if self.void {
            return;
        }
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(&escape(text)),
                Node::Trusted(markup) => out.push_str(markup),
                Node::Element(element) => element.write_to(out),
            }
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}
