//! Markup tree shared by screen rendering and SVG export.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("XML write failed: {0}")]
    Xml(String),
    #[error("Markup is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Tags written as an open/close pair even when empty.
const NEVER_SELF_CLOSING: &[&str] = &["div", "span", "style", "textarea", "text", "tspan"];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing an earlier value.
    pub fn attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl ToString) {
        let name = name.into();
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.children.push(Node::Text(text));
        }
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// First descendant (or self) with the given tag, depth-first.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        if self.tag == tag {
            return Some(self);
        }
        self.elements().find_map(|e| e.find(tag))
    }

    /// Every descendant (or self) with the given tag, depth-first.
    pub fn find_all<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect(tag, &mut found);
        found
    }

    fn collect<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        if self.tag == tag {
            found.push(self);
        }
        for e in self.elements() {
            e.collect(tag, found);
        }
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => out.push_str(&e.text_content()),
            }
        }
        out
    }

    /// Serialize to markup. Text and attribute values are escaped.
    pub fn to_markup(&self) -> RenderResult<String> {
        let mut writer = Writer::new(Vec::new());
        self.write(&mut writer)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }

    fn write<W: Write>(&self, writer: &mut Writer<W>) -> RenderResult<()> {
        let mut start = BytesStart::new(self.tag.as_str());
        for (name, value) in &self.attrs {
            start.push_attribute((name.as_str(), value.as_str()));
        }

        if self.children.is_empty() && !NEVER_SELF_CLOSING.iter().any(|t| *t == self.tag) {
            return write_event(writer, Event::Empty(start));
        }

        write_event(writer, Event::Start(start))?;
        for node in &self.children {
            match node {
                Node::Element(e) => e.write(writer)?,
                Node::Text(t) => write_event(writer, Event::Text(BytesText::new(t)))?,
            }
        }
        write_event(writer, Event::End(BytesEnd::new(self.tag.as_str())))
    }
}

fn write_event<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> RenderResult<()> {
    writer
        .write_event(event)
        .map_err(|e| RenderError::Xml(e.to_string()))
}

/// Join CSS declarations into an inline `style` value.
pub fn style(declarations: &[(&str, String)]) -> String {
    declarations
        .iter()
        .map(|(property, value)| format!("{property}: {value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Format a length in pixels.
pub fn px(value: f64) -> String {
    format!("{value}px")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_escapes_text_and_attributes() {
        let markup = Element::new("text")
            .attr("data-note", "a \"quoted\" <b>")
            .text("1 < 2 & 3")
            .to_markup()
            .unwrap();
        assert_eq!(
            markup,
            r#"<text data-note="a &quot;quoted&quot; &lt;b&gt;">1 &lt; 2 &amp; 3</text>"#
        );
    }

    #[test]
    fn test_empty_elements() {
        let markup = Element::new("g")
            .child(Element::new("rect").attr("width", 4))
            .child(Element::new("div"))
            .to_markup()
            .unwrap();
        assert_eq!(markup, r#"<g><rect width="4"/><div></div></g>"#);
    }

    #[test]
    fn test_attr_replaces() {
        let e = Element::new("g").attr("x", 1).attr("x", 2);
        assert_eq!(e.attrs.len(), 1);
        assert_eq!(e.get_attr("x"), Some("2"));
    }

    #[test]
    fn test_find_and_text_content() {
        let tree = Element::new("svg").child(
            Element::new("g")
                .child(Element::new("text").text("a"))
                .child(Element::new("text").text("b")),
        );
        assert_eq!(tree.find_all("text").len(), 2);
        assert_eq!(tree.find("g").map(|g| g.text_content()), Some("ab".to_string()));
        assert!(tree.find("image").is_none());
    }

    #[test]
    fn test_style_and_px() {
        assert_eq!(
            style(&[("width", px(40.0)), ("left", px(2.5))]),
            "width: 40px; left: 2.5px"
        );
    }
}
