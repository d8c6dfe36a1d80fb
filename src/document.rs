//! Element tree for rendered pages.
//!
//! Pages come out of the formatter as XHTML text. [`Document::parse`] turns
//! that text into an owned element tree so links can be completed in place,
//! and [`Document::to_xhtml`] writes it back out.

use std::borrow::Cow;

use anyhow::{Context, Result, anyhow, bail};
use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

/// HTML elements that never carry children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name.to_ascii_lowercase().as_str())
}

/// Child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

/// Element with ordered attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Qualified name as written, e.g. `a` or `svg:a`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without namespace prefix.
    pub fn local_name(&self) -> &str {
        self.name
            .rsplit_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((key, value)),
        }
    }

    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Concatenated text of all descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
                Node::Comment(_) => {}
            }
        }
    }

    /// Depth first, pre-order over this element and its descendants.
    fn walk_mut(&mut self, action: &mut impl FnMut(&mut Element)) {
        action(self);
        for child in &mut self.children {
            if let Node::Element(element) = child {
                element.walk_mut(action);
            }
        }
    }

    fn walk<'a>(&'a self, found: &mut Vec<&'a Element>, local_name: &str) {
        if self.local_name() == local_name {
            found.push(self);
        }
        for child in &self.children {
            if let Node::Element(element) = child {
                element.walk(found, local_name);
            }
        }
    }

    fn write(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attrs {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }

        if self.children.is_empty() && is_void(&self.name) {
            out.push_str(" />");
            return;
        }

        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(element) => element.write(out),
                Node::Text(text) => out.push_str(&partial_escape(text.as_str())),
                Node::Comment(comment) => {
                    out.push_str("<!--");
                    out.push_str(comment);
                    out.push_str("-->");
                }
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

/// Rendered page: optional doctype plus a single root element.
///
/// # Examples
///
/// ```
/// use featuredoc::Document;
///
/// let mut doc = Document::parse(r#"<p><a href="">Login</a></p>"#)?;
/// doc.for_each_anchor_mut(|a| a.set_attr("href", "auth/login.html"));
/// assert_eq!(doc.to_xhtml(), r#"<p><a href="auth/login.html">Login</a></p>"#);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    doctype: Option<String>,
    root: Element,
}

impl Document {
    /// Parses XHTML text, tolerating unclosed HTML void elements.
    ///
    /// # Errors
    ///
    /// Returns error if the text is not well formed: mismatched or missing
    /// closing tags, malformed attributes, text or elements outside a single
    /// root element, or no root element at all.
    pub fn parse(source: &str) -> Result<Self> {
        let mut reader = Reader::from_str(source);
        // Void elements like `<meta>` never close; nesting is checked below
        reader.config_mut().check_end_names = false;
        reader.config_mut().trim_text(false);

        let mut doctype = None;
        let mut root = None;
        let mut stack: Vec<Element> = Vec::new();

        loop {
            let position = reader.buffer_position();
            let event = reader
                .read_event()
                .with_context(|| format!("XML parse error near byte {}", position))?;

            match event {
                Event::Start(e) => {
                    let element = element_from(&reader, &e)?;
                    if is_void(&element.name) {
                        attach(&mut stack, &mut root, element)?;
                    } else {
                        stack.push(element);
                    }
                }
                Event::Empty(e) => {
                    let element = element_from(&reader, &e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(e) => {
                    let name = decode(&reader, e.name().as_ref())?.into_owned();
                    if is_void(&name) {
                        continue;
                    }
                    let element = stack
                        .pop()
                        .ok_or_else(|| anyhow!("Unexpected closing tag </{}>", name))?;
                    if element.name != name {
                        bail!(
                            "Mismatched closing tag: expected </{}>, found </{}>",
                            element.name,
                            name
                        );
                    }
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(e) => {
                    let text = reader.decoder().decode(&e)?;
                    push_text(&mut stack, &text)?;
                }
                Event::GeneralRef(e) => {
                    let entity = reader.decoder().decode(&e)?;
                    push_text(&mut stack, &decode_entity(&entity))?;
                }
                Event::CData(e) => {
                    push_text(&mut stack, &String::from_utf8_lossy(&e))?;
                }
                Event::Comment(e) => {
                    if let Some(parent) = stack.last_mut() {
                        let comment = reader.decoder().decode(&e)?;
                        parent.push(Node::Comment(comment.into_owned()));
                    }
                }
                Event::DocType(e) => {
                    doctype = Some(reader.decoder().decode(&e)?.trim().to_string());
                }
                Event::Decl(_) | Event::PI(_) => {}
                Event::Eof => break,
            }
        }

        if let Some(open) = stack.last() {
            bail!("Unclosed element <{}>", open.name);
        }

        let root = root.context("Document has no root element")?;
        Ok(Self { doctype, root })
    }

    pub fn doctype(&self) -> Option<&str> {
        self.doctype.as_deref()
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Applies `action` to every hyperlink (`a`) element, in document order.
    pub fn for_each_anchor_mut(&mut self, mut action: impl FnMut(&mut Element)) {
        self.root.walk_mut(&mut |element: &mut Element| {
            if element.local_name() == "a" {
                action(element);
            }
        });
    }

    /// Returns every hyperlink (`a`) element, in document order.
    pub fn anchors(&self) -> Vec<&Element> {
        let mut found = Vec::new();
        self.root.walk(&mut found, "a");
        found
    }

    /// Serializes the document. Void elements are written self-closed.
    pub fn to_xhtml(&self) -> String {
        let mut out = String::new();
        if let Some(doctype) = &self.doctype {
            out.push_str("<!DOCTYPE ");
            out.push_str(doctype);
            out.push_str(">\n");
        }
        self.root.write(&mut out);
        out
    }
}

fn decode<'b>(reader: &Reader<&[u8]>, bytes: &'b [u8]) -> Result<Cow<'b, str>> {
    Ok(reader.decoder().decode(bytes)?)
}

fn element_from(reader: &Reader<&[u8]>, start: &BytesStart) -> Result<Element> {
    let mut element = Element::new(decode(reader, start.name().as_ref())?);

    for attr in start.attributes() {
        let attr = attr.with_context(|| format!("Malformed attribute on <{}>", element.name))?;
        let key = decode(reader, attr.key.as_ref())?.into_owned();
        // Unknown HTML entities make unescaping fail; keep the raw text then
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            Cow::into_owned,
        );
        element.attrs.push((key, value));
    }

    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.push(Node::Element(element));
        return Ok(());
    }
    if root.is_some() {
        bail!("Multiple root elements: <{}>", element.name);
    }
    *root = Some(element);
    Ok(())
}

/// Appends text to the open element, merging with a preceding text node.
fn push_text(stack: &mut [Element], text: &str) -> Result<()> {
    let Some(parent) = stack.last_mut() else {
        if text.trim().is_empty() {
            return Ok(());
        }
        bail!("Text outside of root element: {:?}", text.trim());
    };

    match parent.children.last_mut() {
        Some(Node::Text(existing)) => existing.push_str(text),
        _ => parent.push(Node::Text(text.to_string())),
    }
    Ok(())
}

/// Resolves an entity reference name (without `&` and `;`) to text.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "amp" => "&".to_string(),
        "apos" => "'".to_string(),
        "quot" => "\"".to_string(),
        "nbsp" => "\u{a0}".to_string(),
        "copy" => "\u{a9}".to_string(),
        "mdash" => "\u{2014}".to_string(),
        "ndash" => "\u{2013}".to_string(),
        "hellip" => "\u{2026}".to_string(),
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{};", entity), |c| c.to_string())
        }
        _ => format!("&{};", entity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        // Arrange
        let source = "<div><p>Hello <strong>you</strong></p></div>";

        // Act
        let doc = Document::parse(source).expect("Should parse");

        // Assert
        assert_eq!(doc.root().name(), "div");
        assert_eq!(doc.root().text(), "Hello you");
        assert_eq!(doc.to_xhtml(), source);
    }

    #[test]
    fn test_parse_html_page_with_void_elements() {
        // Arrange
        let source = concat!(
            r#"<!DOCTYPE html><html><head><meta charset="utf-8">"#,
            r#"<link rel="stylesheet" href="a.css"></head>"#,
            r#"<body><p>a<br>b</p></body></html>"#,
        );

        // Act
        let doc = Document::parse(source).expect("Should parse");

        // Assert
        assert_eq!(doc.doctype(), Some("html"));
        let xhtml = doc.to_xhtml();
        assert!(xhtml.starts_with("<!DOCTYPE html>\n<html>"));
        assert!(xhtml.contains(r#"<meta charset="utf-8" />"#));
        assert!(xhtml.contains("<p>a<br />b</p>"));
    }

    #[test]
    fn test_empty_script_keeps_closing_tag() {
        // Act
        let doc = Document::parse(r#"<head><script src="x.js"></script></head>"#)
            .expect("Should parse");

        // Assert
        assert_eq!(doc.to_xhtml(), r#"<head><script src="x.js"></script></head>"#);
    }

    #[test]
    fn test_entities_decoded_and_reescaped() {
        // Act
        let doc = Document::parse("<p>Fish &amp; chips &lt;3 &#x263A;&nbsp;&copy;</p>")
            .expect("Should parse");

        // Assert
        assert_eq!(doc.root().text(), "Fish & chips <3 \u{263a}\u{a0}\u{a9}");
        assert_eq!(doc.to_xhtml(), "<p>Fish &amp; chips &lt;3 \u{263a}\u{a0}\u{a9}</p>");
    }

    #[test]
    fn test_attribute_order_and_escaping_preserved() {
        // Arrange
        let source = r#"<a title="Q &amp; A" href="x.html" class="c">t</a>"#;

        // Act
        let doc = Document::parse(source).expect("Should parse");

        // Assert
        assert_eq!(doc.root().attr("title"), Some("Q & A"));
        assert_eq!(doc.to_xhtml(), source);
    }

    #[test]
    fn test_set_attr_replaces_or_appends() {
        // Arrange
        let mut element = Element::new("a");
        element.set_attr("href", "");
        element.set_attr("class", "x");

        // Act
        element.set_attr("href", "y.html");

        // Assert
        assert_eq!(
            element.attrs(),
            &[
                ("href".to_string(), "y.html".to_string()),
                ("class".to_string(), "x".to_string())
            ]
        );
    }

    #[test]
    fn test_anchors_in_document_order() {
        // Arrange
        let source = concat!(
            r#"<body><a href="1">one</a><div><a>two</a></div>"#,
            r#"<x:a href="3">three</x:a></body>"#,
        );

        // Act
        let doc = Document::parse(source).expect("Should parse");

        // Assert
        let texts: Vec<String> = doc.anchors().iter().map(|a| a.text()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_comments_preserved() {
        // Arrange
        let source = "<p><!-- raw HTML omitted -->text</p>";

        // Act
        let doc = Document::parse(source).expect("Should parse");

        // Assert
        assert_eq!(doc.to_xhtml(), source);
    }

    #[test]
    fn test_mismatched_closing_tag_rejected() {
        // Act
        let result = Document::parse("<div><p>text</div></p>");

        // Assert
        let err = result.expect_err("Should reject mismatched tags");
        assert!(err.to_string().contains("Mismatched"), "Got: {}", err);
    }

    #[test]
    fn test_unclosed_element_rejected() {
        // Act
        let result = Document::parse("<div><p>text</p>");

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_multiple_roots_rejected() {
        // Act
        let result = Document::parse("<p>a</p><p>b</p>");

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_stray_text_rejected() {
        // Act
        let result = Document::parse("just words");

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_input_rejected() {
        // Act
        let result = Document::parse("  \n");

        // Assert
        let err = result.expect_err("Should reject empty input");
        assert!(err.to_string().contains("no root"), "Got: {}", err);
    }

    #[test]
    fn test_decode_entity_unknown_kept() {
        // Assert
        assert_eq!(decode_entity("bogus"), "&bogus;");
        assert_eq!(decode_entity("#65"), "A");
        assert_eq!(decode_entity("#x41"), "A");
    }
}
