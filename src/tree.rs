//! Generic labeled tree read from a GIR document.
//!
//! Labels are kept exactly as written (`c:identifier`, `glib:type-name`);
//! `crate::strip` turns them into local names before anything matches on them.
use std::borrow::Cow;

use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrib: IndexMap<String, String>,
    pub children: Vec<Element>,
    /// Text before the first child element (ElementTree's `.text`).
    pub text: Option<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// QUERIES
// ————————————————————————————————————————————————————————————————————————————

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), ..Self::default() }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrib.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrib.get(key).map(String::as_str)
    }

    /// `true` when the attribute is present and spelled exactly `"1"`.
    pub fn flag(&self, key: &str) -> bool {
        self.attr(key) == Some("1")
    }

    /// First direct child with the given tag.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// All direct children with the given tag, in document order.
    pub fn findall<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Text of the `<doc>` child, empty when missing.
    pub fn doc(&self) -> &str {
        self.find("doc")
            .and_then(|d| d.text.as_deref())
            .unwrap_or("")
    }
}

// ————————————————————————————————————————————————————————————————————————————
// READER
// ————————————————————————————————————————————————————————————————————————————

/// Read a whole document into a tree. Any reader error aborts the parse;
/// there is no partial tree.
///
/// Line endings are normalized to `\n` first, as XML processors must.
pub fn parse(xml: &str) -> Result<Element> {
    let xml = normalize_line_endings(xml);
    let mut reader = Reader::from_str(&xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|err| Error::Parse {
            position: reader.error_position(),
            message: err.to_string(),
        })?;
        match event {
            Event::Start(ref e) => stack.push(open(e, &reader)?),
            Event::Empty(ref e) => {
                let el = open(e, &reader)?;
                attach(&mut stack, &mut root, el, &reader)?;
            }
            Event::End(_) => {
                // End-name matching is checked by the reader itself.
                if let Some(el) = stack.pop() {
                    attach(&mut stack, &mut root, el, &reader)?;
                }
            }
            Event::Text(ref e) => {
                let text = e.unescape().map_err(|err| Error::Parse {
                    position: reader.buffer_position(),
                    message: err.to_string(),
                })?;
                push_text(&mut stack, &text, &reader)?;
            }
            Event::CData(e) => {
                let raw = e.into_inner();
                push_text(&mut stack, &String::from_utf8_lossy(&raw), &reader)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::Parse {
            position: reader.buffer_position(),
            message: format!("unclosed element <{}>", open.tag),
        });
    }
    root.ok_or_else(|| Error::Parse {
        position: reader.buffer_position(),
        message: "document has no root element".to_string(),
    })
}

fn open(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<Element> {
    let mut el = Element::new(String::from_utf8_lossy(e.name().as_ref()));
    for attr in e.attributes() {
        let attr = attr.map_err(|err| Error::Parse {
            position: reader.buffer_position(),
            message: err.to_string(),
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        // Namespace declarations are not attributes of the document model.
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        let value = attr.unescape_value().map_err(|err| Error::Parse {
            position: reader.buffer_position(),
            message: err.to_string(),
        })?;
        el.attrib.insert(key, value.into_owned());
    }
    Ok(el)
}

fn normalize_line_endings(xml: &str) -> Cow<'_, str> {
    if xml.contains('\r') {
        Cow::Owned(xml.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(xml)
    }
}

/// A document has exactly one root element.
fn attach(stack: &mut [Element], root: &mut Option<Element>, el: Element, reader: &Reader<&[u8]>) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(el),
        None if root.is_some() => {
            return Err(Error::Parse {
                position: reader.buffer_position(),
                message: format!("second root element <{}>", el.tag),
            });
        }
        None => *root = Some(el),
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str, reader: &Reader<&[u8]>) -> Result<()> {
    let Some(top) = stack.last_mut() else {
        // Only whitespace may surround the root element.
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(Error::Parse {
            position: reader.buffer_position(),
            message: "text outside the root element".to_string(),
        });
    };
    // Text after a child is a tail; docs never use it.
    if !top.children.is_empty() {
        return Ok(());
    }
    match &mut top.text {
        Some(existing) => existing.push_str(text),
        None => top.text = Some(text.to_string()),
    }
    Ok(())
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_qualified_labels_and_drops_xmlns() {
        let xml = r#"<?xml version="1.0"?>
<repository xmlns="http://www.gtk.org/introspection/core/1.0" xmlns:c="http://www.gtk.org/introspection/c/1.0" version="1.2">
  <c:include name="glib.h"/>
  <namespace name="GLib" c:identifier-prefixes="G"/>
</repository>"#;
        let root = parse(xml).unwrap();
        assert_eq!(root.tag, "repository");
        assert_eq!(root.attrib.len(), 1);
        assert_eq!(root.attr("version"), Some("1.2"));
        assert_eq!(root.children[0].tag, "c:include");
        let ns = root.find("namespace").unwrap();
        assert_eq!(ns.attr("c:identifier-prefixes"), Some("G"));
    }

    #[test]
    fn doc_text_is_unescaped() {
        let xml = r#"<function name="f"><doc xml:space="preserve">Returns &lt;b&gt; or %NULL</doc></function>"#;
        let root = parse(xml).unwrap();
        assert_eq!(root.doc(), "Returns <b> or %NULL");
    }

    #[test]
    fn missing_doc_is_empty() {
        let root = parse(r#"<function name="f"/>"#).unwrap();
        assert_eq!(root.doc(), "");
    }

    #[test]
    fn findall_preserves_document_order() {
        let root = parse(r#"<r><a n="1"/><b/><a n="2"/></r>"#).unwrap();
        let ns: Vec<_> = root.findall("a").filter_map(|a| a.attr("n")).collect();
        assert_eq!(ns, vec!["1", "2"]);
    }

    #[test]
    fn mismatched_end_tag_is_a_parse_error() {
        let err = parse("<a><b></a>").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn unclosed_document_is_a_parse_error() {
        let err = parse("<a><b/>").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn empty_document_is_a_parse_error() {
        assert!(matches!(parse("").unwrap_err(), Error::Parse { .. }));
    }

    #[test]
    fn second_root_is_a_parse_error() {
        assert!(matches!(parse("<a/><b/>").unwrap_err(), Error::Parse { .. }));
        assert!(matches!(parse("<a></a><b></b>").unwrap_err(), Error::Parse { .. }));
    }

    #[test]
    fn text_outside_root_is_a_parse_error() {
        assert!(matches!(parse("<a/>trailing junk").unwrap_err(), Error::Parse { .. }));
        assert!(matches!(parse("junk<a/>").unwrap_err(), Error::Parse { .. }));
        assert_eq!(parse("\n  <a/>\n\n").unwrap().tag, "a");
    }

    #[test]
    fn crlf_line_endings_are_normalized() {
        let xml = "<function name=\"f\">\r\n<doc>First line.\r\nSecond line.\rThird.</doc>\r\n</function>\r\n";
        let root = parse(xml).unwrap();
        assert_eq!(root.doc(), "First line.\nSecond line.\nThird.");
    }
}
