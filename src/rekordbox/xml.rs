//! Generic XML element tree
//!
//! Turns XML text into nested elements with an attribute bag and an ordered
//! child list. Text content is dropped; the collection format carries all of
//! its data in attributes.

use crate::error::{Result, TidyError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::BTreeMap;

/// One XML element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,

    /// Attribute bag, values entity-unescaped
    pub attrs: BTreeMap<String, String>,

    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// First child with the given tag name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children with the given tag name, in order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }
}

/// Parse a complete XML document and return its root element
pub fn parse_document(text: &str) -> Result<Element> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                stack.push(element_from_tag(&e)?);
            }
            Ok(Event::Empty(e)) => {
                let element = element_from_tag(&e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(e)) => {
                let element = stack.pop().ok_or_else(|| {
                    TidyError::parse(format!(
                        "malformed XML: unexpected closing tag </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    ))
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(TidyError::parse(format!(
                    "malformed XML at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(TidyError::parse(format!(
            "malformed XML: element <{}> is never closed",
            open.name
        )));
    }

    root.ok_or_else(|| TidyError::parse("malformed XML: no root element"))
}

fn element_from_tag(tag: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element {
        name: String::from_utf8_lossy(tag.name().as_ref()).into_owned(),
        ..Default::default()
    };

    for attr in tag.attributes() {
        let attr = attr.map_err(|e| TidyError::parse(format!("malformed XML attribute: {}", e)))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| TidyError::parse(format!("malformed XML attribute {}: {}", key, e)))?
            .into_owned();
        element.attrs.insert(key, value);
    }

    Ok(element)
}

/// Hang a finished element under the open parent, or make it the root
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(TidyError::parse("malformed XML: more than one root element"));
    }
    *root = Some(element);
    Ok(())
}
