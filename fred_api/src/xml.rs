//! Minimal XML tree for FRED responses.
//!
//! FRED answers every endpoint with a root element whose children are either
//! empty elements carrying attributes (`<observation date=".." value=".."/>`)
//! or leaf elements carrying text (`<vintage_date>2014-01-30</vintage_date>`).
//! [`parse_document`] turns a body into an [`XmlElement`] tree; the typed
//! records in [`crate::types`] decode from it field by field.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::Error;

/// One element with its attributes in document order, text content and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, Error> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| {
                Error::Malformed(format!("invalid attribute on <{}>: {}", name, e))
            })?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| {
                    Error::Malformed(format!("invalid value for {} on <{}>: {}", key, name, e))
                })?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            text: None,
            children: Vec::new(),
        })
    }

    /// Looks up an attribute by name. Later duplicates are ignored.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Looks up an attribute that the record cannot be decoded without.
    pub fn required_attr(&self, key: &str) -> Result<&str, Error> {
        self.attr(key).ok_or_else(|| {
            Error::Malformed(format!("<{}> is missing attribute '{}'", self.name, key))
        })
    }
}

/// Parses a response body into its root element.
pub fn parse_document(body: &str) -> Result<XmlElement, Error> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => stack.push(XmlElement::from_start(&start)?),
            Ok(Event::Empty(start)) => {
                let element = XmlElement::from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::Malformed("unbalanced closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(text)) => {
                if let Some(current) = stack.last_mut() {
                    let text = text
                        .unescape()
                        .map_err(|e| Error::Malformed(format!("invalid text content: {}", e)))?;
                    current
                        .text
                        .get_or_insert_with(String::new)
                        .push_str(&text);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(current) = stack.last_mut() {
                    let raw = data.into_inner();
                    current
                        .text
                        .get_or_insert_with(String::new)
                        .push_str(&String::from_utf8_lossy(&raw));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::Malformed(format!(
                    "invalid XML at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::Malformed(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| Error::Malformed("document has no root element".to_string()))
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), Error> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => {
            return Err(Error::Malformed(format!(
                "second root element <{}>",
                element.name
            )))
        }
        None => *root = Some(element),
    }
    Ok(())
}
