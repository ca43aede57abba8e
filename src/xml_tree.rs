//! Minimal in-memory element tree for annotation documents.
//!
//! Annotation documents are small, so they are fully materialized before
//! any annotation is looked at. Only elements, attributes and text are kept;
//! comments, processing instructions and the XML declaration are dropped.

use crate::errors::ConversionError;
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

/// An XML element with its attributes, direct text and children
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    name: String,
    attributes: HashMap<String, String>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Tag name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Text found directly inside this element, entities resolved
    pub fn text(&self) -> &str {
        &self.text
    }

    /// First direct child with the given tag name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given tag name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Parse a whole document and return its root element
    pub fn parse(xml: &str) -> Result<Element, ConversionError> {
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
        let mut reader = Reader::from_str(xml);

        // Open elements; the root ends up as the last one popped
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => {
                    stack.push(Self::from_start(e)?);
                }
                Event::Empty(ref e) => {
                    let element = Self::from_start(e)?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| ConversionError::Xml("unexpected closing tag".to_string()))?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::Text(ref t) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(t));
                    }
                }
                Event::CData(ref t) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(t));
                    }
                }
                Event::GeneralRef(ref r) => {
                    let resolved = match r.resolve_char_ref()? {
                        Some(ch) => ch.to_string(),
                        None => {
                            let name = r
                                .decode()
                                .map_err(|e| ConversionError::Xml(e.to_string()))?;
                            resolve_predefined_entity(&name)
                                .ok_or_else(|| {
                                    ConversionError::Xml(format!("unknown entity '&{};'", name))
                                })?
                                .to_string()
                        }
                    };
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&resolved);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(ConversionError::Xml(format!(
                "document ended inside <{}>",
                open.name
            )));
        }

        root.ok_or_else(|| ConversionError::Xml("document has no root element".to_string()))
    }

    fn from_start(start: &BytesStart) -> Result<Element, ConversionError> {
        let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));

        for attr in start.attributes() {
            let attr = attr.map_err(|e| ConversionError::Xml(e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let raw = String::from_utf8_lossy(&attr.value);
            let value = quick_xml::escape::unescape(&raw)
                .map_err(|e| ConversionError::Xml(e.to_string()))?;
            element.attributes.insert(key, value.into_owned());
        }

        Ok(element)
    }

    /// Hang a finished element under its parent, or make it the root
    fn attach(
        stack: &mut [Element],
        root: &mut Option<Element>,
        element: Element,
    ) -> Result<(), ConversionError> {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None if root.is_none() => *root = Some(element),
            None => {
                return Err(ConversionError::Xml(
                    "multiple root elements".to_string(),
                ));
            }
        }
        Ok(())
    }
}
