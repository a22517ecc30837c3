//! Immutable XML node tree.
//!
//! Response documents are assembled as values first and serialized once, so
//! there is no shared writer to leave half-written on an early return.

use crate::error::{EnvelopeError, EnvelopeResult};
use quick_xml::Writer;
use std::borrow::Cow;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// A node in a response document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(Element),
    /// Character data, escaped on output
    Text(String),
    /// Pre-serialized XML written verbatim
    Raw(String),
}

/// An element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// An element whose only child is escaped text.
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name).with_text(text)
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    pub fn with_raw(mut self, xml: impl Into<String>) -> Self {
        self.children.push(XmlNode::Raw(xml.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(XmlNode::Element));
        self
    }

    /// Append `child` only when present.
    pub fn with_optional_child(self, child: Option<Element>) -> Self {
        match child {
            Some(child) => self.with_child(child),
            None => self,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Serialize as a complete document with an XML declaration.
    pub fn to_document(&self) -> EnvelopeResult<String> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(EnvelopeError::xml)?;
        write_element(&mut writer, self)?;
        String::from_utf8(writer.into_inner()).map_err(EnvelopeError::xml)
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> EnvelopeResult<()> {
    let name = checked_name(&element.name)?;
    let mut start = BytesStart::new(name);
    for (name, value) in &element.attributes {
        let value = xml_chars(value);
        start.push_attribute((checked_name(name)?, value.as_ref()));
    }
    writer
        .write_event(Event::Start(start))
        .map_err(EnvelopeError::xml)?;

    for child in &element.children {
        match child {
            XmlNode::Element(child) => write_element(writer, child)?,
            XmlNode::Text(text) => writer
                .write_event(Event::Text(BytesText::new(&xml_chars(text))))
                .map_err(EnvelopeError::xml)?,
            XmlNode::Raw(xml) => writer.get_mut().extend_from_slice(xml.as_bytes()),
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(EnvelopeError::xml)
}

fn checked_name(name: &str) -> EnvelopeResult<&str> {
    if is_xml_name(name) {
        Ok(name)
    } else {
        Err(EnvelopeError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Whether `name` matches the XML 1.0 `Name` production.
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}

/// Characters XML 1.0 cannot carry at all, not even as references.
fn is_forbidden_char(c: char) -> bool {
    !matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Drop characters that would make the document ill-formed.
fn xml_chars(text: &str) -> Cow<'_, str> {
    if text.contains(is_forbidden_char) {
        Cow::Owned(text.chars().filter(|c| !is_forbidden_char(*c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}
