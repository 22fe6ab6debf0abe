//! Minimal element tree over `quick-xml` events, plus the shared request envelope.

use quick_xml::escape::escape;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::domain::Attributes;

const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid XML response: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid XML attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("XML response has no root element")]
    EmptyDocument,

    #[error("XML response ended inside <{element}>")]
    UnexpectedEof { element: String },

    #[error("XML response is missing <{name}>")]
    MissingElement { name: &'static str },

    #[error("request rejected with state code {code}")]
    Rejected { code: String, text: Option<String> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Attributes,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.name == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Element text, `None` when empty.
    pub fn text(&self) -> Option<&str> {
        if self.text.is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }

    /// Error carrying the top-level `<state code>` of a response that lacks the expected payload.
    pub fn rejection_or_missing(&self, name: &'static str) -> TransportError {
        match self.child("state").and_then(|state| {
            state
                .attribute("code")
                .map(|code| (code, state.text().map(str::to_owned)))
        }) {
            Some((code, text)) => TransportError::Rejected {
                code: code.to_owned(),
                text,
            },
            None => TransportError::MissingElement { name },
        }
    }
}

pub fn parse_document(xml: &str) -> Result<Element, TransportError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(element_from_start(&start)?),
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, element);
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(TransportError::UnexpectedEof { element: open.name });
    }
    root.ok_or(TransportError::EmptyDocument)
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, TransportError> {
    let mut attributes = Attributes::new();
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value()?.into_owned();
        attributes.insert(key, value);
    }

    Ok(Element {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        attributes,
        ..Default::default()
    })
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        // Anything after the first root element is ignored.
        None => {
            root.get_or_insert(element);
        }
    }
}

/// Wrap an operation payload into a complete request document.
pub fn request_document(operation: &str, payload: &str) -> String {
    format!("{DECLARATION}<request><operation>{operation}</operation>{payload}</request>")
}

/// Escape a value for use in element text or a double-quoted attribute.
pub fn esc(value: &str) -> String {
    escape(value).into_owned()
}
