//! Owned, namespace-resolved XML element tree.
//!
//! Responses are small, so the whole body is read into an arena of elements
//! and queried afterwards. Every element carries its resolved namespace URI;
//! lookups never look at prefixes.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::{SamlError, SamlResult};
use crate::types::QName;

#[derive(Debug, Clone)]
struct Element {
    namespace: Option<String>,
    local_name: String,
    attributes: Vec<(String, String)>,
    text: String,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// A parsed XML document.
///
/// Elements are stored in document order, so iteration and searches return
/// matches in the order they appear in the source.
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Parses a document from raw bytes, which must be UTF-8.
    pub fn parse(bytes: &[u8]) -> SamlResult<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| SamlError::MalformedResponse(format!("invalid UTF-8: {e}")))?;
        Self::parse_str(text)
    }

    /// Parses a document from a string.
    pub fn parse_str(xml: &str) -> SamlResult<Self> {
        let mut reader = NsReader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut elements: Vec<Element> = Vec::new();
        let mut open: Vec<usize> = Vec::new();

        loop {
            let (ns, event) = reader.read_resolved_event()?;
            let namespace = match ns {
                ResolveResult::Bound(Namespace(uri)) => {
                    Some(String::from_utf8_lossy(uri).into_owned())
                }
                _ => None,
            };

            match event {
                Event::Start(start) => {
                    let index = push_element(&mut elements, open.last().copied(), namespace, &start)?;
                    open.push(index);
                }
                Event::Empty(start) => {
                    push_element(&mut elements, open.last().copied(), namespace, &start)?;
                }
                Event::End(_) => {
                    open.pop();
                }
                Event::Text(text) => {
                    if let Some(&index) = open.last() {
                        elements[index].text.push_str(&text.unescape()?);
                    }
                }
                Event::CData(data) => {
                    if let Some(&index) = open.last() {
                        elements[index]
                            .text
                            .push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !open.is_empty() {
            return Err(SamlError::MalformedResponse(
                "unexpected end of document".to_string(),
            ));
        }
        if elements.is_empty() {
            return Err(SamlError::MalformedResponse(
                "document has no root element".to_string(),
            ));
        }

        Ok(Self { elements })
    }

    /// Returns the root element.
    #[must_use]
    pub fn root(&self) -> ElementRef<'_> {
        ElementRef {
            doc: self,
            index: 0,
        }
    }

    /// Iterates over every element in document order, root included.
    pub fn descendants(&self) -> impl Iterator<Item = ElementRef<'_>> {
        (0..self.elements.len()).map(move |index| ElementRef { doc: self, index })
    }

    /// Finds the first element anywhere in the document matching `path`.
    ///
    /// A path is a chain of parent/child steps, e.g. `[Subject, NameID]`
    /// matches a `NameID` whose parent is a `Subject`, at any depth.
    #[must_use]
    pub fn find(&self, path: &[QName]) -> Option<ElementRef<'_>> {
        self.descendants().find(|el| el.matches_path(path))
    }

    /// Finds every element anywhere in the document matching `path`.
    #[must_use]
    pub fn find_all(&self, path: &[QName]) -> Vec<ElementRef<'_>> {
        self.descendants().filter(|el| el.matches_path(path)).collect()
    }

    /// Returns the number of elements in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false: a parsed document has at least a root element.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

fn push_element(
    elements: &mut Vec<Element>,
    parent: Option<usize>,
    namespace: Option<String>,
    start: &BytesStart<'_>,
) -> SamlResult<usize> {
    if parent.is_none() && !elements.is_empty() {
        return Err(SamlError::MalformedResponse(
            "more than one root element".to_string(),
        ));
    }

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }

    let index = elements.len();
    elements.push(Element {
        namespace,
        local_name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        attributes,
        text: String::new(),
        parent,
        children: Vec::new(),
    });
    if let Some(parent) = parent {
        elements[parent].children.push(index);
    }
    Ok(index)
}

/// Borrowed handle to one element of a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    doc: &'a Document,
    index: usize,
}

impl<'a> ElementRef<'a> {
    fn element(&self) -> &'a Element {
        &self.doc.elements[self.index]
    }

    /// Returns the resolved namespace URI, if the element is namespaced.
    #[must_use]
    pub fn namespace(&self) -> Option<&'a str> {
        self.element().namespace.as_deref()
    }

    /// Returns the local name, without prefix.
    #[must_use]
    pub fn local_name(&self) -> &'a str {
        &self.element().local_name
    }

    /// Returns true if the element has the given namespace and local name.
    #[must_use]
    pub fn is(&self, name: QName) -> bool {
        self.local_name() == name.local && self.namespace() == Some(name.namespace)
    }

    /// Returns an attribute value by its name as written, e.g. `Name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.element()
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the element's own text content, trimmed.
    #[must_use]
    pub fn text(&self) -> &'a str {
        &self.element().text
    }

    /// Returns the parent element.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.element().parent.map(|index| Self {
            doc: self.doc,
            index,
        })
    }

    /// Iterates over direct child elements.
    pub fn children(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let doc = self.doc;
        self.element()
            .children
            .iter()
            .map(move |&index| ElementRef { doc, index })
    }

    /// Iterates over direct child elements with the given name.
    pub fn children_named(&self, name: QName) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.children().filter(move |child| child.is(name))
    }

    /// Returns the first direct child element with the given name.
    #[must_use]
    pub fn child(&self, name: QName) -> Option<Self> {
        self.children_named(name).next()
    }

    fn matches_path(&self, path: &[QName]) -> bool {
        match path.split_last() {
            None => true,
            Some((last, rest)) => {
                self.is(*last)
                    && (rest.is_empty()
                        || self.parent().is_some_and(|parent| parent.matches_path(rest)))
            }
        }
    }
}
