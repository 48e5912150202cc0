//! XML parser that builds XmlDocument trees.

use quick_xml::Reader;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};

use super::{XmlAttribute, XmlChild, XmlDocument, XmlElement, XmlError, split_qualified};

/// Parse an XML part into a tree.
///
/// Comments, processing instructions, the XML declaration and DOCTYPE are
/// dropped; everything else, including whitespace-only text before the first
/// child of an element, is kept in document order.
///
/// # Example
///
/// ```rust
/// use docgen_docx::xml::parse;
///
/// let xml = parse(r#"<w:p xmlns:w="urn:w"><w:r><w:t>Hi</w:t></w:r></w:p>"#).unwrap();
/// assert_eq!(xml.root.name, "p");
/// assert_eq!(xml.root.prefix.as_deref(), Some("w"));
/// ```
pub fn parse(content: &str) -> Result<XmlDocument, XmlError> {
    let mut parser = XmlParser::new(content);
    parser.parse()
}

/// Internal parser state.
struct XmlParser<'a> {
    reader: Reader<&'a [u8]>,

    /// Stack of elements being built.
    stack: Vec<XmlElement>,
}

impl<'a> XmlParser<'a> {
    fn new(source: &'a str) -> Self {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        Self {
            reader,
            stack: Vec::new(),
        }
    }

    fn parse(&mut self) -> Result<XmlDocument, XmlError> {
        let mut root: Option<XmlElement> = None;

        loop {
            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    let element = self.handle_start(&e)?;
                    self.stack.push(element);
                }
                Ok(Event::End(e)) => {
                    let element = self.handle_end(&e)?;
                    self.attach(element, &mut root)?;
                }
                Ok(Event::Empty(e)) => {
                    let element = self.handle_start(&e)?;
                    self.attach(element, &mut root)?;
                }
                Ok(Event::Text(e)) => {
                    self.handle_text(&e)?;
                }
                Ok(Event::CData(e)) => {
                    self.handle_cdata(&e);
                }
                Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {}
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(XmlError::Syntax {
                        message: e.to_string(),
                        position: Some(self.reader.error_position()),
                    });
                }
            }
        }

        if let Some(node) = self.stack.last() {
            return Err(XmlError::UnexpectedEof {
                expected: format!("closing tag </{}>", node.qualified_name()),
            });
        }

        root.map(XmlDocument::new).ok_or(XmlError::EmptyDocument)
    }

    /// Add a finished element to its parent, or make it the root.
    fn attach(
        &mut self,
        element: XmlElement,
        root: &mut Option<XmlElement>,
    ) -> Result<(), XmlError> {
        match self.stack.last_mut() {
            Some(parent) => {
                parent.children.push(XmlChild::Element(element));
                Ok(())
            }
            None if root.is_some() => Err(XmlError::MultipleRoots),
            None => {
                *root = Some(element);
                Ok(())
            }
        }
    }

    fn handle_start(&self, e: &BytesStart<'_>) -> Result<XmlElement, XmlError> {
        let qualified = String::from_utf8_lossy(e.name().as_ref()).to_string();
        let (name, prefix) = split_qualified(&qualified);
        let attributes = self.parse_attributes(e)?;

        Ok(XmlElement {
            name,
            prefix,
            attributes,
            children: Vec::new(),
        })
    }

    fn handle_end(&mut self, e: &BytesEnd<'_>) -> Result<XmlElement, XmlError> {
        let end_name = String::from_utf8_lossy(e.name().as_ref()).to_string();

        let node = self.stack.pop().ok_or_else(|| XmlError::Syntax {
            message: format!("Unexpected closing tag </{}>", end_name),
            position: Some(self.reader.buffer_position()),
        })?;

        if node.qualified_name() != end_name {
            return Err(XmlError::MismatchedEndTag {
                expected: node.qualified_name(),
                found: end_name,
            });
        }

        Ok(node)
    }

    fn handle_text(&mut self, e: &BytesText<'_>) -> Result<(), XmlError> {
        let text = e.unescape().map_err(|err| XmlError::Syntax {
            message: format!("Invalid text content: {}", err),
            position: Some(self.reader.buffer_position()),
        })?;

        if let Some(node) = self.stack.last_mut() {
            // Skip whitespace-only text between elements
            if text.trim().is_empty() && !node.children.is_empty() {
                return Ok(());
            }
            node.children.push(XmlChild::Text(text.into_owned()));
        }
        Ok(())
    }

    fn handle_cdata(&mut self, e: &BytesCData<'_>) {
        let text = String::from_utf8_lossy(e.as_ref()).to_string();
        if let Some(node) = self.stack.last_mut() {
            node.children.push(XmlChild::Text(text));
        }
    }

    fn parse_attributes(&self, e: &BytesStart<'_>) -> Result<Vec<XmlAttribute>, XmlError> {
        let mut attributes = Vec::new();

        for attr_result in e.attributes() {
            let attr = attr_result?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let (name, prefix) = split_qualified(&key);

            let value = attr.unescape_value().map_err(|err| XmlError::Syntax {
                message: format!("Invalid attribute value: {}", err),
                position: Some(self.reader.buffer_position()),
            })?;

            attributes.push(XmlAttribute {
                name,
                prefix,
                value: value.into_owned(),
            });
        }

        Ok(attributes)
    }
}
