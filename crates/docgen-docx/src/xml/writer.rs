//! Serialization of XmlDocument trees.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::{XmlChild, XmlDocument, XmlElement, XmlError};

/// Serialize a part, prefixed with the standalone XML declaration Word writes.
pub fn write(document: &XmlDocument) -> Result<Vec<u8>, XmlError> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    writer.get_mut().write_all(b"\r\n")?;
    write_node(&mut writer, &document.root)?;
    Ok(writer.into_inner())
}

/// Serialize a single element without a declaration.
pub fn write_element(element: &XmlElement) -> Result<String, XmlError> {
    let mut writer = Writer::new(Vec::new());
    write_node(&mut writer, element)?;
    String::from_utf8(writer.into_inner()).map_err(|e| XmlError::Write(e.to_string()))
}

fn write_node<W: Write>(writer: &mut Writer<W>, element: &XmlElement) -> Result<(), XmlError> {
    let name = element.qualified_name();
    let mut start = BytesStart::new(name.as_str());
    for attr in &element.attributes {
        let key = attr.qualified_name();
        start.push_attribute((key.as_str(), attr.value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            XmlChild::Element(e) => write_node(writer, e)?,
            XmlChild::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
    Ok(())
}
