//! XML text ⇄ attributed tree.
//!
//! The formats handled here carry all their data in attributes, so character
//! data, comments and processing instructions are dropped on read. The writer
//! emits a UTF-8 declaration, two-space indentation and self-closing tags for
//! childless elements.

use std::io::Write;

use cyco_core::{CycoError, CycoResult};
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, Event},
    Reader, Writer,
};

use crate::tree::{AttributedTree, RawNode, RawTree};

pub(crate) fn xml_error(err: impl std::fmt::Display) -> CycoError {
    CycoError::Xml(err.to_string())
}

/// Parse XML text into a raw tree rooted at the document element.
pub fn read_xml(text: &str) -> CycoResult<RawTree> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut stack: Vec<RawTree> = Vec::new();
    let mut root: Option<RawTree> = None;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(ref e) => stack.push(open_element(e)?),
            Event::Empty(ref e) => {
                let tree = open_element(e)?;
                attach(&mut stack, &mut root, tree)?;
            }
            Event::End(_) => {
                let tree = stack
                    .pop()
                    .ok_or_else(|| CycoError::Xml("closing tag without opening tag".into()))?;
                attach(&mut stack, &mut root, tree)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(CycoError::Xml(format!("element '{}' is never closed", open.tag)));
    }
    root.ok_or_else(|| CycoError::Xml("document has no root element".into()))
}

fn open_element(event: &BytesStart) -> CycoResult<RawTree> {
    let tag = std::str::from_utf8(event.name().as_ref())
        .map_err(xml_error)?
        .to_string();
    let mut tree = RawTree::new(tag);
    for attr in event.attributes() {
        let attr = attr.map_err(xml_error)?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(xml_error)?
            .to_string();
        let value = attr.unescape_value().map_err(xml_error)?.into_owned();
        tree.attributes.push((key, value));
    }
    Ok(tree)
}

fn attach(stack: &mut [RawTree], root: &mut Option<RawTree>, tree: RawTree) -> CycoResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(RawNode::Element(tree));
    } else if root.is_some() {
        return Err(CycoError::Xml(format!(
            "second root element '{}' after the document element",
            tree.tag
        )));
    } else {
        *root = Some(tree);
    }
    Ok(())
}

/// Write `tree` as a complete XML document.
pub fn write_xml<W: Write>(tree: &AttributedTree, out: W) -> CycoResult<()> {
    let mut writer = Writer::new_with_indent(out, b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;
    write_element(&mut writer, tree)?;
    let mut out = writer.into_inner();
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

pub fn xml_to_string(tree: &AttributedTree) -> CycoResult<String> {
    let mut buffer = Vec::new();
    write_xml(tree, &mut buffer)?;
    String::from_utf8(buffer).map_err(xml_error)
}

fn write_element<W: Write>(writer: &mut Writer<W>, tree: &AttributedTree) -> CycoResult<()> {
    let mut start = BytesStart::new(tree.tag.as_str());
    for (name, value) in &tree.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    if tree.children.is_empty() {
        writer.write_event(Event::Empty(start)).map_err(xml_error)?;
        return Ok(());
    }

    writer.write_event(Event::Start(start)).map_err(xml_error)?;
    for child in &tree.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(tree.tag.as_str())))
        .map_err(xml_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- curves of interest -->
<curvesInput xmlns="http://www.rte-france.com/dynawo">
  <curve model="NETWORK" variable="BUS_1_Upu_value"/>
  <curve model="GEN1" variable="generator_omegaPu"></curve>
</curvesInput>
"#;

    #[test]
    fn reads_nested_elements_in_order() {
        let tree = read_xml(SAMPLE).unwrap().normalize();
        assert_eq!(tree.tag, "curvesInput");
        assert_eq!(
            tree.attribute("xmlns"),
            Some("http://www.rte-france.com/dynawo")
        );
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[1].attribute("model"), Some("GEN1"));
    }

    #[test]
    fn unescapes_and_escapes_attribute_values() {
        let tree = read_xml(r#"<job name="A &amp; B &lt;1&gt;"/>"#)
            .unwrap()
            .normalize();
        assert_eq!(tree.attribute("name"), Some("A & B <1>"));

        let text = xml_to_string(&tree).unwrap();
        assert!(text.contains("A &amp; B &lt;1&gt;"));
        let again = read_xml(&text).unwrap().normalize();
        assert_eq!(again, tree);
    }

    #[test]
    fn writes_self_closing_leaves_and_indents_children() {
        let tree = AttributedTree::new("dyn:jobs")
            .with_attribute("xmlns:dyn", "http://www.rte-france.com/dynawo")
            .with_child(AttributedTree::new("dyn:job").with_attribute("name", "run"));
        let text = xml_to_string(&tree).unwrap();
        assert!(text.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(text.contains("\n  <dyn:job name=\"run\"/>"));
        assert!(text.trim_end().ends_with("</dyn:jobs>"));
    }

    #[test]
    fn rejects_broken_documents() {
        assert!(read_xml("<a><b></a>").is_err());
        assert!(read_xml("<a>").is_err());
        assert!(read_xml("").is_err());
        assert!(read_xml("<a/><b/>").is_err());
    }
}
