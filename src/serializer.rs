/*!
Rule E / Rule R serialization: an unmodified node is replayed from its
captured raw span verbatim (Rule E); a modified node is reconstructed from
its structured fields, recursing into each child so that only the textual
footprint of what actually changed differs from the original (Rule R). The
two rules are chosen per node, not per document, so a single attribute edit
deep in a large tree reconstructs only the path from that attribute's element
up to the document root.
*/

use crate::node::{Attribute, Document, NodeKind, NodeRef, TextData};
use crate::options::SerializerOptions;
use crate::syntax::*;
use crate::text;
use std::fmt::{Result as FmtResult, Write};

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

/// Serialize `document` into a freshly allocated `String`.
pub fn to_xml_string(document: &Document, options: &SerializerOptions) -> String {
    let mut out = String::new();
    write_xml(document, options, &mut out).expect("writing to a String never fails");
    out
}

/// Serialize `document` into `out`.
pub fn write_xml(document: &Document, options: &SerializerOptions, out: &mut impl Write) -> FmtResult {
    write_decl(&document.inner, options, out)?;
    let children = document.inner.borrow().children.clone();
    for child in &children {
        write_node(child, options, out)?;
    }
    Ok(())
}

// ------------------------------------------------------------------------------------------------
// Declaration
// ------------------------------------------------------------------------------------------------

fn write_decl(doc_ref: &NodeRef, options: &SerializerOptions, out: &mut impl Write) -> FmtResult {
    let (decl_modified, decl_raw, version, encoding, standalone) = match &doc_ref.borrow().kind {
        NodeKind::Document(d) => (
            d.decl_modified || options.pretty_print,
            d.decl_raw.clone(),
            d.version,
            d.encoding.clone(),
            d.standalone,
        ),
        _ => unreachable!("a Document handle always wraps NodeKind::Document"),
    };

    if !decl_modified {
        if let Some(raw) = decl_raw {
            out.write_str(&raw)?;
        }
        return Ok(());
    }

    if version.is_none() && encoding.is_none() && standalone.is_none() {
        return Ok(());
    }
    out.write_str(XML_DECL_START)?;
    if let Some(v) = version {
        write!(out, " version=\"{}\"", v)?;
    }
    if let Some(e) = &encoding {
        write!(out, " encoding=\"{}\"", e)?;
    }
    if let Some(s) = standalone {
        write!(out, " standalone=\"{}\"", if s { "yes" } else { "no" })?;
    }
    out.write_str(XML_DECL_END)
}

// ------------------------------------------------------------------------------------------------
// Nodes
// ------------------------------------------------------------------------------------------------

fn write_node(node_ref: &NodeRef, options: &SerializerOptions, out: &mut impl Write) -> FmtResult {
    let modified = node_ref.borrow().modified || options.pretty_print;
    if !modified {
        if let Some(raw) = node_ref.borrow().raw.clone() {
            return out.write_str(&raw);
        }
        warn!("node has modified=false but no captured raw text; reconstructing instead");
    }

    let kind_tag = node_kind_tag(node_ref);
    match kind_tag {
        NodeKindTag::Element => write_element(node_ref, options, out),
        NodeKindTag::Text => write_text(node_ref, out),
        NodeKindTag::Comment => write_comment(node_ref, out),
        NodeKindTag::ProcessingInstruction => write_pi(node_ref, out),
        NodeKindTag::Doctype => {
            let raw = match &node_ref.borrow().kind {
                NodeKind::Doctype(s) => s.clone(),
                _ => unreachable!(),
            };
            out.write_str(&raw)
        }
    }
}

enum NodeKindTag {
    Element,
    Text,
    Comment,
    ProcessingInstruction,
    Doctype,
}

fn node_kind_tag(node_ref: &NodeRef) -> NodeKindTag {
    match &node_ref.borrow().kind {
        NodeKind::Element(_) => NodeKindTag::Element,
        NodeKind::Text(_) => NodeKindTag::Text,
        NodeKind::Comment(_) => NodeKindTag::Comment,
        NodeKind::ProcessingInstruction { .. } => NodeKindTag::ProcessingInstruction,
        NodeKind::Doctype(_) => NodeKindTag::Doctype,
        NodeKind::Document(_) => unreachable!("a Document cannot appear as a child node"),
    }
}

fn write_element(node_ref: &NodeRef, options: &SerializerOptions, out: &mut impl Write) -> FmtResult {
    let (name, attributes, self_closing) = match &node_ref.borrow().kind {
        NodeKind::Element(e) => (e.name.clone(), e.attributes.clone(), e.self_closing),
        _ => unreachable!(),
    };

    write!(out, "{}{}", XML_ELEMENT_START_START, name)?;
    for attribute in &attributes {
        write_attribute(attribute, options, out)?;
    }

    if self_closing {
        return out.write_str(XML_ELEMENT_SELF_CLOSE);
    }

    out.write_str(XML_ELEMENT_END_END)?;
    let children = node_ref.borrow().children.clone();
    for child in &children {
        write_node(child, options, out)?;
    }
    write!(out, "{}{}{}", XML_ELEMENT_END_START, name, XML_ELEMENT_END_END)
}

fn write_attribute(attribute: &Attribute, options: &SerializerOptions, out: &mut impl Write) -> FmtResult {
    out.write_str(&attribute.preceding_whitespace)?;
    write!(out, "{}=", attribute.name)?;

    let quote = if attribute.modified {
        options.default_quote_style
    } else {
        attribute.quote
    };
    out.write_char(quote.as_char())?;
    if !attribute.modified {
        if let Some(raw) = &attribute.raw_value {
            out.write_str(raw)?;
        } else {
            out.write_str(&text::encode(&attribute.value, Some(quote.into())))?;
        }
    } else {
        out.write_str(&text::encode(&attribute.value, Some(quote.into())))?;
    }
    out.write_char(quote.as_char())
}

fn write_text(node_ref: &NodeRef, out: &mut impl Write) -> FmtResult {
    let data: TextData = match &node_ref.borrow().kind {
        NodeKind::Text(t) => t.clone(),
        _ => unreachable!(),
    };
    if data.is_cdata {
        write!(out, "{}{}{}", XML_CDATA_START, data.value, XML_CDATA_END)
    } else {
        out.write_str(&text::encode(&data.value, None))
    }
}

fn write_comment(node_ref: &NodeRef, out: &mut impl Write) -> FmtResult {
    let value = match &node_ref.borrow().kind {
        NodeKind::Comment(c) => c.clone(),
        _ => unreachable!(),
    };
    write!(out, "{}{}{}", XML_COMMENT_START, value, XML_COMMENT_END)
}

fn write_pi(node_ref: &NodeRef, out: &mut impl Write) -> FmtResult {
    let (target, data) = match &node_ref.borrow().kind {
        NodeKind::ProcessingInstruction { target, data } => (target.clone(), data.clone()),
        _ => unreachable!(),
    };
    if data.is_empty() {
        write!(out, "{}{}{}", XML_PI_START, target, XML_PI_END)
    } else {
        write!(out, "{}{} {}{}", XML_PI_START, target, data, XML_PI_END)
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParserOptions;
    use crate::parser::parse_str;

    fn round_trip(input: &str) -> String {
        let doc = parse_str(input, &ParserOptions::default()).unwrap();
        to_xml_string(&doc, &SerializerOptions::default())
    }

    #[test]
    fn test_round_trip_simple_element() {
        assert_eq!(round_trip("<root/>"), "<root/>");
    }

    #[test]
    fn test_round_trip_preserves_attribute_quote_style() {
        let input = "<a x='1' y=\"2\"/>";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn test_round_trip_preserves_whitespace_between_siblings() {
        let input = "<a>\n  <b/>\n  <c/>\n</a>";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn test_round_trip_declaration_and_comment() {
        let input = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- note --><a/>";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn test_round_trip_cdata_section() {
        let input = "<a><![CDATA[x < y & z]]></a>";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn test_round_trip_processing_instruction_after_root() {
        let input = "<a/><?target data?>";
        assert_eq!(round_trip(input), input);
    }
}
