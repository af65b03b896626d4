/*!
Safe casts from the generic [`crate::node::Node`] enum down to a specific node
type, for callers that already know (from context) what kind of node they're
holding and want the concrete type's methods rather than a `match`. Each
`as_*` function returns `Err(Error::InvalidXml)` when the node isn't of the
expected kind.
*/

use crate::error::{Error, Result};
use crate::node::{Comment, Doctype, Element, Node, ProcessingInstruction, Text};

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

/// Cast to [`Element`], or fail if `node` is some other kind.
pub fn as_element(node: &Node) -> Result<Element> {
    match node {
        Node::Element(e) => Ok(e.clone()),
        other => Err(wrong_kind("Element", other)),
    }
}

/// Cast to [`Text`], or fail if `node` is some other kind.
pub fn as_text(node: &Node) -> Result<Text> {
    match node {
        Node::Text(t) => Ok(t.clone()),
        other => Err(wrong_kind("Text", other)),
    }
}

/// Cast to [`Comment`], or fail if `node` is some other kind.
pub fn as_comment(node: &Node) -> Result<Comment> {
    match node {
        Node::Comment(c) => Ok(c.clone()),
        other => Err(wrong_kind("Comment", other)),
    }
}

/// Cast to [`ProcessingInstruction`], or fail if `node` is some other kind.
pub fn as_processing_instruction(node: &Node) -> Result<ProcessingInstruction> {
    match node {
        Node::ProcessingInstruction(p) => Ok(p.clone()),
        other => Err(wrong_kind("ProcessingInstruction", other)),
    }
}

/// Cast to [`Doctype`], or fail if `node` is some other kind.
pub fn as_doctype(node: &Node) -> Result<Doctype> {
    match node {
        Node::Doctype(d) => Ok(d.clone()),
        other => Err(wrong_kind("Doctype", other)),
    }
}

fn kind_name(node: &Node) -> &'static str {
    match node {
        Node::Element(_) => "Element",
        Node::Text(_) => "Text",
        Node::Comment(_) => "Comment",
        Node::ProcessingInstruction(_) => "ProcessingInstruction",
        Node::Doctype(_) => "Doctype",
    }
}

fn wrong_kind(expected: &str, actual: &Node) -> Error {
    warn!("expected a {} node but found a {}", expected, kind_name(actual));
    Error::invalid(format!(
        "expected a {} node but found a {}",
        expected,
        kind_name(actual)
    ))
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------
