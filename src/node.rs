/*!
The tree itself: a `Document` node owning zero or more top-level children (of
which at most one is an `Element`, the document's root), and `Element` nodes
owning further children. Every node handle (`Document`, `Element`, `Text`,
`Comment`, `ProcessingInstruction`) is a thin, `Clone`-by-reference wrapper
around a shared [`NodeRef`] — cloning a handle never copies the subtree, it
just bumps a reference count.

Two things live on every node regardless of kind: a `modified` flag (spec
§4.4's Rule E/Rule R switch) and an optional `raw` capture of the exact bytes
the parser read for this node's own markup (not its children's). A
programmatically-constructed node has `raw: None` and `modified: true` from
birth, since there is no original text to reconstruct from.
*/

use crate::name::QName;
use crate::options::QuoteStyle;
use crate::rc_cell::{RcRefCell, WeakRefCell};
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

// ------------------------------------------------------------------------------------------------
// Crate-internal tree storage
// ------------------------------------------------------------------------------------------------

pub(crate) type NodeRef = RcRefCell<NodeData>;
pub(crate) type WeakNodeRef = WeakRefCell<NodeData>;

#[derive(Debug)]
pub(crate) struct NodeData {
    pub(crate) parent: Option<WeakNodeRef>,
    pub(crate) children: Vec<NodeRef>,
    pub(crate) modified: bool,
    /// The exact source text this node's own markup occupied (its start/end tags, or its full
    /// span for leaf kinds), not including children. `None` for nodes built programmatically.
    pub(crate) raw: Option<String>,
    pub(crate) kind: NodeKind,
}

#[derive(Debug)]
pub(crate) enum NodeKind {
    Document(DocumentData),
    Element(ElementData),
    Text(TextData),
    Comment(String),
    ProcessingInstruction { target: String, data: String },
    /// A `<!DOCTYPE ...>` declaration, carried verbatim. Schema/DTD content is a non-goal, so
    /// this has no structured fields and no mutation API — it only exists so a document that
    /// happens to have one still round-trips.
    Doctype(String),
}

#[derive(Debug, Default)]
pub(crate) struct DocumentData {
    pub(crate) version: Option<XmlVersion>,
    pub(crate) encoding: Option<String>,
    pub(crate) standalone: Option<bool>,
    /// Verbatim `<?xml ...?>` text, if the source had a declaration and it hasn't been touched.
    pub(crate) decl_raw: Option<String>,
    pub(crate) decl_modified: bool,
}

#[derive(Debug)]
pub(crate) struct ElementData {
    pub(crate) name: QName,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) self_closing: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct TextData {
    pub(crate) value: String,
    /// `true` if this text was (or, for a programmatically-built node, should be emitted as) a
    /// `<![CDATA[...]]>` section rather than escaped character data.
    pub(crate) is_cdata: bool,
}

impl NodeData {
    pub(crate) fn leaf(kind: NodeKind, raw: Option<String>) -> NodeRef {
        RcRefCell::new(NodeData {
            parent: None,
            children: Vec::new(),
            modified: raw.is_none(),
            raw,
            kind,
        })
    }
}

// ------------------------------------------------------------------------------------------------
// Public value types
// ------------------------------------------------------------------------------------------------

/// The XML declaration's `version` pseudo-attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XmlVersion {
    V1_0,
    V1_1,
}

impl Display for XmlVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            XmlVersion::V1_0 => write!(f, "1.0"),
            XmlVersion::V1_1 => write!(f, "1.1"),
        }
    }
}

impl XmlVersion {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s {
            "1.0" => Some(XmlVersion::V1_0),
            "1.1" => Some(XmlVersion::V1_1),
            _ => None,
        }
    }
}

/// A single `name="value"` pair on an element's start tag. Attributes are not tree nodes — they
/// have no children and no parent pointer of their own — and live directly in the owning
/// element's attribute list, in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub(crate) name: QName,
    pub(crate) value: String,
    /// Captured raw text between the quotes, used for Rule E when neither the attribute nor its
    /// owning element has been modified.
    pub(crate) raw_value: Option<String>,
    pub(crate) quote: QuoteStyle,
    /// Whitespace (usually a single space) immediately preceding this attribute in the tag.
    pub(crate) preceding_whitespace: String,
    pub(crate) modified: bool,
}

impl Attribute {
    /// Construct a new attribute with no captured original text; it always serializes via Rule R.
    pub fn new(name: QName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
            raw_value: None,
            quote: QuoteStyle::default(),
            preceding_whitespace: String::from(" "),
            modified: true,
        }
    }

    pub fn name(&self) -> &QName {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn quote_style(&self) -> QuoteStyle {
        self.quote
    }

    /// Replace the value. Invalidates the raw capture, so this attribute serializes via Rule R
    /// (in its original quote style, with the original preceding whitespace) from now on.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.raw_value = None;
        self.modified = true;
    }
}

// ------------------------------------------------------------------------------------------------
// Public node handles
// ------------------------------------------------------------------------------------------------

macro_rules! node_handle {
    ($name:ident) => {
        #[derive(Clone)]
        pub struct $name {
            pub(crate) inner: NodeRef,
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.inner == other.inner
            }
        }

        impl Eq for $name {}

        impl Debug for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.debug_struct(stringify!($name)).finish_non_exhaustive()
            }
        }
    };
}

node_handle!(Document);
node_handle!(Element);
node_handle!(Text);
node_handle!(Comment);
node_handle!(ProcessingInstruction);
node_handle!(Doctype);

impl Doctype {
    /// The declaration's exact source text, including the surrounding `<!DOCTYPE` and `>`.
    pub fn raw_text(&self) -> String {
        match &self.inner.borrow().kind {
            NodeKind::Doctype(s) => s.clone(),
            _ => unreachable!("Doctype handle always wraps NodeKind::Doctype"),
        }
    }
}

/// Any node that can appear as a child of a [`Document`] or [`Element`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(Text),
    Comment(Comment),
    ProcessingInstruction(ProcessingInstruction),
    Doctype(Doctype),
}

/// Either kind of node that can own children, returned by `parent()` accessors and accepted by
/// [`crate::editor::insert_before`]/[`crate::editor::insert_after`] as the attachment point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Parent {
    Document(Document),
    Element(Element),
}

impl Parent {
    pub(crate) fn node_ref(&self) -> &NodeRef {
        match self {
            Parent::Document(d) => &d.inner,
            Parent::Element(e) => &e.inner,
        }
    }
}

impl From<Document> for Parent {
    fn from(document: Document) -> Self {
        Parent::Document(document)
    }
}

impl From<&Document> for Parent {
    fn from(document: &Document) -> Self {
        Parent::Document(document.clone())
    }
}

impl From<Element> for Parent {
    fn from(element: Element) -> Self {
        Parent::Element(element)
    }
}

impl From<&Element> for Parent {
    fn from(element: &Element) -> Self {
        Parent::Element(element.clone())
    }
}

impl Node {
    pub(crate) fn from_ref(node_ref: NodeRef) -> Self {
        match &node_ref.borrow().kind {
            NodeKind::Element(_) => return Node::Element(Element { inner: node_ref.clone() }),
            NodeKind::Text(_) => return Node::Text(Text { inner: node_ref.clone() }),
            NodeKind::Comment(_) => return Node::Comment(Comment { inner: node_ref.clone() }),
            NodeKind::Doctype(_) => return Node::Doctype(Doctype { inner: node_ref.clone() }),
            NodeKind::ProcessingInstruction { .. } | NodeKind::Document(_) => {}
        }
        Node::ProcessingInstruction(ProcessingInstruction { inner: node_ref })
    }

    pub(crate) fn node_ref(&self) -> &NodeRef {
        match self {
            Node::Element(e) => &e.inner,
            Node::Text(t) => &t.inner,
            Node::Comment(c) => &c.inner,
            Node::ProcessingInstruction(p) => &p.inner,
            Node::Doctype(d) => &d.inner,
        }
    }

    /// `true` if this node (or, for an element, any node in its subtree) has been mutated since
    /// it was parsed, and therefore will be reconstructed (Rule R) rather than replayed verbatim
    /// (Rule E) on the next serialization.
    pub fn is_modified(&self) -> bool {
        self.node_ref().borrow().modified
    }

    pub fn parent(&self) -> Option<Parent> {
        parent_of(self.node_ref())
    }
}

pub(crate) fn parent_of(node_ref: &NodeRef) -> Option<Parent> {
    let parent_ref = node_ref.borrow().parent.as_ref()?.upgrade()?;
    let is_document = matches!(parent_ref.borrow().kind, NodeKind::Document(_));
    Some(if is_document {
        Parent::Document(Document { inner: parent_ref })
    } else {
        Parent::Element(Element { inner: parent_ref })
    })
}

pub(crate) fn children_of(node_ref: &NodeRef) -> Vec<Node> {
    node_ref
        .borrow()
        .children
        .iter()
        .cloned()
        .map(Node::from_ref)
        .collect()
}

/// Mark `node_ref`, and every strict ancestor up to (and including) the owning document, as
/// modified. Once any node in a subtree changes, every ancestor must reconstruct (Rule R) too,
/// since its captured raw text embeds the now-stale child text.
pub(crate) fn mark_modified(node_ref: &NodeRef) {
    let mut current = node_ref.clone();
    loop {
        current.borrow_mut_ref().modified = true;
        let next = current.borrow().parent.as_ref().and_then(|p| p.upgrade());
        match next {
            Some(p) => current = p,
            None => break,
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document with no declaration and no root element, for programmatic construction.
    /// A root element must be attached (see [`crate::editor::insert_before`]) before this
    /// document can be serialized into valid XML.
    pub fn new() -> Self {
        let inner = NodeData::leaf(NodeKind::Document(DocumentData::default()), None);
        inner.borrow_mut_ref().modified = true;
        Self { inner }
    }

    /// Parse a complete document from decoded text. Does not perform end-of-line normalization
    /// (XML §2.11) even though the XML recommendation calls for it, since doing so would corrupt
    /// the round-trip guarantee for any document containing `\r\n` or bare `\r`.
    pub fn parse_str(input: &str) -> crate::error::Result<Self> {
        crate::parser::parse_str(input, &crate::options::ParserOptions::default())
    }

    /// As [`Document::parse_str`], with explicit parser options.
    pub fn parse_str_with_options(
        input: &str,
        options: &crate::options::ParserOptions,
    ) -> crate::error::Result<Self> {
        crate::parser::parse_str(input, options)
    }

    /// Parse a complete document from raw bytes, sniffing byte-order-mark and any declared
    /// `encoding="..."` before decoding to text.
    pub fn parse_bytes(bytes: &[u8], options: &crate::options::ParserOptions) -> crate::error::Result<Self> {
        crate::parser::parse_bytes(bytes, options)
    }

    /// Serialize this document into a freshly allocated string.
    pub fn to_xml_string(&self, options: &crate::options::SerializerOptions) -> String {
        crate::serializer::to_xml_string(self, options)
    }

    /// Serialize this document into `out`.
    pub fn write_xml(
        &self,
        options: &crate::options::SerializerOptions,
        out: &mut impl std::fmt::Write,
    ) -> std::fmt::Result {
        crate::serializer::write_xml(self, options, out)
    }

    pub fn root_element(&self) -> Option<Element> {
        self.inner
            .borrow()
            .children
            .iter()
            .find(|c| matches!(c.borrow().kind, NodeKind::Element(_)))
            .cloned()
            .map(|r| Element { inner: r })
    }

    /// All top-level children in document order: comments, processing instructions, and the
    /// single root element — a document's prolog, root, and epilog content.
    pub fn children(&self) -> Vec<Node> {
        children_of(&self.inner)
    }

    pub fn xml_version(&self) -> Option<XmlVersion> {
        match &self.inner.borrow().kind {
            NodeKind::Document(d) => d.version,
            _ => unreachable!("Document handle always wraps NodeKind::Document"),
        }
    }

    pub fn encoding(&self) -> Option<String> {
        match &self.inner.borrow().kind {
            NodeKind::Document(d) => d.encoding.clone(),
            _ => unreachable!("Document handle always wraps NodeKind::Document"),
        }
    }

    pub fn standalone(&self) -> Option<bool> {
        match &self.inner.borrow().kind {
            NodeKind::Document(d) => d.standalone,
            _ => unreachable!("Document handle always wraps NodeKind::Document"),
        }
    }
}

/// Crate-internal access to the shared node handle behind any public node wrapper, so editor and
/// serializer code can operate generically without matching on [`Node`] first.
pub(crate) trait AsNodeRef {
    fn node_ref(&self) -> &NodeRef;
}

macro_rules! impl_as_node_ref {
    ($name:ident) => {
        impl AsNodeRef for $name {
            fn node_ref(&self) -> &NodeRef {
                &self.inner
            }
        }
    };
}

impl_as_node_ref!(Document);
impl_as_node_ref!(Element);
impl_as_node_ref!(Text);
impl_as_node_ref!(Comment);
impl_as_node_ref!(ProcessingInstruction);
impl_as_node_ref!(Doctype);

impl Element {
    /// Construct a new, unattached, self-closing element with no attributes and no children.
    pub fn new(name: QName) -> Self {
        Self {
            inner: NodeData::leaf(
                NodeKind::Element(ElementData {
                    name,
                    attributes: Vec::new(),
                    self_closing: true,
                }),
                None,
            ),
        }
    }

    pub fn name(&self) -> QName {
        match &self.inner.borrow().kind {
            NodeKind::Element(e) => e.name.clone(),
            _ => unreachable!("Element handle always wraps NodeKind::Element"),
        }
    }

    pub fn attributes(&self) -> Vec<Attribute> {
        match &self.inner.borrow().kind {
            NodeKind::Element(e) => e.attributes.clone(),
            _ => unreachable!("Element handle always wraps NodeKind::Element"),
        }
    }

    pub fn attribute(&self, local_name: &str) -> Option<String> {
        match &self.inner.borrow().kind {
            NodeKind::Element(e) => e
                .attributes
                .iter()
                .find(|a| a.name.local_name() == local_name)
                .map(|a| a.value.clone()),
            _ => unreachable!("Element handle always wraps NodeKind::Element"),
        }
    }

    pub fn children(&self) -> Vec<Node> {
        children_of(&self.inner)
    }

    pub fn parent(&self) -> Option<Parent> {
        parent_of(&self.inner)
    }

    /// Element children only, in document order — the common case for structural navigation,
    /// ignoring text/comment noise.
    pub fn child_elements(&self) -> Vec<Element> {
        self.inner
            .borrow()
            .children
            .iter()
            .filter(|c| matches!(c.borrow().kind, NodeKind::Element(_)))
            .cloned()
            .map(|r| Element { inner: r })
            .collect()
    }

    /// The element's text content: the concatenation of all direct `Text` children's decoded
    /// values, ignoring comments, processing instructions, and nested elements.
    pub fn text_content(&self) -> String {
        self.inner
            .borrow()
            .children
            .iter()
            .filter_map(|c| match &c.borrow().kind {
                NodeKind::Text(t) => Some(t.value.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Text {
    /// Construct a new, unattached text node. Attach it with
    /// [`crate::editor::insert_before`]/[`crate::editor::insert_after`].
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: NodeData::leaf(
                NodeKind::Text(TextData {
                    value: value.into(),
                    is_cdata: false,
                }),
                None,
            ),
        }
    }

    /// Construct a new, unattached `<![CDATA[...]]>` text node.
    pub fn new_cdata(value: impl Into<String>) -> Self {
        Self {
            inner: NodeData::leaf(
                NodeKind::Text(TextData {
                    value: value.into(),
                    is_cdata: true,
                }),
                None,
            ),
        }
    }

    pub fn value(&self) -> String {
        match &self.inner.borrow().kind {
            NodeKind::Text(t) => t.value.clone(),
            _ => unreachable!("Text handle always wraps NodeKind::Text"),
        }
    }

    /// `true` if the source (or, for a constructed node, the constructor) marked this as a
    /// `<![CDATA[...]]>` section rather than ordinary escaped character data.
    pub fn is_cdata(&self) -> bool {
        match &self.inner.borrow().kind {
            NodeKind::Text(t) => t.is_cdata,
            _ => unreachable!("Text handle always wraps NodeKind::Text"),
        }
    }

    pub fn is_whitespace_only(&self) -> bool {
        self.value().chars().all(crate::syntax::is_xml_whitespace)
    }

    pub fn parent(&self) -> Option<Parent> {
        parent_of(&self.inner)
    }

    /// Replace this node's character data, leaving its `is_cdata` flag untouched. Invalidates the
    /// raw capture and marks this node (and every ancestor) modified, so it serializes via Rule R.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let mut inner = self.inner.borrow_mut_ref();
        match &mut inner.kind {
            NodeKind::Text(t) => t.value = value.into(),
            _ => unreachable!("Text handle always wraps NodeKind::Text"),
        }
        inner.raw = None;
        drop(inner);
        mark_modified(&self.inner);
    }
}

impl Comment {
    /// Construct a new, unattached comment node.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: NodeData::leaf(NodeKind::Comment(value.into()), None),
        }
    }

    pub fn value(&self) -> String {
        match &self.inner.borrow().kind {
            NodeKind::Comment(v) => v.clone(),
            _ => unreachable!("Comment handle always wraps NodeKind::Comment"),
        }
    }

    pub fn parent(&self) -> Option<Parent> {
        parent_of(&self.inner)
    }

    /// Replace this comment's text. Invalidates the raw capture and marks this node (and every
    /// ancestor) modified, so it serializes via Rule R.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let mut inner = self.inner.borrow_mut_ref();
        match &mut inner.kind {
            NodeKind::Comment(v) => *v = value.into(),
            _ => unreachable!("Comment handle always wraps NodeKind::Comment"),
        }
        inner.raw = None;
        drop(inner);
        mark_modified(&self.inner);
    }
}

impl ProcessingInstruction {
    /// Construct a new, unattached processing instruction node.
    pub fn new(target: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            inner: NodeData::leaf(
                NodeKind::ProcessingInstruction {
                    target: target.into(),
                    data: data.into(),
                },
                None,
            ),
        }
    }

    pub fn target(&self) -> String {
        match &self.inner.borrow().kind {
            NodeKind::ProcessingInstruction { target, .. } => target.clone(),
            _ => unreachable!("ProcessingInstruction handle always wraps NodeKind::ProcessingInstruction"),
        }
    }

    pub fn data(&self) -> String {
        match &self.inner.borrow().kind {
            NodeKind::ProcessingInstruction { data, .. } => data.clone(),
            _ => unreachable!("ProcessingInstruction handle always wraps NodeKind::ProcessingInstruction"),
        }
    }

    pub fn parent(&self) -> Option<Parent> {
        parent_of(&self.inner)
    }

    /// Replace the target name. Invalidates the raw capture and marks this node (and every
    /// ancestor) modified, so it serializes via Rule R.
    pub fn set_target(&mut self, target: impl Into<String>) {
        let mut inner = self.inner.borrow_mut_ref();
        match &mut inner.kind {
            NodeKind::ProcessingInstruction { target: t, .. } => *t = target.into(),
            _ => unreachable!("ProcessingInstruction handle always wraps NodeKind::ProcessingInstruction"),
        }
        inner.raw = None;
        drop(inner);
        mark_modified(&self.inner);
    }

    /// Replace the instruction data. Invalidates the raw capture and marks this node (and every
    /// ancestor) modified, so it serializes via Rule R.
    pub fn set_data(&mut self, data: impl Into<String>) {
        let mut inner = self.inner.borrow_mut_ref();
        match &mut inner.kind {
            NodeKind::ProcessingInstruction { data: d, .. } => *d = data.into(),
            _ => unreachable!("ProcessingInstruction handle always wraps NodeKind::ProcessingInstruction"),
        }
        inner.raw = None;
        drop(inner);
        mark_modified(&self.inner);
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn new_element(local: &str) -> NodeRef {
        NodeData::leaf(
            NodeKind::Element(ElementData {
                name: QName::new(None, local.to_string()),
                attributes: Vec::new(),
                self_closing: true,
            }),
            None,
        )
    }

    #[test]
    fn test_mark_modified_propagates_to_ancestors() {
        let parent = new_element("root");
        let child = new_element("child");
        child.borrow_mut_ref().parent = Some(parent.downgrade());
        parent.borrow_mut_ref().children.push(child.clone());
        parent.borrow_mut_ref().modified = false;
        child.borrow_mut_ref().modified = false;

        mark_modified(&child);

        assert!(child.borrow().modified);
        assert!(parent.borrow().modified);
    }

    #[test]
    fn test_handle_equality_is_pointer_identity() {
        let a = Element {
            inner: new_element("a"),
        };
        let b = Element {
            inner: new_element("a"),
        };
        assert_ne!(a, b);
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn test_xml_version_display() {
        assert_eq!(XmlVersion::V1_0.to_string(), "1.0");
        assert_eq!(XmlVersion::parse("1.1"), Some(XmlVersion::V1_1));
        assert_eq!(XmlVersion::parse("2.0"), None);
    }

    #[test]
    fn test_text_set_value_invalidates_raw_and_marks_modified() {
        let inner = NodeData::leaf(
            NodeKind::Text(TextData {
                value: "old".to_string(),
                is_cdata: false,
            }),
            Some("old".to_string()),
        );
        inner.borrow_mut_ref().modified = false;
        let mut text = Text { inner };
        text.set_value("new");
        assert_eq!(text.value(), "new");
        assert!(text.inner.borrow().modified);
        assert!(text.inner.borrow().raw.is_none());
    }

    #[test]
    fn test_comment_set_value_invalidates_raw_and_marks_modified() {
        let inner = NodeData::leaf(NodeKind::Comment("old".to_string()), Some("old".to_string()));
        inner.borrow_mut_ref().modified = false;
        let mut comment = Comment { inner };
        comment.set_value("new");
        assert_eq!(comment.value(), "new");
        assert!(comment.inner.borrow().modified);
        assert!(comment.inner.borrow().raw.is_none());
    }

    #[test]
    fn test_pi_set_target_and_data_invalidate_raw_and_mark_modified() {
        let inner = NodeData::leaf(
            NodeKind::ProcessingInstruction {
                target: "old-target".to_string(),
                data: "old-data".to_string(),
            },
            Some("old-target old-data".to_string()),
        );
        inner.borrow_mut_ref().modified = false;
        let mut pi = ProcessingInstruction { inner };
        pi.set_target("new-target");
        assert_eq!(pi.target(), "new-target");
        assert!(pi.inner.borrow().modified);
        assert!(pi.inner.borrow().raw.is_none());

        pi.inner.borrow_mut_ref().modified = false;
        pi.set_data("new-data");
        assert_eq!(pi.data(), "new-data");
        assert!(pi.inner.borrow().modified);
    }

    #[test]
    fn test_text_set_value_propagates_modified_to_ancestor() {
        let parent = new_element("root");
        let child = NodeData::leaf(
            NodeKind::Text(TextData {
                value: "old".to_string(),
                is_cdata: false,
            }),
            Some("old".to_string()),
        );
        child.borrow_mut_ref().parent = Some(parent.downgrade());
        parent.borrow_mut_ref().children.push(child.clone());
        parent.borrow_mut_ref().modified = false;
        child.borrow_mut_ref().modified = false;

        let mut text = Text { inner: child };
        text.set_value("new");

        assert!(parent.borrow().modified);
    }
}
