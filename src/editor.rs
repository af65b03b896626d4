/*!
Navigation and mutation operations. Every mutation here ends by calling
[`crate::node::mark_modified`] on the node whose textual footprint changed,
which propagates `modified = true` up to the document root so the serializer
knows which ancestors must reconstruct (Rule R) rather than replay verbatim
(Rule E).

Indentation inference runs once, at insertion time, rather than at
serialization time: a newly inserted node's leading whitespace is decided the
moment it joins the tree, using whatever pattern its new siblings already
establish.
*/

use crate::error::{Error, Result};
use crate::node::{
    children_of, mark_modified, Attribute, Element, Node, NodeData, NodeKind, NodeRef, Parent,
    Text, TextData,
};
use crate::options::SerializerOptions;

const MSG_DUPLICATE_ATTRIBUTE: &str = "element already has an attribute with this name";

// ------------------------------------------------------------------------------------------------
// Navigation: find_child, find_children, descendants, find_by_namespace
// ------------------------------------------------------------------------------------------------

impl Element {
    /// The first direct child element with the given local name, ignoring namespace.
    pub fn find_child(&self, local_name: &str) -> Option<Element> {
        self.child_elements()
            .into_iter()
            .find(|e| e.name().local_name() == local_name)
    }

    /// All direct child elements with the given local name, in document order.
    pub fn find_children(&self, local_name: &str) -> Vec<Element> {
        self.child_elements()
            .into_iter()
            .filter(|e| e.name().local_name() == local_name)
            .collect()
    }

    /// As [`Element::find_child`], but fails with [`Error::NodeNotFound`] instead of returning
    /// `None` — for callers that already expect the child to exist and want a propagatable error
    /// rather than another `Option` to unwrap.
    pub fn require_child(&self, local_name: &str) -> Result<Element> {
        self.find_child(local_name)
            .ok_or_else(|| Error::not_found(local_name))
    }

    /// Every element in this element's subtree (not including itself), depth-first, in document
    /// order.
    pub fn descendants(&self) -> Vec<Element> {
        let mut out = Vec::new();
        collect_descendants(&self.inner, &mut out);
        out
    }

    /// The first descendant element (including this element) whose resolved namespace URI
    /// matches `namespace_uri` and whose local name matches `local_name`, found by depth-first
    /// search.
    pub fn find_by_namespace(&self, namespace_uri: &str, local_name: &str) -> Option<Element> {
        let matches = |e: &Element| {
            e.name().local_name() == local_name
                && resolve_namespace_uri(e).as_deref() == Some(namespace_uri)
        };
        if matches(self) {
            return Some(self.clone());
        }
        self.descendants().into_iter().find(matches)
    }
}

fn collect_descendants(node_ref: &NodeRef, out: &mut Vec<Element>) {
    for child in children_of(node_ref) {
        if let Node::Element(element) = child {
            out.push(element.clone());
            collect_descendants(&element.inner, out);
        }
    }
}

/// Resolve the namespace URI bound to `element`'s own prefix (or the default namespace, if
/// unprefixed) by walking `xmlns`/`xmlns:prefix` declarations up the ancestor chain. The two
/// reserved bindings (`xml`, `xmlns`) are hard-coded and never overridden.
pub fn resolve_namespace_uri(element: &Element) -> Option<String> {
    let prefix = element.name().prefix().map(str::to_string);
    resolve_prefix(element, prefix.as_deref())
}

/// Resolve an arbitrary prefix (not necessarily the element's own) in scope at `element`,
/// walking ancestors the same way [`resolve_namespace_uri`] does.
pub fn resolve_prefix(element: &Element, prefix: Option<&str>) -> Option<String> {
    match prefix {
        Some(crate::syntax::XML_NS_PREFIX) => return Some(crate::syntax::XML_NS_URI.to_string()),
        Some(crate::syntax::XMLNS_NS_PREFIX) => return Some(crate::syntax::XMLNS_NS_URI.to_string()),
        _ => {}
    }
    let declaration_name = match prefix {
        Some(p) => format!("{}:{}", crate::syntax::XMLNS_NS_PREFIX, p),
        None => crate::syntax::XMLNS_NS_PREFIX.to_string(),
    };
    let mut current = Some(element.clone());
    while let Some(e) = current {
        if let Some(uri) = e
            .attributes()
            .iter()
            .find(|a| a.name().to_string() == declaration_name)
            .map(|a| a.value().to_string())
        {
            return Some(uri);
        }
        current = match e.parent() {
            Some(Parent::Element(parent)) => Some(parent),
            _ => None,
        };
    }
    None
}

// ------------------------------------------------------------------------------------------------
// Mutation: text content
// ------------------------------------------------------------------------------------------------

impl Element {
    /// Replace this element's text content with a single `Text` child, removing any existing
    /// text/element/comment/PI children. Whitespace-only text siblings are *not* preserved — use
    /// [`Element::set_text_preserving_whitespace`] when the element mixes text with structural
    /// children and only the non-whitespace runs should change.
    pub fn set_text(&self, value: impl Into<String>) {
        self.inner.borrow_mut_ref().children.clear();
        let text_ref = NodeData::leaf(
            NodeKind::Text(TextData {
                value: value.into(),
                is_cdata: false,
            }),
            None,
        );
        text_ref.borrow_mut_ref().parent = Some(self.inner.downgrade());
        self.inner.borrow_mut_ref().children.push(text_ref);
        mark_modified(&self.inner);
    }

    /// Replace only the non-whitespace core of the first `Text` child with a non-whitespace
    /// core, leaving that node's leading and trailing whitespace runs — and every other child,
    /// including purely whitespace-only indentation nodes — untouched. If every `Text` child is
    /// whitespace-only, the new value is appended as a fresh trailing text node rather than
    /// disturbing the indentation. If there is no `Text` child at all, behaves like
    /// [`Element::set_text`].
    pub fn set_text_preserving_whitespace(&self, value: impl Into<String>) {
        let value = value.into();
        let children = self.inner.borrow().children.clone();

        let core_bearing = children.iter().find(|c| match &c.borrow().kind {
            NodeKind::Text(t) => !t.value.chars().all(crate::syntax::is_xml_whitespace),
            _ => false,
        });

        if let Some(node_ref) = core_bearing {
            let original = match &node_ref.borrow().kind {
                NodeKind::Text(t) => t.value.clone(),
                _ => unreachable!(),
            };
            let (leading, trailing) = split_whitespace_runs(&original);
            let mut text = Text {
                inner: node_ref.clone(),
            };
            text.set_value(format!("{}{}{}", leading, value, trailing));
            return;
        }

        let has_any_text_child = children
            .iter()
            .any(|c| matches!(c.borrow().kind, NodeKind::Text(_)));
        if !has_any_text_child {
            self.set_text(value);
            return;
        }

        let text_ref = NodeData::leaf(
            NodeKind::Text(TextData {
                value,
                is_cdata: false,
            }),
            None,
        );
        text_ref.borrow_mut_ref().parent = Some(self.inner.downgrade());
        self.inner.borrow_mut_ref().children.push(text_ref);
        mark_modified(&self.inner);
    }
}

// ------------------------------------------------------------------------------------------------
// Mutation: attributes
// ------------------------------------------------------------------------------------------------

impl Element {
    /// Set an attribute's value, creating it (with inferred whitespace and the serializer's
    /// default quote style) if it doesn't already exist, or updating it in place — preserving its
    /// position and quote style — if it does.
    pub fn set_attribute(&self, name: crate::name::QName, value: impl Into<String>) {
        let value = value.into();
        let mut data = self.inner.borrow_mut_ref();
        match data.kind {
            NodeKind::Element(ref mut element) => {
                if let Some(existing) = element.attributes.iter_mut().find(|a| a.name == name) {
                    existing.set_value(value);
                } else {
                    element.attributes.push(Attribute::new(name, value));
                }
            }
            _ => unreachable!("Element handle always wraps NodeKind::Element"),
        }
        drop(data);
        mark_modified(&self.inner);
    }

    /// As [`Element::set_attribute`], but fails with [`Error::InvalidXml`] if an attribute with
    /// this name is already present, rather than silently overwriting it.
    pub fn add_attribute(&self, name: crate::name::QName, value: impl Into<String>) -> Result<()> {
        if self.attribute(name.local_name()).is_some() {
            return Err(Error::invalid(MSG_DUPLICATE_ATTRIBUTE));
        }
        self.set_attribute(name, value);
        Ok(())
    }

    /// Remove an attribute by local name. Returns `true` if an attribute was actually removed.
    pub fn remove_attribute(&self, local_name: &str) -> bool {
        let removed = {
            let mut data = self.inner.borrow_mut_ref();
            match data.kind {
                NodeKind::Element(ref mut element) => {
                    let before = element.attributes.len();
                    element.attributes.retain(|a| a.name.local_name() != local_name);
                    element.attributes.len() != before
                }
                _ => unreachable!("Element handle always wraps NodeKind::Element"),
            }
        };
        if removed {
            mark_modified(&self.inner);
        }
        removed
    }
}

// ------------------------------------------------------------------------------------------------
// Mutation: tree structure
// ------------------------------------------------------------------------------------------------

/// Detach `node` from its current parent, if any. A no-op if the node is already unattached.
pub fn detach(node: &Node) {
    let node_ref = node.node_ref();
    let parent_ref = match node_ref.borrow().parent.as_ref().and_then(|p| p.upgrade()) {
        Some(p) => p,
        None => return,
    };
    parent_ref
        .borrow_mut_ref()
        .children
        .retain(|c| c != node_ref);
    node_ref.borrow_mut_ref().parent = None;
    mark_modified(&parent_ref);
}

/// Insert `new_node` as a child of `parent`, immediately before `reference`. If `reference` is
/// `None`, appends `new_node` as the last child. `new_node` is detached from its current parent
/// first, if it has one. Indentation is inferred from sibling context and spliced in as a
/// whitespace-only text node when the parent's existing children show an indentation pattern.
/// `parent` accepts either an [`Element`] or a [`crate::Document`] — attaching an `Element` as a
/// second root to a document that already has one fails with [`Error::InvalidXml`].
pub fn insert_before(
    parent: impl Into<Parent>,
    new_node: Node,
    reference: Option<&Node>,
    options: &SerializerOptions,
) -> Result<()> {
    let parent = parent.into();
    reject_second_root(&parent, &new_node)?;
    detach(&new_node);
    let index = match reference {
        Some(r) => parent
            .node_ref()
            .borrow()
            .children
            .iter()
            .position(|c| c == r.node_ref())
            .ok_or_else(|| Error::invalid("reference node is not a child of this parent"))?,
        None => parent.node_ref().borrow().children.len(),
    };
    splice_with_indent(&parent, index, new_node, options);
    Ok(())
}

/// Insert `new_node` as a child of `parent`, immediately after `reference`. If `reference` is
/// `None`, inserts at the front of the child list. See [`insert_before`] for the second-root
/// restriction when `parent` is a [`crate::Document`].
pub fn insert_after(
    parent: impl Into<Parent>,
    new_node: Node,
    reference: Option<&Node>,
    options: &SerializerOptions,
) -> Result<()> {
    let parent = parent.into();
    reject_second_root(&parent, &new_node)?;
    detach(&new_node);
    let index = match reference {
        Some(r) => {
            parent
                .node_ref()
                .borrow()
                .children
                .iter()
                .position(|c| c == r.node_ref())
                .ok_or_else(|| Error::invalid("reference node is not a child of this parent"))?
                + 1
        }
        None => 0,
    };
    splice_with_indent(&parent, index, new_node, options);
    Ok(())
}

fn reject_second_root(parent: &Parent, new_node: &Node) -> Result<()> {
    if let (Parent::Document(document), Node::Element(incoming)) = (parent, new_node) {
        if let Some(existing_root) = document.root_element() {
            if existing_root != *incoming {
                return Err(Error::invalid(
                    "a Document already has a root element",
                ));
            }
        }
    }
    Ok(())
}

/// Remove `node` from the tree entirely. Equivalent to [`detach`], provided separately under the
/// name callers reaching for an editor-style API tend to look for.
pub fn remove(node: &Node) {
    detach(node);
}

fn splice_with_indent(parent: &Parent, index: usize, new_node: Node, options: &SerializerOptions) {
    let parent_ref = parent.node_ref();
    let new_ref = new_node.node_ref().clone();
    new_ref.borrow_mut_ref().parent = Some(parent_ref.downgrade());

    let is_element_or_comment_or_pi = !matches!(new_node, Node::Text(_) | Node::Doctype(_));
    if let Parent::Element(element) = parent {
        if is_element_or_comment_or_pi {
            if let Some(indent) = infer_indent(element, options) {
                let indent_ref = NodeData::leaf(
                    NodeKind::Text(TextData {
                        value: indent,
                        is_cdata: false,
                    }),
                    None,
                );
                indent_ref.borrow_mut_ref().parent = Some(parent_ref.downgrade());
                parent_ref.borrow_mut_ref().children.insert(index, indent_ref);
                parent_ref.borrow_mut_ref().children.insert(index + 1, new_ref);
                mark_modified(parent_ref);
                return;
            }
        }
    }
    parent_ref.borrow_mut_ref().children.insert(index, new_ref);
    mark_modified(parent_ref);
}

/// Decide what leading whitespace a newly inserted structural child of `parent` should get. A
/// sibling's existing indentation pattern wins if there is one; otherwise, if `parent` itself is
/// indented relative to its own parent, extend that indentation by one configured unit. If
/// neither signal is present — `parent` has no indented children and is not itself indented —
/// the new child gets no leading whitespace, matching the unindented style already in use.
pub fn infer_indent(parent: &Element, options: &SerializerOptions) -> Option<String> {
    if let Some(existing) = find_sibling_indent(parent) {
        return Some(existing);
    }
    if let Some(Parent::Element(grandparent)) = parent.parent() {
        if let Some(parent_indent) = find_sibling_indent(&grandparent) {
            return Some(format!("{}{}", parent_indent, options.indent_unit));
        }
    }
    None
}

fn find_sibling_indent(parent: &Element) -> Option<String> {
    let children = parent.inner.borrow().children.clone();
    for child in &children {
        if let NodeKind::Text(t) = &child.borrow().kind {
            if t.value.starts_with('\n') && t.value.chars().all(crate::syntax::is_xml_whitespace) {
                let indent = t.value.rsplit('\n').next().unwrap_or("").to_string();
                return Some(format!("\n{}", indent));
            }
        }
    }
    None
}

/// Split `s` into its leading and trailing whitespace runs, assuming it has a non-whitespace
/// core somewhere in the middle (callers only invoke this once they've confirmed one exists).
fn split_whitespace_runs(s: &str) -> (String, String) {
    let after_leading = s.trim_start_matches(crate::syntax::is_xml_whitespace);
    let leading = &s[..s.len() - after_leading.len()];
    let before_trailing = after_leading.trim_end_matches(crate::syntax::is_xml_whitespace);
    let trailing = &after_leading[before_trailing.len()..];
    (leading.to_string(), trailing.to_string())
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------
