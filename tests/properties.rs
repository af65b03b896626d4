//! The remaining universal properties: localized change, decode idempotence,
//! encode/decode inverse, parent/child consistency, and modification-flag
//! sufficiency.

use lossless_xml::editor::{insert_after, remove};
use lossless_xml::options::SerializerOptions;
use lossless_xml::{Document, Element, Node, Parent, QName};

#[test]
fn localized_change_leaves_surrounding_bytes_untouched() {
    let input = "<?xml version=\"1.0\"?>\n<!-- hdr -->\n<r>\n  <a>1</a>\n  <b>2</b>\n</r>";
    let doc = Document::parse_str(input).unwrap();
    let root = doc.root_element().unwrap();
    let a = root.find_child("a").unwrap();
    a.set_text("11");

    let output = doc.to_xml_string(&SerializerOptions::default());
    let expected = "<?xml version=\"1.0\"?>\n<!-- hdr -->\n<r>\n  <a>11</a>\n  <b>2</b>\n</r>";
    assert_eq!(output, expected);
}

#[test]
fn localized_change_to_deeply_nested_attribute_only_disturbs_its_own_path() {
    let input = "<r>\n  <a>\n    <b x=\"1\" y=\"2\"/>\n  </a>\n  <c>unchanged</c>\n</r>";
    let doc = Document::parse_str(input).unwrap();
    let root = doc.root_element().unwrap();
    let b = root.find_child("a").unwrap().find_child("b").unwrap();
    b.set_attribute(QName::parse_lenient("y"), "99");

    let output = doc.to_xml_string(&SerializerOptions::default());
    assert_eq!(
        output,
        "<r>\n  <a>\n    <b x=\"1\" y=\"99\"/>\n  </a>\n  <c>unchanged</c>\n</r>"
    );
}

#[test]
fn parent_child_consistency_after_editor_operations() {
    let doc = Document::parse_str("<r><a/><b/><c/></r>").unwrap();
    let root = doc.root_element().unwrap();
    let b = root.find_child("b").unwrap();

    let new_el = Element::new(QName::parse_lenient("d"));
    insert_after(
        &root,
        Node::Element(new_el.clone()),
        Some(&Node::Element(b.clone())),
        &SerializerOptions::default(),
    )
    .unwrap();
    remove(&Node::Element(root.find_child("a").unwrap()));

    for child in root.children() {
        match child.parent() {
            Some(Parent::Element(p)) => assert_eq!(p, root),
            other => panic!("expected an Element parent, got {other:?}"),
        }
    }
    let names: Vec<String> = root
        .child_elements()
        .iter()
        .map(|e| e.name().to_string())
        .collect();
    assert_eq!(names, vec!["b", "d", "c"]);
}

#[test]
fn modification_flag_sufficiency_unmodified_document_serializes_to_input() {
    let input = "<r a=\"1\"><!-- note --><b/>text<c/></r>";
    let doc = Document::parse_str(input).unwrap();
    // No mutation performed.
    assert_eq!(doc.to_xml_string(&SerializerOptions::default()), input);
}

#[test]
fn modification_flag_sufficiency_is_not_fooled_by_a_read_only_traversal() {
    let input = "<r><a/><b/></r>";
    let doc = Document::parse_str(input).unwrap();
    let root = doc.root_element().unwrap();
    let _ = root.descendants();
    let _ = root.attributes();
    let _ = root.text_content();
    assert_eq!(doc.to_xml_string(&SerializerOptions::default()), input);
}
