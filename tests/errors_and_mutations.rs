//! Error surfacing (each kind distinguishable without string matching) and
//! editor-level mutation behavior not already covered by the scenario tests.

use lossless_xml::convert::{as_comment, as_element};
use lossless_xml::editor::{detach, insert_before};
use lossless_xml::options::SerializerOptions;
use lossless_xml::{Document, Element, Error, Node, Parent, QName};

#[test]
fn malformed_mismatched_end_tag_is_distinguishable() {
    let err = Document::parse_str("<a></b>").unwrap_err();
    assert!(matches!(err, Error::Malformed { .. }));
}

#[test]
fn empty_input_is_distinguishable() {
    let err = Document::parse_str("").unwrap_err();
    assert!(matches!(err, Error::EmptyInput));
}

#[test]
fn add_attribute_rejects_duplicate() {
    let doc = Document::parse_str("<r x=\"1\"/>").unwrap();
    let root = doc.root_element().unwrap();
    let err = root
        .add_attribute(QName::parse_lenient("x"), "2")
        .unwrap_err();
    assert!(matches!(err, Error::InvalidXml { .. }));
    // The failed add must not have touched the existing value.
    assert_eq!(root.attribute("x"), Some("1".to_string()));
}

#[test]
fn insert_before_with_unrelated_reference_node_errs() {
    let doc = Document::parse_str("<r><a/></r>").unwrap();
    let other_doc = Document::parse_str("<s><b/></s>").unwrap();
    let root = doc.root_element().unwrap();
    let foreign = other_doc.root_element().unwrap().find_child("b").unwrap();

    let new_el = Element::new(QName::parse_lenient("c"));
    let err = insert_before(
        &root,
        Node::Element(new_el),
        Some(&Node::Element(foreign)),
        &SerializerOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidXml { .. }));
}

#[test]
fn set_value_on_attribute_invalidates_raw_capture_and_quote_stays() {
    let doc = Document::parse_str("<r a='x'/>").unwrap();
    let root = doc.root_element().unwrap();
    root.set_attribute(QName::parse_lenient("a"), "y");
    assert_eq!(
        doc.to_xml_string(&SerializerOptions::default()),
        "<r a='y'/>"
    );
}

#[test]
fn detach_unattached_node_is_a_no_op() {
    let standalone = Element::new(QName::parse_lenient("free"));
    detach(&Node::Element(standalone.clone()));
    assert!(standalone.parent().is_none());
}

#[test]
fn convert_helpers_round_trip_through_node_enum() {
    let doc = Document::parse_str("<r><!--c--><a/></r>").unwrap();
    let root = doc.root_element().unwrap();
    let children = root.children();

    let comment = as_comment(&children[0]).unwrap();
    assert_eq!(comment.value(), "c");
    assert!(as_element(&children[0]).is_err());

    let element = as_element(&children[1]).unwrap();
    assert_eq!(element.name().to_string(), "a");
}

#[test]
fn set_text_preserving_whitespace_keeps_indentation_siblings() {
    let doc = Document::parse_str("<r>\n  <a/>\n</r>").unwrap();
    let root = doc.root_element().unwrap();
    root.set_text_preserving_whitespace("hello");
    let output = doc.to_xml_string(&SerializerOptions::default());
    assert!(output.contains("hello"));
    assert!(output.contains("\n  <a/>\n"));
}

#[test]
fn set_text_preserving_whitespace_keeps_leading_and_trailing_runs() {
    let doc = Document::parse_str("<a> keep </a>").unwrap();
    let root = doc.root_element().unwrap();
    root.set_text_preserving_whitespace("new");
    assert_eq!(
        doc.to_xml_string(&SerializerOptions::default()),
        "<a> new </a>"
    );
}

#[test]
fn find_by_namespace_disambiguates_by_local_name() {
    let doc = Document::parse_str("<r xmlns:s=\"u\"><s:a/><s:b/></r>").unwrap();
    let root = doc.root_element().unwrap();
    let b = root.find_child("b").unwrap();
    assert_eq!(root.find_by_namespace("u", "b"), Some(b));
    assert!(root.find_by_namespace("u", "missing").is_none());
}

#[test]
fn programmatically_constructed_document_serializes_its_root() {
    let doc = Document::new();
    let root = Element::new(QName::parse_lenient("root"));
    insert_before(
        &doc,
        Node::Element(root.clone()),
        None,
        &SerializerOptions::default(),
    )
    .unwrap();
    assert_eq!(root.parent(), Some(Parent::Document(doc.clone())));
    assert_eq!(doc.root_element(), Some(root.clone()));

    insert_before(
        &root,
        Node::Element(Element::new(QName::parse_lenient("child"))),
        None,
        &SerializerOptions::default(),
    )
    .unwrap();
    assert!(root.find_child("child").is_some());
    assert_eq!(
        doc.to_xml_string(&SerializerOptions::default()),
        "<root><child/></root>"
    );
}

#[test]
fn mutating_text_comment_and_pi_nodes_invalidates_their_raw_capture() {
    let doc = Document::parse_str("<r><!--old--><?pi old?>old text</r>").unwrap();
    let root = doc.root_element().unwrap();
    let children = root.children();

    let mut comment = as_comment(&children[0]).unwrap();
    comment.set_value("new");

    let mut pi = lossless_xml::convert::as_processing_instruction(&children[1]).unwrap();
    pi.set_target("newpi");
    pi.set_data("newdata");

    let mut text = lossless_xml::convert::as_text(&children[2]).unwrap();
    text.set_value("new text");

    assert_eq!(
        doc.to_xml_string(&SerializerOptions::default()),
        "<r><!--new--><?newpi newdata?>new text</r>"
    );
}

#[test]
fn attaching_a_second_root_element_to_a_document_errs() {
    let doc = Document::new();
    insert_before(
        &doc,
        Node::Element(Element::new(QName::parse_lenient("root"))),
        None,
        &SerializerOptions::default(),
    )
    .unwrap();

    let second = Element::new(QName::parse_lenient("impostor"));
    let err = insert_before(&doc, Node::Element(second), None, &SerializerOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidXml { .. }));
    assert_eq!(doc.root_element().unwrap().name().to_string(), "root");
}
