//! For every input in this corpus, parsing then serializing with default
//! options must reproduce the input byte-for-byte.

use lossless_xml::options::SerializerOptions;
use lossless_xml::Document;

fn assert_round_trips(input: &str) {
    let doc = Document::parse_str(input).unwrap_or_else(|e| panic!("{input:?} failed to parse: {e}"));
    let output = doc.to_xml_string(&SerializerOptions::default());
    assert_eq!(output, input, "round-trip mismatch for {input:?}");
}

#[test]
fn predefined_entities() {
    assert_round_trips("<r>&lt;&gt;&amp;&quot;&apos;</r>");
}

#[test]
fn numeric_character_references_decimal_and_hex() {
    assert_round_trips(r#"<r attr="line1&#10;line2">&#65;&#x41;</r>"#);
}

#[test]
fn cdata_with_angle_bracket_and_ampersand() {
    assert_round_trips("<r><![CDATA[x < y & z]]></r>");
}

#[test]
fn multi_line_comment() {
    assert_round_trips("<r><!-- line one\n   line two --></r>");
}

#[test]
fn processing_instruction() {
    assert_round_trips("<?xml-stylesheet type=\"text/xsl\" href=\"x.xsl\"?>\n<r/>");
}

#[test]
fn doctype_system_form() {
    assert_round_trips("<!DOCTYPE r SYSTEM \"r.dtd\">\n<r/>");
}

#[test]
fn doctype_public_form() {
    assert_round_trips(
        "<!DOCTYPE r PUBLIC \"-//Example//DTD R 1.0//EN\" \"http://example.org/r.dtd\">\n<r/>",
    );
}

#[test]
fn doctype_with_internal_subset() {
    assert_round_trips("<!DOCTYPE r [\n<!ELEMENT r (#PCDATA)>\n]>\n<r/>");
}

#[test]
fn default_namespace_overridden_at_depth() {
    assert_round_trips(
        "<r xmlns=\"http://example/default\"><a xmlns=\"http://example/inner\"><b/></a></r>",
    );
}

#[test]
fn prefixed_namespace_declared_at_various_depths() {
    assert_round_trips(
        "<r xmlns:x=\"http://example/x\"><x:a><y xmlns:x=\"http://example/y\"><x:b/></y></x:a></r>",
    );
}

#[test]
fn empty_attribute_value() {
    assert_round_trips(r#"<r a=""/>"#);
}

#[test]
fn mixed_attribute_quote_styles_in_one_element() {
    assert_round_trips(r#"<r a='1' b="2" c='3'/>"#);
}

#[test]
fn attribute_order_preserved() {
    assert_round_trips(r#"<r z="1" a="2" m="3"/>"#);
}

#[test]
fn whitespace_between_siblings_preserved() {
    assert_round_trips("<r>\n  <a/>\n  <b/>\n</r>\n");
}

#[test]
fn declaration_with_all_three_pseudo_attributes() {
    assert_round_trips("<?xml version=\"1.1\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<r/>");
}

#[test]
fn text_with_unknown_entity_left_literal() {
    assert_round_trips("<r>&nbsp;</r>");
}

#[test]
fn nested_elements_with_mixed_content() {
    assert_round_trips("<r>before<a>inside</a>after<!--note--><b/></r>");
}
