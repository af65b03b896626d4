/*!
A hand-written, single-pass recursive-descent scanner over `&str`. Every node
it produces captures its own exact source span in [`NodeData::raw`], which is
what lets the serializer replay an unmodified subtree byte-for-byte (Rule E)
instead of re-encoding it.

This deliberately does not build on a streaming XML crate: a streaming parser
throws away the whitespace and quoting choices this crate exists to keep, so
the scanner re-derives span boundaries itself instead.
*/

use crate::encoding;
use crate::error::{Error, Result};
use crate::name::QName;
use crate::node::{
    Attribute, Document, DocumentData, ElementData, NodeData, NodeKind, NodeRef, TextData,
    XmlVersion,
};
use crate::options::{ParserOptions, QuoteStyle};
use crate::syntax::*;
use crate::text;
use std::str::FromStr;

// ------------------------------------------------------------------------------------------------
// Scanner
// ------------------------------------------------------------------------------------------------

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn starts_with(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if pred(c) {
                self.advance(c.len_utf8());
            } else {
                break;
            }
        }
        &self.input[start..self.pos]
    }

    fn expect(&mut self, s: &str) -> Result<()> {
        if self.starts_with(s) {
            self.advance(s.len());
            Ok(())
        } else {
            Err(Error::malformed(self.pos, format!("expected '{}'", s)))
        }
    }

    fn find(&self, s: &str) -> Option<usize> {
        self.rest().find(s)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '.' || c == XML_NS_SEPARATOR
}

fn parse_name(scanner: &mut Scanner<'_>) -> Result<QName> {
    let pos = scanner.pos;
    let text = scanner.take_while(is_name_char);
    if text.is_empty() {
        return Err(Error::malformed(pos, "expected a name"));
    }
    QName::from_str(text).map_err(|e| Error::malformed(pos, e.to_string()))
}

// ------------------------------------------------------------------------------------------------
// Entry points
// ------------------------------------------------------------------------------------------------

/// Parse a complete XML document from decoded text.
pub fn parse_str(input: &str, options: &ParserOptions) -> Result<Document> {
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }

    let doc_ref = NodeData::leaf(NodeKind::Document(DocumentData::default()), None);
    doc_ref.borrow_mut_ref().modified = false;

    let mut scanner = Scanner::new(input);

    if looks_like_xml_decl(&scanner) {
        parse_decl(&mut scanner, &doc_ref)?;
    }

    parse_misc_sequence(&mut scanner, &doc_ref, options, true)?;

    if scanner.eof() {
        return Err(Error::malformed(scanner.pos, "document has no root element"));
    }
    let root = parse_element(&mut scanner)?;
    attach_child(&doc_ref, root);

    parse_misc_sequence(&mut scanner, &doc_ref, options, false)?;

    if !scanner.eof() {
        return Err(Error::malformed(
            scanner.pos,
            "trailing content after root element",
        ));
    }

    Ok(Document { inner: doc_ref })
}

/// Parse a complete XML document from raw bytes, detecting byte-order-mark and declared
/// encoding before decoding to text.
pub fn parse_bytes(bytes: &[u8], options: &ParserOptions) -> Result<Document> {
    let text = encoding::resolve_and_decode(bytes, &options.default_encoding)?;
    parse_str(&text, options)
}

/// `<?xml ...?>` is a declaration only when the name immediately following `<?` is exactly
/// `xml`; `<?xml-stylesheet ...?>` has a PI target that merely starts with those four letters and
/// must be parsed as an ordinary processing instruction instead.
fn looks_like_xml_decl(scanner: &Scanner<'_>) -> bool {
    if !scanner.starts_with(XML_DECL_START) {
        return false;
    }
    match scanner.rest()[XML_DECL_START.len()..].chars().next() {
        Some(c) => is_xml_whitespace(c) || c == '?',
        None => true,
    }
}

fn attach_child(parent: &NodeRef, child: NodeRef) {
    child.borrow_mut_ref().parent = Some(parent.downgrade());
    parent.borrow_mut_ref().children.push(child);
}

// ------------------------------------------------------------------------------------------------
// XML declaration
// ------------------------------------------------------------------------------------------------

fn parse_decl(scanner: &mut Scanner<'_>, doc_ref: &NodeRef) -> Result<()> {
    let start = scanner.pos;
    scanner.expect(XML_DECL_START)?;
    let body_start = scanner.pos;
    let end_rel = scanner
        .find(XML_DECL_END)
        .ok_or_else(|| Error::malformed(scanner.pos, "unterminated XML declaration"))?;
    let body = &scanner.input[body_start..body_start + end_rel];
    scanner.advance(end_rel + XML_DECL_END.len());
    let raw = scanner.input[start..scanner.pos].to_string();

    let mut data = DocumentData::default();
    for (key, value) in parse_pseudo_attributes(body)? {
        match key.as_str() {
            "version" => data.version = XmlVersion::parse(&value),
            "encoding" => data.encoding = Some(value),
            "standalone" => data.standalone = Some(value == "yes"),
            _ => warn!("ignoring unrecognized XML declaration pseudo-attribute '{}'", key),
        }
    }
    data.decl_raw = Some(raw);
    data.decl_modified = false;

    if let NodeKind::Document(existing) = &mut doc_ref.borrow_mut_ref().kind {
        *existing = data;
    }
    Ok(())
}

fn parse_pseudo_attributes(body: &str) -> Result<Vec<(String, String)>> {
    let mut scanner = Scanner::new(body);
    let mut out = Vec::new();
    loop {
        scanner.take_while(is_xml_whitespace);
        if scanner.eof() {
            break;
        }
        let name = scanner.take_while(is_name_char);
        if name.is_empty() {
            return Err(Error::malformed(scanner.pos, "expected pseudo-attribute name"));
        }
        scanner.take_while(is_xml_whitespace);
        scanner.expect("=")?;
        scanner.take_while(is_xml_whitespace);
        let quote = scanner
            .peek_char()
            .filter(|&c| c == '"' || c == '\'')
            .ok_or_else(|| Error::malformed(scanner.pos, "expected quote"))?;
        scanner.advance(1);
        let end_rel = scanner
            .rest()
            .find(quote)
            .ok_or_else(|| Error::malformed(scanner.pos, "unterminated pseudo-attribute value"))?;
        let value = scanner.input[scanner.pos..scanner.pos + end_rel].to_string();
        scanner.advance(end_rel + 1);
        out.push((name.to_string(), value));
    }
    Ok(out)
}

// ------------------------------------------------------------------------------------------------
// Misc content: whitespace, comments, PIs, doctype
// ------------------------------------------------------------------------------------------------

fn parse_misc_sequence(
    scanner: &mut Scanner<'_>,
    doc_ref: &NodeRef,
    options: &ParserOptions,
    before_root: bool,
) -> Result<()> {
    loop {
        if scanner.eof() {
            break;
        }
        if let Some(ws) = take_whitespace_node(scanner) {
            attach_child(doc_ref, ws);
            continue;
        }
        if scanner.starts_with(XML_COMMENT_START) {
            let comment = parse_comment(scanner)?;
            if options.preserve_comments {
                attach_child(doc_ref, comment);
            }
            continue;
        }
        if before_root && scanner.starts_with(XML_DOCTYPE_START) {
            attach_child(doc_ref, parse_doctype(scanner)?);
            continue;
        }
        if scanner.starts_with(XML_PI_START) {
            attach_child(doc_ref, parse_pi(scanner)?);
            continue;
        }
        break;
    }
    Ok(())
}

fn take_whitespace_node(scanner: &mut Scanner<'_>) -> Option<NodeRef> {
    let start = scanner.pos;
    let ws = scanner.take_while(is_xml_whitespace).to_string();
    if ws.is_empty() {
        None
    } else {
        let _ = start;
        Some(NodeData::leaf(
            NodeKind::Text(TextData {
                value: ws.clone(),
                is_cdata: false,
            }),
            Some(ws),
        ))
    }
}

fn parse_comment(scanner: &mut Scanner<'_>) -> Result<NodeRef> {
    let start = scanner.pos;
    scanner.expect(XML_COMMENT_START)?;
    let end_rel = scanner
        .find(XML_COMMENT_END)
        .ok_or_else(|| Error::malformed(scanner.pos, "unterminated comment"))?;
    let body = scanner.input[scanner.pos..scanner.pos + end_rel].to_string();
    scanner.advance(end_rel + XML_COMMENT_END.len());
    let raw = scanner.input[start..scanner.pos].to_string();
    Ok(NodeData::leaf(NodeKind::Comment(body), Some(raw)))
}

fn parse_pi(scanner: &mut Scanner<'_>) -> Result<NodeRef> {
    let start = scanner.pos;
    scanner.expect(XML_PI_START)?;
    let target = parse_name(scanner)?.to_string();
    scanner.take_while(is_xml_whitespace);
    let end_rel = scanner
        .find(XML_PI_END)
        .ok_or_else(|| Error::malformed(scanner.pos, "unterminated processing instruction"))?;
    let data = scanner.input[scanner.pos..scanner.pos + end_rel].to_string();
    scanner.advance(end_rel + XML_PI_END.len());
    let raw = scanner.input[start..scanner.pos].to_string();
    Ok(NodeData::leaf(
        NodeKind::ProcessingInstruction { target, data },
        Some(raw),
    ))
}

fn parse_doctype(scanner: &mut Scanner<'_>) -> Result<NodeRef> {
    let start = scanner.pos;
    scanner.expect(XML_DOCTYPE_START)?;
    let mut depth: i32 = 0;
    loop {
        match scanner.peek_char() {
            None => return Err(Error::malformed(scanner.pos, "unterminated DOCTYPE declaration")),
            Some('[') => {
                depth += 1;
                scanner.advance(1);
            }
            Some(']') => {
                depth -= 1;
                scanner.advance(1);
            }
            Some('>') if depth <= 0 => {
                scanner.advance(1);
                break;
            }
            Some(c) => scanner.advance(c.len_utf8()),
        }
    }
    let raw = scanner.input[start..scanner.pos].to_string();
    Ok(NodeData::leaf(NodeKind::Doctype(raw.clone()), Some(raw)))
}

fn parse_cdata(scanner: &mut Scanner<'_>) -> Result<NodeRef> {
    let start = scanner.pos;
    scanner.expect(XML_CDATA_START)?;
    let end_rel = scanner
        .find(XML_CDATA_END)
        .ok_or_else(|| Error::malformed(scanner.pos, "unterminated CDATA section"))?;
    let body = scanner.input[scanner.pos..scanner.pos + end_rel].to_string();
    scanner.advance(end_rel + XML_CDATA_END.len());
    let raw = scanner.input[start..scanner.pos].to_string();
    Ok(NodeData::leaf(
        NodeKind::Text(TextData {
            value: body,
            is_cdata: true,
        }),
        Some(raw),
    ))
}

fn parse_text(scanner: &mut Scanner<'_>) -> Result<NodeRef> {
    let start = scanner.pos;
    let end_rel = scanner.rest().find(XML_ELEMENT_START_START).unwrap_or(scanner.rest().len());
    if end_rel == 0 {
        return Err(Error::malformed(scanner.pos, "expected character data"));
    }
    let raw = scanner.input[start..start + end_rel].to_string();
    scanner.advance(end_rel);
    let value = text::decode(&raw);
    Ok(NodeData::leaf(
        NodeKind::Text(TextData {
            value,
            is_cdata: false,
        }),
        Some(raw),
    ))
}

// ------------------------------------------------------------------------------------------------
// Elements and attributes
// ------------------------------------------------------------------------------------------------

fn parse_element(scanner: &mut Scanner<'_>) -> Result<NodeRef> {
    let start = scanner.pos;
    scanner.expect(XML_ELEMENT_START_START)?;
    let name = parse_name(scanner)?;

    let mut attributes = Vec::new();
    loop {
        let ws = scanner.take_while(is_xml_whitespace).to_string();
        if scanner.starts_with(XML_ELEMENT_SELF_CLOSE) || scanner.starts_with(XML_ELEMENT_END_END) {
            break;
        }
        if ws.is_empty() {
            return Err(Error::malformed(
                scanner.pos,
                "expected whitespace before attribute",
            ));
        }
        let attr_pos = scanner.pos;
        let attribute = parse_attribute(scanner, ws)?;
        if attributes.iter().any(|a: &Attribute| a.name() == &attribute.name) {
            return Err(Error::malformed(
                attr_pos,
                format!("duplicate attribute '{}'", attribute.name()),
            ));
        }
        attributes.push(attribute);
    }

    let self_closing;
    let mut children = Vec::new();
    if scanner.starts_with(XML_ELEMENT_SELF_CLOSE) {
        scanner.advance(XML_ELEMENT_SELF_CLOSE.len());
        self_closing = true;
    } else {
        scanner.expect(XML_ELEMENT_END_END)?;
        self_closing = false;
        loop {
            if scanner.starts_with(XML_ELEMENT_END_START) {
                let end_tag_start = scanner.pos;
                scanner.advance(XML_ELEMENT_END_START.len());
                let end_name = parse_name(scanner)?;
                scanner.take_while(is_xml_whitespace);
                scanner.expect(XML_ELEMENT_END_END)?;
                if end_name != name {
                    error!("end tag '{}' does not match start tag '{}'", end_name, name);
                    return Err(Error::malformed(
                        end_tag_start,
                        format!("end tag '{}' does not match start tag '{}'", end_name, name),
                    ));
                }
                break;
            } else if scanner.eof() {
                return Err(Error::malformed(
                    scanner.pos,
                    format!("unexpected end of input inside element '{}'", name),
                ));
            } else if scanner.starts_with(XML_COMMENT_START) {
                children.push(parse_comment(scanner)?);
            } else if scanner.starts_with(XML_CDATA_START) {
                children.push(parse_cdata(scanner)?);
            } else if scanner.starts_with(XML_PI_START) {
                children.push(parse_pi(scanner)?);
            } else if scanner.starts_with(XML_ELEMENT_START_START) {
                children.push(parse_element(scanner)?);
            } else {
                children.push(parse_text(scanner)?);
            }
        }
    }

    let raw = scanner.input[start..scanner.pos].to_string();
    let node_ref = NodeData::leaf(
        NodeKind::Element(ElementData {
            name,
            attributes,
            self_closing,
        }),
        Some(raw),
    );
    for child in children {
        attach_child(&node_ref, child);
    }
    Ok(node_ref)
}

fn parse_attribute(scanner: &mut Scanner<'_>, preceding_whitespace: String) -> Result<Attribute> {
    let name = parse_name(scanner)?;
    scanner.take_while(is_xml_whitespace);
    scanner.expect("=")?;
    scanner.take_while(is_xml_whitespace);
    let quote_pos = scanner.pos;
    let quote_char = scanner
        .peek_char()
        .filter(|&c| c == '"' || c == '\'')
        .ok_or_else(|| Error::malformed(quote_pos, "expected a quote character"))?;
    scanner.advance(1);
    let value_start = scanner.pos;
    let end_rel = scanner
        .rest()
        .find(quote_char)
        .ok_or_else(|| Error::malformed(scanner.pos, "unterminated attribute value"))?;
    let raw_value = scanner.input[value_start..value_start + end_rel].to_string();
    scanner.advance(end_rel + 1);

    Ok(Attribute {
        name,
        value: text::decode(&raw_value),
        raw_value: Some(raw_value),
        quote: QuoteStyle::from_char(quote_char).expect("already validated above"),
        preceding_whitespace,
        modified: false,
    })
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------
