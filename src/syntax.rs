#![allow(dead_code)]

// ------------------------------------------------------------------------------------------------
// Pure Syntactic Tokens
// ------------------------------------------------------------------------------------------------

pub(crate) const XML_DECL_START: &str = "<?xml";
pub(crate) const XML_DECL_END: &str = "?>";

pub(crate) const XML_PI_START: &str = "<?";
pub(crate) const XML_PI_END: &str = "?>";

pub(crate) const XML_COMMENT_START: &str = "<!--";
pub(crate) const XML_COMMENT_END: &str = "-->";

pub(crate) const XML_CDATA_START: &str = "<![CDATA[";
pub(crate) const XML_CDATA_END: &str = "]]>";

pub(crate) const XML_DOCTYPE_START: &str = "<!DOCTYPE";
pub(crate) const XML_DOCTYPE_END: &str = ">";
pub(crate) const XML_DOCTYPE_SUBSET_START: &str = "[";
pub(crate) const XML_DOCTYPE_SUBSET_END: &str = "]";
pub(crate) const XML_DOCTYPE_PUBLIC: &str = "PUBLIC";
pub(crate) const XML_DOCTYPE_SYSTEM: &str = "SYSTEM";

pub(crate) const XML_ELEMENT_START_START: &str = "<";
pub(crate) const XML_ELEMENT_SELF_CLOSE: &str = "/>";
pub(crate) const XML_ELEMENT_END_START: &str = "</";
pub(crate) const XML_ELEMENT_END_END: &str = ">";

pub(crate) const XML_EMPTY: &str = "";

// ------------------------------------------------------------------------------------------------
// Escaped entities
// ------------------------------------------------------------------------------------------------

pub(crate) const XML_ESC_AMP_CHAR: char = '&';
pub(crate) const XML_ESC_AMP_STR: &str = "&amp;";
pub(crate) const XML_ESC_LT_CHAR: char = '<';
pub(crate) const XML_ESC_LT_STR: &str = "&lt;";
pub(crate) const XML_ESC_GT_CHAR: char = '>';
pub(crate) const XML_ESC_GT_STR: &str = "&gt;";
pub(crate) const XML_ESC_APOS_CHAR: char = '\'';
pub(crate) const XML_ESC_APOS_STR: &str = "&apos;";
pub(crate) const XML_ESC_QUOT_CHAR: char = '"';
pub(crate) const XML_ESC_QUOT_STR: &str = "&quot;";

// ------------------------------------------------------------------------------------------------
// Namespace Support
// ------------------------------------------------------------------------------------------------

pub(crate) const XML_NS_PREFIX: &str = "xml";
pub(crate) const XML_NS_URI: &str = "http://www.w3.org/XML/1998/namespace";

pub(crate) const XMLNS_NS_PREFIX: &str = "xmlns";
pub(crate) const XMLNS_NS_URI: &str = "http://www.w3.org/2000/xmlns/";

pub(crate) const XML_NS_SEPARATOR: char = ':';

// ------------------------------------------------------------------------------------------------
// Whitespace
// ------------------------------------------------------------------------------------------------

/// Every character the data model permits inside a preceding/following whitespace slot.
pub(crate) fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}
