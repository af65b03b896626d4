use crate::syntax::*;
use regex::Regex;
use std::sync::OnceLock;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// Which quote character is "active" for the purposes of [`encode`] — i.e. which of `'`/`"` must
/// be escaped because it would otherwise terminate the attribute value it appears in. `None`
/// means "not inside an attribute value at all" (element/comment/PI text never escapes quotes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum QuoteChar {
    Apostrophe,
    Quotation,
}

impl From<crate::options::QuoteStyle> for QuoteChar {
    fn from(q: crate::options::QuoteStyle) -> Self {
        match q {
            crate::options::QuoteStyle::Apostrophe => QuoteChar::Apostrophe,
            crate::options::QuoteStyle::Quotation => QuoteChar::Quotation,
        }
    }
}

// ------------------------------------------------------------------------------------------------
//  Public Functions
// ------------------------------------------------------------------------------------------------

///
/// Escape character data according to XML 1.1
/// [§2.4 Character Data and Markup](https://www.w3.org/TR/xml11/#dt-chardata).
///
/// # Specification
///
/// The ampersand character (&) and the left angle bracket (<) must not appear in their literal
/// form, except when used as markup delimiters, or within a comment, a processing instruction, or
/// a CDATA section. If they are needed elsewhere, they must be escaped using the strings "&amp;"
/// and "&lt;" respectively. The right angle bracket (>) may be represented using the string
/// "&gt;". To allow attribute values to contain both single and double quotes, the apostrophe or
/// single-quote character (') may be represented as "&apos;", and the double-quote character (")
/// as "&quot;" — but only the quote character actually delimiting the value, never both; the
/// inactive quote is legal unescaped inside the value.
///
/// This is the *reconstruction* path: it only runs once a node's captured raw form has been
/// invalidated by a mutation, never while replaying an unmodified node verbatim.
///
pub(crate) fn encode(input: &str, for_attribute_with_quote: Option<QuoteChar>) -> String {
    let mut result = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            XML_ESC_AMP_CHAR => result.push_str(XML_ESC_AMP_STR),
            XML_ESC_LT_CHAR => result.push_str(XML_ESC_LT_STR),
            XML_ESC_GT_CHAR => result.push_str(XML_ESC_GT_STR),
            XML_ESC_QUOT_CHAR if for_attribute_with_quote == Some(QuoteChar::Quotation) => {
                result.push_str(XML_ESC_QUOT_STR)
            }
            XML_ESC_APOS_CHAR if for_attribute_with_quote == Some(QuoteChar::Apostrophe) => {
                result.push_str(XML_ESC_APOS_STR)
            }
            o => result.push(o),
        }
    }
    result
}

fn entity_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|[A-Za-z][A-Za-z0-9]*);").unwrap())
}

///
/// Replace `&lt;`, `&gt;`, `&amp;`, `&quot;`, `&apos;`, and numeric character references
/// (`&#DDD;` decimal, `&#xHHH;` hex) with the characters they denote.
///
/// An unrecognized named reference (`&something;` where `something` isn't one of the five
/// predefined names) is left untouched — strict entity validation is a non-goal. `&amp;` is
/// deliberately decoded from its own literal occurrence rather than from the output of decoding
/// another entity, so `&amp;lt;` decodes to the three-character text `&lt;`, not to `<`.
///
pub(crate) fn decode(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }
    let mut result = String::with_capacity(input.len());
    let mut last_end = 0;
    for m in entity_pattern().find_iter(input) {
        result.push_str(&input[last_end..m.start()]);
        let body = &m.as_str()[1..m.as_str().len() - 1];
        match decode_one(body) {
            Some(c) => result.push(c),
            None => result.push_str(m.as_str()),
        }
        last_end = m.end();
    }
    result.push_str(&input[last_end..]);
    result
}

fn decode_one(body: &str) -> Option<char> {
    if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(dec) = body.strip_prefix('#') {
        return dec.parse::<u32>().ok().and_then(char::from_u32);
    }
    match body {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => None,
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_basic() {
        assert_eq!(encode("a < b & c > d", None), "a &lt; b &amp; c &gt; d");
    }

    #[test]
    fn test_encode_only_active_quote() {
        assert_eq!(
            encode("it's \"ok\"", Some(QuoteChar::Quotation)),
            "it's &quot;ok&quot;"
        );
        assert_eq!(
            encode("it's \"ok\"", Some(QuoteChar::Apostrophe)),
            "it&apos;s \"ok\""
        );
    }

    #[test]
    fn test_decode_predefined_entities() {
        assert_eq!(decode("&lt;&gt;&amp;&quot;&apos;"), "<>&\"'");
    }

    #[test]
    fn test_decode_numeric_decimal_and_hex() {
        assert_eq!(decode("line1&#10;line2"), "line1\nline2");
        assert_eq!(decode("line1&#xA;line2"), "line1\nline2");
    }

    #[test]
    fn test_decode_amp_processed_last() {
        assert_eq!(decode("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_decode_unknown_entity_left_literal() {
        assert_eq!(decode("&unknown;"), "&unknown;");
    }

    #[test]
    fn test_decode_named_entity_that_looks_like_hex_is_left_literal() {
        // "xabc" is all valid hex digits once the leading 'x' is stripped, but a named
        // reference is only ever numeric when it starts with '#' — this must not decode.
        assert_eq!(decode("&xabc;"), "&xabc;");
    }

    #[test]
    fn test_decode_idempotent_without_entities() {
        let s = "plain text, no markup here";
        assert_eq!(decode(s), decode(decode(s)));
    }

    #[test]
    fn test_encode_decode_inverse() {
        let v = "hello <\"world\"> & 'everyone' in it";
        for q in [QuoteChar::Apostrophe, QuoteChar::Quotation] {
            assert_eq!(decode(&encode(v, Some(q))), v);
        }
    }

}
