/*!
Configuration records passed into the parser and serializer.

Per spec, options are immutable for the duration of a single call — there is
no global or thread-local configuration state anywhere in this crate.
*/

use std::fmt::{Display, Formatter, Result as FmtResult};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// Which quote character surrounds an attribute value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuoteStyle {
    /// `'...'`
    Apostrophe,
    /// `"..."`
    Quotation,
}

impl QuoteStyle {
    pub(crate) fn from_char(c: char) -> Option<Self> {
        match c {
            '\'' => Some(QuoteStyle::Apostrophe),
            '"' => Some(QuoteStyle::Quotation),
            _ => None,
        }
    }

    pub(crate) fn as_char(self) -> char {
        match self {
            QuoteStyle::Apostrophe => '\'',
            QuoteStyle::Quotation => '"',
        }
    }
}

impl Display for QuoteStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_char())
    }
}

impl Default for QuoteStyle {
    fn default() -> Self {
        QuoteStyle::Quotation
    }
}

// ------------------------------------------------------------------------------------------------

/// Options controlling how a document is parsed.
///
/// These only affect parser behavior that isn't dictated by the XML grammar itself; they never
/// change which inputs are accepted, only what default state newly-created nodes receive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserOptions {
    /// When `false`, comments are dropped rather than attached to the tree. Default `true`.
    pub preserve_comments: bool,
    /// Advisory hint for code built on top of this crate: whether whitespace-only text nodes
    /// between elements should be treated as significant content. The parser always attaches them
    /// as `Text` nodes regardless of this flag (round-trip fidelity requires it — see
    /// [`crate::Element::set_text_preserving_whitespace`]); this field exists so callers have
    /// somewhere to record their own policy choice without threading a separate flag through their
    /// own configuration. Default `true`.
    pub preserve_whitespace: bool,
    /// Fallback character encoding used when a byte stream carries no byte-order mark and no
    /// `encoding=` declaration. Default `"UTF-8"`.
    pub default_encoding: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            preserve_comments: true,
            preserve_whitespace: true,
            default_encoding: String::from("UTF-8"),
        }
    }
}

// ------------------------------------------------------------------------------------------------

/// Options controlling how a document is serialized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializerOptions {
    /// Indentation unit used only when [`crate::editor::infer_indent`] finds no signal already
    /// present in the document (no indented sibling, no parent indentation to extend). Default
    /// two spaces.
    pub indent_unit: String,
    /// Quote style used for newly-created attributes that don't already carry one. Default
    /// [`QuoteStyle::Quotation`].
    pub default_quote_style: QuoteStyle,
    /// When `true`, every node is reconstructed (Rule R) on every serialization regardless of its
    /// `modified` flag, re-flowing indentation throughout the document. This is an explicit,
    /// opt-in departure from the round-trip guarantee — it is never enabled implicitly. Default
    /// `false`.
    pub pretty_print: bool,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            indent_unit: String::from("  "),
            default_quote_style: QuoteStyle::default(),
            pretty_print: false,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------
