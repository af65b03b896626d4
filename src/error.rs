/*!
Provides the crate's `Error` and `Result` types.

There are four structural error kinds, matching the four failure modes a
caller of this crate needs to branch on: a parser that could not make sense
of its input ([`Error::Malformed`]), a byte stream whose encoding could not
be determined or applied ([`Error::Encoding`]), an editor operation that
would violate a tree invariant ([`Error::InvalidXml`]), and a lookup-by-name
operation that found nothing ([`Error::NodeNotFound`]). Callers are expected
to `match` on the kind rather than inspect the message text.
*/

use std::result::Result as StdResult;
use thiserror::Error as ThisError;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// The error type returned by every fallible operation in this crate.
#[derive(Clone, Debug, ThisError, PartialEq)]
pub enum Error {
    /// The input was not well-formed: an unclosed tag, a mismatched end tag, an unexpected
    /// end-of-input, a missing quote, or unrecognized markup following `<!`. Carries the byte
    /// offset into the original input at which the problem was detected.
    #[error("malformed XML at byte {offset}: {reason}")]
    Malformed {
        /// Byte offset into the original input.
        offset: usize,
        /// A short, stable, non-localized description of what went wrong.
        reason: String,
    },
    /// The input's encoding could not be determined, the declared encoding is not supported by
    /// this crate, or the byte sequence is not valid in the encoding that was applied.
    #[error("encoding error: {reason}")]
    Encoding {
        /// A short description of the encoding failure.
        reason: String,
    },
    /// The input contained no bytes at all.
    #[error("input was empty")]
    EmptyInput,
    /// An editor operation would violate a data-model invariant: a duplicate attribute name, an
    /// element name containing illegal characters, attaching an already-parented node without
    /// detaching it first, or adding a second root element to a [`crate::Document`].
    #[error("invalid operation: {reason}")]
    InvalidXml {
        /// A short description of the invariant that would have been violated.
        reason: String,
    },
    /// A lookup-by-name operation found no matching node.
    #[error("node not found: {name}")]
    NodeNotFound {
        /// The name that was searched for.
        name: String,
    },
}

/// This crate's standard `Result` alias.
pub type Result<T> = StdResult<T, Error>;

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Error {
    pub(crate) fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        Error::Malformed {
            offset,
            reason: reason.into(),
        }
    }

    pub(crate) fn encoding(reason: impl Into<String>) -> Self {
        Error::Encoding {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Error::InvalidXml {
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(name: impl Into<String>) -> Self {
        Error::NodeNotFound { name: name.into() }
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinguishable_without_string_matching() {
        let e = Error::malformed(12, "unclosed tag");
        assert!(matches!(e, Error::Malformed { offset: 12, .. }));
        assert!(!matches!(e, Error::Encoding { .. }));
    }
}
