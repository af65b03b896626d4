/*!
Qualified names: `prefix:local` parsing and validation, independent of any
particular node or tree. Namespace *resolution* — walking ancestors to find
which URI a prefix is bound to — lives in [`crate::node`], since it needs the
tree; this module only knows how to split and validate the text form.
*/

use crate::error::{Error, Result};
use crate::syntax::*;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// A parsed `prefix:local` name, or a bare `local` name with no prefix.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QName {
    prefix: Option<String>,
    local_name: String,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Display for QName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.prefix {
            Some(prefix) => write!(f, "{}{}{}", prefix, XML_NS_SEPARATOR, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

impl FromStr for QName {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let parts: Vec<&str> = value.split(XML_NS_SEPARATOR).collect();
        match parts.as_slice() {
            [local] => Ok(QName::new(None, check_part(local)?)),
            [prefix, local] => Ok(QName::new(Some(check_part(prefix)?), check_part(local)?)),
            _ => Err(Error::invalid(format!(
                "'{}' has more than one ':' separator",
                value
            ))),
        }
    }
}

fn check_part(part: &str) -> Result<String> {
    if part.is_empty() {
        return Err(Error::invalid("empty name part"));
    }
    let mut chars = part.chars();
    let first = chars.next().unwrap();
    if !(first.is_alphabetic() || first == '_') {
        return Err(Error::invalid(format!(
            "'{}' does not start with a letter or underscore",
            part
        )));
    }
    if chars.any(|c| !(c.is_alphanumeric() || c == '_' || c == '-' || c == '.')) {
        return Err(Error::invalid(format!(
            "'{}' contains a character not legal in an XML name",
            part
        )));
    }
    Ok(part.to_string())
}

impl QName {
    /// Construct directly from an already-validated prefix and local name.
    pub(crate) fn new(prefix: Option<String>, local_name: String) -> Self {
        Self { prefix, local_name }
    }

    /// Parse `value`, returning a bare name with no prefix if it fails. Used in contexts (text
    /// content, attribute values) where a name-shaped string doesn't have to actually be one.
    pub fn parse_lenient(value: &str) -> Self {
        Self::from_str(value).unwrap_or_else(|_| Self::new(None, value.to_string()))
    }

    /// The namespace prefix, if any (the part before `:`).
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The local part of the name (after `:`, or the whole name if unprefixed).
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// `true` if this name's prefix or bare local name is `xmlns` — i.e. it declares a namespace
    /// binding rather than naming an ordinary attribute.
    pub fn is_namespace_declaration(&self) -> bool {
        self.prefix.as_deref() == Some(XMLNS_NS_PREFIX) || self.local_name == XMLNS_NS_PREFIX
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_only() {
        let n = QName::from_str("hello").unwrap();
        assert_eq!(n.local_name(), "hello");
        assert!(n.prefix().is_none());
    }

    #[test]
    fn test_parse_prefixed() {
        let n = QName::from_str("x:hello").unwrap();
        assert_eq!(n.prefix(), Some("x"));
        assert_eq!(n.local_name(), "hello");
    }

    #[test]
    fn test_display_round_trips_text_form() {
        assert_eq!(QName::from_str("x:hello").unwrap().to_string(), "x:hello");
        assert_eq!(QName::from_str("hello").unwrap().to_string(), "hello");
    }

    #[test]
    fn test_rejects_empty_parts() {
        assert!(QName::from_str("").is_err());
        assert!(QName::from_str(":name").is_err());
        assert!(QName::from_str("prefix:").is_err());
        assert!(QName::from_str("a:b:c").is_err());
    }

    #[test]
    fn test_rejects_leading_digit() {
        assert!(QName::from_str("1abc").is_err());
    }

    #[test]
    fn test_is_namespace_declaration() {
        assert!(QName::from_str("xmlns").unwrap().is_namespace_declaration());
        assert!(QName::from_str("xmlns:x")
            .unwrap()
            .is_namespace_declaration());
        assert!(!QName::from_str("x:hello").unwrap().is_namespace_declaration());
    }

    #[test]
    fn test_parse_lenient_falls_back_to_bare_local() {
        let n = QName::parse_lenient("a:b:c");
        assert_eq!(n.local_name(), "a:b:c");
        assert!(n.prefix().is_none());
    }
}
