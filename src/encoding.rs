/*!
Byte-order-mark detection and `encoding="..."` declaration sniffing, run once
on raw bytes before any byte reaches the scanner in [`crate::parser`]. Only a
small, commonly-encountered set of encodings is recognized; anything else is
an [`Error::Encoding`](crate::error::Error::Encoding).
*/

use crate::error::{Error, Result};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// A recognized character encoding for an input byte stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16Be,
    Utf16Le,
    Utf32Be,
    Utf32Le,
    Latin1,
}

impl Encoding {
    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "UTF-8" | "UTF8" => Some(Encoding::Utf8),
            "UTF-16BE" => Some(Encoding::Utf16Be),
            "UTF-16LE" => Some(Encoding::Utf16Le),
            "UTF-32BE" => Some(Encoding::Utf32Be),
            "UTF-32LE" => Some(Encoding::Utf32Le),
            "ISO-8859-1" | "LATIN1" | "LATIN-1" => Some(Encoding::Latin1),
            _ => None,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

/// Strip a byte-order mark if present and report the encoding it implies, along with the number
/// of leading bytes it occupied (so the caller can slice them off — a BOM is never part of the
/// round-trip text the rest of this crate reasons about).
pub(crate) fn detect_bom(input: &[u8]) -> Option<(Encoding, usize)> {
    if input.starts_with(&[0xEF, 0xBB, 0xBF]) {
        Some((Encoding::Utf8, 3))
    } else if input.starts_with(&[0x00, 0x00, 0xFE, 0xFF]) {
        Some((Encoding::Utf32Be, 4))
    } else if input.starts_with(&[0xFF, 0xFE, 0x00, 0x00]) {
        Some((Encoding::Utf32Le, 4))
    } else if input.starts_with(&[0xFE, 0xFF]) {
        Some((Encoding::Utf16Be, 2))
    } else if input.starts_with(&[0xFF, 0xFE]) {
        Some((Encoding::Utf16Le, 2))
    } else {
        None
    }
}

/// Scan the first bytes of (already BOM-stripped, still-undecoded) `input` for an
/// `encoding="..."` pseudo-attribute inside a leading `<?xml ...?>` declaration. Only looks at
/// the ASCII-range bytes of the declaration itself, since the declaration is required to be
/// representable in ASCII regardless of the document's overall encoding.
pub(crate) fn sniff_declared_encoding(input: &[u8]) -> Option<String> {
    let ascii_prefix_len = input
        .iter()
        .take(256)
        .take_while(|&&b| b != 0)
        .position(|&b| b == b'>')
        .map(|p| p + 1)
        .unwrap_or_else(|| input.len().min(256));
    let prefix = std::str::from_utf8(&input[..ascii_prefix_len]).ok()?;
    if !prefix.trim_start().starts_with("<?xml") {
        return None;
    }
    let key = "encoding=";
    let start = prefix.find(key)? + key.len();
    let quote = prefix[start..].chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let rest = &prefix[start + 1..];
    let end = rest.find(quote)?;
    Some(rest[..end].to_string())
}

/// Decode `bytes` (already BOM-stripped) as `encoding` into a `String`, failing if the bytes are
/// not valid in that encoding.
pub(crate) fn decode_bytes(bytes: &[u8], encoding: Encoding) -> Result<String> {
    match encoding {
        Encoding::Utf8 => std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|e| Error::encoding(format!("invalid UTF-8: {}", e))),
        Encoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        Encoding::Utf16Be | Encoding::Utf16Le => {
            if bytes.len() % 2 != 0 {
                return Err(Error::encoding("UTF-16 byte stream has an odd length"));
            }
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|c| match encoding {
                    Encoding::Utf16Be => u16::from_be_bytes([c[0], c[1]]),
                    _ => u16::from_le_bytes([c[0], c[1]]),
                })
                .collect();
            String::from_utf16(&units).map_err(|e| Error::encoding(format!("invalid UTF-16: {}", e)))
        }
        Encoding::Utf32Be | Encoding::Utf32Le => {
            if bytes.len() % 4 != 0 {
                return Err(Error::encoding("UTF-32 byte stream is not a multiple of 4 bytes"));
            }
            bytes
                .chunks_exact(4)
                .map(|c| {
                    let code = match encoding {
                        Encoding::Utf32Be => u32::from_be_bytes([c[0], c[1], c[2], c[3]]),
                        _ => u32::from_le_bytes([c[0], c[1], c[2], c[3]]),
                    };
                    char::from_u32(code).ok_or_else(|| Error::encoding("invalid UTF-32 code point"))
                })
                .collect()
        }
    }
}

/// Resolve the encoding of `input` by BOM, then declared `encoding=`, then `default_encoding`,
/// and return the decoded text along with how many leading bytes (the BOM) were consumed.
pub(crate) fn resolve_and_decode(input: &[u8], default_encoding: &str) -> Result<String> {
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }
    if let Some((encoding, bom_len)) = detect_bom(input) {
        return decode_bytes(&input[bom_len..], encoding);
    }
    if let Some(name) = sniff_declared_encoding(input) {
        let encoding = Encoding::from_name(&name)
            .ok_or_else(|| Error::encoding(format!("unsupported encoding '{}'", name)))?;
        return decode_bytes(input, encoding);
    }
    let encoding = Encoding::from_name(default_encoding)
        .ok_or_else(|| Error::encoding(format!("unsupported default encoding '{}'", default_encoding)))?;
    decode_bytes(input, encoding)
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------
