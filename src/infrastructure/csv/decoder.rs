// ============================================================
// DECODER
// ============================================================
// Turn raw bytes into text with encoding fallback

use crate::domain::error::{AppError, Result};

/// Encoding that produced the decoded text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Latin1,
}

impl Encoding {
    pub fn label(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Latin1 => "latin-1",
        }
    }
}

/// Decode input bytes as UTF-8, falling back to Latin-1.
///
/// Latin-1 maps every byte to a code point, so the fallback always
/// produces text; the error path guards against that assumption breaking.
pub fn decode(bytes: &[u8]) -> Result<(String, Encoding)> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok((text.to_string(), Encoding::Utf8)),
        Err(utf8_err) => {
            let text = encoding_rs::mem::decode_latin1(bytes);
            if text.len() < bytes.len() {
                // Latin-1 is a total mapping; a shorter output means the
                // decode dropped bytes and the result cannot be trusted.
                return Err(AppError::DecodeError(format!(
                    "input is not valid utf-8 ({}) and latin-1 fallback failed",
                    utf8_err
                )));
            }
            Ok((text.into_owned(), Encoding::Latin1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_utf8() {
        let (text, encoding) = decode("café".as_bytes()).unwrap();
        assert_eq!(text, "café");
        assert_eq!(encoding, Encoding::Utf8);
    }

    #[test]
    fn test_decode_latin1_fallback() {
        // 0xE9 is 'é' in Latin-1 but invalid as a standalone UTF-8 byte
        let bytes = b"caf\xe9";
        let (text, encoding) = decode(bytes).unwrap();
        assert_eq!(text, "café");
        assert_eq!(encoding, Encoding::Latin1);
    }

    #[test]
    fn test_decode_empty_input() {
        let (text, encoding) = decode(b"").unwrap();
        assert_eq!(text, "");
        assert_eq!(encoding, Encoding::Utf8);
    }
}
