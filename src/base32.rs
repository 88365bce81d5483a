//! RFC 4648 Base32.
//!
//! Decoding accepts lowercase input and missing `=` padding, because secrets typed or scanned
//! in the wild routinely have both. Anything else outside the alphabet, whitespace included, is
//! an error.

use ::base32::Alphabet;
use log::debug;

use crate::error::EncodingError;

const PADDING: char = '=';

/// Decode Base32 text into bytes.
///
/// # Errors
///
/// [`EncodingError::InvalidCharacter`] for any symbol outside the alphabet (an `=` that is not
/// part of the trailing padding run counts), and [`EncodingError::InvalidLength`] when the
/// unpadded length leaves 1, 3 or 6 symbols in the last group of eight.
pub fn decode(text: &str) -> Result<Vec<u8>, EncodingError> {
    let unpadded = text.trim_end_matches(PADDING);
    let mut normalized = String::with_capacity(unpadded.len());
    for (position, character) in unpadded.char_indices() {
        match character {
            'A'..='Z' | '2'..='7' => normalized.push(character),
            'a'..='z' => normalized.push(character.to_ascii_uppercase()),
            _ => return Err(EncodingError::InvalidCharacter { position, character }),
        }
    }
    let symbols = normalized.len();
    if matches!(symbols % 8, 1 | 3 | 6) {
        debug!("rejecting base32 text of {} symbols", symbols);
        return Err(EncodingError::InvalidLength(symbols));
    }
    if symbols == 0 {
        return Ok(Vec::new());
    }
    ::base32::decode(Alphabet::Rfc4648 { padding: false }, &normalized)
        .ok_or(EncodingError::InvalidLength(symbols))
}

/// Encode bytes as padded, uppercase Base32.
pub fn encode(bytes: &[u8]) -> String {
    ::base32::encode(Alphabet::Rfc4648 { padding: true }, bytes)
}

/// Encode bytes as uppercase Base32 without padding, as `otpauth` URIs carry secrets.
pub fn encode_unpadded(bytes: &[u8]) -> String {
    ::base32::encode(Alphabet::Rfc4648 { padding: false }, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // RFC 4648 section 10
    const VECTORS: [(&str, &str); 7] = [
        ("", ""),
        ("f", "MY======"),
        ("fo", "MZXQ===="),
        ("foo", "MZXW6==="),
        ("foob", "MZXW6YQ="),
        ("fooba", "MZXW6YTB"),
        ("foobar", "MZXW6YTBOI======"),
    ];

    #[test]
    fn rfc_4648_vectors() {
        for (plain, encoded) in VECTORS {
            assert_eq!(encode(plain.as_bytes()), encoded);
            assert_eq!(decode(encoded).unwrap(), plain.as_bytes());
        }
    }

    #[test]
    fn missing_padding() {
        assert_eq!(decode("MZXW6YQ").unwrap(), b"foob");
        assert_eq!(decode("MZXW6YTBOI").unwrap(), b"foobar");
    }

    #[test]
    fn lowercase() {
        assert_eq!(decode("mzxw6ytboi======").unwrap(), b"foobar");
        assert_eq!(decode("MzXw6YtB").unwrap(), b"fooba");
    }

    #[test]
    fn rfc_6238_secret() {
        assert_eq!(
            decode("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").unwrap(),
            b"12345678901234567890"
        );
    }

    #[test]
    fn characters_outside_alphabet() {
        assert_eq!(
            decode("MZXW1YTB"),
            Err(EncodingError::InvalidCharacter {
                position: 4,
                character: '1'
            })
        );
        assert_eq!(
            decode("MZXW 6YTB"),
            Err(EncodingError::InvalidCharacter {
                position: 4,
                character: ' '
            })
        );
        assert_eq!(
            decode("MZ=XW6YTB"),
            Err(EncodingError::InvalidCharacter {
                position: 2,
                character: '='
            })
        );
        assert!(decode("MZXW6YTBÄ").is_err());
    }

    #[test]
    fn trailing_whitespace_is_not_trimmed() {
        assert!(decode("MZXW6YTB\n").is_err());
    }

    #[test]
    fn impossible_lengths() {
        assert_eq!(decode("M"), Err(EncodingError::InvalidLength(1)));
        assert_eq!(decode("MZX"), Err(EncodingError::InvalidLength(3)));
        assert_eq!(decode("MZXW6Y"), Err(EncodingError::InvalidLength(6)));
        assert_eq!(decode("MZXW6YTBM"), Err(EncodingError::InvalidLength(9)));
    }

    #[test]
    fn unpadded_encoding() {
        assert_eq!(encode_unpadded(b"foobar"), "MZXW6YTBOI");
        assert_eq!(decode(&encode_unpadded(b"foobar")).unwrap(), b"foobar");
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assert_eq!(decode(&encode(&bytes)).unwrap(), bytes.clone());
            prop_assert_eq!(decode(&encode_unpadded(&bytes)).unwrap(), bytes.clone());
            prop_assert_eq!(decode(&encode(&bytes).to_lowercase()).unwrap(), bytes);
        }
    }
}
