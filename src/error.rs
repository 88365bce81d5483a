//! Error types.

use thiserror::Error;

/// Reasons a piece of text is not valid RFC 4648 Base32.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Error)]
pub enum EncodingError {
    /// A character outside `A-Z`, `a-z`, `2-7` and trailing `=` padding.
    #[error("invalid character {character:?} at byte {position}")]
    InvalidCharacter { position: usize, character: char },
    /// The unpadded length (here) cannot come out of 5-bit regrouping of whole bytes.
    #[error("{0} symbols do not form whole bytes")]
    InvalidLength(usize),
}

/// Crate error type.
///
/// All variants are local and recoverable. [`Error::is_missing_key`] and
/// [`Error::is_unreadable`] sort them into the two situations a user interface distinguishes.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// Malformed Base32 text.
    #[error("invalid base32: {0}")]
    InvalidEncoding(#[from] EncodingError),
    /// A provisioning payload carried a secret field, but its contents are not Base32.
    #[error("provisioning secret is unreadable")]
    SecretUnreadable(#[source] EncodingError),
    /// Code generation was attempted without a secret.
    #[error("no secret available")]
    EmptySecret,
    /// A `TotpConfig` or HOTP parameter outside the allowed range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// The HMAC output was too short for dynamic truncation.
    #[error("digest of {0} bytes is too short to truncate")]
    Digest(usize),
    /// The system random number generator failed.
    #[error("system random number generator failure")]
    Random,
}

impl Error {
    /// Whether this error means "there is no key to show a code for".
    pub fn is_missing_key(&self) -> bool {
        matches!(self, Error::EmptySecret)
    }

    /// Whether this error means "a code was scanned but could not be read".
    pub fn is_unreadable(&self) -> bool {
        matches!(self, Error::SecretUnreadable(_) | Error::InvalidEncoding(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_classification() {
        assert!(Error::EmptySecret.is_missing_key());
        assert!(!Error::EmptySecret.is_unreadable());
        let unreadable = Error::SecretUnreadable(EncodingError::InvalidLength(1));
        assert!(unreadable.is_unreadable());
        assert!(!unreadable.is_missing_key());
    }

    #[test]
    fn unreadable_keeps_its_cause() {
        use std::error::Error as _;
        let cause = EncodingError::InvalidCharacter {
            position: 3,
            character: '!',
        };
        let err = Error::SecretUnreadable(cause);
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("invalid character '!' at byte 3"));
    }
}
