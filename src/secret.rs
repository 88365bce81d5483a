//! Shared secrets and their extraction from scanned provisioning payloads.

use core::fmt;

use log::{debug, warn};

use crate::{base32, Error, Result, Secret};

/// Decoded shared secret.
///
/// An empty `RawSecret` means "no secret available": it is what [`extract_secret`] returns for a
/// payload with no secret field, and code generation refuses it with [`Error::EmptySecret`].
///
/// The `Debug` output shows only the length.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct RawSecret(Vec<u8>);

impl RawSecret {
    /// The "no secret available" value.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Base32 form, without padding.
    pub fn to_base32(&self) -> String {
        base32::encode_unpadded(&self.0)
    }
}

impl AsRef<[u8]> for RawSecret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for RawSecret {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for RawSecret {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Debug for RawSecret {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RawSecret").field("len", &self.0.len()).finish()
    }
}

impl Secret for RawSecret {}
impl Secret for &'_ RawSecret {}

/// Locate the Base32 secret text inside a provisioning payload.
///
/// The secret is whatever lies strictly between the first `=` and the first `&`. Payloads where
/// either delimiter is missing, or where the first `&` comes before the first `=`, have no
/// locatable secret. In particular a bare Base32 string is *not* returned as its own secret.
///
/// ```
/// # use scan_totp::secret::extract_secret_text;
/// let uri = "otpauth://totp/Example:alice?secret=JBSWY3DPEHPK3PXP&issuer=Example";
/// assert_eq!(extract_secret_text(uri), Some("JBSWY3DPEHPK3PXP"));
/// assert_eq!(extract_secret_text("JBSWY3DPEHPK3PXP"), None);
/// ```
pub fn extract_secret_text(payload: &str) -> Option<&str> {
    let start = payload.find('=')?;
    let end = payload.find('&')?;
    if start < end {
        Some(&payload[start + 1..end])
    } else {
        None
    }
}

/// Turn a scanned provisioning payload into the raw secret bytes.
///
/// # Errors
///
/// [`Error::SecretUnreadable`] when the payload has a secret field whose contents are not valid
/// Base32. Stray whitespace is not trimmed and so also ends up here.
///
/// A payload with no locatable secret is not an error: it yields an empty [`RawSecret`], which
/// callers treat as "no secret available".
pub fn extract_secret(payload: &str) -> Result<RawSecret> {
    let text = match extract_secret_text(payload) {
        Some(text) => text,
        None => {
            debug!("no secret field in {}-byte payload", payload.len());
            return Ok(RawSecret::empty());
        }
    };
    match base32::decode(text) {
        Ok(bytes) => {
            debug!("extracted {}-byte secret", bytes.len());
            Ok(RawSecret(bytes))
        }
        Err(cause) => {
            warn!("provisioning secret is not base32: {}", cause);
            Err(Error::SecretUnreadable(cause))
        }
    }
}
