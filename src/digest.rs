//! HMAC digest types and traits.

use core::fmt;

use ring::hmac::{self, sign, Key as HmacKey, Tag};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Shortest digest dynamic truncation accepts (HMAC-SHA1 output).
pub const MIN_DIGEST_BYTES: usize = 20;

/// HMAC hash function.
///
/// [RFC 4226][4226] prescribes HMAC-SHA1. [RFC 6238][6238] extends TOTP to HMAC-SHA256 and
/// HMAC-SHA512. SHA-1 stays the default because it is what authenticator apps and the RFC 6238
/// reference vectors expect.
///
/// [4226]: https://datatracker.ietf.org/doc/html/rfc4226
/// [6238]: https://datatracker.ietf.org/doc/html/rfc6238
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Algorithm {
    #[default]
    Sha1,
    Sha256,
    Sha512,
}

impl Algorithm {
    fn hmac(self) -> hmac::Algorithm {
        match self {
            Algorithm::Sha1 => hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
            Algorithm::Sha256 => hmac::HMAC_SHA256,
            Algorithm::Sha512 => hmac::HMAC_SHA512,
        }
    }

    /// Name used in the `algorithm` parameter of `otpauth` URIs.
    pub fn uri_name(self) -> &'static str {
        match self {
            Algorithm::Sha1 => "SHA1",
            Algorithm::Sha256 => "SHA256",
            Algorithm::Sha512 => "SHA512",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.uri_name())
    }
}

/// HMAC digest produced by [`hmac`].
#[derive(Clone, Copy, Debug)]
pub struct HmacDigest(Tag);

impl AsRef<[u8]> for HmacDigest {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl Digest for HmacDigest {}

impl Digest for [u8; 20] {}

/// Dynamic truncation over any digest-like byte string.
///
/// Digests shorter than [`MIN_DIGEST_BYTES`] are rejected rather than indexed: the offset is
/// taken from the low four bits of the last byte and four bytes are read from it, so anything
/// shorter than an HMAC-SHA1 output could run past the end.
pub trait Digest: AsRef<[u8]> {
    /// Truncate the digest to its 31-bit HOTP value ("DT" in RFC 4226 section 5.3).
    ///
    /// No reduction modulo `10^digits` happens here; see [`crate::hotp`].
    fn truncate(&self) -> Result<u32> {
        let digest = self.as_ref();
        let len = digest.len();
        if len < MIN_DIGEST_BYTES {
            return Err(Error::Digest(len));
        }
        let index = (digest[len - 1] & 0xf) as usize;
        let bytes = [
            // Strip leading bit to remove signed/unsigned ambiguity
            digest[index] & 0x7f,
            digest[index + 1],
            digest[index + 2],
            digest[index + 3],
        ];
        Ok(u32::from_be_bytes(bytes))
    }
}

/// HMAC of the big-endian counter under `key`.
///
/// Never fails: HMAC accepts keys of any length. Callers reject empty secrets before getting
/// here.
pub fn hmac(algorithm: Algorithm, key: &[u8], counter: u64) -> HmacDigest {
    let key = HmacKey::new(algorithm.hmac(), key);
    HmacDigest(sign(&key, &counter.to_be_bytes()))
}
