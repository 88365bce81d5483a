//! One-time passwords from scanned provisioning payloads.
//!
//! The pieces, in the order data flows through them:
//!
//! 1. [`secret::extract_secret`] pulls the Base32 secret out of the text a QR reader produced
//!    and decodes it with [`base32`].
//! 2. [`TotpEngine`] turns the [`RawSecret`] and the current Unix time into a [`TotpCode`] and a
//!    [`Progress`] through the current time step ([RFC 6238][6238]).
//! 3. [`hotp`] underneath does the counter-based work of [RFC 4226][4226].
//!
//! Everything is stateless and the time is always passed in; see [`clock`] for callers that
//! poll.
//!
//! ```
//! use scan_totp::{extract_secret, TotpEngine};
//!
//! let payload = "otpauth://totp/ACME:bob?secret=GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ&issuer=ACME";
//! let secret = extract_secret(payload)?;
//! let engine = TotpEngine::default();
//! assert_eq!(engine.generate_code(&secret, 59)?, "287082");
//! assert_eq!(engine.progress_in_window(59).percent(), 96);
//! # Ok::<(), scan_totp::Error>(())
//! ```
//!
//! [4226]: https://datatracker.ietf.org/doc/html/rfc4226
//! [6238]: https://datatracker.ietf.org/doc/html/rfc6238

use log::trace;

pub mod base32;
pub mod clock;
pub mod digest;
mod error;
pub mod provision;
pub mod secret;
pub mod store;
mod totp;

pub use crate::digest::Algorithm;
pub use crate::error::{EncodingError, Error, Result};
pub use crate::secret::{extract_secret, RawSecret};
pub use crate::totp::{
    Progress, Snapshot, TotpCode, TotpConfig, TotpEngine, MAX_VERIFY_WINDOW,
};

use crate::digest::Digest as _;

/// Fewest digits a code may have (RFC 4226 section 5.3).
pub const MIN_DIGITS: u8 = 6;
/// Most digits a code may have. RFC 4226 Appendix E.2 allows 9; `10^9` still fits a `u32`.
pub const MAX_DIGITS: u8 = 9;

/// Synchronized moving counter.
///
/// [RFC 4226][4226] describes an "8-byte synchronized moving counter." It is implemented for
/// `u64` and for big-endian `[u8; 8]`, so either can be passed to [`hotp`] directly. TOTP
/// derives its counter from time; see [`TotpEngine::counter_at`].
///
/// [4226]: https://tools.ietf.org/html/rfc4226
pub trait Counter {
    /// The counter value as an eight-byte, big-endian, unsigned integer.
    fn value(&self) -> u64;
}

impl Counter for u64 {
    fn value(&self) -> u64 {
        *self
    }
}

impl Counter for [u8; 8] {
    fn value(&self) -> u64 {
        u64::from_be_bytes(*self)
    }
}

/// Shared secret.
///
/// All secrets must be coerced to a byte string for hashing, so secrets must implement
/// `AsRef<[u8]>`. Besides [`RawSecret`], this is implemented for byte slices, byte arrays,
/// `Vec<u8>`, `&str` and `String`.
///
/// # Requirements
///
/// RFC 4226 asks for at least 128 bits of secret, but provisioning payloads in the wild carry
/// shorter ones and authenticator apps accept them. The only hard requirement here is that the
/// secret is not empty; an empty one is rejected with [`Error::EmptySecret`].
pub trait Secret: AsRef<[u8]> {}
impl Secret for String {}
impl Secret for &'_ str {}
impl Secret for &'_ [u8] {}
impl Secret for Vec<u8> {}
impl<const N: usize> Secret for [u8; N] {}
impl<const N: usize> Secret for &'_ [u8; N] {}

/// Computes the 31-bit HOTP value for the given secret and counter under `algorithm`.
///
/// No reduction to a number of digits is performed; for that, see [`hotp_with`].
///
/// # Errors
///
/// [`Error::EmptySecret`] if the secret has no bytes.
pub fn raw_hotp_with<S: Secret, C: Counter>(
    algorithm: Algorithm,
    secret: S,
    counter: C,
) -> Result<u32> {
    let key: &[u8] = secret.as_ref();
    if key.is_empty() {
        return Err(Error::EmptySecret);
    }
    let counter = counter.value();
    trace!("hotp counter {} with {}", counter, algorithm);
    digest::hmac(algorithm, key, counter).truncate()
}

/// [`raw_hotp_with`] using HMAC-SHA1, as RFC 4226 prescribes.
pub fn raw_hotp<S: Secret, C: Counter>(secret: S, counter: C) -> Result<u32> {
    raw_hotp_with(Algorithm::Sha1, secret, counter)
}

/// Computes an HOTP value of `digits` decimal digits under `algorithm`.
///
/// The result is a number; [`TotpCode::new`] renders it with its leading zeros and rejects a
/// value wider than `digits`.
///
/// # Errors
///
/// [`Error::InvalidConfig`] if `digits` is outside [`MIN_DIGITS`]`..=`[`MAX_DIGITS`], and
/// [`Error::EmptySecret`] if the secret has no bytes.
pub fn hotp_with<S: Secret, C: Counter>(
    algorithm: Algorithm,
    secret: S,
    counter: C,
    digits: u8,
) -> Result<u32> {
    if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
        return Err(Error::InvalidConfig("digits must be between 6 and 9"));
    }
    raw_hotp_with(algorithm, secret, counter).map(|x| x % 10_u32.pow(digits.into()))
}

/// [`hotp_with`] using HMAC-SHA1.
pub fn hotp<S: Secret, C: Counter>(secret: S, counter: C, digits: u8) -> Result<u32> {
    hotp_with(Algorithm::Sha1, secret, counter, digits)
}
