//! Issuing secrets and the `otpauth` payloads that carry them.
//!
//! The payloads follow the [key URI format][kuf] and always put `secret` first, so that
//! [`extract_secret`](crate::extract_secret) reads them back.
//!
//! [kuf]: https://github.com/google/google-authenticator/wiki/Key-Uri-Format

use log::debug;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use ring::rand::{SecureRandom, SystemRandom};

use crate::{Error, RawSecret, Result, TotpConfig};

/// Secret length RFC 4226 recommends (160 bits).
pub const DEFAULT_SECRET_BYTES: usize = 20;

/// Draw a fresh secret of `len` bytes from the system random number generator.
///
/// # Errors
///
/// [`Error::InvalidConfig`] when `len` is zero, [`Error::Random`] if the system generator fails.
pub fn generate_secret(len: usize) -> Result<RawSecret> {
    if len == 0 {
        return Err(Error::InvalidConfig("secret length must be at least one byte"));
    }
    let mut bytes = vec![0; len];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| Error::Random)?;
    debug!("generated {}-byte secret", len);
    Ok(RawSecret::from(bytes))
}

/// Build the `otpauth://totp/...` payload for a QR code.
///
/// `label` is usually the account name. Both it and `issuer` are percent-encoded, so neither can
/// put a `=` or `&` ahead of the secret.
///
/// # Errors
///
/// [`Error::InvalidConfig`] if `config` does not pass [`TotpConfig::validate`].
pub fn provisioning_uri(
    secret: &RawSecret,
    label: &str,
    issuer: Option<&str>,
    config: &TotpConfig,
) -> Result<String> {
    config.validate()?;
    let label = utf8_percent_encode(label, NON_ALPHANUMERIC);
    let mut uri = match issuer {
        Some(issuer) => {
            let issuer = utf8_percent_encode(issuer, NON_ALPHANUMERIC).to_string();
            format!(
                "otpauth://totp/{}:{}?secret={}&issuer={}",
                issuer,
                label,
                secret.to_base32(),
                issuer
            )
        }
        None => format!("otpauth://totp/{}?secret={}", label, secret.to_base32()),
    };
    uri.push_str(&format!(
        "&algorithm={}&digits={}&period={}",
        config.algorithm.uri_name(),
        config.digits,
        config.time_step
    ));
    Ok(uri)
}
