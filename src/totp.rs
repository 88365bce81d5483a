//! Time-based one-time passwords (RFC 6238).

use core::fmt;

use log::{debug, trace};
use ring::constant_time::verify_slices_are_equal;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::{hotp_with, Algorithm, Error, Result, Secret, MAX_DIGITS, MIN_DIGITS};

/// Widest drift, in steps either side of now, that [`TotpEngine::verify`] will search.
pub const MAX_VERIFY_WINDOW: u32 = 10;

/// TOTP parameters.
///
/// The defaults (HMAC-SHA1, 30-second steps, 6 digits) are what RFC 6238 recommends and what
/// authenticator apps assume when a provisioning payload says nothing. Missing fields take their
/// default when deserializing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TotpConfig {
    pub algorithm: Algorithm,
    /// Length of a time step, in seconds.
    pub time_step: u64,
    pub digits: u8,
}

impl TotpConfig {
    pub const DEFAULT_TIME_STEP: u64 = 30;
    pub const DEFAULT_DIGITS: u8 = 6;

    pub fn validate(&self) -> Result<()> {
        if self.time_step == 0 {
            return Err(Error::InvalidConfig("time step must be at least one second"));
        }
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&self.digits) {
            return Err(Error::InvalidConfig("digits must be between 6 and 9"));
        }
        Ok(())
    }
}

impl Default for TotpConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Sha1,
            time_step: Self::DEFAULT_TIME_STEP,
            digits: Self::DEFAULT_DIGITS,
        }
    }
}

/// A rendered one-time code: exactly as many decimal digits as configured, zero-padded on the
/// left. Not a number.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TotpCode(String);

impl TotpCode {
    /// Render `value` to exactly `digits` characters.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] if `digits` is outside `6..=9` or `value` does not fit in that
    /// many digits.
    pub fn new(value: u32, digits: u8) -> Result<Self> {
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
            return Err(Error::InvalidConfig("digits must be between 6 and 9"));
        }
        if value >= 10_u32.pow(digits.into()) {
            return Err(Error::InvalidConfig("code value is wider than its digit count"));
        }
        Ok(Self(format!("{:0width$}", value, width = usize::from(digits))))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TotpCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TotpCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TotpCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TotpCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// How far through the current time step we are, as a whole percentage in `0..100`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Progress(u8);

impl Progress {
    pub fn percent(self) -> u8 {
        self.0
    }

    /// The same progress as a fraction in `[0.0, 1.0)`, for progress bars.
    pub fn fraction(self) -> f32 {
        f32::from(self.0) / 100.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Everything a display needs for one refresh.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snapshot {
    pub code: TotpCode,
    pub progress: Progress,
    /// Seconds until `code` stops being current, in `1..=time_step`.
    pub remaining: u64,
}

/// Time-based one-time password generator ([RFC 6238][6238]).
///
/// Holds only its [`TotpConfig`]; every operation is a pure function of the secret and the Unix
/// time passed in, so one engine can be shared freely between threads.
///
/// [6238]: https://datatracker.ietf.org/doc/html/rfc6238
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TotpEngine {
    config: TotpConfig,
}

impl TotpEngine {
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] for a zero time step or a digit count outside `6..=9`.
    pub fn new(config: TotpConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            "totp engine: {}, {}s steps, {} digits",
            config.algorithm, config.time_step, config.digits
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &TotpConfig {
        &self.config
    }

    /// Index of the time step containing `now`.
    pub fn counter_at(&self, now: u64) -> u64 {
        now / self.config.time_step
    }

    /// The code for the time step containing `now` (Unix seconds).
    ///
    /// # Errors
    ///
    /// [`Error::EmptySecret`] if the secret has no bytes. Nothing else can fail.
    pub fn generate_code<S: Secret>(&self, secret: S, now: u64) -> Result<TotpCode> {
        self.code_for_counter(secret.as_ref(), self.counter_at(now))
    }

    fn code_for_counter(&self, key: &[u8], counter: u64) -> Result<TotpCode> {
        let TotpConfig {
            algorithm, digits, ..
        } = self.config;
        hotp_with(algorithm, key, counter, digits).and_then(|value| TotpCode::new(value, digits))
    }

    /// Percentage of the current time step already elapsed at `now`.
    ///
    /// Independent of [`TotpEngine::generate_code`]: a display can redraw this many times per
    /// step and regenerate the code only when the step changes.
    pub fn progress_in_window(&self, now: u64) -> Progress {
        let step = self.config.time_step;
        let elapsed = now % step;
        // Widened so that huge time steps cannot overflow.
        let percent = u128::from(elapsed) * 100 / u128::from(step);
        Progress(percent as u8)
    }

    /// Seconds until the code current at `now` rolls over.
    pub fn seconds_remaining(&self, now: u64) -> u64 {
        self.config.time_step - now % self.config.time_step
    }

    pub fn snapshot<S: Secret>(&self, secret: S, now: u64) -> Result<Snapshot> {
        Ok(Snapshot {
            code: self.generate_code(secret, now)?,
            progress: self.progress_in_window(now),
            remaining: self.seconds_remaining(now),
        })
    }

    /// [`TotpEngine::snapshot`] at the time `clock` reports.
    pub fn snapshot_now<S, C>(&self, secret: S, clock: &C) -> Result<Snapshot>
    where
        S: Secret,
        C: Clock + ?Sized,
    {
        self.snapshot(secret, clock.now())
    }

    /// Check a code typed by a user.
    ///
    /// Accepts codes from up to `window` steps either side of the one containing `now`, to
    /// allow for clock drift between the two devices. Returns the offset (in steps) of the step
    /// that matched, or `None`. Candidates of the wrong length or containing anything but ASCII
    /// digits never match.
    ///
    /// # Errors
    ///
    /// [`Error::EmptySecret`] if the secret has no bytes, and [`Error::InvalidConfig`] if
    /// `window` exceeds [`MAX_VERIFY_WINDOW`].
    pub fn verify<S: Secret>(
        &self,
        secret: S,
        candidate: &str,
        now: u64,
        window: u32,
    ) -> Result<Option<i64>> {
        if window > MAX_VERIFY_WINDOW {
            return Err(Error::InvalidConfig("verification window is too wide"));
        }
        let key = secret.as_ref();
        if key.is_empty() {
            return Err(Error::EmptySecret);
        }
        if candidate.len() != usize::from(self.config.digits)
            || !candidate.bytes().all(|b| b.is_ascii_digit())
        {
            return Ok(None);
        }
        let current = self.counter_at(now);
        let window = u64::from(window);
        for counter in current.saturating_sub(window)..=current.saturating_add(window) {
            let code = self.code_for_counter(key, counter)?;
            if verify_slices_are_equal(code.as_str().as_bytes(), candidate.as_bytes()).is_ok() {
                // Both ends are within MAX_VERIFY_WINDOW of current.
                let drift = if counter >= current {
                    (counter - current) as i64
                } else {
                    -((current - counter) as i64)
                };
                trace!("code matched at drift {}", drift);
                return Ok(Some(drift));
            }
        }
        Ok(None)
    }
}
