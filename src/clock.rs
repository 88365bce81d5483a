//! Time sources for callers that poll.
//!
//! [`TotpEngine`](crate::TotpEngine) never reads the time itself. A display loop that refreshes
//! every hundred milliseconds or so asks a `Clock` for the time and hands it over; tests hand
//! over a [`FixedClock`] instead.

use std::time::{SystemTime, UNIX_EPOCH};

/// A source of Unix time in whole seconds.
pub trait Clock {
    fn now(&self) -> u64;
}

/// The system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        // A clock set before 1970 reads as the epoch.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// A clock stopped at a given Unix time.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FixedClock(pub u64);

impl FixedClock {
    pub fn advance(&mut self, seconds: u64) {
        self.0 = self.0.saturating_add(seconds);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

impl<F: Fn() -> u64> Clock for F {
    fn now(&self) -> u64 {
        self()
    }
}
