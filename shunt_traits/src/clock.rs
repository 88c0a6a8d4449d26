use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::{Arc, Mutex};

/// Wall-clock abstraction used to stamp exported plans.
///
/// - now_utc(): current UTC time
/// - iso8601(): `now_utc()` rendered as RFC 3339 with millisecond precision
pub trait Clock {
    fn now_utc(&self) -> DateTime<Utc>;

    fn iso8601(&self) -> String {
        self.now_utc().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Default clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic clock pinned to a given instant; can be moved manually.
///
/// Shared between clones so a test can hand one copy to the code under test
/// and keep adjusting the other.
#[derive(Debug, Clone)]
pub struct FixedClock {
    at: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            at: Arc::new(Mutex::new(at)),
        }
    }

    /// Move the clock to an absolute instant.
    pub fn set(&self, at: DateTime<Utc>) {
        if let Ok(mut guard) = self.at.lock() {
            *guard = at;
        }
    }

    /// Advance the clock by the given duration.
    pub fn advance(&self, d: chrono::Duration) {
        if let Ok(mut guard) = self.at.lock() {
            *guard += d;
        }
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.at
            .lock()
            .map(|g| *g)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}
