use crate::core::errors::ExchangeError;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock time for timestamps and nonces.
///
/// Signers never read the system clock directly, so tests can freeze time
/// with [`FixedClock`] and compare against known signatures.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> Result<u64, ExchangeError>;

    fn now_seconds(&self) -> Result<u64, ExchangeError> {
        Ok(self.now_millis()? / 1000)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now_millis(&self) -> Result<u64, ExchangeError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_millis() as u64)
            .map_err(|e| ExchangeError::Other(format!("System time error: {}", e)))
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    millis: u64,
}

impl FixedClock {
    pub const fn new(millis: u64) -> Self {
        Self { millis }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> Result<u64, ExchangeError> {
        Ok(self.millis)
    }
}

/// Formats epoch milliseconds as ISO-8601 UTC with millisecond precision,
/// e.g. `2023-11-14T22:13:20.000Z`.
pub fn iso8601_millis(millis: u64) -> Result<String, ExchangeError> {
    let millis = i64::try_from(millis)
        .map_err(|_| ExchangeError::Other(format!("Timestamp out of range: {}", millis)))?;
    let datetime = chrono::DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| ExchangeError::Other("Invalid timestamp".to_string()))?;

    Ok(datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
}

/// Strictly increasing millisecond nonces.
///
/// Each value is `max(now, previous + 1)`, so repeated calls within the same
/// millisecond (or under a frozen clock) still yield distinct nonces.
#[derive(Debug, Default)]
pub struct MonotonicNonce {
    last: AtomicU64,
}

impl MonotonicNonce {
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    pub fn next(&self, clock: &dyn Clock) -> Result<u64, ExchangeError> {
        let now = clock.now_millis()?;
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);

        Ok(now.max(previous.saturating_add(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(1_700_000_000_123);
        assert_eq!(clock.now_millis().unwrap(), 1_700_000_000_123);
        assert_eq!(clock.now_seconds().unwrap(), 1_700_000_000);
    }

    #[test]
    fn test_system_clock_is_after_2023() {
        assert!(SystemClock.now_millis().unwrap() > 1_700_000_000_000);
    }

    #[test]
    fn test_iso8601_millis() {
        assert_eq!(
            iso8601_millis(1_700_000_000_000).unwrap(),
            "2023-11-14T22:13:20.000Z"
        );
        assert_eq!(
            iso8601_millis(1_700_000_000_042).unwrap(),
            "2023-11-14T22:13:20.042Z"
        );
    }

    #[test]
    fn test_monotonic_nonce_under_frozen_clock() {
        let clock = FixedClock::new(1_000);
        let nonce = MonotonicNonce::new();

        assert_eq!(nonce.next(&clock).unwrap(), 1_000);
        assert_eq!(nonce.next(&clock).unwrap(), 1_001);
        assert_eq!(nonce.next(&clock).unwrap(), 1_002);
    }

    #[test]
    fn test_monotonic_nonce_follows_clock() {
        let nonce = MonotonicNonce::new();

        assert_eq!(nonce.next(&FixedClock::new(5_000)).unwrap(), 5_000);
        assert_eq!(nonce.next(&FixedClock::new(9_000)).unwrap(), 9_000);
        // clock going backwards never produces a smaller nonce
        assert_eq!(nonce.next(&FixedClock::new(10)).unwrap(), 9_001);
    }
}
