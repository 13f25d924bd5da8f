use core::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{DEFAULT_EPOCH, Error, Result, TimeSource};

/// Milliseconds since the Unix epoch according to the wall clock, or zero if
/// the wall clock reads earlier than 1970.
pub(crate) fn unix_now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

/// A wall-clock time source that reads the system clock on every call.
///
/// Elapsed time saturates at zero: a wall clock reading earlier than the
/// epoch yields `0` rather than wrapping. If the wall clock is stepped
/// backwards (NTP, manual change) the readings go backwards with it; the
/// generator clamps such readings so IDs stay unique and non-decreasing. Use
/// [`crate::MonotonicClock`] to avoid regressions altogether.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SystemClock {
    epoch_ms: u64,
}

impl Default for SystemClock {
    /// Constructs a wall clock aligned to [`DEFAULT_EPOCH`].
    fn default() -> Self {
        Self::with_epoch(DEFAULT_EPOCH)
    }
}

impl SystemClock {
    /// Constructs a wall clock measuring from `epoch`, a [`Duration`] since
    /// 1970-01-01 UTC.
    #[must_use]
    pub const fn with_epoch(epoch: Duration) -> Self {
        Self {
            epoch_ms: epoch.as_millis() as u64,
        }
    }

    /// Like [`SystemClock::with_epoch`], but rejects an epoch that lies in the
    /// future.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockBeforeEpoch`] if the wall clock currently reads
    /// earlier than `epoch`.
    pub fn try_with_epoch(epoch: Duration) -> Result<Self> {
        let clock = Self::with_epoch(epoch);
        if unix_now_millis() < clock.epoch_ms {
            return Err(Error::ClockBeforeEpoch {
                epoch_ms: clock.epoch_ms,
            });
        }
        Ok(clock)
    }

    /// The epoch this clock measures from.
    #[must_use]
    pub const fn epoch(&self) -> Duration {
        Duration::from_millis(self.epoch_ms)
    }
}

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        unix_now_millis().saturating_sub(self.epoch_ms)
    }
}
