use core::time::Duration;
use std::{
    sync::{
        Arc, OnceLock,
        atomic::{AtomicU64, Ordering},
    },
    thread::{self, JoinHandle},
    time::Instant,
};

use crate::{DEFAULT_EPOCH, Error, Result, TimeSource, time::system_clock::unix_now_millis};

/// Shared ticker thread that updates every millisecond.
#[derive(Debug)]
struct SharedTickerInner {
    current: AtomicU64,
    _handle: OnceLock<JoinHandle<()>>,
}

/// A monotonic time source that returns elapsed time since construction,
/// offset so that it reads milliseconds since a chosen epoch.
///
/// The offset is taken from the wall clock once, at construction. After that
/// only `Instant` is consulted, so NTP steps or manual clock changes never make
/// this clock go backwards.
///
/// A background thread advances a shared atomic once per millisecond; reads
/// are a single relaxed load. The thread exits on its next tick after the last
/// clone of the clock is dropped.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    inner: Arc<SharedTickerInner>,
    epoch_offset: u64, // in milliseconds
    epoch: Duration,
}

impl Default for MonotonicClock {
    /// Constructs a monotonic clock aligned to [`DEFAULT_EPOCH`].
    fn default() -> Self {
        Self::with_epoch(DEFAULT_EPOCH)
    }
}

impl MonotonicClock {
    /// Constructs a monotonic clock using `epoch` (a [`Duration`] since
    /// 1970-01-01 UTC) as the origin.
    ///
    /// If the wall clock reads earlier than `epoch`, the clock starts at zero.
    /// Use [`MonotonicClock::try_with_epoch`] to reject that instead.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use snowgen::{MonotonicClock, TimeSource};
    ///
    /// let clock = MonotonicClock::with_epoch(Duration::ZERO);
    /// let first = clock.current_millis();
    ///
    /// std::thread::sleep(Duration::from_millis(5));
    ///
    /// // Readings never go backward.
    /// assert!(clock.current_millis() >= first);
    /// ```
    #[must_use]
    pub fn with_epoch(epoch: Duration) -> Self {
        let offset = unix_now_millis().saturating_sub(epoch.as_millis() as u64);
        Self::start(offset, epoch)
    }

    /// Constructs a monotonic clock, failing if `epoch` lies in the future.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockBeforeEpoch`] if the wall clock currently reads
    /// earlier than `epoch`.
    pub fn try_with_epoch(epoch: Duration) -> Result<Self> {
        let epoch_ms = epoch.as_millis() as u64;
        let offset = unix_now_millis()
            .checked_sub(epoch_ms)
            .ok_or(Error::ClockBeforeEpoch { epoch_ms })?;
        Ok(Self::start(offset, epoch))
    }

    /// The epoch this clock measures from.
    #[must_use]
    pub const fn epoch(&self) -> Duration {
        self.epoch
    }

    fn start(epoch_offset: u64, epoch: Duration) -> Self {
        let start = Instant::now();
        let inner = Arc::new(SharedTickerInner {
            current: AtomicU64::new(0),
            _handle: OnceLock::new(),
        });

        let weak_inner = Arc::downgrade(&inner);
        let handle = thread::spawn(move || {
            let mut tick = 0;

            loop {
                let Some(inner_ref) = weak_inner.upgrade() else {
                    break;
                };

                // Absolute target time of the next tick
                let target = start + Duration::from_millis(tick);

                let now = Instant::now();
                if now < target {
                    thread::sleep(target - now);
                }

                // Recompute from the start so oversleeping never accumulates
                // drift
                let now_ms = start.elapsed().as_millis() as u64;
                inner_ref.current.store(now_ms, Ordering::Relaxed);

                tick = now_ms + 1;
            }
        });

        // The cell is fresh, so this cannot already be set
        let _ = inner._handle.set(handle);

        Self {
            inner,
            epoch_offset,
            epoch,
        }
    }
}

impl TimeSource for MonotonicClock {
    /// Returns the number of milliseconds since the configured epoch, based on
    /// the elapsed monotonic time since construction.
    fn current_millis(&self) -> u64 {
        self.epoch_offset + self.inner.current.load(Ordering::Relaxed)
    }
}
