use core::{cmp::Ordering, fmt, time::Duration};
use std::{sync::Arc, thread};

use parking_lot::Mutex;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{IdGenStatus, Labels, SnowgenId, SystemClock, TimeSource};

/// A lock-based ID generator for one labelled producer.
///
/// The generator keeps the last issued ID behind an [`Arc<Mutex<_>>`]. Every
/// call reads the clock, then under the lock either advances to a newer
/// millisecond (sequence reset to zero) or bumps the sequence within the
/// current one. IDs from one generator are therefore unique and, in the order
/// calls complete, strictly increasing.
///
/// Cloning a generator yields a handle onto the *same* state, so clones can be
/// moved to other threads without losing uniqueness.
///
/// ## Clock regressions
///
/// A clock reading older than the last issued timestamp is clamped: IDs keep
/// using the last timestamp and the sequence keeps counting up. Once that
/// millisecond's sequence is spent, callers wait until the clock passes it.
/// Waiting callers re-read the clock at least once per millisecond, so a
/// regression that is corrected quickly only stalls them briefly.
///
/// Clock readings are truncated to 41 bits. Once the timestamp field wraps
/// (about 69.7 years after the epoch) every reading looks older than the last
/// timestamp and the generator stalls instead of wrapping.
///
/// ## See Also
/// - [`GeneratorBuilder`](crate::GeneratorBuilder)
/// - [`MonotonicClock`](crate::MonotonicClock)
pub struct Generator<T = SystemClock>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    state: Arc<crossbeam_utils::CachePadded<Mutex<SnowgenId>>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Arc<Mutex<SnowgenId>>,
    labels: Labels,
    time: T,
}

impl Generator<SystemClock> {
    /// Creates a generator for the producer named by `datacenter` and
    /// `machine`, measuring time with the wall clock from
    /// [`DEFAULT_EPOCH`](crate::DEFAULT_EPOCH).
    ///
    /// Both names are hashed into 5-bit labels with
    /// [`hash_label`](crate::hash_label). Any string is accepted, including the
    /// empty string.
    ///
    /// # Example
    /// ```
    /// use snowgen::{Generator, hash_label};
    ///
    /// let generator = Generator::new("dc1", "server1");
    /// let id = generator.next_id();
    ///
    /// assert!(id.to_raw() > 0);
    /// assert_eq!(id.datacenter_id(), hash_label("dc1"));
    /// assert_eq!(id.machine_id(), hash_label("server1"));
    /// ```
    #[must_use]
    pub fn new(datacenter: &str, machine: &str) -> Self {
        Self::with_clock(datacenter, machine, SystemClock::default())
    }
}

impl<T> Generator<T>
where
    T: TimeSource,
{
    /// Creates a generator for the named producer that reads time from `time`.
    ///
    /// The last timestamp starts at the clock's current reading with the
    /// sequence at zero.
    pub fn with_clock(datacenter: &str, machine: &str, time: T) -> Self {
        Self::with_labels(Labels::from_names(datacenter, machine), time)
    }

    /// Creates a generator from already-derived labels.
    pub fn with_labels(labels: Labels, time: T) -> Self {
        let now = time.current_millis() & SnowgenId::TIMESTAMP_MASK;
        Self::from_components(now, labels.datacenter, labels.machine, 0, time)
    }

    /// Creates a generator from explicit component values.
    ///
    /// This is mostly useful in tests, or to start the generator at a known
    /// point. In typical use, prefer [`Generator::new`] or
    /// [`Generator::with_clock`].
    ///
    /// # Parameters
    /// - `timestamp`: the last timestamp, in milliseconds since the epoch
    /// - `datacenter_id`, `machine_id`: the labels, truncated to 5 bits
    /// - `sequence`: the last sequence value issued for `timestamp`
    /// - `time`: the [`TimeSource`] used during generation
    pub fn from_components(
        timestamp: u64,
        datacenter_id: u64,
        machine_id: u64,
        sequence: u64,
        time: T,
    ) -> Self {
        let labels = Labels {
            datacenter: datacenter_id & SnowgenId::DATACENTER_ID_MASK,
            machine: machine_id & SnowgenId::MACHINE_ID_MASK,
        };
        let id = SnowgenId::from_components(timestamp, labels.datacenter, labels.machine, sequence);
        Self {
            #[cfg(feature = "cache-padded")]
            state: Arc::new(crossbeam_utils::CachePadded::new(Mutex::new(id))),
            #[cfg(not(feature = "cache-padded"))]
            state: Arc::new(Mutex::new(id)),
            labels,
            time,
        }
    }

    #[must_use]
    pub const fn labels(&self) -> Labels {
        self.labels
    }

    #[must_use]
    pub const fn datacenter_label(&self) -> u64 {
        self.labels.datacenter
    }

    #[must_use]
    pub const fn machine_label(&self) -> u64 {
        self.labels.machine
    }

    /// The time source this generator reads.
    #[must_use]
    pub const fn clock(&self) -> &T {
        &self.time
    }

    /// Returns the next ID, waiting if this millisecond's sequence is spent.
    ///
    /// Never fails. Under sustained load above 4096 IDs per millisecond the
    /// call sleeps until the clock ticks over; the lock is not held while
    /// sleeping. Each sleep lasts at most one millisecond before the clock is
    /// read again.
    ///
    /// # Example
    /// ```
    /// use snowgen::Generator;
    ///
    /// let generator = Generator::new("dc1", "server1");
    /// let a = generator.next_id();
    /// let b = generator.next_id();
    /// assert!(a < b);
    /// ```
    pub fn next_id(&self) -> SnowgenId {
        loop {
            match self.poll_id() {
                IdGenStatus::Ready { id } => break id,
                IdGenStatus::Pending { yield_for } => {
                    thread::sleep(Duration::from_millis(yield_for.min(MAX_WAIT_MS)));
                }
            }
        }
    }

    /// Attempts to generate the next ID without blocking.
    ///
    /// Returns [`IdGenStatus::Ready`] with a new ID, or
    /// [`IdGenStatus::Pending`] with the number of milliseconds to wait when
    /// the sequence for the current millisecond is exhausted.
    ///
    /// # Example
    /// ```
    /// use snowgen::{Generator, IdGenStatus, SnowgenId};
    ///
    /// let generator = Generator::new("dc1", "server1");
    ///
    /// let id: SnowgenId = loop {
    ///     match generator.poll_id() {
    ///         IdGenStatus::Ready { id } => break id,
    ///         IdGenStatus::Pending { .. } => std::thread::yield_now(),
    ///     }
    /// };
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll_id(&self) -> IdGenStatus {
        // The clock is read under the lock
        let mut id = self.state.lock();
        let now = self.time.current_millis() & SnowgenId::TIMESTAMP_MASK;

        let current_ts = id.timestamp();
        match now.cmp(&current_ts) {
            Ordering::Greater => {
                *id = id.rollover_to_timestamp(now);
                IdGenStatus::Ready { id: *id }
            }
            Ordering::Equal => advance_sequence(&mut id, now),
            Ordering::Less => cold_clock_behind(&mut id, now),
        }
    }
}

/// Longest single wait between two polls of an exhausted generator.
pub(crate) const MAX_WAIT_MS: u64 = 1;

fn advance_sequence(id: &mut SnowgenId, now: u64) -> IdGenStatus {
    if id.has_sequence_room() {
        *id = id.increment_sequence();
        return IdGenStatus::Ready { id: *id };
    }

    // The clock has to move strictly past the exhausted timestamp
    let yield_for = id.timestamp() - now + 1;
    #[cfg(feature = "tracing")]
    tracing::debug!(timestamp = id.timestamp(), yield_for, "sequence exhausted");
    IdGenStatus::Pending { yield_for }
}

#[cold]
#[inline(never)]
fn cold_clock_behind(id: &mut SnowgenId, now: u64) -> IdGenStatus {
    #[cfg(feature = "tracing")]
    tracing::warn!(
        now,
        last_timestamp = id.timestamp(),
        "clock moved backwards, clamping to last timestamp"
    );
    advance_sequence(id, now)
}

impl<T> Clone for Generator<T>
where
    T: TimeSource + Clone,
{
    /// Returns a handle sharing this generator's state.
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            labels: self.labels,
            time: self.time.clone(),
        }
    }
}

impl<T> fmt::Debug for Generator<T>
where
    T: TimeSource + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = *self.state.lock();
        f.debug_struct("Generator")
            .field("labels", &self.labels)
            .field("last_timestamp", &last.timestamp())
            .field("sequence", &last.sequence())
            .field("time", &self.time)
            .finish()
    }
}
