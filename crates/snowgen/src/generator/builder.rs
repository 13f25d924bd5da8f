use core::time::Duration;

use crate::{DEFAULT_EPOCH, Generator, Labels, MonotonicClock, Result, SystemClock, TimeSource};

/// Assembles a [`Generator`] from producer names and an epoch.
///
/// Names default to the empty string and the epoch to [`DEFAULT_EPOCH`].
///
/// # Example
/// ```
/// use snowgen::{GeneratorBuilder, TWITTER_EPOCH, hash_label};
///
/// let generator = GeneratorBuilder::new()
///     .datacenter("eu-west-1")
///     .machine("api-7")
///     .epoch(TWITTER_EPOCH)
///     .build()
///     .expect("epoch is in the past");
///
/// assert_eq!(generator.datacenter_label(), hash_label("eu-west-1"));
/// assert_eq!(generator.clock().epoch(), TWITTER_EPOCH);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorBuilder {
    datacenter: String,
    machine: String,
    epoch: Duration,
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            datacenter: String::new(),
            machine: String::new(),
            epoch: DEFAULT_EPOCH,
        }
    }

    /// Sets the datacenter name.
    #[must_use]
    pub fn datacenter(mut self, name: impl Into<String>) -> Self {
        self.datacenter = name.into();
        self
    }

    /// Sets the machine name.
    #[must_use]
    pub fn machine(mut self, name: impl Into<String>) -> Self {
        self.machine = name.into();
        self
    }

    /// Sets the epoch, as a [`Duration`] since 1970-01-01 UTC.
    ///
    /// Ignored by [`GeneratorBuilder::build_with_clock`], where the clock
    /// carries its own epoch.
    #[must_use]
    pub fn epoch(mut self, epoch: Duration) -> Self {
        self.epoch = epoch;
        self
    }

    /// The labels the configured names hash to.
    #[must_use]
    pub fn labels(&self) -> Labels {
        Labels::from_names(&self.datacenter, &self.machine)
    }

    /// Builds a generator on the wall clock.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ClockBeforeEpoch`] if the epoch lies in the
    /// future.
    pub fn build(self) -> Result<Generator<SystemClock>> {
        let clock = SystemClock::try_with_epoch(self.epoch)?;
        Ok(self.build_with_clock(clock))
    }

    /// Builds a generator on a fresh [`MonotonicClock`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ClockBeforeEpoch`] if the epoch lies in the
    /// future.
    pub fn build_monotonic(self) -> Result<Generator<MonotonicClock>> {
        let clock = MonotonicClock::try_with_epoch(self.epoch)?;
        Ok(self.build_with_clock(clock))
    }

    /// Builds a generator on a caller-supplied time source.
    pub fn build_with_clock<T>(self, clock: T) -> Generator<T>
    where
        T: TimeSource,
    {
        let labels = self.labels();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            datacenter = %self.datacenter,
            machine = %self.machine,
            datacenter_label = labels.datacenter,
            machine_label = labels.machine,
            "derived generator labels"
        );
        Generator::with_labels(labels, clock)
    }
}
