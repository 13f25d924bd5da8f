use crate::SnowgenId;

/// The outcome of one non-blocking attempt to generate an ID.
///
/// - [`IdGenStatus::Ready`] indicates a new ID was generated.
/// - [`IdGenStatus::Pending`] means the sequence for the current millisecond
///   is spent and the caller should wait `yield_for` milliseconds before
///   polling again.
///
/// # Example
///
/// ```
/// use snowgen::{Generator, IdGenStatus, SnowgenId, TimeSource};
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1
///     }
/// }
///
/// let generator = Generator::from_components(1, 0, 0, SnowgenId::max_sequence(), FixedTime);
/// match generator.poll_id() {
///     IdGenStatus::Ready { id } => println!("ID: {id}"),
///     IdGenStatus::Pending { yield_for } => println!("Back off for {yield_for} ms"),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: SnowgenId,
    },
    /// No ID could be generated because the sequence has been exhausted for
    /// the current millisecond.
    Pending {
        /// Milliseconds to wait before the clock can move past the exhausted
        /// timestamp. Always at least one.
        yield_for: u64,
    },
}
