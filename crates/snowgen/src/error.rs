use core::num::ParseIntError;

/// A result type defaulting to the crate's [`Error`].
///
/// Generating IDs never fails; only parsing, decoding and clock setup do.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `snowgen` can produce.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The input was not a base-10 `u64`.
    #[error("invalid id string: {0}")]
    ParseId(#[from] ParseIntError),

    /// The decoded value sets bit 63, which every [`crate::SnowgenId`] keeps
    /// clear.
    #[error("id {raw:#018x} sets the reserved bit")]
    ReservedBitSet {
        /// The raw value that failed validation.
        raw: u64,
    },

    /// The wall clock reads earlier than the configured epoch, so elapsed time
    /// would be negative.
    #[error("system clock is earlier than the epoch ({epoch_ms} ms since 1970)")]
    ClockBeforeEpoch {
        /// The rejected epoch, in milliseconds since the Unix epoch.
        epoch_ms: u64,
    },

    /// An error occurred during Crockford Base32 decoding.
    #[cfg(feature = "base32")]
    #[error(transparent)]
    Base32(#[from] crate::Base32Error),
}
