use core::{fmt, str::FromStr, time::Duration};

use crate::{Error, Result, id::write_bit_layout_debug};

/// A 64-bit ID carrying a timestamp, two producer labels and a sequence.
///
/// - 1 bit reserved (always zero, so the value fits a signed 64-bit column)
/// - 41 bits timestamp (ms since the generator's epoch, ~69.7 years)
/// - 5 bits datacenter label
/// - 5 bits machine label
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63           63 62            22 21           17 16           12 11             0
///              +--------------+----------------+---------------+---------------+---------------+
///  Field:      | reserved (1) | timestamp (41) | datacenter (5)|  machine (5)  | sequence (12) |
///              +--------------+----------------+---------------+---------------+---------------+
///              |<----------------- MSB ------------- 64 bits ------------- LSB --------------->|
/// ```
///
/// Ordering on `SnowgenId` is numeric ordering of the packed value, which is
/// ordering by `(timestamp, datacenter, machine, sequence)`.
///
/// # Example
///
/// ```
/// use snowgen::SnowgenId;
///
/// let id = SnowgenId::from(123_456, 5, 9, 7);
/// assert_eq!(id.timestamp(), 123_456);
/// assert_eq!(id.datacenter_id(), 5);
/// assert_eq!(id.machine_id(), 9);
/// assert_eq!(id.sequence(), 7);
/// ```
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct SnowgenId {
    id: u64,
}

impl SnowgenId {
    /// Bitmask for the reserved most significant bit.
    pub const RESERVED_MASK: u64 = 1 << 63;

    /// Bitmask for extracting the 41-bit timestamp field. Occupies bits 22
    /// through 62.
    pub const TIMESTAMP_MASK: u64 = (1 << 41) - 1;

    /// Bitmask for extracting the 5-bit datacenter label. Occupies bits 17
    /// through 21.
    pub const DATACENTER_ID_MASK: u64 = (1 << 5) - 1;

    /// Bitmask for extracting the 5-bit machine label. Occupies bits 12
    /// through 16.
    pub const MACHINE_ID_MASK: u64 = (1 << 5) - 1;

    /// Bitmask for extracting the 12-bit sequence field. Occupies bits 0
    /// through 11.
    pub const SEQUENCE_MASK: u64 = (1 << 12) - 1;

    /// Number of bits to shift the timestamp to its correct position (bit 22).
    pub const TIMESTAMP_SHIFT: u64 = 22;

    /// Number of bits to shift the datacenter label to its correct position
    /// (bit 17).
    pub const DATACENTER_ID_SHIFT: u64 = 17;

    /// Number of bits to shift the machine label to its correct position
    /// (bit 12).
    pub const MACHINE_ID_SHIFT: u64 = 12;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u64 = 0;

    /// Packs the four fields, masking each one to its width.
    ///
    /// Values wider than their field are truncated rather than bleeding into
    /// the neighbouring field. In particular a timestamp past `2^41 - 1`
    /// wraps, and the reserved bit is never set.
    #[must_use]
    pub const fn from(timestamp: u64, datacenter_id: u64, machine_id: u64, sequence: u64) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let datacenter_id = (datacenter_id & Self::DATACENTER_ID_MASK) << Self::DATACENTER_ID_SHIFT;
        let machine_id = (machine_id & Self::MACHINE_ID_MASK) << Self::MACHINE_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | datacenter_id | machine_id | sequence,
        }
    }

    /// Constructs an ID from components that are expected to already fit.
    ///
    /// Debug builds panic on any over-wide field; release builds mask like
    /// [`SnowgenId::from`].
    #[must_use]
    pub fn from_components(
        timestamp: u64,
        datacenter_id: u64,
        machine_id: u64,
        sequence: u64,
    ) -> Self {
        debug_assert!(timestamp <= Self::TIMESTAMP_MASK, "timestamp overflow");
        debug_assert!(
            datacenter_id <= Self::DATACENTER_ID_MASK,
            "datacenter_id overflow"
        );
        debug_assert!(machine_id <= Self::MACHINE_ID_MASK, "machine_id overflow");
        debug_assert!(sequence <= Self::SEQUENCE_MASK, "sequence overflow");
        Self::from(timestamp, datacenter_id, machine_id, sequence)
    }

    /// Wraps a raw value without validation. See [`SnowgenId::is_valid`].
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    #[must_use]
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Extracts the timestamp from the packed ID.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the datacenter label from the packed ID.
    #[must_use]
    pub const fn datacenter_id(&self) -> u64 {
        (self.id >> Self::DATACENTER_ID_SHIFT) & Self::DATACENTER_ID_MASK
    }

    /// Extracts the machine label from the packed ID.
    #[must_use]
    pub const fn machine_id(&self) -> u64 {
        (self.id >> Self::MACHINE_ID_SHIFT) & Self::MACHINE_ID_MASK
    }

    /// Extracts the sequence number from the packed ID.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    #[must_use]
    pub const fn max_timestamp() -> u64 {
        Self::TIMESTAMP_MASK
    }

    #[must_use]
    pub const fn max_datacenter_id() -> u64 {
        Self::DATACENTER_ID_MASK
    }

    #[must_use]
    pub const fn max_machine_id() -> u64 {
        Self::MACHINE_ID_MASK
    }

    #[must_use]
    pub const fn max_sequence() -> u64 {
        Self::SEQUENCE_MASK
    }

    /// Returns `true` if the reserved bit is clear.
    ///
    /// Every ID produced by a generator is valid; only values built with
    /// [`SnowgenId::from_raw`] or decoded from untrusted input can fail this.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.id & Self::RESERVED_MASK == 0
    }

    /// Clears the reserved bit.
    #[must_use]
    pub const fn into_valid(self) -> Self {
        Self {
            id: self.id & !Self::RESERVED_MASK,
        }
    }

    /// Returns true if the current sequence value can be incremented.
    #[must_use]
    pub const fn has_sequence_room(&self) -> bool {
        self.sequence() < Self::max_sequence()
    }

    /// Returns a new ID with the sequence incremented.
    #[must_use]
    pub fn increment_sequence(&self) -> Self {
        Self::from_components(
            self.timestamp(),
            self.datacenter_id(),
            self.machine_id(),
            self.sequence() + 1,
        )
    }

    /// Returns a new ID for a newer timestamp with the sequence reset to zero.
    #[must_use]
    pub fn rollover_to_timestamp(&self, ts: u64) -> Self {
        Self::from_components(ts, self.datacenter_id(), self.machine_id(), 0)
    }

    /// Milliseconds since the Unix epoch at which this ID was generated, given
    /// the epoch its generator was configured with.
    ///
    /// ```
    /// use snowgen::{DEFAULT_EPOCH, SnowgenId};
    ///
    /// let id = SnowgenId::from(1_000, 0, 0, 0);
    /// assert_eq!(id.unix_millis(DEFAULT_EPOCH), 1_672_531_201_000);
    /// ```
    #[must_use]
    pub const fn unix_millis(&self, epoch: Duration) -> u64 {
        epoch.as_millis() as u64 + self.timestamp()
    }

    /// Returns the ID as a zero-padded 20-digit string.
    #[must_use]
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }
}

/// Packs `(elapsed_ms, datacenter, machine, counter)` into the raw 64-bit
/// layout described on [`SnowgenId`].
///
/// Total: every field is masked to its width first.
///
/// ```
/// use snowgen::pack;
///
/// let raw = pack(123_456, 5, 9, 7);
/// assert_eq!(raw >> 22, 123_456);
/// assert_eq!((raw >> 17) & 0x1f, 5);
/// assert_eq!((raw >> 12) & 0x1f, 9);
/// assert_eq!(raw & 0xfff, 7);
/// ```
#[must_use]
pub const fn pack(elapsed_ms: u64, datacenter: u64, machine: u64, counter: u64) -> u64 {
    SnowgenId::from(elapsed_ms, datacenter, machine, counter).to_raw()
}

impl From<SnowgenId> for u64 {
    fn from(id: SnowgenId) -> Self {
        id.to_raw()
    }
}

impl TryFrom<u64> for SnowgenId {
    type Error = Error;

    fn try_from(raw: u64) -> Result<Self> {
        let id = Self::from_raw(raw);
        if !id.is_valid() {
            return Err(Error::ReservedBitSet { raw });
        }
        Ok(id)
    }
}

impl FromStr for SnowgenId {
    type Err = Error;

    /// Parses the decimal form produced by [`fmt::Display`].
    fn from_str(s: &str) -> Result<Self> {
        let raw: u64 = s.parse()?;
        Self::try_from(raw)
    }
}

impl fmt::Display for SnowgenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowgenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bit_layout_debug(f, self, "SnowgenId")
    }
}
