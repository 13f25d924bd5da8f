//! Label hashing.
//!
//! Operators name producers with human-readable strings ("eu-west-1",
//! "api-7"); the ID only has room for 5 bits per label. A label is the low 5
//! bits of the 64-bit FNV-1a hash of the string's UTF-8 bytes.
//!
//! Distinct strings can map to the same label (32 possible codes). That is not
//! detected here: handing out distinct pairs is up to whoever assigns names.

use crate::SnowgenId;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a over `bytes`.
///
/// # Example
/// ```
/// use snowgen::fnv1a_64;
///
/// assert_eq!(fnv1a_64(b""), 0xcbf2_9ce4_8422_2325);
/// assert_eq!(fnv1a_64(b"a"), 0xaf63_dc4c_8601_ec8c);
/// ```
#[must_use]
pub const fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Maps an opaque identifier string to a 5-bit label in `0..=31`.
///
/// Pure and total: the empty string is a valid input and the same input always
/// yields the same label.
///
/// # Example
/// ```
/// use snowgen::hash_label;
///
/// let label = hash_label("dc1");
/// assert!(label <= 31);
/// assert_eq!(label, hash_label("dc1"));
/// ```
#[must_use]
pub const fn hash_label(label: &str) -> u64 {
    fnv1a_64(label.as_bytes()) & SnowgenId::DATACENTER_ID_MASK
}

/// The `(datacenter, machine)` label pair a generator stamps into every ID.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Labels {
    pub datacenter: u64,
    pub machine: u64,
}

impl Labels {
    /// Hashes both identifier strings.
    #[must_use]
    pub const fn from_names(datacenter: &str, machine: &str) -> Self {
        Self {
            datacenter: hash_label(datacenter),
            machine: hash_label(machine),
        }
    }
}
