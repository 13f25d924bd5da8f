use super::{Base32Error, decode_base32, encode_base32};
use crate::{Result, SnowgenId};

/// Length of a [`SnowgenId`] in Crockford Base32: `ceil(64 / 5)` characters.
pub const BASE32_LEN: usize = 13;

impl SnowgenId {
    /// Encodes this ID as a 13-character Crockford Base32 string.
    ///
    /// The encoding is fixed-width and big-endian, so encoded strings sort in
    /// the same order as the IDs they encode.
    ///
    /// # Example
    /// ```
    /// use snowgen::SnowgenId;
    ///
    /// let id = SnowgenId::from_raw(i64::MAX as u64);
    /// assert_eq!(id.encode(), "7ZZZZZZZZZZZZ");
    /// assert_eq!(SnowgenId::decode("7ZZZZZZZZZZZZ").unwrap(), id);
    /// ```
    #[must_use]
    pub fn encode(&self) -> String {
        let mut buf = [0_u8; BASE32_LEN];
        self.encode_to_buf(&mut buf).to_owned()
    }

    /// Encodes into a caller-provided buffer, returning the written string.
    pub fn encode_to_buf<'buf>(&self, buf: &'buf mut [u8; BASE32_LEN]) -> &'buf str {
        encode_base32(&self.to_raw().to_be_bytes(), buf);
        // SAFETY: every byte written comes from the ASCII Crockford alphabet.
        unsafe { core::str::from_utf8_unchecked(buf) }
    }

    /// Decodes a Crockford Base32 string produced by [`SnowgenId::encode`].
    ///
    /// Lower-case input and the `O`, `I`, `L` aliases are accepted.
    ///
    /// # Errors
    ///
    /// - [`Base32Error::DecodeInvalidLen`] if the input is not 13 characters.
    /// - [`Base32Error::DecodeInvalidAscii`] on a byte outside the alphabet.
    /// - [`Base32Error::DecodeOverflow`] if the value needs more than 64 bits.
    /// - [`Error::ReservedBitSet`] if the value sets bit 63.
    pub fn decode(s: impl AsRef<str>) -> Result<Self> {
        let s = s.as_ref();
        if s.len() != BASE32_LEN {
            return Err(Base32Error::DecodeInvalidLen { len: s.len() }.into());
        }
        let raw = decode_base32(s)?;
        Self::try_from(raw)
    }
}
