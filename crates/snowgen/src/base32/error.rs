/// Errors raised while decoding a Crockford Base32 ID.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Base32Error {
    /// The input is not exactly [`BASE32_LEN`](crate::BASE32_LEN) characters.
    #[error("invalid length: {len}")]
    DecodeInvalidLen { len: usize },

    /// The input contains a byte outside the Crockford alphabet.
    #[error("invalid ascii byte {byte:#04x} at index {index}")]
    DecodeInvalidAscii { byte: u8, index: usize },

    /// The input encodes a value wider than 64 bits.
    #[error("decoded value does not fit in 64 bits")]
    DecodeOverflow,
}
