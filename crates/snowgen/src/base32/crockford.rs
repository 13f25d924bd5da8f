use super::Base32Error;

const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: usize = 5;

/// Lookup table for Crockford base32 decoding
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    // Main alphabet, allow lower-case
    while i < 32 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_uppercase() {
            lut[(c + 32) as usize] = i;
        }
        i += 1;
    }
    // Crockford aliases
    lut[b'O' as usize] = 0;
    lut[b'o' as usize] = 0;
    lut[b'I' as usize] = 1;
    lut[b'i' as usize] = 1;
    lut[b'L' as usize] = 1;
    lut[b'l' as usize] = 1;
    lut
};

/// Encodes `input` as Crockford base32 into `buf`, most significant bits
/// first.
///
/// `buf` must be exactly `ceil(input.len() * 8 / 5)` bytes long; the leading
/// character absorbs the padding bits.
pub(super) fn encode_base32(input: &[u8], buf: &mut [u8]) {
    let input_bits = input.len() * 8;
    let total_bits = buf.len() * BITS_PER_CHAR;
    debug_assert!(total_bits >= input_bits && total_bits - input_bits < BITS_PER_CHAR);

    let mut bits = total_bits - input_bits;
    let mut acc = 0_u16;
    let mut out = 0;
    for &b in input {
        acc = (acc << 8) | u16::from(b);
        bits += 8;
        while bits >= BITS_PER_CHAR {
            bits -= BITS_PER_CHAR;
            buf[out] = ALPHABET[usize::from((acc >> bits) & 0x1F)];
            out += 1;
        }
    }
}

/// Decodes a Crockford base32 string into a `u64`.
///
/// Accepts lower-case input and the `O`/`I`/`L` aliases. Fails on bytes
/// outside the alphabet and on values that need more than 64 bits.
pub(super) fn decode_base32(encoded: &str) -> Result<u64, Base32Error> {
    let mut acc = 0_u64;
    for (index, byte) in encoded.bytes().enumerate() {
        let val = LOOKUP[usize::from(byte)];
        if val == NO_VALUE {
            return Err(Base32Error::DecodeInvalidAscii { byte, index });
        }
        if acc.leading_zeros() < BITS_PER_CHAR as u32 {
            return Err(Base32Error::DecodeOverflow);
        }
        acc = (acc << BITS_PER_CHAR) | u64::from(val);
    }
    Ok(acc)
}
