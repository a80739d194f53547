//! Bit-per-byte array helpers.
//!
//! The codecs in this workspace all operate on arrays where each `u8`
//! element holds a single bit (0 or 1), in transmission order. Byte
//! frames map onto these MSB-first: bit 0 of the array is the most
//! significant bit of byte 0.

/// Unpack a byte frame into `bits`, MSB-first. `bits` must be exactly
/// eight times as long as `bytes`.
pub fn unpack_bytes(bytes: &[u8], bits: &mut [u8]) {
    assert_eq!(bits.len(), bytes.len() * 8);
    for (i, bit) in bits.iter_mut().enumerate() {
        *bit = (bytes[i / 8] >> (7 - i % 8)) & 1;
    }
}

/// Pack a bit array back into bytes, MSB-first. Inverse of
/// [`unpack_bytes`]; `bits` must be exactly eight times as long as
/// `bytes`.
pub fn pack_bytes(bits: &[u8], bytes: &mut [u8]) {
    assert_eq!(bits.len(), bytes.len() * 8);
    for b in bytes.iter_mut() {
        *b = 0;
    }
    for (i, &bit) in bits.iter().enumerate() {
        bytes[i / 8] |= (bit & 1) << (7 - i % 8);
    }
}

/// Read up to 64 bits as an integer, first bit = most significant.
pub fn bits_to_u64(bits: &[u8]) -> u64 {
    assert!(bits.len() <= 64);
    let mut v = 0u64;
    for &bit in bits {
        v = (v << 1) | (bit & 1) as u64;
    }
    v
}

/// Write the low `bits.len()` bits of `value` into `bits`, first bit =
/// most significant. Inverse of [`bits_to_u64`].
pub fn u64_to_bits(value: u64, bits: &mut [u8]) {
    let n = bits.len();
    assert!(n <= 64);
    for (i, bit) in bits.iter_mut().enumerate() {
        *bit = ((value >> (n - 1 - i)) & 1) as u8;
    }
}

/// Render a bit array as a `0`/`1` string, for trace output.
pub fn dump_bin(bits: &[u8]) -> String {
    bits.iter().map(|&b| if b & 1 == 0 { '0' } else { '1' }).collect()
}

/// Render a byte slice as contiguous uppercase hex, for trace output.
pub fn dump_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}
