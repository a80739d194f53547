//! The (16,7,6) quadratic residue code protecting the EMB field
//! (ETSI TS 102 361-1 §B.3.3).
//!
//! Realized as the twice-shortened extension of the (17,9,5) QR code:
//! 7 data bits, 8 cyclic parity bits from the residue generator, and
//! one overall parity bit. Distance 6 corrects 2 errors and detects 3;
//! decoding is a compile-time-built syndrome table lookup like the
//! Golay codes.

use dmr_core::FecResult;

/// x^8 + x^5 + x^4 + x^3 + 1, a factor of x^17 + 1.
const GEN_POLY: u32 = 0x139;

const NO_PATTERN: u16 = u16::MAX;

/// Remainder of a 17-bit word modulo the generator polynomial.
const fn poly_syndrome(word: u32) -> u32 {
    let mut w = word;
    let mut bit = 16i32;
    while bit >= 8 {
        if (w >> bit) & 1 == 1 {
            w ^= GEN_POLY << (bit - 8);
        }
        bit -= 1;
    }
    w
}

/// 9-bit syndrome of a 16-bit word: 8 polynomial bits plus overall
/// parity in the LSB.
const fn syndrome(word: u32) -> u32 {
    (poly_syndrome(word >> 1) << 1) | (word.count_ones() & 1)
}

const fn build_table() -> [u16; 512] {
    let mut t = [NO_PATTERN; 512];
    t[0] = 0;
    let mut a = 0;
    while a < 16 {
        let ea = 1u32 << a;
        t[syndrome(ea) as usize] = ea as u16;
        let mut b = a + 1;
        while b < 16 {
            let eab = ea | (1u32 << b);
            t[syndrome(eab) as usize] = eab as u16;
            b += 1;
        }
        a += 1;
    }
    t
}

static TABLE: [u16; 512] = build_table();

/// Encode 7 data bits into a 16-bit codeword, data in the high bits.
pub fn encode(data: u8) -> u16 {
    debug_assert_eq!(data >> 7, 0);
    let shifted = (data as u32) << 8;
    let cyclic = shifted | poly_syndrome(shifted);
    (((cyclic << 1) | (cyclic.count_ones() & 1)) & 0xFFFF) as u16
}

/// Decode a 16-bit word, correcting up to 2 errors. On an
/// uncorrectable word the data bits are returned as received.
pub fn decode(word: u16) -> (u8, FecResult) {
    let pattern = TABLE[syndrome(word as u32) as usize];
    if pattern == NO_PATTERN {
        return (((word >> 9) & 0x7F) as u8, FecResult::failed(16, 0));
    }
    let corrected = word ^ pattern;
    (
        ((corrected >> 9) & 0x7F) as u8,
        FecResult::corrected(16, pattern.count_ones() as usize),
    )
}
