//! Golay codes: the (23,12,7) cyclic code, its (24,12,8) extension, and
//! the (20,8,7) shortening of the extension that protects the slot type
//! field (ETSI TS 102 361-1 §B.3.2).
//!
//! Decoding is a single syndrome table lookup. The tables map every
//! syndrome reachable by an error pattern of weight <= 3 to that
//! pattern; they are enumerated at compile time from the generator
//! polynomial, so there is no runtime initialization. For the extended
//! and shortened codes, syndromes outside the table mean the word is
//! beyond the correction radius and is reported uncorrectable rather
//! than guessed at.

use dmr_core::FecResult;

/// x^11 + x^10 + x^6 + x^5 + x^4 + x^2 + 1
const GEN_POLY: u32 = 0xC75;

const NO_PATTERN: u32 = u32::MAX;

/// Remainder of a 23-bit word modulo the generator polynomial.
const fn poly_syndrome(word: u32) -> u32 {
    let mut w = word;
    let mut bit = 22i32;
    while bit >= 11 {
        if (w >> bit) & 1 == 1 {
            w ^= GEN_POLY << (bit - 11);
        }
        bit -= 1;
    }
    w
}

/// Syndrome of a 24-bit extended word: 11 polynomial bits over the
/// cyclic part, plus the overall parity in the LSB.
const fn extended_syndrome(word: u32) -> u32 {
    (poly_syndrome(word >> 1) << 1) | (word.count_ones() & 1)
}

/// Enumerate all error patterns of weight <= 3 within the low `width`
/// bits and record them under `syndrome_of(pattern)`. Distance >= 7
/// guarantees the syndromes are distinct, so order does not matter.
macro_rules! fill_weight3 {
    ($table:ident, $width:expr, $syndrome_of:ident) => {{
        let mut a = 0;
        while a < $width {
            let ea = 1u32 << a;
            $table[$syndrome_of(ea) as usize] = ea;
            let mut b = a + 1;
            while b < $width {
                let eab = ea | (1u32 << b);
                $table[$syndrome_of(eab) as usize] = eab;
                let mut c = b + 1;
                while c < $width {
                    let eabc = eab | (1u32 << c);
                    $table[$syndrome_of(eabc) as usize] = eabc;
                    c += 1;
                }
                b += 1;
            }
            a += 1;
        }
    }};
}

const fn build_standard_table() -> [u32; 2048] {
    let mut t = [NO_PATTERN; 2048];
    t[0] = 0;
    fill_weight3!(t, 23, poly_syndrome);
    t
}

const fn build_extended_table() -> [u32; 4096] {
    let mut t = [NO_PATTERN; 4096];
    t[0] = 0;
    fill_weight3!(t, 24, extended_syndrome);
    t
}

const fn build_shortened_table() -> [u32; 4096] {
    let mut t = [NO_PATTERN; 4096];
    t[0] = 0;
    // Only patterns inside the 20 transmitted bits are reachable.
    fill_weight3!(t, 20, extended_syndrome);
    t
}

/// The (23,12,7) code. Perfect: every syndrome maps to a pattern, so
/// decoding always lands on the nearest codeword.
pub mod standard {
    use super::*;

    static TABLE: [u32; 2048] = build_standard_table();

    /// Encode 12 data bits into a 23-bit codeword, data in the high bits.
    pub fn encode(data: u16) -> u32 {
        debug_assert_eq!(data >> 12, 0);
        let shifted = (data as u32) << 11;
        shifted | poly_syndrome(shifted)
    }

    /// Decode a 23-bit word to the nearest codeword, correcting up to
    /// 3 errors.
    pub fn decode(word: u32) -> (u16, FecResult) {
        debug_assert_eq!(word >> 23, 0);
        let pattern = TABLE[poly_syndrome(word) as usize];
        let corrected = word ^ pattern;
        (
            (corrected >> 11) as u16,
            FecResult::corrected(23, pattern.count_ones() as usize),
        )
    }
}

/// The (24,12,8) code: the standard code plus overall parity in the
/// LSB. Still corrects 3 errors, but weight-4 error patterns are
/// flagged uncorrectable instead of miscorrected.
pub mod extended {
    use super::*;

    static TABLE: [u32; 4096] = build_extended_table();

    /// Encode 12 data bits into a 24-bit codeword, data in the high bits.
    pub fn encode(data: u16) -> u32 {
        debug_assert_eq!(data >> 12, 0);
        let standard = standard::encode(data);
        (standard << 1) | (standard.count_ones() & 1)
    }

    /// Decode a 24-bit word, correcting up to 3 errors. On an
    /// uncorrectable word the data bits are returned as received.
    pub fn decode(word: u32) -> (u16, FecResult) {
        debug_assert_eq!(word >> 24, 0);
        let pattern = TABLE[extended_syndrome(word) as usize];
        if pattern == NO_PATTERN {
            return ((word >> 12) as u16, FecResult::failed(24, 0));
        }
        let corrected = word ^ pattern;
        (
            (corrected >> 12) as u16,
            FecResult::corrected(24, pattern.count_ones() as usize),
        )
    }
}

/// The (20,8,7) code of the slot type field: the extended code with the
/// top four data bits fixed to zero and removed from the air. Layout is
/// 8 data bits, 11 polynomial parity bits, 1 overall parity bit.
pub mod shortened {
    use super::*;

    static TABLE: [u32; 4096] = build_shortened_table();

    /// Encode 8 data bits into a 20-bit codeword, data in the high bits.
    pub fn encode(data: u8) -> u32 {
        extended::encode(data as u16)
    }

    /// Decode a 20-bit word, correcting up to 3 errors.
    pub fn decode(word: u32) -> (u8, FecResult) {
        debug_assert_eq!(word >> 20, 0);
        let pattern = TABLE[extended_syndrome(word) as usize];
        if pattern == NO_PATTERN {
            return ((word >> 12) as u8, FecResult::failed(20, 0));
        }
        let corrected = word ^ pattern;
        (
            (corrected >> 12) as u8,
            FecResult::corrected(20, pattern.count_ones() as usize),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_roundtrip() {
        for data in 0..1u16 << 12 {
            let word = standard::encode(data);
            assert_eq!(word >> 23, 0);
            let (decoded, r) = standard::decode(word);
            assert_eq!(decoded, data);
            assert_eq!(r, FecResult::clean(23));
        }
    }

    #[test]
    fn test_standard_corrects_three_errors() {
        let word = standard::encode(0xABC);
        for a in 0..23 {
            for b in a + 1..23 {
                for c in b + 1..23 {
                    let damaged = word ^ (1 << a) ^ (1 << b) ^ (1 << c);
                    let (decoded, r) = standard::decode(damaged);
                    assert_eq!(decoded, 0xABC);
                    assert_eq!(r.errors_corrected, 3);
                    assert!(!r.uncorrectable);
                }
            }
        }
    }

    #[test]
    fn test_extended_roundtrip_and_parity() {
        for data in [0u16, 1, 0x5A5, 0xFFF, 0x800] {
            let word = extended::encode(data);
            assert_eq!(word.count_ones() % 2, 0);
            let (decoded, r) = extended::decode(word);
            assert_eq!(decoded, data);
            assert_eq!(r, FecResult::clean(24));
        }
    }

    #[test]
    fn test_extended_rejects_weight_four() {
        // Distance 8: any 4 flips sit at distance >= 4 from every
        // codeword, so none may silently decode to a wrong word.
        let word = extended::encode(0x123);
        for a in 0..24u32 {
            for b in a + 1..24 {
                for c in b + 1..24 {
                    for d in c + 1..24 {
                        let damaged = word ^ (1 << a) ^ (1 << b) ^ (1 << c) ^ (1 << d);
                        let (_, r) = extended::decode(damaged);
                        assert!(r.uncorrectable);
                    }
                }
            }
        }
    }

    #[test]
    fn test_shortened_roundtrip() {
        for data in 0..=255u8 {
            let word = shortened::encode(data);
            assert_eq!(word >> 20, 0);
            let (decoded, r) = shortened::decode(word);
            assert_eq!(decoded, data);
            assert_eq!(r, FecResult::clean(20));
        }
    }

    #[test]
    fn test_shortened_all_zero_word_survives_three_flips() {
        assert_eq!(shortened::encode(0x00), 0);
        for a in 0..20 {
            for b in a + 1..20 {
                for c in b + 1..20 {
                    let damaged = (1u32 << a) | (1 << b) | (1 << c);
                    let (decoded, r) = shortened::decode(damaged);
                    assert_eq!(decoded, 0x00);
                    assert_eq!(r.errors_corrected, 3);
                    assert!(!r.uncorrectable);
                }
            }
        }
    }
}
