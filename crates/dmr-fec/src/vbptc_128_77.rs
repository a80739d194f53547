//! Variable-length BPTC(128,77) for the full LC embedded in voice
//! bursts B..E (ETSI TS 102 361-1 §B.2.1).
//!
//! 8x16 grid: rows 0..7 carry Hamming(16,11,4), row 7 is even column
//! parity. The 77 info bits (72 LC bits plus the 5-bit checksum) are
//! columns 0..11 of the coded rows. Transmission is column-major,
//! 32 bits per voice burst.

use crate::bptc::{self, ColCheck, Geometry};
use crate::hamming::HAMMING_16_11_4;
use dmr_core::FecResult;

pub const TRANSMITTED_BITS: usize = 128;
pub const INFO_BITS: usize = 77;
pub const FRAGMENT_BITS: usize = 32;

static GRID: Geometry = Geometry {
    rows: 8,
    cols: 16,
    row_code: &HAMMING_16_11_4,
    coded_rows: 7,
    col_check: ColCheck::Parity { odd: false },
};

pub fn decode(transmitted: &[u8; TRANSMITTED_BITS]) -> ([u8; INFO_BITS], FecResult) {
    let mut grid = [0u8; TRANSMITTED_BITS];
    for (j, &bit) in transmitted.iter().enumerate() {
        grid[(j % 8) * 16 + j / 8] = bit & 1;
    }
    let (flips, consistent) = bptc::correct(&mut grid, &GRID);

    let mut info = [0u8; INFO_BITS];
    for r in 0..7 {
        info[r * 11..(r + 1) * 11].copy_from_slice(&grid[r * 16..r * 16 + 11]);
    }

    let result = if consistent {
        FecResult::corrected(TRANSMITTED_BITS, flips)
    } else {
        FecResult::failed(TRANSMITTED_BITS, flips)
    };
    (info, result)
}

pub fn encode(info: &[u8; INFO_BITS]) -> [u8; TRANSMITTED_BITS] {
    let mut grid = [0u8; TRANSMITTED_BITS];
    for r in 0..7 {
        grid[r * 16..r * 16 + 11].copy_from_slice(&info[r * 11..(r + 1) * 11]);
    }
    bptc::encode(&mut grid, &GRID);

    let mut transmitted = [0u8; TRANSMITTED_BITS];
    for (j, bit) in transmitted.iter_mut().enumerate() {
        *bit = grid[(j % 8) * 16 + j / 8];
    }
    transmitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::random_range;

    fn random_info() -> [u8; INFO_BITS] {
        let mut info = [0u8; INFO_BITS];
        for bit in info.iter_mut() {
            *bit = random_range(0..2) as u8;
        }
        info
    }

    #[test]
    fn test_roundtrip() {
        for _ in 0..50 {
            let info = random_info();
            let (decoded, r) = decode(&encode(&info));
            assert_eq!(decoded, info);
            assert_eq!(r, FecResult::clean(TRANSMITTED_BITS));
        }
    }

    #[test]
    fn test_single_error_anywhere() {
        let info = random_info();
        let clean = encode(&info);
        for pos in 0..TRANSMITTED_BITS {
            let mut damaged = clean;
            damaged[pos] ^= 1;
            let (decoded, r) = decode(&damaged);
            assert_eq!(decoded, info, "error at {}", pos);
            assert_eq!(r.errors_corrected, 1);
            assert!(!r.uncorrectable);
        }
    }

    #[test]
    fn test_double_error_in_one_row_is_not_silent() {
        // Hamming(16,11,4) detects but cannot locate a double error,
        // and the parity row cannot be blamed while a coded row is
        // dirty, so the grid must come back uncorrectable.
        let info = random_info();
        let mut damaged = encode(&info);
        // Grid (2, 3) and (2, 9): transmitted positions c*8 + r
        damaged[3 * 8 + 2] ^= 1;
        damaged[9 * 8 + 2] ^= 1;
        let (_, r) = decode(&damaged);
        assert!(r.uncorrectable);
    }
}
