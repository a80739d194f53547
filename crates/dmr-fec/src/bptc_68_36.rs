//! BPTC(68,36) for the Short LC carried piecewise in the CACH
//! (ETSI TS 102 361-2 Annex B).
//!
//! 4x17 grid: rows 0..3 carry Hamming(17,12,3), row 3 is even column
//! parity. The 36 info bits are columns 0..12 of the coded rows. On
//! the air the grid is sent column by column, 17 bits per CACH.

use crate::bptc::{self, ColCheck, Geometry};
use crate::hamming::HAMMING_17_12_3;
use dmr_core::FecResult;

pub const TRANSMITTED_BITS: usize = 68;
pub const INFO_BITS: usize = 36;
pub const FRAGMENT_BITS: usize = 17;

static GRID: Geometry = Geometry {
    rows: 4,
    cols: 17,
    row_code: &HAMMING_17_12_3,
    coded_rows: 3,
    col_check: ColCheck::Parity { odd: false },
};

fn gather(transmitted: &[u8; TRANSMITTED_BITS]) -> [u8; TRANSMITTED_BITS] {
    let mut grid = [0u8; TRANSMITTED_BITS];
    for (j, &bit) in transmitted.iter().enumerate() {
        grid[(j % 4) * 17 + j / 4] = bit & 1;
    }
    grid
}

pub fn decode(transmitted: &[u8; TRANSMITTED_BITS]) -> ([u8; INFO_BITS], FecResult) {
    let mut grid = gather(transmitted);
    let (flips, consistent) = bptc::correct(&mut grid, &GRID);

    let mut info = [0u8; INFO_BITS];
    for r in 0..3 {
        info[r * 12..(r + 1) * 12].copy_from_slice(&grid[r * 17..r * 17 + 12]);
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
    for r in 0..3 {
        grid[r * 17..r * 17 + 12].copy_from_slice(&info[r * 12..(r + 1) * 12]);
    }
    bptc::encode(&mut grid, &GRID);

    let mut transmitted = [0u8; TRANSMITTED_BITS];
    for (j, bit) in transmitted.iter_mut().enumerate() {
        *bit = grid[(j % 4) * 17 + j / 4];
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
    fn test_one_error_per_row() {
        let info = random_info();
        let mut damaged = encode(&info);
        // Grid (r, c) sits at transmitted position c*4 + r
        for (r, c) in [(0usize, 2usize), (1, 9), (2, 16), (3, 5)] {
            damaged[c * 4 + r] ^= 1;
        }
        let (decoded, r) = decode(&damaged);
        assert_eq!(decoded, info);
        assert_eq!(r.errors_corrected, 4);
        assert!(!r.uncorrectable);
    }
}
