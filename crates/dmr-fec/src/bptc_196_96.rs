//! BPTC(196,96), the payload code of every coded data burst
//! (ETSI TS 102 361-1 §B.1.1).
//!
//! 196 transmitted bits deinterleave into one pad bit plus a 13x15
//! grid: rows 0..9 carry Hamming(15,11,3), every column carries
//! Hamming(13,9,3). The 96 info bits occupy row 0 columns 3..11 and
//! rows 1..9 columns 0..11.

use crate::bptc::{self, ColCheck, Geometry};
use crate::hamming::{HAMMING_13_9_3, HAMMING_15_11_3};
use dmr_core::FecResult;

pub const TRANSMITTED_BITS: usize = 196;
pub const INFO_BITS: usize = 96;

static GRID: Geometry = Geometry {
    rows: 13,
    cols: 15,
    row_code: &HAMMING_15_11_3,
    coded_rows: 9,
    col_check: ColCheck::Hamming(&HAMMING_13_9_3),
};

/// Position of logical bit `i` in the transmitted stream.
fn spread(i: usize) -> usize {
    i * 181 % TRANSMITTED_BITS
}

/// Deinterleave, run the product correction, extract the 96 info bits.
pub fn decode(transmitted: &[u8; TRANSMITTED_BITS]) -> ([u8; INFO_BITS], FecResult) {
    let mut logical = [0u8; TRANSMITTED_BITS];
    for (i, bit) in logical.iter_mut().enumerate() {
        *bit = transmitted[spread(i)] & 1;
    }

    // Logical bit 0 is padding; the grid starts at bit 1.
    let grid = &mut logical[1..];
    let (flips, consistent) = bptc::correct(grid, &GRID);

    let mut info = [0u8; INFO_BITS];
    info[..8].copy_from_slice(&grid[3..11]);
    for r in 1..9 {
        info[8 + (r - 1) * 11..8 + r * 11].copy_from_slice(&grid[r * 15..r * 15 + 11]);
    }

    let result = if consistent {
        FecResult::corrected(TRANSMITTED_BITS, flips)
    } else {
        FecResult::failed(TRANSMITTED_BITS, flips)
    };
    tracing::trace!(
        "bptc 196/96 decode: {} flips, consistent={}",
        flips,
        consistent
    );
    (info, result)
}

/// Place the 96 info bits, fill all parity, interleave.
pub fn encode(info: &[u8; INFO_BITS]) -> [u8; TRANSMITTED_BITS] {
    let mut logical = [0u8; TRANSMITTED_BITS];
    {
        let grid = &mut logical[1..];
        grid[3..11].copy_from_slice(&info[..8]);
        for r in 1..9 {
            grid[r * 15..r * 15 + 11].copy_from_slice(&info[8 + (r - 1) * 11..8 + r * 11]);
        }
        bptc::encode(grid, &GRID);
    }

    let mut transmitted = [0u8; TRANSMITTED_BITS];
    for (i, &bit) in logical.iter().enumerate() {
        transmitted[spread(i)] = bit;
    }
    transmitted
}
