//! Shared block-product correction engine for the BPTC family.
//!
//! A BPTC grid is a row-major bit matrix where the first `coded_rows`
//! rows carry a Hamming row code and every column carries either a
//! Hamming code or a single parity bit in the last row. Correction
//! alternates column and row passes until a pass changes nothing, with
//! a hard ceiling of [`MAX_PASSES`]; the final consistency check
//! decides whether the grid is trustworthy.

use crate::hamming::HammingCode;

/// Iteration ceiling. Grids this small either settle within a few
/// passes or oscillate; five passes is the cutoff.
pub const MAX_PASSES: usize = 5;

pub enum ColCheck {
    Hamming(&'static HammingCode),
    /// Single parity row (the last row). `odd` selects odd parity,
    /// used by the reverse channel variant.
    Parity { odd: bool },
}

pub struct Geometry {
    pub rows: usize,
    pub cols: usize,
    pub row_code: &'static HammingCode,
    /// Rows protected by the row code; the remaining rows hold column
    /// parity and are covered by the column check only.
    pub coded_rows: usize,
    pub col_check: ColCheck,
}

impl Geometry {
    fn rows_clean(&self, grid: &[u8]) -> bool {
        (0..self.coded_rows)
            .all(|r| self.row_code.syndrome(&grid[r * self.cols..(r + 1) * self.cols]) == 0)
    }

    fn col_violations(&self, grid: &[u8], odd: bool) -> u32 {
        let mut violations = 0;
        for j in 0..self.cols {
            let mut p = 0u8;
            for r in 0..self.rows {
                p ^= grid[r * self.cols + j] & 1;
            }
            if p != odd as u8 {
                violations += 1;
            }
        }
        violations
    }
}

/// Iteratively correct `grid` in place. Returns the number of bit
/// flips applied and whether the grid ended up fully consistent.
pub fn correct(grid: &mut [u8], geo: &Geometry) -> (usize, bool) {
    debug_assert_eq!(grid.len(), geo.rows * geo.cols);
    let mut flips = 0;

    for pass in 0..MAX_PASSES {
        let mut pass_flips = 0;

        match geo.col_check {
            ColCheck::Hamming(code) => {
                let mut col = [0u8; 16];
                for j in 0..geo.cols {
                    for r in 0..geo.rows {
                        col[r] = grid[r * geo.cols + j];
                    }
                    // An unfixable column is left for the row pass
                    if let Some(n) = code.correct(&mut col[..geo.rows]) {
                        if n > 0 {
                            pass_flips += n;
                            for r in 0..geo.rows {
                                grid[r * geo.cols + j] = col[r];
                            }
                        }
                    }
                }
            }
            ColCheck::Parity { odd } => {
                // A parity violation can only be pinned on the parity
                // row once every coded row checks out.
                if geo.rows_clean(grid) {
                    for j in 0..geo.cols {
                        let mut p = 0u8;
                        for r in 0..geo.rows {
                            p ^= grid[r * geo.cols + j] & 1;
                        }
                        if p != odd as u8 {
                            grid[(geo.rows - 1) * geo.cols + j] ^= 1;
                            pass_flips += 1;
                        }
                    }
                }
            }
        }

        for r in 0..geo.coded_rows {
            let row = &mut grid[r * geo.cols..(r + 1) * geo.cols];
            if let Some(n) = geo.row_code.correct(row) {
                pass_flips += n;
            }
        }

        flips += pass_flips;
        if pass_flips == 0 {
            tracing::trace!("bptc settled after {} passes, {} flips", pass + 1, flips);
            break;
        }
    }

    (flips, is_consistent(grid, geo))
}

/// Fill in all parity bits of `grid` from its data positions. Rows
/// first, so the column check also covers the row parity bits.
pub fn encode(grid: &mut [u8], geo: &Geometry) {
    debug_assert_eq!(grid.len(), geo.rows * geo.cols);
    for r in 0..geo.coded_rows {
        geo.row_code.encode(&mut grid[r * geo.cols..(r + 1) * geo.cols]);
    }
    match geo.col_check {
        ColCheck::Hamming(code) => {
            let mut col = [0u8; 16];
            for j in 0..geo.cols {
                for r in 0..geo.rows {
                    col[r] = grid[r * geo.cols + j];
                }
                code.encode(&mut col[..geo.rows]);
                for r in code.k..geo.rows {
                    grid[r * geo.cols + j] = col[r];
                }
            }
        }
        ColCheck::Parity { odd } => {
            for j in 0..geo.cols {
                let mut p = 0u8;
                for r in 0..geo.rows - 1 {
                    p ^= grid[r * geo.cols + j] & 1;
                }
                grid[(geo.rows - 1) * geo.cols + j] = p ^ odd as u8;
            }
        }
    }
}

pub fn is_consistent(grid: &[u8], geo: &Geometry) -> bool {
    if !geo.rows_clean(grid) {
        return false;
    }
    match geo.col_check {
        ColCheck::Hamming(code) => {
            let mut col = [0u8; 16];
            for j in 0..geo.cols {
                for r in 0..geo.rows {
                    col[r] = grid[r * geo.cols + j];
                }
                if code.syndrome(&col[..geo.rows]) != 0 {
                    return false;
                }
            }
            true
        }
        ColCheck::Parity { odd } => geo.col_violations(grid, odd) == 0,
    }
}
