//! The Hamming code family used by the BPTC grids
//! (ETSI TS 102 361-1 §B.3.1).
//!
//! Each code is a [`HammingCode`] descriptor holding the parity-check
//! matrix as one column per codeword bit. All codes are systematic:
//! data bits first, then the parity bits, whose columns are the unit
//! vectors. Decoding computes the syndrome and scans the columns for a
//! match, correcting at most one bit.

use dmr_core::FecResult;

pub struct HammingCode {
    pub n: usize,
    pub k: usize,
    /// One parity-check column per codeword bit; bit `j` of a column
    /// means the bit participates in parity equation `j`. The last
    /// `n - k` columns are the unit vectors.
    columns: &'static [u8],
}

/// Hamming(7,4,3), protecting the TACT field of the CACH.
pub static HAMMING_7_4_3: HammingCode = HammingCode {
    n: 7,
    k: 4,
    columns: &[5, 7, 3, 6, 1, 2, 4],
};

/// Hamming(13,9,3), the column code of the 196/96 grid.
pub static HAMMING_13_9_3: HammingCode = HammingCode {
    n: 13,
    k: 9,
    columns: &[15, 7, 14, 5, 10, 13, 3, 6, 12, 1, 2, 4, 8],
};

/// Hamming(15,11,3), the row code of the 196/96 grid.
pub static HAMMING_15_11_3: HammingCode = HammingCode {
    n: 15,
    k: 11,
    columns: &[9, 11, 15, 7, 14, 5, 10, 13, 3, 6, 12, 1, 2, 4, 8],
};

/// Hamming(16,11,4), the row code of the embedded-LC and single-burst
/// grids. Distance 4: every column has odd weight, so double errors
/// are detected, never miscorrected onto a single column.
pub static HAMMING_16_11_4: HammingCode = HammingCode {
    n: 16,
    k: 11,
    columns: &[25, 11, 31, 7, 14, 21, 26, 13, 19, 22, 28, 1, 2, 4, 8, 16],
};

/// Hamming(17,12,3), the row code of the Short LC grid.
pub static HAMMING_17_12_3: HammingCode = HammingCode {
    n: 17,
    k: 12,
    columns: &[27, 31, 23, 7, 14, 28, 17, 11, 22, 5, 10, 20, 1, 2, 4, 8, 16],
};

impl HammingCode {
    pub const fn parity_bits(&self) -> usize {
        self.n - self.k
    }

    /// Syndrome of a full codeword (bit-per-byte, length `n`).
    pub fn syndrome(&self, word: &[u8]) -> u8 {
        debug_assert_eq!(word.len(), self.n);
        let mut syn = 0u8;
        for (bit, &col) in word.iter().zip(self.columns) {
            if bit & 1 == 1 {
                syn ^= col;
            }
        }
        syn
    }

    /// Fill in the parity bits of `word` from its first `k` data bits.
    pub fn encode(&self, word: &mut [u8]) {
        debug_assert_eq!(word.len(), self.n);
        let mut syn = 0u8;
        for (bit, &col) in word[..self.k].iter().zip(self.columns) {
            if bit & 1 == 1 {
                syn ^= col;
            }
        }
        // Parity columns are unit vectors, so the parity bits are just
        // the data syndrome spelled out.
        for j in 0..self.parity_bits() {
            word[self.k + j] = (syn >> j) & 1;
        }
    }

    /// Correct at most one bit in place. `Some(flips)` on success,
    /// `None` when the syndrome matches no single column.
    pub fn correct(&self, word: &mut [u8]) -> Option<usize> {
        let syn = self.syndrome(word);
        if syn == 0 {
            return Some(0);
        }
        for (i, &col) in self.columns.iter().enumerate() {
            if col == syn {
                word[i] ^= 1;
                return Some(1);
            }
        }
        None
    }

    /// [`correct`](Self::correct) wrapped as a [`FecResult`].
    pub fn correct_reported(&self, word: &mut [u8]) -> FecResult {
        match self.correct(word) {
            Some(flips) => FecResult::corrected(self.n, flips),
            None => FecResult::failed(self.n, 0),
        }
    }
}
