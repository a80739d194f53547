//! Error-correction accounting.

use serde::{Deserialize, Serialize};

/// Outcome of one codec pass over one protected unit.
///
/// Produced by every decoder in the workspace and aggregated upward by
/// the burst layer. `uncorrectable` means the unit failed its final
/// consistency check; the corrected counts up to that point are still
/// reported so BER statistics stay meaningful.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FecResult {
    /// Number of channel bits this pass covered.
    pub bits_checked: usize,
    /// Number of bit flips the decoder applied (or, for detect-only
    /// checks, the number of mismatches it observed).
    pub errors_corrected: usize,
    /// The unit failed decoding; payload bits must not be trusted.
    pub uncorrectable: bool,
}

impl FecResult {
    /// A pass that found the unit already consistent.
    pub fn clean(bits_checked: usize) -> Self {
        FecResult { bits_checked, errors_corrected: 0, uncorrectable: false }
    }

    /// A successful pass that corrected `errors_corrected` bits.
    pub fn corrected(bits_checked: usize, errors_corrected: usize) -> Self {
        FecResult { bits_checked, errors_corrected, uncorrectable: false }
    }

    /// A failed pass. `errors_corrected` keeps whatever was fixed
    /// before the failure was established.
    pub fn failed(bits_checked: usize, errors_corrected: usize) -> Self {
        FecResult { bits_checked, errors_corrected, uncorrectable: true }
    }

    /// Fold another pass into this one. Counts add; `uncorrectable`
    /// is sticky.
    pub fn absorb(&mut self, other: &FecResult) {
        self.bits_checked += other.bits_checked;
        self.errors_corrected += other.errors_corrected;
        self.uncorrectable |= other.uncorrectable;
    }
}

/// Running bit-error-rate accumulator over a measurement window.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BerCalculator {
    bits_checked: u64,
    errors_corrected: u64,
}

impl BerCalculator {
    pub fn new() -> Self {
        BerCalculator::default()
    }

    pub fn absorb(&mut self, result: &FecResult) {
        self.bits_checked += result.bits_checked as u64;
        self.errors_corrected += result.errors_corrected as u64;
    }

    /// Current BER as a percentage; 0.0 while no bits have been seen.
    pub fn ber_percent(&self) -> f64 {
        if self.bits_checked == 0 {
            0.0
        } else {
            self.errors_corrected as f64 * 100.0 / self.bits_checked as f64
        }
    }

    pub fn bits_checked(&self) -> u64 {
        self.bits_checked
    }

    /// Start a new measurement window.
    pub fn reset(&mut self) {
        *self = BerCalculator::default();
    }
}
