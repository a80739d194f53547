//! Per-burst FEC accounting.

use dmr_core::FecResult;
use serde::{Deserialize, Serialize};

/// One [`FecResult`] per protected sub-field of a burst. These four
/// are the sub-fields a burst codec runs over; voice bits pass
/// through unprotected and higher-layer PDU checks are accounted by
/// their own layer. Fields that were not present in the burst stay at
/// their default (zero bits checked).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurstFecStats {
    pub slot_type: FecResult,
    pub payload: FecResult,
    pub emb: FecResult,
    pub rc: FecResult,
}

impl BurstFecStats {
    /// All sub-fields folded together; `uncorrectable` is the OR over
    /// the fields, so one broken sub-field taints the whole burst.
    pub fn total(&self) -> FecResult {
        let mut total = FecResult::default();
        total.absorb(&self.slot_type);
        total.absorb(&self.payload);
        total.absorb(&self.emb);
        total.absorb(&self.rc);
        total
    }
}
