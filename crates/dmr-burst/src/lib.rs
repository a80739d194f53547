//! DMR burst composition layer.
//!
//! Ties the codecs of `dmr-fec` to the fixed bit windows of the
//! 264-bit TDMA burst and the 24-bit CACH: sync classification, slot
//! type, EMB, payload dispatch by data type, and the multi-burst
//! assemblers for Short LC and embedded full LC.

pub mod burst;
pub mod cach;
pub mod emb;
pub mod emb_lc;
pub mod slot_type;
pub mod stats;
pub mod sync;

pub use burst::{Burst, BurstData, DecodedBurst, EmbField, EmbeddedData, Payload};
pub use cach::{ShortLcAssembler, Tact};
pub use emb::{Emb, Lcss, ReverseChannel};
pub use emb_lc::{EmbeddedLcAssembler, FullLc};
pub use slot_type::{DataType, SlotType};
pub use stats::BurstFecStats;
pub use sync::SyncPattern;
