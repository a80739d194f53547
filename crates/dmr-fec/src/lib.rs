//! Forward-error-correction codecs of the DMR air interface
//! (ETSI TS 102 361-1, Annex B).
//!
//! One flat module per code family. All codecs are pure functions over
//! bit-per-byte arrays (or small integers for the short block codes),
//! with `&'static` tables only, so everything here is `Sync` and safe
//! to call from any thread. Channel errors are reported as
//! [`dmr_core::FecResult`] values; only structural misuse (wrong buffer
//! length) is an `Err`.

pub mod bptc;
pub mod bptc_32_11;
pub mod bptc_68_36;
pub mod bptc_196_96;
pub mod crc;
pub mod golay;
pub mod hamming;
pub mod quadres;
pub mod reed_solomon;
pub mod trellis;
pub mod vbptc_128_77;
