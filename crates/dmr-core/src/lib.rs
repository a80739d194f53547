//! Foundation types for the DMR air-interface FEC stack.
//!
//! Everything above the demodulator exchanges bits as bit-per-byte arrays
//! (`&[u8]` with values 0/1); [`bits`] holds the packing helpers between
//! that currency and byte frames. [`fec_result`] carries per-codec error
//! accounting upward, [`codec_error`] covers structural misuse, and
//! [`debug`] wires up `tracing` for binaries and tests.

pub mod bits;
pub mod codec_error;
pub mod debug;
pub mod fec_result;

pub use codec_error::CodecErr;
pub use fec_result::{BerCalculator, FecResult};
