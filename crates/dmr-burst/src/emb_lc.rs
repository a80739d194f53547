//! Full LC reassembly from the embedded signalling of voice bursts
//! B..E (ETSI TS 102 361-1 §9.1.2).
//!
//! Four 32-bit embedded data windows make up one vbptc(128,77) unit:
//! 72 LC bits plus a 5-bit mod-31 checksum over the nine LC bytes.

use dmr_core::bits;
use dmr_core::FecResult;
use dmr_fec::{crc, vbptc_128_77};

pub const FRAGMENT_BITS: usize = vbptc_128_77::FRAGMENT_BITS;
pub const LC_BYTES: usize = 9;

/// A reassembled 72-bit full LC message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullLc {
    pub bytes: [u8; LC_BYTES],
    /// The embedded 5-bit checksum matched the LC bytes.
    pub checksum_ok: bool,
}

/// Build the four 32-bit embedded data windows carrying `bytes`.
pub fn encode_full_lc(bytes: &[u8; LC_BYTES]) -> [[u8; FRAGMENT_BITS]; 4] {
    let mut info = [0u8; vbptc_128_77::INFO_BITS];
    for (i, &byte) in bytes.iter().enumerate() {
        bits::u64_to_bits(byte as u64, &mut info[i * 8..(i + 1) * 8]);
    }
    bits::u64_to_bits(crc::checksum_mod31(bytes) as u64, &mut info[72..77]);

    let transmitted = vbptc_128_77::encode(&info);
    let mut fragments = [[0u8; FRAGMENT_BITS]; 4];
    for (i, fragment) in fragments.iter_mut().enumerate() {
        fragment.copy_from_slice(&transmitted[i * FRAGMENT_BITS..(i + 1) * FRAGMENT_BITS]);
    }
    fragments
}

/// Reassembles a full LC from four embedded data fragments.
///
/// One instance per logical channel. Feed the fragment of each voice
/// burst whose EMB announces LC signalling; [`reset`](Self::reset) on
/// a first-fragment LCSS or on loss of the superframe.
#[derive(Debug)]
pub struct EmbeddedLcAssembler {
    collected: usize,
    bits: [u8; vbptc_128_77::TRANSMITTED_BITS],
}

impl Default for EmbeddedLcAssembler {
    fn default() -> Self {
        EmbeddedLcAssembler {
            collected: 0,
            bits: [0; vbptc_128_77::TRANSMITTED_BITS],
        }
    }
}

impl EmbeddedLcAssembler {
    pub fn new() -> Self {
        EmbeddedLcAssembler::default()
    }

    pub fn reset(&mut self) {
        self.collected = 0;
    }

    /// Add one 32-bit fragment; on the fourth, decode and drain. An
    /// uncorrectable unit is dropped.
    pub fn push(&mut self, fragment: &[u8; FRAGMENT_BITS]) -> Option<(FullLc, FecResult)> {
        let offset = self.collected * FRAGMENT_BITS;
        self.bits[offset..offset + FRAGMENT_BITS].copy_from_slice(fragment);
        self.collected += 1;
        if self.collected < 4 {
            return None;
        }
        self.collected = 0;

        let (info, result) = vbptc_128_77::decode(&self.bits);
        if result.uncorrectable {
            tracing::debug!("embedded lc dropped: uncorrectable after reassembly");
            return None;
        }

        let mut bytes = [0u8; LC_BYTES];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = bits::bits_to_u64(&info[i * 8..(i + 1) * 8]) as u8;
        }
        let checksum = bits::bits_to_u64(&info[72..77]) as u8;
        let checksum_ok = checksum == crc::checksum_mod31(&bytes);
        Some((FullLc { bytes, checksum_ok }, result))
    }
}
