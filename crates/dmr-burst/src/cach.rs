//! The 24-bit Common Announcement Channel between bursts
//! (ETSI TS 102 361-1 §9.3.4) and Short LC reassembly.
//!
//! The TACT (access type, announced TDMA channel, LCSS) occupies seven
//! fixed bit positions under Hamming(7,4,3); the other 17 bits carry
//! one column of the BPTC(68,36) Short LC grid. Four consecutive CACHs
//! complete one Short LC.

use crate::emb::Lcss;
use dmr_core::codec_error::{CodecErr, expect_len};
use dmr_core::FecResult;
use dmr_fec::bptc_68_36;
use dmr_fec::hamming::HAMMING_7_4_3;

pub const CACH_BITS: usize = 24;
pub const FRAGMENT_BITS: usize = bptc_68_36::FRAGMENT_BITS;

/// Bit positions of the TACT inside the CACH; the payload fragment
/// fills the gaps in order.
const TACT_POSITIONS: [usize; 7] = [0, 4, 8, 12, 14, 18, 22];

/// TDMA access/timing announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tact {
    /// Inbound channel may be accessed in the announced slot.
    pub access_ok: bool,
    /// Announced TDMA channel (0 or 1).
    pub tdma_channel: u8,
    pub lcss: Lcss,
}

/// Decode one CACH into its TACT and 17-bit Short LC fragment.
pub fn decode(cach: &[u8]) -> Result<(Tact, [u8; FRAGMENT_BITS], FecResult), CodecErr> {
    expect_len(CACH_BITS, cach.len())?;

    let mut tact_word = [0u8; 7];
    for (i, &pos) in TACT_POSITIONS.iter().enumerate() {
        tact_word[i] = cach[pos] & 1;
    }
    let result = HAMMING_7_4_3.correct_reported(&mut tact_word);
    let tact = Tact {
        access_ok: tact_word[0] == 1,
        tdma_channel: tact_word[1],
        lcss: Lcss::from_raw((tact_word[2] << 1) | tact_word[3]),
    };

    let mut fragment = [0u8; FRAGMENT_BITS];
    let mut n = 0;
    for (pos, &bit) in cach.iter().enumerate() {
        if !TACT_POSITIONS.contains(&pos) {
            fragment[n] = bit & 1;
            n += 1;
        }
    }

    Ok((tact, fragment, result))
}

/// Build one CACH from a TACT and a 17-bit Short LC fragment.
pub fn encode(tact: &Tact, fragment: &[u8]) -> Result<[u8; CACH_BITS], CodecErr> {
    expect_len(FRAGMENT_BITS, fragment.len())?;
    if tact.tdma_channel > 1 {
        return Err(CodecErr::ValueOutOfRange {
            field: "tdma_channel",
            value: tact.tdma_channel as u64,
        });
    }

    let mut tact_word = [0u8; 7];
    tact_word[0] = tact.access_ok as u8;
    tact_word[1] = tact.tdma_channel;
    tact_word[2] = tact.lcss.to_raw() >> 1;
    tact_word[3] = tact.lcss.to_raw() & 1;
    HAMMING_7_4_3.encode(&mut tact_word);

    let mut cach = [0u8; CACH_BITS];
    for (i, &pos) in TACT_POSITIONS.iter().enumerate() {
        cach[pos] = tact_word[i];
    }
    let mut n = 0;
    for (pos, bit) in cach.iter_mut().enumerate() {
        if !TACT_POSITIONS.contains(&pos) {
            *bit = fragment[n] & 1;
            n += 1;
        }
    }
    Ok(cach)
}

/// Reassembles a Short LC from four CACH fragments.
///
/// One instance per logical channel; feed fragments in reception order
/// and [`reset`](Self::reset) on a first-fragment LCSS or after a slot
/// desync. An uncorrectable Short LC is dropped, not surfaced.
#[derive(Debug)]
pub struct ShortLcAssembler {
    collected: usize,
    bits: [u8; bptc_68_36::TRANSMITTED_BITS],
}

impl Default for ShortLcAssembler {
    fn default() -> Self {
        ShortLcAssembler {
            collected: 0,
            bits: [0; bptc_68_36::TRANSMITTED_BITS],
        }
    }
}

impl ShortLcAssembler {
    pub fn new() -> Self {
        ShortLcAssembler::default()
    }

    pub fn reset(&mut self) {
        self.collected = 0;
    }

    /// Add one 17-bit fragment; on the fourth, decode and drain.
    pub fn push(
        &mut self,
        fragment: &[u8; FRAGMENT_BITS],
    ) -> Option<([u8; bptc_68_36::INFO_BITS], FecResult)> {
        let offset = self.collected * FRAGMENT_BITS;
        self.bits[offset..offset + FRAGMENT_BITS].copy_from_slice(fragment);
        self.collected += 1;
        if self.collected < 4 {
            return None;
        }
        self.collected = 0;
        let (info, result) = bptc_68_36::decode(&self.bits);
        if result.uncorrectable {
            tracing::debug!("short lc dropped: uncorrectable after reassembly");
            None
        } else {
            Some((info, result))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::random_range;

    #[test]
    fn test_tact_positions_are_sparse_and_sorted() {
        for w in TACT_POSITIONS.windows(2) {
            assert!(w[0] < w[1]);
        }
        assert!(TACT_POSITIONS.iter().all(|&p| p < CACH_BITS));
    }

    #[test]
    fn test_cach_roundtrip() {
        let tact = Tact { access_ok: true, tdma_channel: 1, lcss: Lcss::FirstFragment };
        let mut fragment = [0u8; FRAGMENT_BITS];
        for bit in fragment.iter_mut() {
            *bit = random_range(0..2) as u8;
        }
        let cach = encode(&tact, &fragment).unwrap();
        let (decoded, frag, r) = decode(&cach).unwrap();
        assert_eq!(decoded, tact);
        assert_eq!(frag, fragment);
        assert_eq!(r, FecResult::clean(7));
    }

    #[test]
    fn test_tact_single_error() {
        let tact = Tact { access_ok: false, tdma_channel: 0, lcss: Lcss::LastFragment };
        let mut cach = encode(&tact, &[0u8; FRAGMENT_BITS]).unwrap();
        cach[TACT_POSITIONS[3]] ^= 1;
        let (decoded, _, r) = decode(&cach).unwrap();
        assert_eq!(decoded, tact);
        assert_eq!(r.errors_corrected, 1);
    }

    #[test]
    fn test_short_lc_reassembly() {
        let mut info = [0u8; bptc_68_36::INFO_BITS];
        for bit in info.iter_mut() {
            *bit = random_range(0..2) as u8;
        }
        let coded = bptc_68_36::encode(&info);

        let mut assembler = ShortLcAssembler::new();
        for (i, chunk) in coded.chunks(FRAGMENT_BITS).enumerate() {
            let mut fragment = [0u8; FRAGMENT_BITS];
            fragment.copy_from_slice(chunk);
            let out = assembler.push(&fragment);
            if i < 3 {
                assert!(out.is_none());
            } else {
                let (decoded, r) = out.unwrap();
                assert_eq!(decoded, info);
                assert!(!r.uncorrectable);
            }
        }
    }

    #[test]
    fn test_reset_discards_partial_lc() {
        let info = [1u8; bptc_68_36::INFO_BITS];
        let coded = bptc_68_36::encode(&info);
        let mut fragments = [[0u8; FRAGMENT_BITS]; 4];
        for (i, chunk) in coded.chunks(FRAGMENT_BITS).enumerate() {
            fragments[i].copy_from_slice(chunk);
        }

        let mut assembler = ShortLcAssembler::default();
        assert!(assembler.push(&fragments[2]).is_none());
        assembler.reset();
        for out in [
            assembler.push(&fragments[0]),
            assembler.push(&fragments[1]),
            assembler.push(&fragments[2]),
        ] {
            assert!(out.is_none());
        }
        let (decoded, _) = assembler.push(&fragments[3]).unwrap();
        assert_eq!(decoded, info);
    }

    #[test]
    fn test_uncorrectable_lc_is_dropped() {
        let info = [0u8; bptc_68_36::INFO_BITS];
        let mut coded = bptc_68_36::encode(&info);
        // Two errors in one Hamming(17,12,3) row whose syndrome sum
        // matches no single column: the row stays dirty and the unit
        // must be dropped. Grid (1,0) and (1,2) sit at transmitted
        // positions c*4 + r.
        coded[1] ^= 1;
        coded[9] ^= 1;

        let mut assembler = ShortLcAssembler::new();
        let mut last = None;
        for chunk in coded.chunks(FRAGMENT_BITS) {
            let mut fragment = [0u8; FRAGMENT_BITS];
            fragment.copy_from_slice(chunk);
            last = Some(assembler.push(&fragment));
        }
        assert_eq!(last, Some(None));
    }
}
