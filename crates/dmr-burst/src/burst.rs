//! The 264-bit TDMA burst (ETSI TS 102 361-1 §4.2.2).
//!
//! A burst is two 98-bit payload halves around a 48-bit centre field.
//! If the centre matches a sync pattern announcing data, 20 bits on
//! each side of it form the slot type, which selects the payload
//! codec. Otherwise the burst carries voice, and the centre is either
//! a voice sync word or EMB signalling wrapped around a 32-bit
//! embedded data window.
//!
//! Decoding is staged: each protected sub-field reports its own
//! [`FecResult`] into [`BurstFecStats`], and an uncorrectable stage
//! stops the descent instead of handing garbage upward.

use crate::emb::{self, Emb};
use crate::slot_type::{DataType, SlotType};
use crate::stats::BurstFecStats;
use crate::sync::SyncPattern;
use dmr_core::bits;
use dmr_core::codec_error::{CodecErr, expect_len};
use dmr_fec::{bptc_196_96, trellis};

pub const BURST_BITS: usize = 264;
pub const FRAME_BYTES: usize = 33;
pub const VOICE_BITS: usize = 216;
pub const PAYLOAD_BITS: usize = 196;

// Fixed windows, in bit positions. The payload and voice halves share
// the outer bits; which reading applies depends on the centre field.
const INFO_FIRST: std::ops::Range<usize> = 0..98;
const INFO_SECOND: std::ops::Range<usize> = 166..264;
const SLOT_TYPE_FIRST: std::ops::Range<usize> = 98..108;
const SLOT_TYPE_SECOND: std::ops::Range<usize> = 156..166;
const CENTER: std::ops::Range<usize> = 108..156;
const VOICE_FIRST: std::ops::Range<usize> = 0..108;
const VOICE_SECOND: std::ops::Range<usize> = 156..264;
const EMB_FIRST: std::ops::Range<usize> = 108..116;
const EMB_SECOND: std::ops::Range<usize> = 148..156;
const EMBEDDED_DATA: std::ops::Range<usize> = 116..148;

/// One received or constructed burst, as bit-per-byte array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Burst {
    bits: [u8; BURST_BITS],
}

/// Payload of a data burst after codec dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// BPTC(196,96) coded block (headers, CSBK, rate 1/2, idle, ...).
    Block([u8; 96]),
    /// Rate 3/4 trellis coded block.
    Rate34([u8; 144]),
    /// Rate 1 block, transmitted without FEC.
    Rate1([u8; PAYLOAD_BITS]),
    /// Slot type or payload FEC failed; the raw payload window is kept
    /// for diagnostics but must not be parsed.
    Unverified([u8; PAYLOAD_BITS]),
}

/// EMB reading of a voice burst centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbField {
    Decoded(Emb),
    /// FEC failed; the raw 16 field bits are kept so the burst can
    /// still be rebuilt on the wire.
    Unverified([u8; emb::EMB_BITS]),
}

/// Content of the embedded data window of a voice burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddedData {
    /// One 32-bit fragment of an embedded full LC, to be fed to an
    /// assembler.
    LcFragment([u8; emb::EMBEDDED_DATA_BITS]),
    Rc(emb::ReverseChannel),
    /// A reverse channel that failed its FEC or CRC, or a window
    /// behind an unreadable EMB. Raw bits, not to be parsed.
    Unverified([u8; emb::EMBEDDED_DATA_BITS]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstData {
    Data {
        slot_type: SlotType,
        payload: Payload,
    },
    Voice {
        voice: [u8; VOICE_BITS],
        /// `None` when the centre carried a sync word instead of EMB
        /// signalling.
        emb: Option<EmbField>,
        /// The embedded data window; `None` only together with
        /// `emb == None`.
        embedded: Option<EmbeddedData>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedBurst {
    pub sync: SyncPattern,
    pub data: BurstData,
    pub stats: BurstFecStats,
}

impl Burst {
    pub fn from_bytes(frame: &[u8]) -> Result<Burst, CodecErr> {
        expect_len(FRAME_BYTES, frame.len())?;
        let mut burst = Burst { bits: [0; BURST_BITS] };
        bits::unpack_bytes(frame, &mut burst.bits);
        tracing::trace!("burst frame {}", bits::dump_hex(frame));
        Ok(burst)
    }

    pub fn from_bits(raw: &[u8]) -> Result<Burst, CodecErr> {
        expect_len(BURST_BITS, raw.len())?;
        let mut burst = Burst { bits: [0; BURST_BITS] };
        for (dst, &src) in burst.bits.iter_mut().zip(raw) {
            *dst = src & 1;
        }
        Ok(burst)
    }

    pub fn to_bytes(&self) -> [u8; FRAME_BYTES] {
        let mut frame = [0u8; FRAME_BYTES];
        bits::pack_bytes(&self.bits, &mut frame);
        frame
    }

    pub fn bits(&self) -> &[u8; BURST_BITS] {
        &self.bits
    }

    pub fn sync_word(&self) -> u64 {
        bits::bits_to_u64(&self.bits[CENTER])
    }

    fn payload_window(&self) -> [u8; PAYLOAD_BITS] {
        let mut window = [0u8; PAYLOAD_BITS];
        window[..98].copy_from_slice(&self.bits[INFO_FIRST]);
        window[98..].copy_from_slice(&self.bits[INFO_SECOND]);
        window
    }

    fn slot_type_field(&self) -> [u8; 20] {
        let mut field = [0u8; 20];
        field[..10].copy_from_slice(&self.bits[SLOT_TYPE_FIRST]);
        field[10..].copy_from_slice(&self.bits[SLOT_TYPE_SECOND]);
        field
    }

    fn emb_field(&self) -> [u8; emb::EMB_BITS] {
        let mut field = [0u8; emb::EMB_BITS];
        field[..8].copy_from_slice(&self.bits[EMB_FIRST]);
        field[8..].copy_from_slice(&self.bits[EMB_SECOND]);
        field
    }

    fn embedded_data_window(&self) -> [u8; emb::EMBEDDED_DATA_BITS] {
        let mut window = [0u8; emb::EMBEDDED_DATA_BITS];
        window.copy_from_slice(&self.bits[EMBEDDED_DATA]);
        window
    }

    fn voice_bits(&self) -> [u8; VOICE_BITS] {
        let mut voice = [0u8; VOICE_BITS];
        voice[..108].copy_from_slice(&self.bits[VOICE_FIRST]);
        voice[108..].copy_from_slice(&self.bits[VOICE_SECOND]);
        voice
    }

    /// Classify and decode this burst down to its payload.
    pub fn decode(&self) -> Result<DecodedBurst, CodecErr> {
        let sync = SyncPattern::classify(self.sync_word());
        tracing::trace!("burst centre {:012X} -> {:?}", self.sync_word(), sync);
        let mut stats = BurstFecStats::default();

        let data = if sync.is_data() {
            let (slot_type, st_result) = SlotType::decode(&self.slot_type_field())?;
            stats.slot_type = st_result;
            let window = self.payload_window();
            tracing::trace!("payload window {}", bits::dump_bin(&window));

            let payload = if st_result.uncorrectable {
                tracing::debug!("slot type uncorrectable, payload left unverified");
                Payload::Unverified(window)
            } else {
                tracing::trace!(
                    "slot type cc={} {:?}",
                    slot_type.color_code,
                    slot_type.data_type
                );
                match slot_type.data_type {
                    DataType::Rate34Data => {
                        let (info, r) = trellis::decode(&window);
                        stats.payload = r;
                        Payload::Rate34(info)
                    }
                    DataType::Rate1Data => Payload::Rate1(window),
                    _ => {
                        let (info, r) = bptc_196_96::decode(&window);
                        stats.payload = r;
                        if r.uncorrectable {
                            Payload::Unverified(window)
                        } else {
                            Payload::Block(info)
                        }
                    }
                }
            };
            BurstData::Data { slot_type, payload }
        } else if sync == SyncPattern::EmbeddedSignalling {
            let voice = self.voice_bits();
            let (emb, emb_result) = Emb::decode(&self.emb_field())?;
            stats.emb = emb_result;

            let window = self.embedded_data_window();
            let (emb, embedded) = if emb_result.uncorrectable {
                tracing::debug!("emb uncorrectable, embedded data window left unverified");
                (
                    Some(EmbField::Unverified(self.emb_field())),
                    Some(EmbeddedData::Unverified(window)),
                )
            } else if emb.announces_rc() {
                let (rc, rc_result) = emb::decode_rc(&window)?;
                stats.rc = rc_result;
                if rc_result.uncorrectable || !rc.crc_ok {
                    tracing::debug!("reverse channel dropped (crc_ok={})", rc.crc_ok);
                    (
                        Some(EmbField::Decoded(emb)),
                        Some(EmbeddedData::Unverified(window)),
                    )
                } else {
                    (Some(EmbField::Decoded(emb)), Some(EmbeddedData::Rc(rc)))
                }
            } else {
                (
                    Some(EmbField::Decoded(emb)),
                    Some(EmbeddedData::LcFragment(window)),
                )
            };
            BurstData::Voice { voice, emb, embedded }
        } else {
            // Voice sync (superframe start), RC sync or the reserved
            // pattern: outer bits are voice, the centre is consumed by
            // the classification itself.
            BurstData::Voice {
                voice: self.voice_bits(),
                emb: None,
                embedded: None,
            }
        };

        Ok(DecodedBurst { sync, data, stats })
    }

    /// Build the wire burst for a decoded one. Exact inverse of
    /// [`decode`](Self::decode): unverified fields carry their raw
    /// bits, so every decoded burst re-encodes to a wire image.
    pub fn encode(decoded: &DecodedBurst) -> Result<Burst, CodecErr> {
        let mut bits = [0u8; BURST_BITS];

        match &decoded.data {
            BurstData::Data { slot_type, payload } => {
                let sync_word = decoded.sync.value().ok_or(CodecErr::NotEncodable {
                    reason: "data burst without a sync pattern",
                })?;
                bits::u64_to_bits(sync_word, &mut bits[CENTER]);

                let st_field = slot_type.encode()?;
                bits[SLOT_TYPE_FIRST].copy_from_slice(&st_field[..10]);
                bits[SLOT_TYPE_SECOND].copy_from_slice(&st_field[10..]);

                let window = match payload {
                    Payload::Block(info) => bptc_196_96::encode(info),
                    Payload::Rate34(info) => trellis::encode(info),
                    Payload::Rate1(raw) | Payload::Unverified(raw) => *raw,
                };
                bits[INFO_FIRST].copy_from_slice(&window[..98]);
                bits[INFO_SECOND].copy_from_slice(&window[98..]);
            }
            BurstData::Voice { voice, emb, embedded } => {
                bits[VOICE_FIRST].copy_from_slice(&voice[..108]);
                bits[VOICE_SECOND].copy_from_slice(&voice[108..]);

                match emb {
                    Some(field) => {
                        let emb_field = match field {
                            EmbField::Decoded(emb) => emb.encode()?,
                            EmbField::Unverified(raw) => *raw,
                        };
                        bits[EMB_FIRST].copy_from_slice(&emb_field[..8]);
                        bits[EMB_SECOND].copy_from_slice(&emb_field[8..]);

                        let window = match embedded {
                            Some(EmbeddedData::LcFragment(fragment)) => *fragment,
                            Some(EmbeddedData::Rc(rc)) => emb::encode_rc(rc.payload)?,
                            Some(EmbeddedData::Unverified(raw)) => *raw,
                            None => {
                                return Err(CodecErr::NotEncodable {
                                    reason: "embedded data window content missing",
                                });
                            }
                        };
                        bits[EMBEDDED_DATA].copy_from_slice(&window);
                    }
                    None => {
                        let sync_word = decoded.sync.value().ok_or(CodecErr::NotEncodable {
                            reason: "voice burst with neither sync nor emb",
                        })?;
                        bits::u64_to_bits(sync_word, &mut bits[CENTER]);
                    }
                }
            }
        }

        Ok(Burst { bits })
    }
}

impl DecodedBurst {
    pub fn encode(&self) -> Result<Burst, CodecErr> {
        Burst::encode(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emb::Lcss;

    #[test]
    fn test_frame_bit_roundtrip() {
        let frame: Vec<u8> = (0..FRAME_BYTES).map(|i| (i * 53 + 7) as u8).collect();
        let burst = Burst::from_bytes(&frame).unwrap();
        assert_eq!(burst.to_bytes().to_vec(), frame);
        let again = Burst::from_bits(burst.bits()).unwrap();
        assert_eq!(again, burst);
    }

    #[test]
    fn test_wrong_frame_length() {
        assert!(Burst::from_bytes(&[0u8; 32]).is_err());
        assert!(Burst::from_bits(&[0u8; 263]).is_err());
    }

    #[test]
    fn test_window_offsets_cover_the_burst() {
        // Data reading: info + slot type + centre partition the burst
        let total = (INFO_FIRST.len() + INFO_SECOND.len())
            + (SLOT_TYPE_FIRST.len() + SLOT_TYPE_SECOND.len())
            + CENTER.len();
        assert_eq!(total, BURST_BITS);
        // Voice reading: voice + centre partition the burst
        assert_eq!(VOICE_FIRST.len() + VOICE_SECOND.len() + CENTER.len(), BURST_BITS);
        // Centre split for embedded signalling
        assert_eq!(
            EMB_FIRST.len() + EMBEDDED_DATA.len() + EMB_SECOND.len(),
            CENTER.len()
        );
    }

    #[test]
    fn test_sync_word_extraction() {
        let mut decoded_bits = [0u8; BURST_BITS];
        bits::u64_to_bits(crate::sync::BS_SOURCED_DATA, &mut decoded_bits[CENTER]);
        let burst = Burst::from_bits(&decoded_bits).unwrap();
        assert_eq!(burst.sync_word(), crate::sync::BS_SOURCED_DATA);
        assert_eq!(
            SyncPattern::classify(burst.sync_word()),
            SyncPattern::BsSourcedData
        );
    }

    #[test]
    fn test_voice_burst_with_emb_roundtrip() {
        let mut voice = [0u8; VOICE_BITS];
        for (i, bit) in voice.iter_mut().enumerate() {
            *bit = ((i * 31 + 5) % 3 == 0) as u8;
        }
        let emb = Emb { color_code: 7, pi: false, lcss: Lcss::Continuation };
        let mut fragment = [0u8; emb::EMBEDDED_DATA_BITS];
        fragment[3] = 1;
        fragment[30] = 1;

        let decoded = DecodedBurst {
            sync: SyncPattern::EmbeddedSignalling,
            data: BurstData::Voice {
                voice,
                emb: Some(EmbField::Decoded(emb)),
                embedded: Some(EmbeddedData::LcFragment(fragment)),
            },
            stats: BurstFecStats::default(),
        };
        let wire = decoded.encode().unwrap();
        let back = wire.decode().unwrap();
        assert_eq!(back.sync, SyncPattern::EmbeddedSignalling);
        match back.data {
            BurstData::Voice { voice: v, emb: e, embedded } => {
                assert_eq!(v, voice);
                assert_eq!(e, Some(EmbField::Decoded(emb)));
                assert_eq!(embedded, Some(EmbeddedData::LcFragment(fragment)));
            }
            _ => panic!("expected voice"),
        }
    }
}
