//! The 16-bit EMB field of voice bursts (ETSI TS 102 361-1 §9.3.5)
//! and the reverse channel PDU it can announce.

use dmr_core::bits;
use dmr_core::codec_error::{CodecErr, expect_len};
use dmr_core::FecResult;
use dmr_fec::{bptc_32_11, crc, quadres};

pub const EMB_BITS: usize = 16;
pub const EMBEDDED_DATA_BITS: usize = 32;

/// CRC-7 mask of the reverse channel PDU.
pub const RC_CRC7_MASK: u8 = 0x7A;

/// Link control start/stop: position of this burst's 32-bit fragment
/// within the embedded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lcss {
    SingleFragment,
    FirstFragment,
    LastFragment,
    Continuation,
}

impl Lcss {
    pub fn from_raw(value: u8) -> Lcss {
        match value & 0x3 {
            0 => Lcss::SingleFragment,
            1 => Lcss::FirstFragment,
            2 => Lcss::LastFragment,
            _ => Lcss::Continuation,
        }
    }

    pub fn to_raw(self) -> u8 {
        match self {
            Lcss::SingleFragment => 0,
            Lcss::FirstFragment => 1,
            Lcss::LastFragment => 2,
            Lcss::Continuation => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emb {
    pub color_code: u8,
    /// Pre-emption and power control indicator. Together with
    /// `lcss == SingleFragment` it reclassifies the embedded data
    /// window as a reverse channel PDU.
    pub pi: bool,
    pub lcss: Lcss,
}

impl Emb {
    /// The embedded data window of this burst carries a reverse
    /// channel PDU instead of an LC fragment.
    pub fn announces_rc(&self) -> bool {
        self.pi && self.lcss == Lcss::SingleFragment
    }

    /// Decode the reassembled 16-bit field.
    pub fn decode(field: &[u8]) -> Result<(Emb, FecResult), CodecErr> {
        expect_len(EMB_BITS, field.len())?;
        let word = bits::bits_to_u64(field) as u16;
        let (data, result) = quadres::decode(word);
        let emb = Emb {
            color_code: data >> 3,
            pi: (data >> 2) & 1 == 1,
            lcss: Lcss::from_raw(data & 0x3),
        };
        Ok((emb, result))
    }

    pub fn encode(&self) -> Result<[u8; EMB_BITS], CodecErr> {
        if self.color_code > 0xF {
            return Err(CodecErr::ValueOutOfRange {
                field: "color_code",
                value: self.color_code as u64,
            });
        }
        let data = (self.color_code << 3) | (self.pi as u8) << 2 | self.lcss.to_raw();
        let word = quadres::encode(data);
        let mut field = [0u8; EMB_BITS];
        bits::u64_to_bits(word as u64, &mut field);
        Ok(field)
    }
}

/// Reverse channel PDU: 4 payload bits plus a masked CRC-7, carried
/// BPTC(32,11) coded with complemented parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReverseChannel {
    pub payload: u8,
    pub crc_ok: bool,
}

/// Decode the 32-bit embedded data window as a reverse channel PDU.
pub fn decode_rc(window: &[u8]) -> Result<(ReverseChannel, FecResult), CodecErr> {
    expect_len(EMBEDDED_DATA_BITS, window.len())?;
    let mut transmitted = [0u8; EMBEDDED_DATA_BITS];
    transmitted.copy_from_slice(window);
    let (info, result) = bptc_32_11::decode(&transmitted, true);
    let payload = (bits::bits_to_u64(&info[..4]) & 0xF) as u8;
    let crc_ok = !result.uncorrectable && crc::crc7_check(&info, RC_CRC7_MASK);
    Ok((ReverseChannel { payload, crc_ok }, result))
}

/// Build the 32-bit embedded data window for a reverse channel PDU.
pub fn encode_rc(payload: u8) -> Result<[u8; EMBEDDED_DATA_BITS], CodecErr> {
    if payload > 0xF {
        return Err(CodecErr::ValueOutOfRange { field: "rc_payload", value: payload as u64 });
    }
    let mut info = [0u8; bptc_32_11::INFO_BITS];
    bits::u64_to_bits(payload as u64, &mut info[..4]);
    let checksum = crc::crc7(&info[..4], RC_CRC7_MASK);
    bits::u64_to_bits(checksum as u64, &mut info[4..11]);
    Ok(bptc_32_11::encode(&info, true))
}
