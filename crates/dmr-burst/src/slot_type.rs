//! The 20-bit slot type field of data bursts (ETSI TS 102 361-1
//! §9.3.6), Golay(20,8,7) protected.

use dmr_core::bits;
use dmr_core::codec_error::{CodecErr, expect_len};
use dmr_core::FecResult;
use dmr_fec::golay;

pub const SLOT_TYPE_BITS: usize = 20;

/// Payload kind announced by a data burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    PiHeader,
    VoiceLcHeader,
    TerminatorWithLc,
    Csbk,
    MbcHeader,
    MbcContinuation,
    DataHeader,
    Rate12Data,
    Rate34Data,
    Idle,
    Rate1Data,
    UnifiedSingleBlock,
    Reserved(u8),
}

impl DataType {
    pub fn from_raw(value: u8) -> DataType {
        match value & 0xF {
            0 => DataType::PiHeader,
            1 => DataType::VoiceLcHeader,
            2 => DataType::TerminatorWithLc,
            3 => DataType::Csbk,
            4 => DataType::MbcHeader,
            5 => DataType::MbcContinuation,
            6 => DataType::DataHeader,
            7 => DataType::Rate12Data,
            8 => DataType::Rate34Data,
            9 => DataType::Idle,
            10 => DataType::Rate1Data,
            11 => DataType::UnifiedSingleBlock,
            v => DataType::Reserved(v),
        }
    }

    pub fn to_raw(self) -> u8 {
        match self {
            DataType::PiHeader => 0,
            DataType::VoiceLcHeader => 1,
            DataType::TerminatorWithLc => 2,
            DataType::Csbk => 3,
            DataType::MbcHeader => 4,
            DataType::MbcContinuation => 5,
            DataType::DataHeader => 6,
            DataType::Rate12Data => 7,
            DataType::Rate34Data => 8,
            DataType::Idle => 9,
            DataType::Rate1Data => 10,
            DataType::UnifiedSingleBlock => 11,
            DataType::Reserved(v) => v & 0xF,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotType {
    pub color_code: u8,
    pub data_type: DataType,
}

impl SlotType {
    /// Decode the reassembled 20-bit field.
    pub fn decode(field: &[u8]) -> Result<(SlotType, FecResult), CodecErr> {
        expect_len(SLOT_TYPE_BITS, field.len())?;
        let word = bits::bits_to_u64(field) as u32;
        let (byte, result) = golay::shortened::decode(word);
        let slot_type = SlotType {
            color_code: byte >> 4,
            data_type: DataType::from_raw(byte & 0xF),
        };
        Ok((slot_type, result))
    }

    pub fn encode(&self) -> Result<[u8; SLOT_TYPE_BITS], CodecErr> {
        if self.color_code > 0xF {
            return Err(CodecErr::ValueOutOfRange {
                field: "color_code",
                value: self.color_code as u64,
            });
        }
        let byte = (self.color_code << 4) | self.data_type.to_raw();
        let word = golay::shortened::encode(byte);
        let mut field = [0u8; SLOT_TYPE_BITS];
        bits::u64_to_bits(word as u64, &mut field);
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_raw_roundtrip() {
        for raw in 0..16u8 {
            assert_eq!(DataType::from_raw(raw).to_raw(), raw);
        }
        assert_eq!(DataType::from_raw(8), DataType::Rate34Data);
        assert_eq!(DataType::from_raw(9), DataType::Idle);
        assert_eq!(DataType::from_raw(13), DataType::Reserved(13));
    }

    #[test]
    fn test_roundtrip() {
        for cc in 0..16u8 {
            for raw in 0..16u8 {
                let st = SlotType { color_code: cc, data_type: DataType::from_raw(raw) };
                let field = st.encode().unwrap();
                let (decoded, r) = SlotType::decode(&field).unwrap();
                assert_eq!(decoded, st);
                assert_eq!(r, FecResult::clean(SLOT_TYPE_BITS));
            }
        }
    }

    #[test]
    fn test_three_errors_corrected() {
        let st = SlotType { color_code: 5, data_type: DataType::Csbk };
        let mut field = st.encode().unwrap();
        field[0] ^= 1;
        field[9] ^= 1;
        field[19] ^= 1;
        let (decoded, r) = SlotType::decode(&field).unwrap();
        assert_eq!(decoded, st);
        assert_eq!(r.errors_corrected, 3);
        assert!(!r.uncorrectable);
    }

    #[test]
    fn test_color_code_out_of_range() {
        let st = SlotType { color_code: 16, data_type: DataType::Idle };
        assert!(st.encode().is_err());
    }

    #[test]
    fn test_wrong_length() {
        assert!(SlotType::decode(&[0u8; 19]).is_err());
    }
}
