//! The 48-bit synchronization patterns of ETSI TS 102 361-1 §9.1.1.

pub const SYNC_BITS: usize = 48;

pub const BS_SOURCED_VOICE: u64 = 0x755F_D7DF_75F7;
pub const BS_SOURCED_DATA: u64 = 0xDFF5_7D75_DF5D;
pub const MS_SOURCED_VOICE: u64 = 0x7F7D_5DD5_7DFD;
pub const MS_SOURCED_DATA: u64 = 0xD5D7_F77F_D757;
pub const MS_SOURCED_RC: u64 = 0x77D5_5F7D_FD77;
pub const DIRECT_TS1_VOICE: u64 = 0x5D57_7F77_57FF;
pub const DIRECT_TS1_DATA: u64 = 0xF7FD_D5DD_FD55;
pub const DIRECT_TS2_VOICE: u64 = 0x7DFF_D5F5_5D5F;
pub const DIRECT_TS2_DATA: u64 = 0xD755_7F5F_F7F5;
pub const RESERVED: u64 = 0xDD7F_F5D7_57DD;

/// Classification of the centre field of a burst. A centre that
/// matches no pattern carries embedded signalling instead of sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPattern {
    BsSourcedVoice,
    BsSourcedData,
    MsSourcedVoice,
    MsSourcedData,
    MsSourcedRc,
    DirectTs1Voice,
    DirectTs1Data,
    DirectTs2Voice,
    DirectTs2Data,
    Reserved,
    EmbeddedSignalling,
}

impl SyncPattern {
    pub fn classify(word: u64) -> SyncPattern {
        match word {
            BS_SOURCED_VOICE => SyncPattern::BsSourcedVoice,
            BS_SOURCED_DATA => SyncPattern::BsSourcedData,
            MS_SOURCED_VOICE => SyncPattern::MsSourcedVoice,
            MS_SOURCED_DATA => SyncPattern::MsSourcedData,
            MS_SOURCED_RC => SyncPattern::MsSourcedRc,
            DIRECT_TS1_VOICE => SyncPattern::DirectTs1Voice,
            DIRECT_TS1_DATA => SyncPattern::DirectTs1Data,
            DIRECT_TS2_VOICE => SyncPattern::DirectTs2Voice,
            DIRECT_TS2_DATA => SyncPattern::DirectTs2Data,
            RESERVED => SyncPattern::Reserved,
            _ => SyncPattern::EmbeddedSignalling,
        }
    }

    /// The wire value, if this classification has one.
    pub fn value(self) -> Option<u64> {
        match self {
            SyncPattern::BsSourcedVoice => Some(BS_SOURCED_VOICE),
            SyncPattern::BsSourcedData => Some(BS_SOURCED_DATA),
            SyncPattern::MsSourcedVoice => Some(MS_SOURCED_VOICE),
            SyncPattern::MsSourcedData => Some(MS_SOURCED_DATA),
            SyncPattern::MsSourcedRc => Some(MS_SOURCED_RC),
            SyncPattern::DirectTs1Voice => Some(DIRECT_TS1_VOICE),
            SyncPattern::DirectTs1Data => Some(DIRECT_TS1_DATA),
            SyncPattern::DirectTs2Voice => Some(DIRECT_TS2_VOICE),
            SyncPattern::DirectTs2Data => Some(DIRECT_TS2_DATA),
            SyncPattern::Reserved => Some(RESERVED),
            SyncPattern::EmbeddedSignalling => None,
        }
    }

    /// Starts a voice superframe.
    pub fn is_voice(self) -> bool {
        matches!(
            self,
            SyncPattern::BsSourcedVoice
                | SyncPattern::MsSourcedVoice
                | SyncPattern::DirectTs1Voice
                | SyncPattern::DirectTs2Voice
        )
    }

    /// Announces a data burst (slot type present).
    pub fn is_data(self) -> bool {
        matches!(
            self,
            SyncPattern::BsSourcedData
                | SyncPattern::MsSourcedData
                | SyncPattern::DirectTs1Data
                | SyncPattern::DirectTs2Data
        )
    }
}
