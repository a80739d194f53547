//! The DMR CRC family (ETSI TS 102 361-1 §B.3).
//!
//! The short CRCs (7/8/9 bit) run over bit-per-byte arrays because their
//! inputs are not byte aligned on the air interface; CRC-CCITT and
//! CRC-32 run over byte slices. Each short CRC takes an output mask:
//! the standard XORs a per-PDU-type constant onto the register so that
//! a PDU checked against the wrong mask fails. Verifiers return `bool`
//! and never panic; input shorter than the CRC field is simply `false`.

/// x^7 + x^5 + x^2 + x + 1
pub const CRC7_POLY: u8 = 0x27;
/// x^8 + x^2 + x + 1
pub const CRC8_POLY: u8 = 0x07;
/// x^9 + x^6 + x^4 + x^3 + 1
pub const CRC9_POLY: u16 = 0x059;
/// x^16 + x^12 + x^5 + 1
pub const CRC16_POLY: u16 = 0x1021;
/// x^32 + x^26 + x^23 + x^22 + x^16 + x^12 + x^11 + x^10 + x^8 + x^7 + x^5 + x^4 + x^2 + x + 1
pub const CRC32_POLY: u32 = 0x04C1_1DB7;

/// CRC-7 over a bit array, XORed with `mask`.
pub fn crc7(bits: &[u8], mask: u8) -> u8 {
    let mut reg = 0u8;
    for &bit in bits {
        let msb = (reg >> 6) & 1;
        reg = (reg << 1) & 0x7F;
        if msb ^ (bit & 1) == 1 {
            reg ^= CRC7_POLY & 0x7F;
        }
    }
    reg ^ mask
}

/// Check a unit whose last 7 bits are its CRC-7.
pub fn crc7_check(bits: &[u8], mask: u8) -> bool {
    if bits.len() < 7 {
        return false;
    }
    let split = bits.len() - 7;
    let mut expected = 0u8;
    for &bit in &bits[split..] {
        expected = (expected << 1) | (bit & 1);
    }
    crc7(&bits[..split], mask) == expected
}

/// CRC-8 over a bit array, XORed with `mask`.
pub fn crc8(bits: &[u8], mask: u8) -> u8 {
    let mut reg = 0u8;
    for &bit in bits {
        let msb = reg >> 7;
        reg <<= 1;
        if msb ^ (bit & 1) == 1 {
            reg ^= CRC8_POLY;
        }
    }
    reg ^ mask
}

/// Check a unit whose last 8 bits are its CRC-8.
pub fn crc8_check(bits: &[u8], mask: u8) -> bool {
    if bits.len() < 8 {
        return false;
    }
    let split = bits.len() - 8;
    let mut expected = 0u8;
    for &bit in &bits[split..] {
        expected = (expected << 1) | (bit & 1);
    }
    crc8(&bits[..split], mask) == expected
}

/// CRC-9 over a bit array, XORed with `mask`.
pub fn crc9(bits: &[u8], mask: u16) -> u16 {
    let mut reg = 0u16;
    for &bit in bits {
        let msb = (reg >> 8) & 1;
        reg = (reg << 1) & 0x1FF;
        if msb ^ (bit & 1) as u16 == 1 {
            reg ^= CRC9_POLY & 0x1FF;
        }
    }
    reg ^ (mask & 0x1FF)
}

/// Check a unit whose last 9 bits are its CRC-9.
pub fn crc9_check(bits: &[u8], mask: u16) -> bool {
    if bits.len() < 9 {
        return false;
    }
    let split = bits.len() - 9;
    let mut expected = 0u16;
    for &bit in &bits[split..] {
        expected = (expected << 1) | (bit & 1) as u16;
    }
    crc9(&bits[..split], mask) == expected
}

/// CRC-CCITT over bytes: register starts at zero and the result is
/// complemented, giving 0xCE3C over `"123456789"`.
pub fn crc_ccitt(data: &[u8]) -> u16 {
    let mut reg = 0u16;
    for &byte in data {
        for i in (0..8).rev() {
            let msb = reg >> 15;
            reg <<= 1;
            if msb ^ ((byte >> i) & 1) as u16 == 1 {
                reg ^= CRC16_POLY;
            }
        }
    }
    !reg
}

/// Check a frame whose last two bytes are its big-endian CRC-CCITT,
/// XORed with `mask` (per-PDU-type constant, zero for most headers).
pub fn crc_ccitt_check(frame: &[u8], mask: u16) -> bool {
    if frame.len() < 2 {
        return false;
    }
    let split = frame.len() - 2;
    let expected = ((frame[split] as u16) << 8) | frame[split + 1] as u16;
    crc_ccitt(&frame[..split]) ^ mask == expected
}

/// CRC-32 over bytes, with the air-interface oddity that bytes are
/// swapped pairwise inside each 16-bit word before entering the
/// register. A trailing odd byte enters unswapped.
pub fn crc32(data: &[u8]) -> u32 {
    let mut reg = 0u32;
    let mut feed = |byte: u8| {
        for i in (0..8).rev() {
            let msb = reg >> 31;
            reg <<= 1;
            if msb ^ ((byte >> i) & 1) as u32 == 1 {
                reg ^= CRC32_POLY;
            }
        }
    };
    let mut chunks = data.chunks_exact(2);
    for pair in &mut chunks {
        feed(pair[1]);
        feed(pair[0]);
    }
    if let [last] = chunks.remainder() {
        feed(*last);
    }
    reg
}

/// Check a block whose last four bytes are its big-endian CRC-32.
pub fn crc32_check(block: &[u8]) -> bool {
    if block.len() < 4 {
        return false;
    }
    let split = block.len() - 4;
    let expected = u32::from_be_bytes([
        block[split],
        block[split + 1],
        block[split + 2],
        block[split + 3],
    ]);
    crc32(&block[..split]) == expected
}

/// 5-bit checksum over the nine full-LC bytes: plain byte sum mod 31.
pub fn checksum_mod31(bytes: &[u8; 9]) -> u8 {
    let sum: u16 = bytes.iter().map(|&b| b as u16).sum();
    (sum % 31) as u8
}
