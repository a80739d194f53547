//! RS(12,9,4) over GF(256) protecting the full LC in voice headers and
//! terminators (ETSI TS 102 361-1 §B.3.6).
//!
//! Field: GF(2^8) with primitive polynomial x^8+x^4+x^3+x^2+1.
//! Generator: (x+a)(x+a^2)(x+a^3) = x^3 + 0x0E x^2 + 0x38 x + 0x40.
//! Distance 4 corrects one symbol and detects two; correction searches
//! the 12 positions for an error value consistent with all three
//! syndromes, so a double error can never slip through as a bogus
//! single correction.

use dmr_core::codec_error::{CodecErr, expect_len};
use dmr_core::FecResult;

pub const DATA_BYTES: usize = 9;
pub const PARITY_BYTES: usize = 3;
pub const CODEWORD_BYTES: usize = DATA_BYTES + PARITY_BYTES;
pub const SYNDROME_BYTES: usize = 3;

/// x^8 + x^4 + x^3 + x^2 + 1
const FIELD_POLY: u16 = 0x11D;

/// Generator coefficients below the monic x^3 term.
const GEN: [u8; 3] = [0x0E, 0x38, 0x40];

const fn build_exp() -> [u8; 512] {
    let mut exp = [0u8; 512];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        exp[i + 255] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= FIELD_POLY;
        }
        i += 1;
    }
    exp
}

const fn build_log() -> [u8; 256] {
    let exp = build_exp();
    let mut log = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        log[exp[i] as usize] = i as u8;
        i += 1;
    }
    log
}

static EXP: [u8; 512] = build_exp();
static LOG: [u8; 256] = build_log();

fn gmul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        0
    } else {
        EXP[LOG[a as usize] as usize + LOG[b as usize] as usize]
    }
}

/// a / b with b != 0.
fn gdiv(a: u8, b: u8) -> u8 {
    if a == 0 {
        0
    } else {
        EXP[(LOG[a as usize] as usize + 255 - LOG[b as usize] as usize) % 255]
    }
}

/// a^power
fn alpha_pow(power: usize) -> u8 {
    EXP[power % 255]
}

/// Systematic encode: 9 data bytes followed by 3 parity bytes.
pub fn encode(data: &[u8]) -> Result<[u8; CODEWORD_BYTES], CodecErr> {
    expect_len(DATA_BYTES, data.len())?;
    let mut parity = [0u8; PARITY_BYTES];
    for &byte in data {
        let factor = byte ^ parity[0];
        parity = [
            parity[1] ^ gmul(GEN[0], factor),
            parity[2] ^ gmul(GEN[1], factor),
            gmul(GEN[2], factor),
        ];
    }
    let mut codeword = [0u8; CODEWORD_BYTES];
    codeword[..DATA_BYTES].copy_from_slice(data);
    codeword[DATA_BYTES..].copy_from_slice(&parity);
    Ok(codeword)
}

/// Evaluate the received word at a^1, a^2, a^3.
pub fn calc_syndrome(codeword: &[u8]) -> Result<[u8; SYNDROME_BYTES], CodecErr> {
    expect_len(CODEWORD_BYTES, codeword.len())?;
    let mut syndrome = [0u8; SYNDROME_BYTES];
    for (k, s) in syndrome.iter_mut().enumerate() {
        let mut acc = 0u8;
        for &byte in codeword {
            acc = gmul(acc, alpha_pow(k + 1)) ^ byte;
        }
        *s = acc;
    }
    Ok(syndrome)
}

pub fn check_syndrome(syndrome: &[u8; SYNDROME_BYTES]) -> bool {
    syndrome.iter().all(|&s| s == 0)
}

/// Correct at most one symbol in place, given the syndrome of the
/// received word. `bits_checked` covers the 96 codeword bits.
pub fn correct(codeword: &mut [u8; CODEWORD_BYTES], syndrome: &[u8; SYNDROME_BYTES]) -> FecResult {
    const BITS: usize = CODEWORD_BYTES * 8;
    if check_syndrome(syndrome) {
        return FecResult::clean(BITS);
    }
    if syndrome[0] != 0 {
        for pos in 0..CODEWORD_BYTES {
            let degree = CODEWORD_BYTES - 1 - pos;
            let value = gdiv(syndrome[0], alpha_pow(degree));
            if syndrome[1] == gmul(value, alpha_pow(2 * degree))
                && syndrome[2] == gmul(value, alpha_pow(3 * degree))
            {
                codeword[pos] ^= value;
                return FecResult::corrected(BITS, value.count_ones() as usize);
            }
        }
    }
    FecResult::failed(BITS, 0)
}
