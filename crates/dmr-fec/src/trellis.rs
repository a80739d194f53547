//! Rate-3/4 trellis code for Rate 3/4 data bursts
//! (ETSI TS 102 361-1 §B.2.2 and Annex B.3).
//!
//! 144 info bits become 48 tribits plus one zero flush tribit. Each
//! step emits a 4-bit constellation point: the top three bits encode
//! the tribit shifted by a function of the previous tribit (the
//! encoder state), the low bit is the state parity. Points map to
//! pairs of 4FSK dibits, which are pair-interleaved over the 98-dibit
//! payload.
//!
//! Decoding inverts the table per step. A point whose parity bit
//! contradicts the running state is counted as one channel error; the
//! tribit is taken from the data bits as received and the state is
//! held, so one bad symbol cannot shift the whole stream.

use dmr_core::FecResult;

pub const TRANSMITTED_BITS: usize = 196;
pub const INFO_BITS: usize = 144;

const TRIBITS: usize = 48;
const SYMBOLS: usize = TRIBITS + 1;
const DIBITS: usize = 2 * SYMBOLS;

const NO_TRIBIT: u8 = 0xFF;

const fn reverse3(v: u8) -> u8 {
    ((v & 1) << 2) | (v & 2) | ((v >> 2) & 1)
}

const fn shift(state: u8) -> u8 {
    (state & 1) * 2 + (state & 4)
}

const fn parity3(v: u8) -> u8 {
    (v ^ (v >> 1) ^ (v >> 2)) & 1
}

/// Constellation point emitted when `tribit` arrives in `state`.
const fn transition(state: u8, tribit: u8) -> u8 {
    (reverse3((tribit + shift(state)) % 8) << 1) | parity3(state)
}

/// Data bits of `point` read back as a tribit, ignoring the parity bit.
const fn data_tribit(state: u8, point: u8) -> u8 {
    (reverse3(point >> 1) + 8 - shift(state)) % 8
}

const fn build_encode_table() -> [[u8; 8]; 8] {
    let mut t = [[0u8; 8]; 8];
    let mut state = 0;
    while state < 8 {
        let mut tribit = 0;
        while tribit < 8 {
            t[state as usize][tribit as usize] = transition(state, tribit);
            tribit += 1;
        }
        state += 1;
    }
    t
}

const fn build_decode_table() -> [[u8; 16]; 8] {
    let mut t = [[NO_TRIBIT; 16]; 8];
    let mut state = 0;
    while state < 8 {
        let mut tribit = 0;
        while tribit < 8 {
            t[state as usize][transition(state, tribit) as usize] = tribit;
            tribit += 1;
        }
        state += 1;
    }
    t
}

static ENCODE_TABLE: [[u8; 8]; 8] = build_encode_table();
static DECODE_TABLE: [[u8; 16]; 8] = build_decode_table();

/// Signed 4FSK dibit pair for each constellation point.
const CONSTELLATION: [(i8, i8); 16] = [
    (1, -1),
    (-1, 1),
    (3, -3),
    (-3, 3),
    (-3, -1),
    (3, 1),
    (-1, -3),
    (1, 3),
    (-3, 1),
    (3, -1),
    (-1, 3),
    (1, -3),
    (1, 1),
    (-1, -1),
    (3, 3),
    (-3, -3),
];

/// Two air-interface bits per dibit: 00=+1, 01=+3, 10=-1, 11=-3.
const fn dibit_bits(dibit: i8) -> u8 {
    match dibit {
        1 => 0b00,
        3 => 0b01,
        -1 => 0b10,
        _ => 0b11,
    }
}

/// Point for each 4-bit dibit pair, inverse of [`CONSTELLATION`].
const fn build_pair_table() -> [u8; 16] {
    let mut t = [0u8; 16];
    let mut point = 0;
    while point < 16 {
        let (d1, d2) = CONSTELLATION[point];
        let nibble = (dibit_bits(d1) << 2) | dibit_bits(d2);
        t[nibble as usize] = point as u8;
        point += 1;
    }
    t
}

static PAIR_TO_POINT: [u8; 16] = build_pair_table();

/// Transmitted dibit position of each logical dibit: pairs spread at
/// stride 8 across the payload.
const fn build_interleave() -> [usize; DIBITS] {
    let mut out = [0usize; DIBITS];
    let mut n = 0;
    let mut offset = 0;
    while offset < 8 {
        let mut base = offset;
        while base < DIBITS {
            out[n] = base;
            out[n + 1] = base + 1;
            n += 2;
            base += 8;
        }
        offset += 2;
    }
    out
}

static INTERLEAVE: [usize; DIBITS] = build_interleave();

pub fn encode(info: &[u8; INFO_BITS]) -> [u8; TRANSMITTED_BITS] {
    let mut points = [0u8; SYMBOLS];
    let mut state = 0u8;
    for (i, point) in points.iter_mut().enumerate() {
        // The trailing symbol flushes the encoder with a zero tribit
        let tribit = if i < TRIBITS {
            (info[3 * i] & 1) << 2 | (info[3 * i + 1] & 1) << 1 | (info[3 * i + 2] & 1)
        } else {
            0
        };
        *point = ENCODE_TABLE[state as usize][tribit as usize];
        state = tribit;
    }

    let mut transmitted = [0u8; TRANSMITTED_BITS];
    for (i, &point) in points.iter().enumerate() {
        let (d1, d2) = CONSTELLATION[point as usize];
        for (d, bits) in [dibit_bits(d1), dibit_bits(d2)].into_iter().enumerate() {
            let pos = 2 * INTERLEAVE[2 * i + d];
            transmitted[pos] = bits >> 1;
            transmitted[pos + 1] = bits & 1;
        }
    }
    transmitted
}

pub fn decode(transmitted: &[u8; TRANSMITTED_BITS]) -> ([u8; INFO_BITS], FecResult) {
    let mut points = [0u8; SYMBOLS];
    for (i, point) in points.iter_mut().enumerate() {
        let mut nibble = 0u8;
        for d in 0..2 {
            let pos = 2 * INTERLEAVE[2 * i + d];
            nibble = (nibble << 2) | (transmitted[pos] & 1) << 1 | (transmitted[pos + 1] & 1);
        }
        *point = PAIR_TO_POINT[nibble as usize];
    }

    let mut info = [0u8; INFO_BITS];
    let mut state = 0u8;
    let mut errors = 0usize;
    for (i, &point) in points.iter().enumerate() {
        let looked_up = DECODE_TABLE[state as usize][point as usize];
        let tribit = if looked_up == NO_TRIBIT {
            // Parity contradicts the state: take the data bits as
            // received, hold the state, keep going.
            errors += 1;
            data_tribit(state, point)
        } else {
            state = looked_up;
            looked_up
        };
        if i < TRIBITS {
            info[3 * i] = (tribit >> 2) & 1;
            info[3 * i + 1] = (tribit >> 1) & 1;
            info[3 * i + 2] = tribit & 1;
        }
    }

    tracing::trace!("trellis decode: {} invalid transitions", errors);
    (info, FecResult::corrected(TRANSMITTED_BITS, errors))
}
