//! Mark codec: packs a signal into the single integer a host transports.
//!
//! Layout, least significant bit first:
//!
//! | bits    | field                                   |
//! |---------|-----------------------------------------|
//! | 0..=3   | kind                                    |
//! | 4..=16  | x, 13-bit sign-magnitude                |
//! | 17..=29 | y, 13-bit sign-magnitude                |
//! | 30..=31 | hop count                               |
//!
//! Sign-magnitude is not two's complement: the low 12 bits hold `|v|` and
//! bit 12 of the field is set for negative values. Magnitudes above 4095
//! keep only their low 12 bits, hop counts above 3 their low 2 bits. Both
//! functions are total; every `u32` decodes to some signal.

use crate::geometry::RelativeCoordinate;
use crate::signal::{Signal, SignalKind};

const KIND_MASK: u32 = 0xF;
const FIELD_MASK: u32 = 0x1FFF;
const MAGNITUDE_MASK: u32 = 0xFFF;
const SIGN_BIT: u32 = 1 << 12;
const HOP_MASK: u32 = 0x3;

const X_SHIFT: u32 = 4;
const Y_SHIFT: u32 = 17;
const HOP_SHIFT: u32 = 30;

/// Largest coordinate magnitude that survives a round trip.
pub const MAX_MAGNITUDE: i32 = 0xFFF;

/// Encode a signal. The age is not transmitted.
pub fn encode(signal: &Signal) -> u32 {
    let mut word = u32::from(signal.kind.bits()) & KIND_MASK;
    word |= to_sign_magnitude(signal.coordinates.x) << X_SHIFT;
    word |= to_sign_magnitude(signal.coordinates.y) << Y_SHIFT;
    word |= (u32::from(signal.hop_count) & HOP_MASK) << HOP_SHIFT;
    word
}

/// Decode a word. Decoded signals start with age zero.
pub fn decode(word: u32) -> Signal {
    let kind = SignalKind::from_bits((word & KIND_MASK) as u8);
    let x = from_sign_magnitude((word >> X_SHIFT) & FIELD_MASK);
    let y = from_sign_magnitude((word >> Y_SHIFT) & FIELD_MASK);
    let hop_count = ((word >> HOP_SHIFT) & HOP_MASK) as u8;

    Signal {
        kind,
        coordinates: RelativeCoordinate::new(x, y),
        hop_count,
        age: 0,
    }
}

/// Whether a signal survives [`encode`] unchanged (apart from its age).
pub fn is_lossless(signal: &Signal) -> bool {
    signal.coordinates.x.unsigned_abs() <= MAX_MAGNITUDE as u32
        && signal.coordinates.y.unsigned_abs() <= MAX_MAGNITUDE as u32
        && signal.hop_count <= crate::signal::MAX_HOP_COUNT
}

fn to_sign_magnitude(value: i32) -> u32 {
    let mut field = value.unsigned_abs() & MAGNITUDE_MASK;
    if value < 0 {
        field |= SIGN_BIT;
    }
    field
}

fn from_sign_magnitude(field: u32) -> i32 {
    let magnitude = (field & MAGNITUDE_MASK) as i32;
    if field & SIGN_BIT != 0 {
        -magnitude
    } else {
        magnitude
    }
}
