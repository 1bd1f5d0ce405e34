//! Numeric narrowing for wire fields
//!
//! Every numeric field on the wire is 16 bits wide. Callers holding wider
//! values narrow them here: the low 16 bits are kept and the rest dropped,
//! never clamped and never reported as an error. The narrowing goes through
//! the little-endian byte image so the bit pattern kept is explicit.

/// Keep the low 16 bits of a signed value as an `i16`
///
/// `wrap_i16(65_536 + 5) == 5`, `wrap_i16(40_000) == -25_536`.
pub fn wrap_i16(value: i32) -> i16 {
    let [lo, hi, _, _] = value.to_le_bytes();
    i16::from_le_bytes([lo, hi])
}

/// Keep the low 16 bits of an unsigned value as a `u16`
pub fn wrap_u16(value: u32) -> u16 {
    let [lo, hi, _, _] = value.to_le_bytes();
    u16::from_le_bytes([lo, hi])
}
