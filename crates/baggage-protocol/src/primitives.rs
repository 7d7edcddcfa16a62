//! Payload codecs for the value types carried in data atoms.
//!
//! Decoders return `None` when the payload is malformed or out of range for
//! the requested type.

use crate::lexvarint;

pub fn read_lex_var_u32(bytes: &[u8]) -> Option<u32> {
    let (value, _) = lexvarint::decode_unsigned(bytes)?;
    u32::try_from(value).ok()
}

pub fn write_lex_var_u32(value: u32) -> Vec<u8> {
    lexvarint::encode_unsigned(u64::from(value))
}

pub fn read_lex_var_u64(bytes: &[u8]) -> Option<u64> {
    lexvarint::decode_unsigned(bytes).map(|(value, _)| value)
}

pub fn write_lex_var_u64(value: u64) -> Vec<u8> {
    lexvarint::encode_unsigned(value)
}

pub fn read_lex_var_i32(bytes: &[u8]) -> Option<i32> {
    let (value, _) = lexvarint::decode_signed(bytes)?;
    i32::try_from(value).ok()
}

pub fn write_lex_var_i32(value: i32) -> Vec<u8> {
    lexvarint::encode_signed(i64::from(value))
}

pub fn read_lex_var_i64(bytes: &[u8]) -> Option<i64> {
    lexvarint::decode_signed(bytes).map(|(value, _)| value)
}

pub fn write_lex_var_i64(value: i64) -> Vec<u8> {
    lexvarint::encode_signed(value)
}

pub fn read_u32_fixed(bytes: &[u8]) -> Option<u32> {
    bytes.try_into().ok().map(u32::from_be_bytes)
}

pub fn write_u32_fixed(value: u32) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

pub fn read_i32_fixed(bytes: &[u8]) -> Option<i32> {
    bytes.try_into().ok().map(i32::from_be_bytes)
}

pub fn write_i32_fixed(value: i32) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

pub fn read_u64_fixed(bytes: &[u8]) -> Option<u64> {
    bytes.try_into().ok().map(u64::from_be_bytes)
}

pub fn write_u64_fixed(value: u64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

pub fn read_i64_fixed(bytes: &[u8]) -> Option<i64> {
    bytes.try_into().ok().map(i64::from_be_bytes)
}

pub fn write_i64_fixed(value: i64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

/// Only `[0]` and `[1]` are valid.
pub fn read_bool(bytes: &[u8]) -> Option<bool> {
    match bytes {
        [0] => Some(false),
        [1] => Some(true),
        _ => None,
    }
}

pub fn write_bool(value: bool) -> Vec<u8> {
    vec![u8::from(value)]
}

/// Taint flags share the boolean encoding.
pub fn read_taint(bytes: &[u8]) -> Option<bool> {
    read_bool(bytes)
}

pub fn write_taint(value: bool) -> Vec<u8> {
    write_bool(value)
}
