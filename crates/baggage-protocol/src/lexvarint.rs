//! Lexicographic varints.
//!
//! Variable-length integer encodings whose unsigned byte-wise comparison
//! equals numeric comparison, so encoded values can be used directly as sort
//! keys. The `_reverse` variants invert the order.
//!
//! ## Unsigned
//!
//! The number of leading one bits in the first byte, plus one, is the total
//! length. A nine-byte encoding starts with `0xFF` and carries the full u64
//! in the following eight bytes.
//!
//! ```text
//! 0xxxxxxx                       7 bits
//! 10xxxxxx xxxxxxxx              14 bits
//! 110xxxxx xxxxxxxx xxxxxxxx     21 bits
//! ...
//! 11111111 xxxxxxxx * 8          64 bits
//! ```
//!
//! ## Signed
//!
//! The first bit is the sign (1 = non-negative). The remaining bits of a
//! non-negative value follow the unsigned layout shifted by one bit, with
//! the eight- and nine-byte cases told apart by the top bit of the second
//! byte. A negative value `v` is encoded as `-(v + 1)` and then bit-inverted.
//!
//! Decoding returns `None` for empty input or input shorter than the length
//! declared by its prefix.

/// Longest encoding, in bytes.
pub const MAX_LEN: usize = 9;

/// Bytes needed to encode `value` with [`encode_unsigned`].
pub fn unsigned_size(value: u64) -> usize {
    match 64 - value.leading_zeros() as usize {
        bits if bits <= 56 => bits.max(1).div_ceil(7),
        _ => MAX_LEN,
    }
}

/// Bytes needed to encode `value` with [`encode_signed`].
pub fn signed_size(value: i64) -> usize {
    let magnitude = fold_sign(value);
    match 64 - magnitude.leading_zeros() as usize {
        bits if bits <= 55 => (bits + 1).div_ceil(7),
        _ => MAX_LEN,
    }
}

fn fold_sign(value: i64) -> u64 {
    if value < 0 {
        !value as u64
    } else {
        value as u64
    }
}

/// Big-endian bytes of `value`, right-aligned in `size` bytes.
fn big_endian(mut value: u64, size: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; size];
    for byte in bytes.iter_mut().rev() {
        *byte = value as u8;
        value >>= 8;
    }
    bytes
}

/// Encode such that byte-wise order equals numeric order.
pub fn encode_unsigned(value: u64) -> Vec<u8> {
    let size = unsigned_size(value);
    let mut bytes = big_endian(value, size);
    bytes[0] |= (0xFF00u16 >> (size - 1)) as u8;
    bytes
}

/// Encode such that byte-wise order is the inverse of numeric order.
pub fn encode_unsigned_reverse(value: u64) -> Vec<u8> {
    invert(encode_unsigned(value))
}

/// Encode such that byte-wise order equals numeric order across the sign.
pub fn encode_signed(value: i64) -> Vec<u8> {
    if value < 0 {
        return invert(encode_signed(!value));
    }
    let size = signed_size(value);
    let mut bytes = big_endian(value as u64, size);
    bytes[0] |= (0xFF00u16 >> size.min(8)) as u8;
    if size == MAX_LEN {
        bytes[1] |= 0x80;
    }
    bytes
}

/// Encode such that byte-wise order is the inverse of numeric order.
pub fn encode_signed_reverse(value: i64) -> Vec<u8> {
    encode_signed(!value)
}

fn invert(mut bytes: Vec<u8>) -> Vec<u8> {
    for byte in &mut bytes {
        *byte = !*byte;
    }
    bytes
}

/// Decode an [`encode_unsigned`] value, returning it and the bytes consumed.
pub fn decode_unsigned(bytes: &[u8]) -> Option<(u64, usize)> {
    let first = *bytes.first()?;
    let size = (first.leading_ones() as usize + 1).min(MAX_LEN);
    if bytes.len() < size {
        return None;
    }
    let mut result = (first & (0xFFu16 >> size) as u8) as u64;
    for &byte in &bytes[1..size] {
        result = (result << 8) | byte as u64;
    }
    Some((result, size))
}

/// Decode an [`encode_unsigned_reverse`] value.
pub fn decode_unsigned_reverse(bytes: &[u8]) -> Option<(u64, usize)> {
    let mut buf = [0u8; MAX_LEN];
    let n = bytes.len().min(MAX_LEN);
    for (dst, src) in buf.iter_mut().zip(&bytes[..n]) {
        *dst = !*src;
    }
    decode_unsigned(&buf[..n])
}

/// Decode an [`encode_signed`] value, returning it and the bytes consumed.
pub fn decode_signed(bytes: &[u8]) -> Option<(i64, usize)> {
    let raw_first = *bytes.first()?;
    let negative = raw_first & 0x80 == 0;
    let byte = |i: usize| if negative { !bytes[i] } else { bytes[i] };

    let first = byte(0);
    let size = match (first << 1).leading_ones() as usize {
        ones if ones < 7 => ones + 1,
        _ if bytes.len() < 2 => return None,
        _ if byte(1) & 0x80 == 0 => 8,
        _ => MAX_LEN,
    };
    if bytes.len() < size {
        return None;
    }

    let mut result = (first & (0x7Fu16 >> size) as u8) as u64;
    if size >= 8 {
        result = (result << 7) | (byte(1) & 0x7F) as u64;
    } else if size >= 2 {
        result = (result << 8) | byte(1) as u64;
    }
    for i in 2..size {
        result = (result << 8) | byte(i) as u64;
    }

    let value = result as i64;
    Some((if negative { !value } else { value }, size))
}

/// Decode an [`encode_signed_reverse`] value.
pub fn decode_signed_reverse(bytes: &[u8]) -> Option<(i64, usize)> {
    decode_signed(bytes).map(|(value, size)| (!value, size))
}
