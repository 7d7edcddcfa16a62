//! LEB128 length prefixes used to frame atoms on the wire.
//!
//! This is the ordinary little-endian base-128 varint; it is only used for
//! framing and has no ordering properties.

/// Maximum number of bytes in an encoded u64.
pub const MAX_VARINT_LEN: usize = 10;

/// Encode an unsigned 64-bit integer as LEB128 into `buf`.
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        buf.push(byte);
        if value == 0 {
            break;
        }
    }
}

/// Number of bytes `encode_varint` writes for `value`.
pub fn encoded_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.max(1).div_ceil(7)
}

/// Decode a LEB128 unsigned integer from the front of `buf`.
///
/// Returns the value and the number of bytes consumed, or `None` if the
/// buffer ends before the varint terminates or the value overflows a u64.
pub fn decode_varint(buf: &[u8]) -> Option<(u64, usize)> {
    let mut result: u64 = 0;
    for (i, &byte) in buf.iter().take(MAX_VARINT_LEN).enumerate() {
        let payload = (byte & 0x7F) as u64;
        let shift = 7 * i as u32;
        if shift == 63 && payload > 1 {
            return None;
        }
        result |= payload << shift;
        if byte & 0x80 == 0 {
            return Some((result, i + 1));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(value: u64) {
        let mut buf = Vec::new();
        encode_varint(value, &mut buf);
        assert_eq!(buf.len(), encoded_len(value));
        assert_eq!(decode_varint(&buf), Some((value, buf.len())));
    }

    #[test]
    fn single_byte_values() {
        let mut buf = Vec::new();
        encode_varint(127, &mut buf);
        assert_eq!(buf, vec![127]);
        round_trip(0);
        round_trip(1);
        round_trip(127);
    }

    #[test]
    fn multi_byte_values() {
        let mut buf = Vec::new();
        encode_varint(300, &mut buf);
        assert_eq!(buf, vec![0xAC, 0x02]);
        for value in [128, 16_383, 16_384, u32::MAX as u64, u64::MAX / 2, u64::MAX] {
            round_trip(value);
        }
        assert_eq!(encoded_len(u64::MAX), MAX_VARINT_LEN);
    }

    #[test]
    fn unterminated_varint_rejected() {
        assert_eq!(decode_varint(&[]), None);
        assert_eq!(decode_varint(&[0x80]), None);
        assert_eq!(decode_varint(&[0xFF; 12]), None);
    }

    #[test]
    fn overflowing_varint_rejected() {
        let mut bytes = vec![0xFF; 9];
        bytes.push(0x02);
        assert_eq!(decode_varint(&bytes), None);
    }
}
