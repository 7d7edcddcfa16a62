//! Atom classification and construction for the bag tree.
//!
//! The header level is stored as `15 - level`, so a deeper header has a
//! smaller first byte than a shallower one. Every atom inside a bag (data
//! `0x00..`, deeper headers) therefore sorts before the header of the bag's
//! next sibling, which is what lets a sorted merge of two flattened trees
//! produce the flattened union tree. These bit positions are part of the wire
//! format and must not change.

use baggage_atoms::Atom;

use crate::error::{ProtocolError, Result};
use crate::lexvarint;

/// Deepest representable bag level; levels run from 0 to 15.
pub const MAX_LEVEL: usize = 15;

const HEADER_FLAG: u8 = 0x80;
const LEVEL_MASK: u8 = 0x78;
const LEVEL_SHIFT: u8 = 3;
const KEYED_FLAG: u8 = 0x04;
const DATA_PREFIX: u8 = 0x00;

pub fn is_header(atom: &[u8]) -> bool {
    atom.first().is_some_and(|b| b & HEADER_FLAG != 0)
}

pub fn is_data(atom: &[u8]) -> bool {
    atom.first().is_some_and(|b| b & HEADER_FLAG == 0)
}

/// True for headers produced by [`indexed_header`].
pub fn is_indexed_header(atom: &[u8]) -> bool {
    is_header(atom) && atom[0] & KEYED_FLAG == 0
}

/// True for headers produced by [`keyed_header`].
pub fn is_keyed_header(atom: &[u8]) -> bool {
    is_header(atom) && atom[0] & KEYED_FLAG != 0
}

/// Nesting level of a header atom; 0 is the outermost level.
pub fn header_level(atom: &[u8]) -> Result<usize> {
    let first = atom.first().ok_or(ProtocolError::EmptyAtom)?;
    Ok(MAX_LEVEL - ((first & LEVEL_MASK) >> LEVEL_SHIFT) as usize)
}

/// Index of an indexed header atom.
pub fn header_index(atom: &[u8]) -> Result<u64> {
    let rest = atom.get(1..).ok_or(ProtocolError::EmptyAtom)?;
    lexvarint::decode_unsigned(rest)
        .map(|(index, _)| index)
        .ok_or_else(|| ProtocolError::MalformedIndex {
            bytes: rest.to_vec(),
        })
}

/// Key of a keyed header atom.
pub fn header_key(atom: &[u8]) -> Result<&[u8]> {
    atom.get(1..).ok_or(ProtocolError::EmptyAtom)
}

/// Payload of a data atom.
pub fn payload(atom: &[u8]) -> Result<&[u8]> {
    atom.get(1..).ok_or(ProtocolError::EmptyAtom)
}

fn header_prefix(level: usize, keyed: bool) -> u8 {
    debug_assert!(level <= MAX_LEVEL, "bag level {level} out of range");
    let inverted = (MAX_LEVEL - level.min(MAX_LEVEL)) as u8;
    let kind = if keyed { KEYED_FLAG } else { 0 };
    HEADER_FLAG | ((inverted << LEVEL_SHIFT) & LEVEL_MASK) | kind
}

/// Header opening the bag at `index` on `level`.
pub fn indexed_header(level: usize, index: u64) -> Atom {
    let encoded = lexvarint::encode_unsigned(index);
    let mut bytes = Vec::with_capacity(encoded.len() + 1);
    bytes.push(header_prefix(level, false));
    bytes.extend_from_slice(&encoded);
    Atom::new(bytes)
}

/// Header opening the bag named `key` on `level`.
pub fn keyed_header(level: usize, key: &[u8]) -> Atom {
    let mut bytes = Vec::with_capacity(key.len() + 1);
    bytes.push(header_prefix(level, true));
    bytes.extend_from_slice(key);
    Atom::new(bytes)
}

/// Data atom carrying `payload`.
pub fn data_atom(payload: &[u8]) -> Atom {
    let mut bytes = Vec::with_capacity(payload.len() + 1);
    bytes.push(DATA_PREFIX);
    bytes.extend_from_slice(payload);
    Atom::new(bytes)
}
