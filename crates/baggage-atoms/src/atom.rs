//! The atom: an immutable byte string, the smallest unit of baggage storage.

use std::fmt;
use std::ops::Deref;

use crate::varint;

/// An immutable byte string.
///
/// Atoms order by unsigned byte-wise comparison, with a proper prefix
/// sorting first. That ordering is the one merge relies on.
///
/// The zero-length atom is reserved as the trim marker.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Atom(Vec<u8>);

impl Atom {
    /// The zero-length atom recording that atoms were dropped by a trim.
    pub const fn trim_marker() -> Self {
        Atom(Vec::new())
    }

    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Atom(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn is_trim_marker(&self) -> bool {
        self.0.is_empty()
    }

    /// Bytes this atom occupies on the wire, length prefix included.
    pub fn serialized_size(&self) -> usize {
        varint::encoded_len(self.0.len() as u64) + self.0.len()
    }
}

/// True iff `atom` is the zero-length trim marker.
pub fn is_trim_marker(atom: &[u8]) -> bool {
    atom.is_empty()
}

impl Deref for Atom {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Atom {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Atom {
    fn from(bytes: Vec<u8>) -> Self {
        Atom(bytes)
    }
}

impl From<&[u8]> for Atom {
    fn from(bytes: &[u8]) -> Self {
        Atom(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Atom {
    fn from(bytes: [u8; N]) -> Self {
        Atom(bytes.to_vec())
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_trim_marker() {
            return f.write_str("Atom(<trim>)");
        }
        write!(f, "Atom({:?})", self.0)
    }
}
