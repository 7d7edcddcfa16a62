//! The propagation primitives over atom sequences.
//!
//! A context is a `[Atom]` kept in canonical order. An empty sequence stands
//! for an absent context.

use std::cmp::Ordering;

use tracing::debug;

use crate::atom::Atom;
use crate::error::{AtomError, Result};
use crate::varint::{self, MAX_VARINT_LEN};

/// Merge two canonically ordered contexts into their sorted union.
///
/// Atoms are compared byte-wise; an atom present in both inputs appears once
/// in the output (`a`'s copy). The operation is commutative, associative and
/// idempotent over well-formed inputs.
pub fn merge(a: &[Atom], b: &[Atom]) -> Vec<Atom> {
    let mut merged = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => {
                merged.push(a[i].clone());
                i += 1;
            }
            Ordering::Equal => {
                merged.push(a[i].clone());
                i += 1;
                j += 1;
            }
            Ordering::Greater => {
                merged.push(b[j].clone());
                j += 1;
            }
        }
    }
    merged.extend_from_slice(&a[i..]);
    merged.extend_from_slice(&b[j..]);
    merged
}

/// Fold [`merge`] over any number of contexts.
pub fn merge_all<'a, I>(contexts: I) -> Vec<Atom>
where
    I: IntoIterator<Item = &'a [Atom]>,
{
    contexts
        .into_iter()
        .fold(Vec::new(), |acc, ctx| merge(&acc, ctx))
}

/// Duplicate a context for a new execution path.
///
/// The copy shares no storage with `a`.
pub fn branch(a: &[Atom]) -> Vec<Atom> {
    a.to_vec()
}

/// Serialized size in bytes of `atoms`.
pub fn serialized_size(atoms: &[Atom]) -> usize {
    atoms.iter().map(Atom::serialized_size).sum()
}

/// Serialize by length-prefixing each atom, in sequence order.
pub fn serialize(atoms: &[Atom]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(serialized_size(atoms));
    serialize_into(atoms, &mut buf);
    buf
}

/// Append the serialized form of `atoms` to `buf`.
pub fn serialize_into(atoms: &[Atom], buf: &mut Vec<u8>) {
    for atom in atoms {
        varint::encode_varint(atom.len() as u64, buf);
        buf.extend_from_slice(atom);
    }
}

/// Result of decoding a byte string that may be malformed partway through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deserialized {
    /// Atoms decoded before any failure.
    pub atoms: Vec<Atom>,
    /// The decoding failure, if one occurred.
    pub error: Option<AtomError>,
}

impl Deserialized {
    /// Convert to a `Result`, discarding partial atoms on failure.
    pub fn into_result(self) -> Result<Vec<Atom>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.atoms),
        }
    }
}

/// Decode a serialized context, keeping whatever decoded before a failure.
pub fn deserialize_partial(bytes: &[u8]) -> Deserialized {
    let mut atoms = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let rest = &bytes[pos..];
        let Some((length, n)) = varint::decode_varint(rest) else {
            let shown = rest.len().min(MAX_VARINT_LEN);
            return failed(
                atoms,
                AtomError::InvalidVarint {
                    position: pos,
                    bytes: rest[..shown].to_vec(),
                },
            );
        };
        if length > (rest.len() - n) as u64 {
            return failed(atoms, AtomError::Truncated { length, position: pos });
        }
        let end = n + length as usize;
        atoms.push(Atom::from(&rest[n..end]));
        pos += end;
    }
    Deserialized { atoms, error: None }
}

fn failed(atoms: Vec<Atom>, error: AtomError) -> Deserialized {
    debug!(decoded = atoms.len(), %error, "baggage deserialization failed");
    Deserialized {
        atoms,
        error: Some(error),
    }
}

/// Decode a serialized context.
pub fn deserialize(bytes: &[u8]) -> Result<Vec<Atom>> {
    deserialize_partial(bytes).into_result()
}

/// Drop trailing atoms so the context serializes into at most `max_bytes`.
///
/// When anything is dropped the trim marker takes the place of the dropped
/// atoms, so the result is never empty unless the input was. The marker
/// itself costs one byte: a budget of zero still yields `[trim_marker]`.
pub fn trim(mut atoms: Vec<Atom>, max_bytes: usize) -> Vec<Atom> {
    let keep = index_for_trim(&atoms, max_bytes);
    if keep == atoms.len() {
        return atoms;
    }
    debug!(
        kept = keep,
        dropped = atoms.len() - keep,
        max_bytes,
        "trimmed baggage"
    );
    atoms.truncate(keep);
    atoms.push(Atom::trim_marker());
    atoms
}

/// Index of the first atom to drop, or `atoms.len()` if everything fits.
///
/// Unless it is the final atom, an atom is only kept if at least one byte of
/// budget remains after it for the trim marker.
fn index_for_trim(atoms: &[Atom], mut budget: usize) -> usize {
    let last = atoms.len().saturating_sub(1);
    for (i, atom) in atoms.iter().enumerate() {
        let size = atom.serialized_size();
        match size.cmp(&budget) {
            Ordering::Less => budget -= size,
            Ordering::Equal if i == last => budget = 0,
            _ => return i,
        }
    }
    atoms.len()
}
