//! Base64 text transport for ASCII-only carriers such as textual headers.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::atom::Atom;
use crate::error::Result;
use crate::layer::{deserialize, serialize};

/// Serialize `atoms` and encode the bytes as standard base64.
pub fn encode_base64(atoms: &[Atom]) -> String {
    STANDARD.encode(serialize(atoms))
}

/// Decode standard base64 and deserialize the bytes.
pub fn decode_base64(encoded: &str) -> Result<Vec<Atom>> {
    let bytes = STANDARD.decode(encoded.trim())?;
    deserialize(&bytes)
}
