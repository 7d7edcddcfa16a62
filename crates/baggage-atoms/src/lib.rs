//! Atom layer of the baggage propagation substrate.
//!
//! Baggage is opaque metadata that travels alongside a unit of distributed
//! execution. At this layer a baggage context is nothing more than an ordered
//! sequence of [`Atom`]s (byte strings), and the layer provides the
//! propagation primitives over such sequences:
//!
//! - **Branch**: duplicate a context because execution is forking
//! - **Merge**: reconcile two contexts when execution rejoins
//! - **Serialize / Deserialize**: wire encoding
//! - **Trim**: bound the serialized size
//!
//! ## Wire Layout
//!
//! ```text
//! ┌──────────────────┬──────────────┬──────────────────┬──────────────┬────
//! │ varint(len(a0))  │ a0 bytes     │ varint(len(a1))  │ a1 bytes     │ ...
//! └──────────────────┴──────────────┴──────────────────┴──────────────┴────
//! ```
//!
//! There is no magic number, version byte, or outer length field; an empty
//! byte string is an empty context.

pub mod atom;
pub mod error;
mod layer;
pub mod text;
pub mod varint;

pub use atom::{is_trim_marker, Atom};
pub use error::{AtomError, Result};
pub use layer::{
    branch, deserialize, deserialize_partial, merge, merge_all, serialize, serialize_into,
    serialized_size, trim, Deserialized,
};
pub use text::{decode_base64, encode_base64};
