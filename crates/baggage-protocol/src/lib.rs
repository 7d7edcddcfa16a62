//! Bag-tree protocol over baggage atoms.
//!
//! Interprets a flat, canonically ordered atom sequence as a tree of nested
//! "bags" so that independent subsystems can each own a private namespace
//! inside the same baggage.
//!
//! ## Atom Classification
//!
//! ```text
//! byte 0 of an atom:
//! ┌───┬───────────────┬───┬───────┐
//! │ 1 │ 15 - level    │ K │ 0 0   │  header atom; K = 0 indexed, K = 1 keyed
//! └───┴───────────────┴───┴───────┘  followed by lex-varint index or raw key
//! ┌───┬───────────────────────────┐
//! │ 0 │ 0 0 0 0 0 0 0             │  data atom; followed by opaque payload
//! └───┴───────────────────────────┘
//! zero-length atom                    trim marker
//! ```
//!
//! Within a bag, data atoms sort before child headers, indexed children sort
//! before keyed children, and a bag's entire subtree sorts before its next
//! sibling's header. That ordering makes sorted merge a tree union and lets
//! [`Reader`] stop searching once it passes a bag's sort position.

pub mod bag;
pub mod encoding;
pub mod error;
pub mod lexvarint;
pub mod primitives;
pub mod reader;
pub mod utils;
pub mod writer;

pub use bag::Bag;
pub use encoding::{
    data_atom, header_index, header_key, header_level, indexed_header, is_data, is_header,
    is_indexed_header, is_keyed_header, keyed_header, payload, MAX_LEVEL,
};
pub use error::{ProtocolError, Result};
pub use reader::Reader;
pub use utils::{drop_bag, find, Found, OverflowMarkerBehavior};
pub use writer::Writer;
