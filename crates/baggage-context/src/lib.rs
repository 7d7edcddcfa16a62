//! Baggage context values.
//!
//! [`BaggageContext`] is the value an application carries alongside its
//! execution. It wraps the atom sequence with the operations callers need at
//! fork and join points, typed bag access through [`Bag`], and a lazily drawn
//! component identifier that follows exactly one side of every branch.

pub mod context;
pub mod error;

pub use baggage_protocol::Bag;
pub use context::BaggageContext;
pub use error::{ContextError, Result};
