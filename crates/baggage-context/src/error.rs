//! Context error types.

use baggage_atoms::AtomError;
use baggage_protocol::ProtocolError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("baggage decode error: {0}")]
    Atoms(#[from] AtomError),

    #[error("baggage protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Result type alias for context operations.
pub type Result<T> = std::result::Result<T, ContextError>;
