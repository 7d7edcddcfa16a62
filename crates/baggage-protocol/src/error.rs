//! Protocol error types.

/// Errors that can occur while reading or writing a bag tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// A header or data atom had no bytes at all.
    #[error("invalid zero-length atom")]
    EmptyAtom,

    /// An indexed header's index could not be decoded.
    #[error("malformed indexed header: cannot decode index from {bytes:?}")]
    MalformedIndex { bytes: Vec<u8> },

    /// A child bag appeared more than one level below its parent.
    #[error("child bag jumped from depth {depth} to level {level}")]
    LevelJump { depth: usize, level: usize },

    /// `exit` was called without a matching `enter`.
    #[error("exit called more times than enter")]
    UnbalancedExit,

    /// The same bag was written twice under one parent.
    #[error("bags cannot be written to more than once")]
    DuplicateBag,

    /// Sibling bags were written out of ascending order.
    #[error("bags must be written in ascending order, indices before keys")]
    OutOfOrderBag,

    /// A bag was opened deeper than the header encoding can represent.
    #[error("bag level {level} exceeds the maximum of {max}", max = crate::MAX_LEVEL)]
    LevelOverflow { level: usize },
}

/// Result type alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
