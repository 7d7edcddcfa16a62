//! Atom layer error types.

/// Errors that can occur while decoding serialized atoms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AtomError {
    /// A length prefix could not be decoded.
    #[error("invalid varint at position {position}: {}", hex(bytes))]
    InvalidVarint {
        /// Byte offset of the length prefix.
        position: usize,
        /// Up to the first 10 bytes at `position`.
        bytes: Vec<u8>,
    },

    /// A length prefix declared more bytes than remain in the buffer.
    #[error("insufficient bytes remaining for {length}-byte atom at position {position}")]
    Truncated { length: u64, position: usize },

    /// Text transport was not valid base64.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Result type alias for atom layer operations.
pub type Result<T> = std::result::Result<T, AtomError>;

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
