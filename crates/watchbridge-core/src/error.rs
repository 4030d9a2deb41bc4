//! Error types shared by the attachment model, registry, and codec.

use thiserror::Error;

use crate::attachment::Tag;

/// Stable error codes (used in logs, metrics labels and test vectors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Structurally broken payload.
    Malformed,
    /// Declared length exceeds the available bytes.
    Truncated,
    /// A field violates its semantic invariant.
    OutOfRange,
    /// Tag not present in the registry.
    UnknownKind,
}

impl ErrorCode {
    /// String representation used in metrics labels and vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Malformed => "MALFORMED",
            ErrorCode::Truncated => "TRUNCATED",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::UnknownKind => "UNKNOWN_KIND",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Failure while constructing or decoding an attachment.
///
/// Every variant is recoverable: decoding never panics, the caller always
/// gets one of these back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed: {0}")]
    Malformed(String),
    #[error("truncated: needed {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },
    #[error("out of range: {0}")]
    OutOfRange(String),
    #[error("unknown attachment kind: {0}")]
    UnknownKind(Tag),
}

impl DecodeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::Malformed(_) => ErrorCode::Malformed,
            DecodeError::Truncated { .. } => ErrorCode::Truncated,
            DecodeError::OutOfRange(_) => ErrorCode::OutOfRange,
            DecodeError::UnknownKind(_) => ErrorCode::UnknownKind,
        }
    }
}

/// Registry setup errors. These are programming errors surfaced at startup,
/// never produced by input bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("tag {0} is already registered")]
    DuplicateTag(Tag),
    #[error("tag {0} is reserved")]
    ReservedTag(Tag),
    #[error("global registry is already installed")]
    AlreadyInstalled,
}
