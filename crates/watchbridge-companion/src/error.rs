//! Receiver-side error type.

use thiserror::Error;
use watchbridge_core::{DecodeError, RegistryError};

/// Shared result type.
pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("batch is {len} bytes, max {max}")]
    BatchTooLarge { len: usize, max: usize },
    #[error("batch has more than {max} entries")]
    TooManyEntries { max: usize },
    #[error("entry {index}: {source}")]
    Entry {
        index: usize,
        #[source]
        source: DecodeError,
    },
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("consumer {consumer} failed: {msg}")]
    Consumer { consumer: &'static str, msg: String },
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Decode error behind this failure, if any.
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            BridgeError::Entry { source, .. } => Some(source),
            BridgeError::Decode(e) => Some(e),
            _ => None,
        }
    }
}
