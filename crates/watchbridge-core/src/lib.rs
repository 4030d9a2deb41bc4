//! watchbridge core: the attachment model shared by the phone and the watch.
//!
//! This crate defines the attachment kinds, the tag registry, and the
//! `[tag][length][payload]` framing used to move attachments between the two
//! devices. It carries no transport or runtime dependencies: every operation
//! is a pure function over byte buffers.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Every malformed input surfaces as a `DecodeError`, so a bad transfer from
//! the other device can never take the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod attachment;
pub mod codec;
pub mod error;
pub mod registry;
pub mod wire;

pub use attachment::{Attachment, AttachmentKind, Dimensions, MediaAttachment, Tag};
pub use codec::{decode_attachment, encode_attachment, encode_batch, Codec};
pub use error::{DecodeError, ErrorCode, RegistryError, Result};
pub use registry::Registry;
