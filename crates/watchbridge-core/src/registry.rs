//! Tag -> decoder registry.
//!
//! The codec never matches on tags itself; it asks a [`Registry`]. A registry
//! is populated once at startup and only read afterwards, so it is shared by
//! plain reference (`&Registry` / `&'static Registry`) with no locking.
//!
//! Absence of a tag is the normal forward-compatibility case: the sender was
//! built with a kind this receiver does not know.

use std::collections::HashMap;
use std::sync::OnceLock;

use bytes::Bytes;

use crate::attachment::{
    Attachment, AttachmentKind, AudioAttachment, ContactAttachment, DocumentAttachment,
    ImageAttachment, LocationAttachment, MediaAttachment, StickerAttachment, Tag,
    VideoAttachment,
};
use crate::error::{RegistryError, Result};

/// Payload decoder for one kind.
pub type DecodeFn = fn(Bytes) -> Result<Attachment>;

/// Generic decoder adapter: decode as `T`, lift into [`Attachment`].
pub fn decode_as<T: MediaAttachment>(payload: Bytes) -> Result<Attachment> {
    T::decode_payload(payload).map(Into::into)
}

/// Built-in decoder for a kind (exhaustive: a new kind will not compile
/// until it is wired here).
pub fn builtin_decoder(kind: AttachmentKind) -> DecodeFn {
    match kind {
        AttachmentKind::Image => decode_as::<ImageAttachment>,
        AttachmentKind::Video => decode_as::<VideoAttachment>,
        AttachmentKind::Audio => decode_as::<AudioAttachment>,
        AttachmentKind::Document => decode_as::<DocumentAttachment>,
        AttachmentKind::Sticker => decode_as::<StickerAttachment>,
        AttachmentKind::Location => decode_as::<LocationAttachment>,
        AttachmentKind::Contact => decode_as::<ContactAttachment>,
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    decoders: HashMap<Tag, DecodeFn>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Every built-in kind.
    pub fn builtin() -> Self {
        Self::builtin_except(&[])
    }

    /// Built-in kinds minus `disabled`. A receiver configured this way treats
    /// the disabled tags exactly like tags from a newer sender.
    pub fn builtin_except(disabled: &[AttachmentKind]) -> Self {
        // Tags in `AttachmentKind::ALL` are distinct, so plain inserts are safe.
        let decoders = AttachmentKind::ALL
            .into_iter()
            .filter(|k| !disabled.contains(k))
            .map(|k| (k.tag(), builtin_decoder(k)))
            .collect();
        Self { decoders }
    }

    /// Register a decoder. A tag collision is a programming error: callers
    /// should treat it as fatal at startup.
    pub fn register(&mut self, tag: Tag, decode: DecodeFn) -> std::result::Result<(), RegistryError> {
        if tag == Tag::RESERVED {
            return Err(RegistryError::ReservedTag(tag));
        }
        if self.decoders.contains_key(&tag) {
            return Err(RegistryError::DuplicateTag(tag));
        }
        self.decoders.insert(tag, decode);
        tracing::debug!(%tag, "attachment decoder registered");
        Ok(())
    }

    /// Register `T` under its own kind tag.
    pub fn register_kind<T: MediaAttachment>(&mut self) -> std::result::Result<(), RegistryError> {
        self.register(T::KIND.tag(), decode_as::<T>)
    }

    pub fn lookup(&self, tag: Tag) -> Option<DecodeFn> {
        self.decoders.get(&tag).copied()
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.decoders.contains_key(&tag)
    }

    /// Registered tags in ascending order.
    pub fn tags(&self) -> Vec<Tag> {
        let mut tags: Vec<Tag> = self.decoders.keys().copied().collect();
        tags.sort();
        tags
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Install the process-wide registry. Must happen before the first decode
/// through [`global`]; only the first install wins.
pub fn install(registry: Registry) -> std::result::Result<(), RegistryError> {
    GLOBAL
        .set(registry)
        .map_err(|_| RegistryError::AlreadyInstalled)
}

/// Process-wide registry. Falls back to [`Registry::builtin`] if nothing was
/// installed before the first call.
pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(Registry::builtin)
}
