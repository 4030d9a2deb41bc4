//! Attachment model.
//!
//! Every attachment kind is its own value type implementing
//! [`MediaAttachment`]. The closed [`Attachment`] enum is what the codec hands
//! back to callers; `match` on it is exhaustive, so adding a kind forces every
//! consumer to decide what to do with it.
//!
//! Variants share no state. Each owns its fields, validates them in its
//! constructor, and is immutable afterwards.

pub mod audio;
pub mod contact;
pub mod document;
pub mod image;
pub mod location;
pub mod sticker;
pub mod video;

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, Result};
use crate::wire::PayloadReader;

pub use audio::AudioAttachment;
pub use contact::ContactAttachment;
pub use document::DocumentAttachment;
pub use image::ImageAttachment;
pub use location::{LocationAttachment, Venue};
pub use sticker::StickerAttachment;
pub use video::VideoAttachment;

/// Wire identifier of an attachment kind.
///
/// Tags are fixed at design time and never reused for a different payload
/// shape. `0` is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Tag(pub u32);

impl Tag {
    pub const RESERVED: Tag = Tag(0);

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Every attachment kind this build knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Image,
    Video,
    Audio,
    Document,
    Sticker,
    Location,
    Contact,
}

impl AttachmentKind {
    pub const ALL: [AttachmentKind; 7] = [
        AttachmentKind::Image,
        AttachmentKind::Video,
        AttachmentKind::Audio,
        AttachmentKind::Document,
        AttachmentKind::Sticker,
        AttachmentKind::Location,
        AttachmentKind::Contact,
    ];

    /// Stable wire tag. Never change an existing value.
    pub const fn tag(self) -> Tag {
        match self {
            AttachmentKind::Image => Tag(1),
            AttachmentKind::Video => Tag(2),
            AttachmentKind::Audio => Tag(3),
            AttachmentKind::Document => Tag(4),
            AttachmentKind::Sticker => Tag(5),
            AttachmentKind::Location => Tag(6),
            AttachmentKind::Contact => Tag(7),
        }
    }

    pub fn from_tag(tag: Tag) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttachmentKind::Image => "image",
            AttachmentKind::Video => "video",
            AttachmentKind::Audio => "audio",
            AttachmentKind::Document => "document",
            AttachmentKind::Sticker => "sticker",
            AttachmentKind::Location => "location",
            AttachmentKind::Contact => "contact",
        }
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability set shared by every attachment kind.
pub trait MediaAttachment: Sized + Into<Attachment> {
    /// Registry tag owner.
    const KIND: AttachmentKind;

    fn kind(&self) -> AttachmentKind {
        Self::KIND
    }

    /// Append the self-contained payload. Infallible: constructors already
    /// rejected every value that could not be encoded.
    fn encode_payload(&self, out: &mut BytesMut);

    /// Rebuild a value from exactly one payload.
    fn decode_payload(payload: Bytes) -> Result<Self>;

    fn encode(&self) -> Bytes {
        let mut out = BytesMut::new();
        self.encode_payload(&mut out);
        out.freeze()
    }
}

/// Intrinsic pixel size. `(0, 0)` means "unknown", not an error.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Dimensions {
    width: f32,
    height: f32,
}

impl Dimensions {
    pub const UNKNOWN: Dimensions = Dimensions {
        width: 0.0,
        height: 0.0,
    };

    /// Both components must be finite and `>= 0`.
    pub fn new(width: f32, height: f32) -> Result<Self> {
        check_component("width", width)?;
        check_component("height", height)?;
        // -0.0 + 0.0 == +0.0, so equal values always encode to equal bytes.
        Ok(Self {
            width: width + 0.0,
            height: height + 0.0,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn is_unknown(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    pub(crate) fn put(&self, out: &mut BytesMut) {
        out.put_f32_le(self.width);
        out.put_f32_le(self.height);
    }

    pub(crate) fn read(r: &mut PayloadReader) -> Result<Self> {
        let width = r.f32("width")?;
        let height = r.f32("height")?;
        Self::new(width, height)
    }
}

fn check_component(name: &str, v: f32) -> Result<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(DecodeError::OutOfRange(format!(
            "{name} must be finite and >= 0, got {v}"
        )));
    }
    Ok(())
}

/// Any attachment, as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Attachment {
    Image(ImageAttachment),
    Video(VideoAttachment),
    Audio(AudioAttachment),
    Document(DocumentAttachment),
    Sticker(StickerAttachment),
    Location(LocationAttachment),
    Contact(ContactAttachment),
}

impl Attachment {
    pub fn kind(&self) -> AttachmentKind {
        match self {
            Attachment::Image(_) => AttachmentKind::Image,
            Attachment::Video(_) => AttachmentKind::Video,
            Attachment::Audio(_) => AttachmentKind::Audio,
            Attachment::Document(_) => AttachmentKind::Document,
            Attachment::Sticker(_) => AttachmentKind::Sticker,
            Attachment::Location(_) => AttachmentKind::Location,
            Attachment::Contact(_) => AttachmentKind::Contact,
        }
    }

    pub fn tag(&self) -> Tag {
        self.kind().tag()
    }

    pub fn encode_payload(&self, out: &mut BytesMut) {
        match self {
            Attachment::Image(a) => a.encode_payload(out),
            Attachment::Video(a) => a.encode_payload(out),
            Attachment::Audio(a) => a.encode_payload(out),
            Attachment::Document(a) => a.encode_payload(out),
            Attachment::Sticker(a) => a.encode_payload(out),
            Attachment::Location(a) => a.encode_payload(out),
            Attachment::Contact(a) => a.encode_payload(out),
        }
    }

    /// Payload only (no tag/length framing).
    pub fn encode(&self) -> Bytes {
        let mut out = BytesMut::new();
        self.encode_payload(&mut out);
        out.freeze()
    }

    /// Decode an unframed payload through the process-wide registry.
    pub fn decode(tag: Tag, payload: Bytes) -> Result<Attachment> {
        crate::codec::Codec::global().decode_payload(tag, payload)
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Attachment {
                fn from(a: $ty) -> Self {
                    Attachment::$variant(a)
                }
            }
        )*
    };
}

impl_from_variant! {
    Image => ImageAttachment,
    Video => VideoAttachment,
    Audio => AudioAttachment,
    Document => DocumentAttachment,
    Sticker => StickerAttachment,
    Location => LocationAttachment,
    Contact => ContactAttachment,
}
