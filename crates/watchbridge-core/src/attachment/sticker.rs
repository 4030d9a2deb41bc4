use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;

use super::{AttachmentKind, Dimensions, MediaAttachment};
use crate::error::Result;
use crate::wire::{check_str, put_str, PayloadReader};

/// Sticker: a document id plus the emoji it stands for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StickerAttachment {
    document_id: i64,
    emoji: String,
    dimensions: Dimensions,
}

impl StickerAttachment {
    pub fn new(document_id: i64, emoji: impl Into<String>, dimensions: Dimensions) -> Result<Self> {
        let emoji = emoji.into();
        check_str("emoji", &emoji)?;
        Ok(Self {
            document_id,
            emoji,
            dimensions,
        })
    }

    pub fn document_id(&self) -> i64 {
        self.document_id
    }

    pub fn emoji(&self) -> &str {
        &self.emoji
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}

impl MediaAttachment for StickerAttachment {
    const KIND: AttachmentKind = AttachmentKind::Sticker;

    fn encode_payload(&self, out: &mut BytesMut) {
        out.put_i64_le(self.document_id);
        put_str(out, &self.emoji);
        self.dimensions.put(out);
    }

    fn decode_payload(payload: Bytes) -> Result<Self> {
        let mut r = PayloadReader::new(payload, "sticker");
        let document_id = r.i64("document_id")?;
        let emoji = r.string("emoji")?;
        let dimensions = Dimensions::read(&mut r)?;
        r.finish()?;
        Self::new(document_id, emoji, dimensions)
    }
}
