//! Image reference: an opaque id plus the intrinsic pixel size.
//!
//! Payload layout (16 bytes):
//!
//! ```text
//! [0..8]   image_id (i64 LE)
//! [8..12]  width    (f32 LE)
//! [12..16] height   (f32 LE)
//! ```
//!
//! Pixel data never travels here; the receiver resolves `image_id` through a
//! separate channel.

use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;

use super::{AttachmentKind, Dimensions, MediaAttachment};
use crate::error::Result;
use crate::wire::PayloadReader;

/// Encoded payload size.
pub const IMAGE_PAYLOAD_LEN: usize = 8 + 4 + 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImageAttachment {
    image_id: i64,
    dimensions: Dimensions,
}

impl ImageAttachment {
    /// Any `image_id` is valid, including zero and negatives.
    pub fn new(image_id: i64, dimensions: Dimensions) -> Self {
        Self {
            image_id,
            dimensions,
        }
    }

    /// Convenience constructor validating raw width/height.
    pub fn with_size(image_id: i64, width: f32, height: f32) -> Result<Self> {
        Ok(Self::new(image_id, Dimensions::new(width, height)?))
    }

    pub fn image_id(&self) -> i64 {
        self.image_id
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}

impl MediaAttachment for ImageAttachment {
    const KIND: AttachmentKind = AttachmentKind::Image;

    fn encode_payload(&self, out: &mut BytesMut) {
        out.reserve(IMAGE_PAYLOAD_LEN);
        out.put_i64_le(self.image_id);
        self.dimensions.put(out);
    }

    fn decode_payload(payload: Bytes) -> Result<Self> {
        let mut r = PayloadReader::new(payload, "image");
        let image_id = r.i64("image_id")?;
        let dimensions = Dimensions::read(&mut r)?;
        r.finish()?;
        Ok(Self::new(image_id, dimensions))
    }
}
