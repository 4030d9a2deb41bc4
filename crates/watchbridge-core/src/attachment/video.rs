//! Video reference.
//!
//! Layout: `video_id i64, width f32, height f32, duration_secs u32, round u8`.

use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;

use super::{AttachmentKind, Dimensions, MediaAttachment};
use crate::error::Result;
use crate::wire::{put_bool, PayloadReader};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VideoAttachment {
    video_id: i64,
    dimensions: Dimensions,
    duration_secs: u32,
    /// Round "video message" rather than a regular clip.
    round_message: bool,
}

impl VideoAttachment {
    pub fn new(video_id: i64, dimensions: Dimensions, duration_secs: u32, round_message: bool) -> Self {
        Self {
            video_id,
            dimensions,
            duration_secs,
            round_message,
        }
    }

    pub fn video_id(&self) -> i64 {
        self.video_id
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn is_round_message(&self) -> bool {
        self.round_message
    }
}

impl MediaAttachment for VideoAttachment {
    const KIND: AttachmentKind = AttachmentKind::Video;

    fn encode_payload(&self, out: &mut BytesMut) {
        out.put_i64_le(self.video_id);
        self.dimensions.put(out);
        out.put_u32_le(self.duration_secs);
        put_bool(out, self.round_message);
    }

    fn decode_payload(payload: Bytes) -> Result<Self> {
        let mut r = PayloadReader::new(payload, "video");
        let video_id = r.i64("video_id")?;
        let dimensions = Dimensions::read(&mut r)?;
        let duration_secs = r.u32("duration_secs")?;
        let round_message = r.bool("round_message")?;
        r.finish()?;
        Ok(Self::new(video_id, dimensions, duration_secs, round_message))
    }
}
