//! Voice note / audio file reference.

use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;

use super::{AttachmentKind, MediaAttachment};
use crate::error::Result;
use crate::wire::PayloadReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AudioAttachment {
    audio_id: i64,
    duration_secs: u32,
    file_size: u32,
}

impl AudioAttachment {
    pub fn new(audio_id: i64, duration_secs: u32, file_size: u32) -> Self {
        Self {
            audio_id,
            duration_secs,
            file_size,
        }
    }

    pub fn audio_id(&self) -> i64 {
        self.audio_id
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn file_size(&self) -> u32 {
        self.file_size
    }
}

impl MediaAttachment for AudioAttachment {
    const KIND: AttachmentKind = AttachmentKind::Audio;

    fn encode_payload(&self, out: &mut BytesMut) {
        out.put_i64_le(self.audio_id);
        out.put_u32_le(self.duration_secs);
        out.put_u32_le(self.file_size);
    }

    fn decode_payload(payload: Bytes) -> Result<Self> {
        let mut r = PayloadReader::new(payload, "audio");
        let audio_id = r.i64("audio_id")?;
        let duration_secs = r.u32("duration_secs")?;
        let file_size = r.u32("file_size")?;
        r.finish()?;
        Ok(Self::new(audio_id, duration_secs, file_size))
    }
}
