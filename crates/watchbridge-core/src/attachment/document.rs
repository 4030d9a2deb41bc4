//! Generic file attachment.
//!
//! Layout: `document_id i64, file_size u64, file_name str, mime_type str`
//! where `str` is a `u16` byte length followed by UTF-8.

use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;

use super::{AttachmentKind, MediaAttachment};
use crate::error::Result;
use crate::wire::{check_str, put_str, PayloadReader};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentAttachment {
    document_id: i64,
    file_size: u64,
    file_name: String,
    mime_type: String,
}

impl DocumentAttachment {
    pub fn new(
        document_id: i64,
        file_size: u64,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Result<Self> {
        let file_name = file_name.into();
        let mime_type = mime_type.into();
        check_str("file_name", &file_name)?;
        check_str("mime_type", &mime_type)?;
        Ok(Self {
            document_id,
            file_size,
            file_name,
            mime_type,
        })
    }

    pub fn document_id(&self) -> i64 {
        self.document_id
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

impl MediaAttachment for DocumentAttachment {
    const KIND: AttachmentKind = AttachmentKind::Document;

    fn encode_payload(&self, out: &mut BytesMut) {
        out.put_i64_le(self.document_id);
        out.put_u64_le(self.file_size);
        put_str(out, &self.file_name);
        put_str(out, &self.mime_type);
    }

    fn decode_payload(payload: Bytes) -> Result<Self> {
        let mut r = PayloadReader::new(payload, "document");
        let document_id = r.i64("document_id")?;
        let file_size = r.u64("file_size")?;
        let file_name = r.string("file_name")?;
        let mime_type = r.string("mime_type")?;
        r.finish()?;
        Self::new(document_id, file_size, file_name, mime_type)
    }
}
