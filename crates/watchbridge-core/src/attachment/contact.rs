//! Shared contact card.

use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;

use super::{AttachmentKind, MediaAttachment};
use crate::error::Result;
use crate::wire::{check_str, put_str, PayloadReader};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactAttachment {
    /// Opaque; `0` when the contact is not a known user.
    user_id: i64,
    first_name: String,
    last_name: String,
    phone_number: String,
}

impl ContactAttachment {
    pub fn new(
        user_id: i64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Result<Self> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let phone_number = phone_number.into();
        check_str("first_name", &first_name)?;
        check_str("last_name", &last_name)?;
        check_str("phone_number", &phone_number)?;
        Ok(Self {
            user_id,
            first_name,
            last_name,
            phone_number,
        })
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }
}

impl MediaAttachment for ContactAttachment {
    const KIND: AttachmentKind = AttachmentKind::Contact;

    fn encode_payload(&self, out: &mut BytesMut) {
        out.put_i64_le(self.user_id);
        put_str(out, &self.first_name);
        put_str(out, &self.last_name);
        put_str(out, &self.phone_number);
    }

    fn decode_payload(payload: Bytes) -> Result<Self> {
        let mut r = PayloadReader::new(payload, "contact");
        let user_id = r.i64("user_id")?;
        let first_name = r.string("first_name")?;
        let last_name = r.string("last_name")?;
        let phone_number = r.string("phone_number")?;
        r.finish()?;
        Self::new(user_id, first_name, last_name, phone_number)
    }
}
