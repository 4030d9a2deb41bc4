//! Primitive payload encoding (little-endian, panic-free).
//!
//! Same rules as the frame parser:
//! - Never index (`buf[0]`): always go through `Buf` after a `remaining()` check.
//! - A short read inside a complete frame is `Malformed`, not `Truncated`;
//!   the frame itself already told us how many bytes the payload has.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{DecodeError, Result};

/// Upper bound for any string field (length prefix is a `u16`).
pub const MAX_STR_BYTES: usize = u16::MAX as usize;

/// Cursor over one attachment payload.
pub struct PayloadReader {
    buf: Bytes,
    what: &'static str,
}

impl PayloadReader {
    pub fn new(buf: Bytes, what: &'static str) -> Self {
        Self { buf, what }
    }

    fn need(&self, n: usize, field: &str) -> Result<()> {
        if self.buf.remaining() < n {
            return Err(DecodeError::Malformed(format!(
                "{} payload: {field} needs {n} bytes, {} left",
                self.what,
                self.buf.remaining()
            )));
        }
        Ok(())
    }

    pub fn i64(&mut self, field: &str) -> Result<i64> {
        self.need(8, field)?;
        Ok(self.buf.get_i64_le())
    }

    pub fn u64(&mut self, field: &str) -> Result<u64> {
        self.need(8, field)?;
        Ok(self.buf.get_u64_le())
    }

    pub fn u32(&mut self, field: &str) -> Result<u32> {
        self.need(4, field)?;
        Ok(self.buf.get_u32_le())
    }

    pub fn f32(&mut self, field: &str) -> Result<f32> {
        self.need(4, field)?;
        Ok(self.buf.get_f32_le())
    }

    pub fn f64(&mut self, field: &str) -> Result<f64> {
        self.need(8, field)?;
        Ok(self.buf.get_f64_le())
    }

    pub fn bool(&mut self, field: &str) -> Result<bool> {
        self.need(1, field)?;
        match self.buf.get_u8() {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DecodeError::Malformed(format!(
                "{} payload: {field} must be 0 or 1, got {other}",
                self.what
            ))),
        }
    }

    pub fn string(&mut self, field: &str) -> Result<String> {
        self.need(2, field)?;
        let len = self.buf.get_u16_le() as usize;
        self.need(len, field)?;
        let raw = self.buf.copy_to_bytes(len);
        String::from_utf8(raw.to_vec()).map_err(|_| {
            DecodeError::Malformed(format!("{} payload: {field} is not valid utf-8", self.what))
        })
    }

    /// Every payload byte must be accounted for.
    pub fn finish(self) -> Result<()> {
        if self.buf.has_remaining() {
            return Err(DecodeError::Malformed(format!(
                "{} payload: {} trailing bytes",
                self.what,
                self.buf.remaining()
            )));
        }
        Ok(())
    }
}

pub fn put_bool(out: &mut BytesMut, v: bool) {
    out.put_u8(u8::from(v));
}

/// Callers guarantee `s.len() <= MAX_STR_BYTES` (checked at construction).
pub fn put_str(out: &mut BytesMut, s: &str) {
    out.put_u16_le(s.len() as u16);
    out.put_slice(s.as_bytes());
}

/// Constructor-side check for string fields.
pub fn check_str(field: &str, s: &str) -> Result<()> {
    if s.len() > MAX_STR_BYTES {
        return Err(DecodeError::OutOfRange(format!(
            "{field} is {} bytes, max {MAX_STR_BYTES}",
            s.len()
        )));
    }
    Ok(())
}
