//! Attachment framing (panic-free).
//!
//! Frame layout, little-endian:
//!
//! ```text
//! [0..4]   tag     (u32)
//! [4..8]   length  (u32, payload byte count)
//! [8..]    payload (`length` bytes, kind-specific)
//! ```
//!
//! The length prefix is what keeps a sequence decodable when a frame carries
//! a tag this build does not know: the reader skips exactly `length` bytes and
//! carries on with the next frame. Whether to skip or give up is the caller's
//! decision, never the codec's.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::attachment::{Attachment, Tag};
use crate::error::{DecodeError, Result};
use crate::registry::{self, Registry};

/// Fixed header size: tag + length.
pub const HEADER_LEN: usize = 4 + 4;

/// Parsed frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub tag: Tag,
    /// Payload length in bytes.
    pub len: u32,
}

impl FrameHeader {
    /// Header plus payload.
    pub fn frame_len(&self) -> usize {
        HEADER_LEN.saturating_add(self.len as usize)
    }
}

/// Read a frame header without consuming anything.
pub fn peek_header(buf: &[u8]) -> Result<FrameHeader> {
    let mut b = buf;
    if b.remaining() < HEADER_LEN {
        return Err(DecodeError::Truncated {
            needed: HEADER_LEN,
            available: b.remaining(),
        });
    }
    let tag = Tag(b.get_u32_le());
    let len = b.get_u32_le();
    Ok(FrameHeader { tag, len })
}

/// Split one complete frame off the front of `buf`.
///
/// On `Truncated`, `buf` is left untouched.
pub fn split_frame(buf: &mut Bytes) -> Result<(FrameHeader, Bytes)> {
    let header = peek_header(&buf[..])?;
    let needed = header.frame_len();
    if buf.remaining() < needed {
        return Err(DecodeError::Truncated {
            needed,
            available: buf.remaining(),
        });
    }
    buf.advance(HEADER_LEN);
    let payload = buf.split_to(header.len as usize);
    Ok((header, payload))
}

/// Append one framed attachment to `out`.
pub fn write_frame(attachment: &Attachment, out: &mut BytesMut) {
    let payload = attachment.encode();
    out.reserve(HEADER_LEN + payload.len());
    out.put_u32_le(attachment.tag().get());
    // Payload fields are fixed width or u16-prefixed strings, far below u32::MAX.
    out.put_u32_le(payload.len() as u32);
    out.put_slice(&payload);
}

/// `[tag][length][payload]` for one attachment. Deterministic: equal values
/// produce identical bytes.
pub fn encode_attachment(attachment: &Attachment) -> Bytes {
    let mut out = BytesMut::new();
    write_frame(attachment, &mut out);
    out.freeze()
}

/// Concatenated frames, in order.
pub fn encode_batch(attachments: &[Attachment]) -> Bytes {
    let mut out = BytesMut::new();
    for a in attachments {
        write_frame(a, &mut out);
    }
    out.freeze()
}

/// Decode exactly one frame using the process-wide registry.
pub fn decode_attachment(buf: Bytes) -> Result<Attachment> {
    Codec::global().decode_attachment(buf)
}

/// Frame decoder bound to a registry.
#[derive(Debug, Clone, Copy)]
pub struct Codec<'r> {
    registry: &'r Registry,
}

impl<'r> Codec<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Decode a buffer holding exactly one frame. Bytes past the frame are
    /// `Malformed`.
    pub fn decode_attachment(&self, mut buf: Bytes) -> Result<Attachment> {
        let (header, payload) = split_frame(&mut buf)?;
        if buf.has_remaining() {
            return Err(DecodeError::Malformed(format!(
                "{} bytes after frame",
                buf.remaining()
            )));
        }
        self.decode_payload(header.tag, payload)
    }

    /// Registry dispatch for an already-framed payload.
    pub fn decode_payload(&self, tag: Tag, payload: Bytes) -> Result<Attachment> {
        let Some(decode) = self.registry.lookup(tag) else {
            tracing::trace!(%tag, len = payload.len(), "no decoder for tag");
            return Err(DecodeError::UnknownKind(tag));
        };
        decode(payload)
    }

    /// Iterate over concatenated frames.
    pub fn reader(&self, buf: Bytes) -> AttachmentReader<'r> {
        AttachmentReader::new(*self, buf)
    }
}

impl Codec<'static> {
    /// Codec over [`registry::global`].
    pub fn global() -> Self {
        Self::new(registry::global())
    }
}

/// One item produced by [`AttachmentReader`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReadEntry {
    /// Position in the sequence (0-based).
    pub index: usize,
    /// Byte offset of the frame header.
    pub offset: usize,
    /// `None` only when the header itself was cut short.
    pub tag: Option<Tag>,
    pub result: Result<Attachment>,
}

/// Sequential decoder over a batch of frames.
///
/// A frame whose payload fails (`UnknownKind`, `Malformed`, `OutOfRange`) is
/// still consumed whole, so the next entry starts at the next frame.
/// `Truncated` is yielded once and ends the iteration.
#[derive(Debug)]
pub struct AttachmentReader<'r> {
    codec: Codec<'r>,
    buf: Bytes,
    offset: usize,
    index: usize,
    done: bool,
}

impl<'r> AttachmentReader<'r> {
    pub fn new(codec: Codec<'r>, buf: Bytes) -> Self {
        Self {
            codec,
            buf,
            offset: 0,
            index: 0,
            done: false,
        }
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }
}

impl Iterator for AttachmentReader<'_> {
    type Item = ReadEntry;

    fn next(&mut self) -> Option<ReadEntry> {
        if self.done || !self.buf.has_remaining() {
            return None;
        }

        let index = self.index;
        let offset = self.offset;
        self.index += 1;

        match split_frame(&mut self.buf) {
            Ok((header, payload)) => {
                self.offset += header.frame_len();
                Some(ReadEntry {
                    index,
                    offset,
                    tag: Some(header.tag),
                    result: self.codec.decode_payload(header.tag, payload),
                })
            }
            Err(e) => {
                self.done = true;
                let tag = peek_header(&self.buf[..]).ok().map(|h| h.tag);
                Some(ReadEntry {
                    index,
                    offset,
                    tag,
                    result: Err(e),
                })
            }
        }
    }
}

impl std::iter::FusedIterator for AttachmentReader<'_> {}
