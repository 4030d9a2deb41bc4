//! Batch decoding with a skip/fail policy.
//!
//! The codec reports every bad entry and leaves the stream positioned at the
//! next frame. This module is where the receiver decides what that means:
//! unknown tags and invalid payloads are each either skipped (logged and
//! counted) or fatal for the whole batch. `Truncated` is always fatal; there
//! is no next frame to move on to.

use bytes::Bytes;

use watchbridge_core::codec::Codec;
use watchbridge_core::{Attachment, DecodeError, ErrorCode, Tag};

use crate::config::{BatchSection, EntryPolicy};
use crate::error::{BridgeError, Result};
use crate::obs::BridgeMetrics;

/// Per-batch rules.
#[derive(Debug, Clone, Copy)]
pub struct BatchPolicy {
    pub on_unknown: EntryPolicy,
    pub on_invalid: EntryPolicy,
    pub max_entries: usize,
}

impl BatchPolicy {
    pub fn from_config(batch: &BatchSection, max_entries: usize) -> Self {
        Self {
            on_unknown: batch.on_unknown,
            on_invalid: batch.on_invalid,
            max_entries,
        }
    }

    fn for_error(&self, e: &DecodeError) -> EntryPolicy {
        match e.code() {
            ErrorCode::UnknownKind => self.on_unknown,
            ErrorCode::Malformed | ErrorCode::OutOfRange => self.on_invalid,
            ErrorCode::Truncated => EntryPolicy::Fail,
        }
    }
}

/// An entry that was dropped under [`EntryPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub index: usize,
    pub offset: usize,
    pub tag: Tag,
    pub code: ErrorCode,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedBatch {
    pub attachments: Vec<Attachment>,
    pub skipped: Vec<SkippedEntry>,
}

/// Decode every frame in `buf`, applying `policy` to bad entries.
pub fn decode_batch(
    codec: Codec<'_>,
    policy: &BatchPolicy,
    buf: Bytes,
    metrics: &BridgeMetrics,
) -> Result<DecodedBatch> {
    let mut out = DecodedBatch::default();

    for entry in codec.reader(buf) {
        if entry.index >= policy.max_entries {
            metrics.batches_failed.inc(&[("code", "TOO_MANY_ENTRIES")]);
            return Err(BridgeError::TooManyEntries {
                max: policy.max_entries,
            });
        }

        match entry.result {
            Ok(attachment) => {
                metrics
                    .frames_decoded
                    .inc(&[("kind", attachment.kind().as_str())]);
                out.attachments.push(attachment);
            }
            Err(e) => {
                let code = e.code();
                match policy.for_error(&e) {
                    EntryPolicy::Skip => {
                        let tag = entry.tag.unwrap_or(Tag::RESERVED);
                        tracing::warn!(
                            index = entry.index,
                            offset = entry.offset,
                            %tag,
                            code = code.as_str(),
                            error = %e,
                            "skipping attachment"
                        );
                        metrics.entries_skipped.inc(&[("code", code.as_str())]);
                        out.skipped.push(SkippedEntry {
                            index: entry.index,
                            offset: entry.offset,
                            tag,
                            code,
                        });
                    }
                    EntryPolicy::Fail => {
                        metrics.batches_failed.inc(&[("code", code.as_str())]);
                        return Err(BridgeError::Entry {
                            index: entry.index,
                            source: e,
                        });
                    }
                }
            }
        }
    }

    Ok(out)
}
