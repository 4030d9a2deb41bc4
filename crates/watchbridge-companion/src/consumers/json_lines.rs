use std::io::Write;
use std::sync::Mutex;

use watchbridge_core::{Attachment, AttachmentKind};

use crate::dispatch::AttachmentConsumer;
use crate::error::{BridgeError, Result};

/// Writes each attachment as one JSON object per line. Useful for piping the
/// decoded batch into other tools.
pub struct JsonLinesConsumer<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonLinesConsumer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.out.into_inner().map_err(|_| fail("writer lock poisoned"))
    }
}

fn fail(msg: impl Into<String>) -> BridgeError {
    BridgeError::Consumer {
        consumer: "json_lines",
        msg: msg.into(),
    }
}

impl<W: Write + Send> AttachmentConsumer for JsonLinesConsumer<W> {
    fn name(&self) -> &'static str {
        "json_lines"
    }

    fn kinds(&self) -> Vec<AttachmentKind> {
        AttachmentKind::ALL.to_vec()
    }

    fn consume(&self, attachment: &Attachment) -> Result<()> {
        let line = serde_json::to_string(attachment).map_err(|e| fail(e.to_string()))?;
        let mut out = self.out.lock().map_err(|_| fail("writer lock poisoned"))?;
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(())
    }
}
