use std::sync::Arc;

use dashmap::DashMap;

use watchbridge_core::{Attachment, AttachmentKind};

use crate::error::Result;

/// Presentation-side hand-off for decoded attachments.
pub trait AttachmentConsumer: Send + Sync {
    /// Short name for logs and errors.
    fn name(&self) -> &'static str;
    /// Kinds this consumer wants.
    fn kinds(&self) -> Vec<AttachmentKind>;
    fn consume(&self, attachment: &Attachment) -> Result<()>;
}

/// Kind -> consumer routing. Later registrations replace earlier ones.
#[derive(Default)]
pub struct Dispatcher {
    consumers: DashMap<AttachmentKind, Arc<dyn AttachmentConsumer>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            consumers: DashMap::new(),
        }
    }

    pub fn register(&self, consumer: Arc<dyn AttachmentConsumer>) {
        for kind in consumer.kinds() {
            if let Some(prev) = self.consumers.insert(kind, Arc::clone(&consumer)) {
                tracing::warn!(%kind, replaced = prev.name(), by = consumer.name(), "consumer replaced");
            }
        }
    }

    pub fn registered_kinds(&self) -> Vec<AttachmentKind> {
        let mut kinds: Vec<AttachmentKind> = self.consumers.iter().map(|e| *e.key()).collect();
        kinds.sort_by_key(|k| k.tag());
        kinds
    }

    /// Hand `attachment` to its consumer. `Ok(false)` when nobody wants this
    /// kind; that is not an error.
    pub fn dispatch(&self, attachment: &Attachment) -> Result<bool> {
        let kind = attachment.kind();
        let Some(handler) = self.consumers.get(&kind).map(|e| Arc::clone(e.value())) else {
            tracing::debug!(%kind, "no consumer registered");
            return Ok(false);
        };
        handler.consume(attachment)?;
        Ok(true)
    }
}
