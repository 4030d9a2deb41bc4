//! Receiving side of the bridge.
//!
//! Wires the registry (minus disabled kinds), the batch policy, the consumer
//! dispatcher and metrics into one cheaply cloneable handle. Startup errors
//! are returned, not panicked on.

use std::sync::Arc;

use bytes::Bytes;

use watchbridge_core::codec::Codec;
use watchbridge_core::registry::builtin_decoder;
use watchbridge_core::{Attachment, Registry};

use crate::batch::{self, BatchPolicy, DecodedBatch, SkippedEntry};
use crate::config::BridgeConfig;
use crate::dispatch::{AttachmentConsumer, Dispatcher};
use crate::error::{BridgeError, Result};
use crate::obs::BridgeMetrics;

/// Outcome of [`Receiver::receive`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiveReport {
    /// Attachments handed to a consumer.
    pub delivered: usize,
    /// Decoded attachments nobody had registered for.
    pub unconsumed: usize,
    pub skipped: Vec<SkippedEntry>,
}

#[derive(Clone)]
pub struct Receiver {
    inner: Arc<ReceiverInner>,
}

struct ReceiverInner {
    cfg: BridgeConfig,
    registry: Registry,
    policy: BatchPolicy,
    dispatcher: Dispatcher,
    metrics: BridgeMetrics,
}

impl Receiver {
    /// Build the receiver. A tag collision while populating the registry is
    /// fatal here, before any bytes are decoded.
    pub fn new(cfg: BridgeConfig) -> Result<Self> {
        cfg.validate()?;

        let mut registry = Registry::new();
        for kind in cfg.kinds.enabled() {
            registry.register(kind.tag(), builtin_decoder(kind))?;
        }
        for kind in &cfg.kinds.disabled {
            tracing::info!(%kind, tag = %kind.tag(), "attachment kind disabled");
        }

        let policy = BatchPolicy::from_config(&cfg.batch, cfg.codec.max_batch_entries);

        Ok(Self {
            inner: Arc::new(ReceiverInner {
                cfg,
                registry,
                policy,
                dispatcher: Dispatcher::new(),
                metrics: BridgeMetrics::default(),
            }),
        })
    }

    pub fn cfg(&self) -> &BridgeConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    pub fn codec(&self) -> Codec<'_> {
        Codec::new(&self.inner.registry)
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    pub fn metrics(&self) -> &BridgeMetrics {
        &self.inner.metrics
    }

    pub fn register_consumer(&self, consumer: Arc<dyn AttachmentConsumer>) {
        self.inner.dispatcher.register(consumer);
    }

    fn check_size(&self, len: usize) -> Result<()> {
        let max = self.inner.cfg.codec.max_batch_bytes;
        if len > max {
            self.inner
                .metrics
                .batches_failed
                .inc(&[("code", "BATCH_TOO_LARGE")]);
            return Err(BridgeError::BatchTooLarge { len, max });
        }
        Ok(())
    }

    /// Decode a batch under the configured policy, without dispatching.
    pub fn decode(&self, buf: Bytes) -> Result<DecodedBatch> {
        self.check_size(buf.len())?;
        self.inner.metrics.batches_received.inc(&[]);
        batch::decode_batch(self.codec(), &self.inner.policy, buf, &self.inner.metrics)
    }

    /// Decode a batch and hand every attachment to its consumer, in order.
    pub fn receive(&self, buf: Bytes) -> Result<ReceiveReport> {
        let decoded = self.decode(buf)?;
        let mut report = ReceiveReport {
            skipped: decoded.skipped,
            ..ReceiveReport::default()
        };

        for attachment in &decoded.attachments {
            if self.inner.dispatcher.dispatch(attachment)? {
                report.delivered += 1;
            } else {
                self.inner
                    .metrics
                    .unconsumed
                    .inc(&[("kind", attachment.kind().as_str())]);
                report.unconsumed += 1;
            }
        }

        tracing::debug!(
            delivered = report.delivered,
            unconsumed = report.unconsumed,
            skipped = report.skipped.len(),
            "batch received"
        );
        Ok(report)
    }

    /// A single required attachment: any decode error propagates, including
    /// an unknown kind.
    pub fn receive_one(&self, buf: Bytes) -> Result<Attachment> {
        self.check_size(buf.len())?;
        let attachment = self.codec().decode_attachment(buf).inspect_err(|e| {
            self.inner
                .metrics
                .batches_failed
                .inc(&[("code", e.code().as_str())]);
        })?;
        self.inner
            .metrics
            .frames_decoded
            .inc(&[("kind", attachment.kind().as_str())]);
        Ok(attachment)
    }
}
