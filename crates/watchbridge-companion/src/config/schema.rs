use serde::Deserialize;
use watchbridge_core::AttachmentKind;

use crate::error::{BridgeError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    pub version: u32,

    #[serde(default)]
    pub codec: CodecSection,

    #[serde(default)]
    pub batch: BatchSection,

    #[serde(default)]
    pub kinds: KindsSection,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            codec: CodecSection::default(),
            batch: BatchSection::default(),
            kinds: KindsSection::default(),
        }
    }
}

impl BridgeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(BridgeError::UnsupportedVersion);
        }

        self.codec.validate()?; // Verify the scope of value
        self.kinds.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecSection {
    #[serde(default = "default_max_batch_bytes")]
    pub max_batch_bytes: usize,

    #[serde(default = "default_max_batch_entries")]
    pub max_batch_entries: usize,
}

impl Default for CodecSection {
    fn default() -> Self {
        Self {
            max_batch_bytes: default_max_batch_bytes(),
            max_batch_entries: default_max_batch_entries(),
        }
    }
}

impl CodecSection {
    pub fn validate(&self) -> Result<()> {
        if !(64..=16 * 1024 * 1024).contains(&self.max_batch_bytes) {
            return Err(BridgeError::Config(
                "codec.max_batch_bytes must be between 64 and 16777216".into(),
            ));
        }
        if !(1..=4096).contains(&self.max_batch_entries) {
            return Err(BridgeError::Config(
                "codec.max_batch_entries must be between 1 and 4096".into(),
            ));
        }
        Ok(())
    }
}

fn default_max_batch_bytes() -> usize {
    1024 * 1024
}
fn default_max_batch_entries() -> usize {
    64
}

/// What the receiver does with one bad entry in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryPolicy {
    /// Log, count, and continue with the next frame.
    Skip,
    /// Abort the whole batch.
    Fail,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchSection {
    /// Tags this build has no decoder for.
    #[serde(default = "default_on_unknown")]
    pub on_unknown: EntryPolicy,

    /// Known tags whose payload is malformed or out of range.
    #[serde(default = "default_on_invalid")]
    pub on_invalid: EntryPolicy,
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            on_unknown: default_on_unknown(),
            on_invalid: default_on_invalid(),
        }
    }
}

fn default_on_unknown() -> EntryPolicy {
    EntryPolicy::Skip
}
fn default_on_invalid() -> EntryPolicy {
    EntryPolicy::Fail
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KindsSection {
    /// Kinds this receiver refuses to decode; they read as unknown tags.
    #[serde(default)]
    pub disabled: Vec<AttachmentKind>,
}

impl KindsSection {
    pub fn validate(&self) -> Result<()> {
        if AttachmentKind::ALL
            .iter()
            .all(|k| self.disabled.contains(k))
        {
            return Err(BridgeError::Config(
                "kinds.disabled must leave at least one kind enabled".into(),
            ));
        }
        Ok(())
    }

    pub fn enabled(&self) -> impl Iterator<Item = AttachmentKind> + '_ {
        AttachmentKind::ALL
            .into_iter()
            .filter(|k| !self.disabled.contains(k))
    }
}
