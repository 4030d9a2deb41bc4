#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use watchbridge_companion::config::{self, EntryPolicy};
use watchbridge_companion::BridgeError;
use watchbridge_core::AttachmentKind;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
batch:
  on_unknwon: skip # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, BridgeError::Config(_)), "got {err:?}");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.codec.max_batch_bytes, 1024 * 1024);
    assert_eq!(cfg.codec.max_batch_entries, 64);
    assert_eq!(cfg.batch.on_unknown, EntryPolicy::Skip);
    assert_eq!(cfg.batch.on_invalid, EntryPolicy::Fail);
    assert!(cfg.kinds.disabled.is_empty());
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
codec:
  max_batch_bytes: 4096
  max_batch_entries: 8
batch:
  on_unknown: fail
  on_invalid: skip
kinds:
  disabled: [sticker, contact]
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.codec.max_batch_bytes, 4096);
    assert_eq!(cfg.batch.on_unknown, EntryPolicy::Fail);
    assert_eq!(cfg.batch.on_invalid, EntryPolicy::Skip);
    assert_eq!(
        cfg.kinds.disabled,
        vec![AttachmentKind::Sticker, AttachmentKind::Contact]
    );
    assert_eq!(cfg.kinds.enabled().count(), AttachmentKind::ALL.len() - 2);
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert!(matches!(err, BridgeError::UnsupportedVersion));
}

#[test]
fn limits_are_range_checked() {
    let err = config::load_from_str("version: 1\ncodec:\n  max_batch_entries: 0\n").expect_err("must fail");
    assert!(matches!(err, BridgeError::Config(_)));

    let err = config::load_from_str("version: 1\ncodec:\n  max_batch_bytes: 8\n").expect_err("must fail");
    assert!(matches!(err, BridgeError::Config(_)));
}

#[test]
fn unknown_kind_name_is_rejected() {
    let err = config::load_from_str("version: 1\nkinds:\n  disabled: [hologram]\n").expect_err("must fail");
    assert!(matches!(err, BridgeError::Config(_)));
}

#[test]
fn cannot_disable_everything() {
    let yaml = "version: 1\nkinds:\n  disabled: [image, video, audio, document, sticker, location, contact]\n";
    let err = config::load_from_str(yaml).expect_err("must fail");
    assert!(matches!(err, BridgeError::Config(_)));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let cfg = config::load_or_default("/nonexistent/watchbridge.yaml").expect("defaults");
    assert_eq!(cfg.version, 1);
    assert!(config::load_from_file("/nonexistent/watchbridge.yaml").is_err());
}
