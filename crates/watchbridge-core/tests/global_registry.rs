//! Process-wide registry. Kept in its own test binary: the global can only be
//! installed once per process.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use watchbridge_core::attachment::{AudioAttachment, ImageAttachment};
use watchbridge_core::{codec, registry, AttachmentKind, ErrorCode, Registry, RegistryError};

#[test]
fn install_once_then_read() {
    registry::install(Registry::builtin_except(&[AttachmentKind::Audio])).unwrap();
    assert_eq!(
        registry::install(Registry::builtin()),
        Err(RegistryError::AlreadyInstalled)
    );

    let audio = codec::encode_attachment(&AudioAttachment::new(1, 2, 3).into());
    assert_eq!(
        codec::decode_attachment(audio).unwrap_err().code(),
        ErrorCode::UnknownKind
    );

    let image = ImageAttachment::with_size(1, 2.0, 3.0).unwrap().into();
    let back = codec::decode_attachment(codec::encode_attachment(&image)).unwrap();
    assert_eq!(back, image);
    assert_eq!(registry::global().len(), AttachmentKind::ALL.len() - 1);
}
