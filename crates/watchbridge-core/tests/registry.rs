#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashSet;

use bytes::Bytes;

use watchbridge_core::attachment::ImageAttachment;
use watchbridge_core::codec::{self, Codec};
use watchbridge_core::registry::{builtin_decoder, decode_as};
use watchbridge_core::{
    Attachment, AttachmentKind, DecodeError, MediaAttachment, Registry, RegistryError, Tag,
};

#[test]
fn builtin_tags_are_unique_and_stable() {
    let tags: HashSet<Tag> = AttachmentKind::ALL.iter().map(|k| k.tag()).collect();
    assert_eq!(tags.len(), AttachmentKind::ALL.len());
    assert!(!tags.contains(&Tag::RESERVED));

    assert_eq!(AttachmentKind::Image.tag(), Tag(1));
    assert_eq!(AttachmentKind::Contact.tag(), Tag(7));
    for k in AttachmentKind::ALL {
        assert_eq!(AttachmentKind::from_tag(k.tag()), Some(k));
    }
    assert_eq!(AttachmentKind::from_tag(Tag(1000)), None);
}

#[test]
fn builtin_registers_every_kind() {
    let registry = Registry::builtin();
    assert_eq!(registry.len(), AttachmentKind::ALL.len());
    for k in AttachmentKind::ALL {
        assert!(registry.contains(k.tag()), "kind={k}");
    }
}

#[test]
fn duplicate_tag_is_rejected() {
    let mut registry = Registry::new();
    registry.register_kind::<ImageAttachment>().unwrap();
    let err = registry
        .register(AttachmentKind::Image.tag(), builtin_decoder(AttachmentKind::Video))
        .unwrap_err();
    assert_eq!(err, RegistryError::DuplicateTag(Tag(1)));
    assert_eq!(registry.len(), 1);
}

#[test]
fn reserved_tag_is_rejected() {
    let mut registry = Registry::new();
    let err = registry
        .register(Tag::RESERVED, decode_as::<ImageAttachment>)
        .unwrap_err();
    assert_eq!(err, RegistryError::ReservedTag(Tag(0)));
    assert!(registry.is_empty());
}

#[test]
fn lookup_absence_is_normal() {
    let registry = Registry::new();
    assert!(registry.lookup(Tag(1)).is_none());

    let a: Attachment = ImageAttachment::with_size(1, 1.0, 1.0).unwrap().into();
    let err = Codec::new(&registry)
        .decode_attachment(codec::encode_attachment(&a))
        .unwrap_err();
    assert_eq!(err, DecodeError::UnknownKind(Tag(1)));
}

#[test]
fn extra_tag_can_alias_an_existing_decoder() {
    // A receiver can accept a legacy tag for an existing payload shape
    // without the codec changing.
    let mut registry = Registry::builtin();
    registry
        .register(Tag(0x100), decode_as::<ImageAttachment>)
        .unwrap();

    let payload = ImageAttachment::with_size(8, 3.0, 4.0).unwrap();
    let decoded = Codec::new(&registry)
        .decode_payload(Tag(0x100), payload.encode())
        .unwrap();
    assert_eq!(decoded, Attachment::Image(payload));
    assert_eq!(registry.tags().last(), Some(&Tag(0x100)));
}

#[test]
fn registry_is_shareable_across_threads() {
    let registry = Registry::builtin();
    let frame = codec::encode_attachment(&ImageAttachment::with_size(1, 2.0, 3.0).unwrap().into());

    std::thread::scope(|s| {
        for _ in 0..4 {
            let frame: Bytes = frame.clone();
            let registry = &registry;
            s.spawn(move || {
                let a = Codec::new(registry).decode_attachment(frame).unwrap();
                assert_eq!(a.kind(), AttachmentKind::Image);
            });
        }
    });
}
