//! Encode/decode contract tests for every attachment kind.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use bytes::Bytes;

use watchbridge_core::attachment::{
    AudioAttachment, ContactAttachment, DocumentAttachment, ImageAttachment, LocationAttachment,
    StickerAttachment, Venue, VideoAttachment,
};
use watchbridge_core::codec::{self, Codec, HEADER_LEN};
use watchbridge_core::{Attachment, AttachmentKind, DecodeError, Dimensions, ErrorCode, MediaAttachment, Registry};

fn samples() -> Vec<Attachment> {
    vec![
        ImageAttachment::with_size(42, 100.0, 200.0).unwrap().into(),
        ImageAttachment::with_size(i64::MIN, 0.0, 0.0).unwrap().into(),
        ImageAttachment::with_size(-7, 1.5, f32::MAX).unwrap().into(),
        VideoAttachment::new(9, Dimensions::new(1920.0, 1080.0).unwrap(), 61, false).into(),
        AudioAttachment::new(3, 12, 48_000).into(),
        DocumentAttachment::new(11, 1 << 40, "report.pdf", "application/pdf")
            .unwrap()
            .into(),
        StickerAttachment::new(5, "🙂", Dimensions::new(512.0, 512.0).unwrap())
            .unwrap()
            .into(),
        LocationAttachment::new(52.52, 13.405, None).unwrap().into(),
        LocationAttachment::new(-33.8688, 151.2093, Some(Venue::new("Opera House", "Bennelong Point").unwrap()))
            .unwrap()
            .into(),
        ContactAttachment::new(0, "Ada", "Lovelace", "+44 20 0000 0000")
            .unwrap()
            .into(),
    ]
}

#[test]
fn every_sample_round_trips() {
    let registry = Registry::builtin();
    let codec = Codec::new(&registry);
    for a in samples() {
        let bytes = codec::encode_attachment(&a);
        let back = codec.decode_attachment(bytes).unwrap();
        assert_eq!(back, a, "kind={}", a.kind());
    }
}

#[test]
fn image_example_bytes() {
    let a: Attachment = ImageAttachment::with_size(42, 100.0, 200.0).unwrap().into();
    let bytes = codec::encode_attachment(&a);
    assert_eq!(
        hex::encode(&bytes),
        "01000000100000002a000000000000000000c84200004843"
    );
    assert_eq!(codec::decode_attachment(bytes).unwrap(), a);
}

#[test]
fn image_payload_has_fixed_width() {
    let img = ImageAttachment::with_size(1, 2.0, 3.0).unwrap();
    assert_eq!(img.encode().len(), watchbridge_core::attachment::image::IMAGE_PAYLOAD_LEN);
    assert_eq!(img.kind(), AttachmentKind::Image);
}

#[test]
fn encoding_is_deterministic() {
    for a in samples() {
        let first = codec::encode_attachment(&a);
        let second = codec::encode_attachment(&a.clone());
        assert_eq!(first, second, "kind={}", a.kind());
    }
}

#[test]
fn dropping_any_trailing_bytes_is_truncated() {
    let registry = Registry::builtin();
    let codec = Codec::new(&registry);
    for a in samples() {
        let full = codec::encode_attachment(&a);
        for cut in 0..full.len() {
            let err = codec.decode_attachment(full.slice(..cut)).unwrap_err();
            assert_eq!(err.code(), ErrorCode::Truncated, "kind={} cut={cut}", a.kind());
        }
    }
}

#[test]
fn truncated_reports_needed_and_available() {
    let a: Attachment = ImageAttachment::with_size(1, 1.0, 1.0).unwrap().into();
    let full = codec::encode_attachment(&a);
    let err = codec::decode_attachment(full.slice(..full.len() - 1)).unwrap_err();
    assert_eq!(
        err,
        DecodeError::Truncated {
            needed: full.len(),
            available: full.len() - 1,
        }
    );
    let err = codec::decode_attachment(Bytes::new()).unwrap_err();
    assert_eq!(
        err,
        DecodeError::Truncated {
            needed: HEADER_LEN,
            available: 0,
        }
    );
}

#[test]
fn negative_dimensions_are_rejected_at_construction() {
    let err = Dimensions::new(-1.0, 10.0).unwrap_err();
    assert_eq!(err.code(), ErrorCode::OutOfRange);
    let err = ImageAttachment::with_size(1, 10.0, -0.5).unwrap_err();
    assert_eq!(err.code(), ErrorCode::OutOfRange);
    assert!(Dimensions::new(f32::INFINITY, 1.0).is_err());
    assert!(Dimensions::new(1.0, f32::NAN).is_err());
}

#[test]
fn zero_dimensions_mean_unknown() {
    let d = Dimensions::new(0.0, 0.0).unwrap();
    assert!(d.is_unknown());
    assert_eq!(d, Dimensions::UNKNOWN);
    assert!(!Dimensions::new(0.0, 1.0).unwrap().is_unknown());
}

#[test]
fn negative_zero_encodes_like_zero() {
    let a: Attachment = ImageAttachment::with_size(5, -0.0, 0.0).unwrap().into();
    let b: Attachment = ImageAttachment::with_size(5, 0.0, -0.0).unwrap().into();
    assert_eq!(codec::encode_attachment(&a), codec::encode_attachment(&b));
}

#[test]
fn opaque_ids_are_not_sentinels() {
    for id in [0, -1, i64::MIN, i64::MAX] {
        let a: Attachment = ImageAttachment::with_size(id, 10.0, 10.0).unwrap().into();
        let back = codec::decode_attachment(codec::encode_attachment(&a)).unwrap();
        match back {
            Attachment::Image(img) => assert_eq!(img.image_id(), id),
            other => panic!("unexpected {other:?}"),
        }
    }
}

#[test]
fn location_bounds() {
    assert!(LocationAttachment::new(90.0, -180.0, None).is_ok());
    assert_eq!(
        LocationAttachment::new(-90.5, 0.0, None).unwrap_err().code(),
        ErrorCode::OutOfRange
    );
    assert_eq!(
        LocationAttachment::new(0.0, 180.1, None).unwrap_err().code(),
        ErrorCode::OutOfRange
    );
    assert!(LocationAttachment::new(f64::NAN, 0.0, None).is_err());
}

#[test]
fn oversized_strings_are_rejected_at_construction() {
    let long = "x".repeat(watchbridge_core::wire::MAX_STR_BYTES + 1);
    let err = DocumentAttachment::new(1, 0, long, "text/plain").unwrap_err();
    assert_eq!(err.code(), ErrorCode::OutOfRange);

    let fits = "x".repeat(watchbridge_core::wire::MAX_STR_BYTES);
    let a: Attachment = DocumentAttachment::new(1, 0, fits, "").unwrap().into();
    assert_eq!(codec::decode_attachment(codec::encode_attachment(&a)).unwrap(), a);
}

#[test]
fn payload_with_extra_bytes_is_malformed() {
    let mut payload = ImageAttachment::with_size(1, 1.0, 1.0).unwrap().encode().to_vec();
    payload.push(0xAA);
    let err = ImageAttachment::decode_payload(Bytes::from(payload)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::Malformed);
}

#[test]
fn video_round_flag_must_be_boolean() {
    let v = VideoAttachment::new(1, Dimensions::UNKNOWN, 3, true);
    let mut payload = v.encode().to_vec();
    *payload.last_mut().unwrap() = 2;
    let err = VideoAttachment::decode_payload(Bytes::from(payload)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::Malformed);
}

#[test]
fn unframed_payload_decodes_by_tag() {
    let img = ImageAttachment::with_size(77, 640.0, 480.0).unwrap();
    let back = Attachment::decode(AttachmentKind::Image.tag(), img.encode()).unwrap();
    assert_eq!(back, Attachment::Image(img));
}
