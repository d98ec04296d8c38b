use wire::{
    build_frame, decode_message, FrameError, FramedMessage, LimitKind, Limits, Message,
    MessageKind, STATUS_NONE,
};

/// Kind with only a status byte.
struct StatusOnly;

impl MessageKind for StatusOnly {
    const NAME: &'static str = "status-only";
    const HEADER_LEN: usize = 1;
}

/// Kind with a status byte plus sequence and flags bytes.
struct Sequenced;

impl MessageKind for Sequenced {
    const NAME: &'static str = "sequenced";
    const HEADER_LEN: usize = 3;
}

#[test]
fn status_only_exchange() {
    let outgoing = Message::<StatusOnly>::compose(0x03, &[], b"ping").unwrap();
    let bytes = outgoing.into_data().unwrap();

    let incoming = StatusOnly::decode(bytes).unwrap();
    assert_eq!(incoming.status(), 0x03);
    assert_eq!(incoming.payload(), Some(b"ping".to_vec()));
}

#[test]
fn same_bytes_differ_by_kind() {
    let bytes = vec![0x01, 0x02, 0x03, 0x04];

    let a = StatusOnly::decode(bytes.clone()).unwrap();
    let b = Sequenced::decode(bytes).unwrap();

    assert_eq!(a.payload(), Some(vec![0x02, 0x03, 0x04]));
    assert_eq!(b.payload(), Some(vec![0x04]));
    assert_eq!(a.status(), b.status());
}

#[test]
fn header_only_frame_has_no_payload() {
    let msg = Sequenced::decode(vec![0x01, 0x00, 0x00]).unwrap();
    assert_eq!(msg.payload(), None);
    assert_eq!(msg.payload_len(), 0);
}

#[test]
fn truncated_frame_rejected_for_kind() {
    let err = Sequenced::decode(vec![0x01, 0x00]).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn status_update_before_send() {
    let mut msg = Message::<Sequenced>::compose(0x01, &[0x07, 0x00], &[0xAA]).unwrap();
    msg.set_status(0x02);
    assert_eq!(msg.data(), Some(&[0x02, 0x07, 0x00, 0xAA][..]));
}

#[test]
fn unset_message_reports_sentinel() {
    let mut msg = Message::<Sequenced>::new();
    msg.set_status(0x01);
    assert_eq!(msg.status(), STATUS_NONE);
    assert_eq!(msg.data(), None);
}

#[test]
fn transport_decoding_with_limits() {
    let limits = Limits {
        max_frame_bytes: 8,
        max_header_len: Sequenced::HEADER_LEN,
    };
    let bytes = build_frame(&[0x01, 0x00, 0x00], &[0; 5], Sequenced::HEADER_LEN).unwrap();
    let msg: FramedMessage = decode_message(bytes, Sequenced::HEADER_LEN, &limits).unwrap();
    assert_eq!(msg.payload_len(), 5);

    let oversized = vec![0x01; 9];
    let err = decode_message(oversized, Sequenced::HEADER_LEN, &limits).unwrap_err();
    assert_eq!(
        err,
        FrameError::LimitsExceeded {
            kind: LimitKind::FrameBytes,
            limit: 8,
            actual: 9,
        }
    );
}
