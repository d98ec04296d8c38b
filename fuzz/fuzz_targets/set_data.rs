#![no_main]

use libfuzzer_sys::fuzz_target;
use wire::{decode_message, FramedMessage, Limits, STATUS_NONE};

fuzz_target!(|data: &[u8]| {
    let Some((&header_len, rest)) = data.split_first() else {
        return;
    };
    let header_len = usize::from(header_len % 32);

    let mut msg = FramedMessage::with_header_length(header_len);
    match msg.set_data(rest.to_vec()) {
        Ok(()) => {
            assert_eq!(msg.data(), Some(rest));
            assert_eq!(msg.status(), rest.first().copied().unwrap_or(STATUS_NONE));
        }
        Err(err) => {
            assert!(err.is_invalid_argument());
            assert!(rest.len() < header_len);
            assert!(!msg.is_set());
        }
    }

    let len = msg.payload_len();
    assert_eq!(msg.payload().map_or(0, |payload| payload.len()), len);

    // Header length can move after install without breaking accessors.
    msg.set_header_length(rest.len() / 2);
    assert_eq!(msg.payload().map_or(0, |payload| payload.len()), msg.payload_len());

    let _ = decode_message(rest.to_vec(), header_len, &Limits::for_testing());
});
