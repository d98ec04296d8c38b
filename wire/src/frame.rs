//! Frame building and bounded decoding.

use tracing::debug;

use crate::error::{FrameError, FrameResult};
use crate::limits::Limits;
use crate::message::{FramedMessage, STATUS_NONE};

/// Builds a frame by appending `payload` to `header`.
///
/// `header` must be exactly `header_len` bytes. A non-empty header must not
/// start with the reserved [`STATUS_NONE`] value.
///
/// # Example
///
/// ```
/// use wire::build_frame;
///
/// let bytes = build_frame(&[0x01, 0x02], b"hello", 2).unwrap();
/// assert_eq!(bytes.len(), 2 + 5);
/// ```
pub fn build_frame(header: &[u8], payload: &[u8], header_len: usize) -> FrameResult<Vec<u8>> {
    if header.len() != header_len {
        return Err(FrameError::HeaderLengthMismatch {
            expected: header_len,
            actual: header.len(),
        });
    }
    if header.first() == Some(&STATUS_NONE) {
        return Err(FrameError::ReservedStatus {
            status: STATUS_NONE,
        });
    }

    let mut buf = Vec::with_capacity(header.len() + payload.len());
    buf.extend_from_slice(header);
    buf.extend_from_slice(payload);
    Ok(buf)
}

/// Decodes a received buffer into a framed message after checking limits.
pub fn decode_message(
    data: Vec<u8>,
    header_len: usize,
    limits: &Limits,
) -> FrameResult<FramedMessage> {
    if let Err(err) = limits
        .check_header_len(header_len)
        .and_then(|()| limits.check_frame_len(data.len()))
    {
        debug!(%err, "rejecting frame");
        return Err(err);
    }

    let mut msg = FramedMessage::with_header_length(header_len);
    msg.set_data(data)?;
    Ok(msg)
}
