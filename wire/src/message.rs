//! The framed message container: `header || payload` in one owned buffer.

use tracing::{debug, trace};

use crate::error::{FrameResult, InvalidArgument};

/// Status returned when no buffer is installed.
///
/// This value is reserved: no message kind may use it as a real status.
pub const STATUS_NONE: u8 = 0xFF;

/// One protocol message laid out as `header || payload`.
///
/// The header length is a property of the message kind, never carried in
/// the bytes. A message starts Unset (no buffer) and becomes Set through a
/// successful [`set_data`](Self::set_data); there is no way back to Unset.
///
/// Status accessors are permissive on an Unset message: [`status`] returns
/// [`STATUS_NONE`] and [`set_status`] does nothing. Callers that need to tell
/// the two apart must check [`is_set`](Self::is_set) themselves.
///
/// [`status`]: Self::status
/// [`set_status`]: Self::set_status
///
/// # Example
///
/// ```
/// use wire::FramedMessage;
///
/// let mut msg = FramedMessage::with_header_length(2);
/// msg.set_data(vec![0x01, 0x02, 0xAA, 0xBB]).unwrap();
///
/// assert_eq!(msg.status(), 0x01);
/// assert_eq!(msg.payload(), Some(vec![0xAA, 0xBB]));
/// assert_eq!(msg.payload_len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FramedMessage {
    buffer: Option<Vec<u8>>,
    header_len: usize,
}

impl FramedMessage {
    /// Creates an Unset message with a zero-length header.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: None,
            header_len: 0,
        }
    }

    /// Creates an Unset message with the header length preset.
    #[must_use]
    pub const fn with_header_length(header_len: usize) -> Self {
        Self {
            buffer: None,
            header_len,
        }
    }

    /// Returns the status byte (header byte 0), or [`STATUS_NONE`] when no
    /// non-empty buffer is installed.
    #[inline]
    pub fn status(&self) -> u8 {
        match self.buffer.as_deref() {
            Some([status, ..]) => *status,
            _ => STATUS_NONE,
        }
    }

    /// Overwrites the status byte in place. Does nothing when no non-empty
    /// buffer is installed.
    #[inline]
    pub fn set_status(&mut self, status: u8) {
        if let Some(first) = self.buffer.as_mut().and_then(|buf| buf.first_mut()) {
            *first = status;
        }
    }

    /// Returns the declared header length.
    #[inline]
    pub const fn header_length(&self) -> usize {
        self.header_len
    }

    /// Sets the header length.
    ///
    /// Not validated against an installed buffer; accessors treat a buffer
    /// that is no longer longer than the header as carrying no payload.
    #[inline]
    pub fn set_header_length(&mut self, header_len: usize) {
        self.header_len = header_len;
    }

    /// Returns `true` once a buffer has been installed.
    #[inline]
    pub const fn is_set(&self) -> bool {
        self.buffer.is_some()
    }

    /// Returns the whole buffer (header plus payload), if installed.
    #[inline]
    pub fn data(&self) -> Option<&[u8]> {
        self.buffer.as_deref()
    }

    /// Installs `data` as the message buffer, replacing any previous one.
    ///
    /// Fails with [`FrameError::InvalidArgument`](crate::FrameError::InvalidArgument)
    /// when `data` is `None` or shorter than the header. On failure the
    /// message is left as it was.
    pub fn set_data(&mut self, data: impl Into<Option<Vec<u8>>>) -> FrameResult<()> {
        let Some(data) = data.into() else {
            debug!(header_len = self.header_len, "rejecting frame: no data");
            return Err(InvalidArgument::MissingData.into());
        };
        if data.len() < self.header_len {
            debug!(
                actual = data.len(),
                required = self.header_len,
                "rejecting frame: shorter than header"
            );
            return Err(InvalidArgument::TooShort {
                actual: data.len(),
                required: self.header_len,
            }
            .into());
        }

        trace!(len = data.len(), header_len = self.header_len, "frame installed");
        self.buffer = Some(data);
        Ok(())
    }

    /// Returns the header bytes when the buffer is at least header-length
    /// long.
    pub fn header(&self) -> Option<&[u8]> {
        self.buffer
            .as_deref()
            .and_then(|buf| buf.get(..self.header_len))
    }

    /// Returns a borrowed view of the payload, `None` when there is none.
    pub fn payload_slice(&self) -> Option<&[u8]> {
        match self.buffer.as_deref() {
            Some(buf) if buf.len() > self.header_len => Some(&buf[self.header_len..]),
            _ => None,
        }
    }

    /// Returns a copy of the payload, `None` when there is none.
    ///
    /// The copy does not alias the buffer; later status writes do not show up
    /// in it and edits to it do not reach the message.
    pub fn payload(&self) -> Option<Vec<u8>> {
        self.payload_slice().map(<[u8]>::to_vec)
    }

    /// Returns the payload length, `0` when there is no payload.
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.buffer
            .as_ref()
            .map_or(0, |buf| buf.len().saturating_sub(self.header_len))
    }

    /// Consumes the message, handing back its buffer.
    #[must_use]
    pub fn into_data(self) -> Option<Vec<u8>> {
        self.buffer
    }
}
