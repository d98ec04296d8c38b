//! Concrete message kinds and the typed message wrapper.

use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use crate::error::FrameResult;
use crate::frame::build_frame;
use crate::message::{FramedMessage, STATUS_NONE};

/// Fixed-size header descriptor for a concrete message kind.
///
/// Header byte 0 is always the status byte; bytes `1..HEADER_LEN` belong to
/// the kind and are not interpreted by this crate.
pub trait MessageKind {
    /// Human-readable kind name, used in diagnostics.
    const NAME: &'static str;

    /// Header length in bytes, including the status byte.
    const HEADER_LEN: usize;

    /// Creates an Unset framed message with this kind's header length.
    #[must_use]
    fn empty() -> FramedMessage {
        FramedMessage::with_header_length(Self::HEADER_LEN)
    }

    /// Decodes a received buffer as this kind.
    fn decode(data: Vec<u8>) -> FrameResult<Message<Self>>
    where
        Self: Sized,
    {
        Message::from_data(data)
    }
}

/// A framed message whose header length is fixed by `K`.
///
/// Wraps a [`FramedMessage`] and delegates to it. The header length cannot be
/// changed through this type.
pub struct Message<K: MessageKind> {
    frame: FramedMessage,
    _kind: PhantomData<K>,
}

impl<K: MessageKind> Message<K> {
    /// Creates an Unset message of this kind.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame: K::empty(),
            _kind: PhantomData,
        }
    }

    /// Creates a message from a received buffer.
    pub fn from_data(data: Vec<u8>) -> FrameResult<Self> {
        let mut msg = Self::new();
        msg.set_data(data)?;
        Ok(msg)
    }

    /// Composes a message from its status, the kind-specific header bytes
    /// after the status, and a payload.
    pub fn compose(status: u8, header_rest: &[u8], payload: &[u8]) -> FrameResult<Self> {
        let mut header = Vec::with_capacity(1 + header_rest.len());
        header.push(status);
        header.extend_from_slice(header_rest);
        let data = build_frame(&header, payload, K::HEADER_LEN)?;
        Self::from_data(data)
    }

    /// Installs a new buffer, replacing any previous one.
    pub fn set_data(&mut self, data: Vec<u8>) -> FrameResult<()> {
        self.frame.set_data(data)
    }

    /// Kind name.
    #[inline]
    pub const fn kind_name(&self) -> &'static str {
        K::NAME
    }

    /// Status byte, or [`STATUS_NONE`] when Unset.
    #[inline]
    pub fn status(&self) -> u8 {
        self.frame.status()
    }

    /// Overwrites the status byte; no-op when Unset.
    ///
    /// Writing [`STATUS_NONE`] is allowed but makes the message read as
    /// carrying no data.
    #[inline]
    pub fn set_status(&mut self, status: u8) {
        if status == STATUS_NONE {
            debug!(kind = K::NAME, "writing reserved status 0xFF");
        }
        self.frame.set_status(status);
    }

    /// Whole buffer, header plus payload.
    #[inline]
    pub fn data(&self) -> Option<&[u8]> {
        self.frame.data()
    }

    /// Header bytes, status included.
    #[inline]
    pub fn header(&self) -> Option<&[u8]> {
        self.frame.header()
    }

    /// Copy of the payload, `None` when there is none.
    #[inline]
    pub fn payload(&self) -> Option<Vec<u8>> {
        self.frame.payload()
    }

    /// Payload length in bytes.
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.frame.payload_len()
    }

    /// Borrows the underlying framed message.
    #[inline]
    pub const fn frame(&self) -> &FramedMessage {
        &self.frame
    }

    /// Unwraps the underlying framed message.
    #[must_use]
    pub fn into_frame(self) -> FramedMessage {
        self.frame
    }

    /// Consumes the message, handing back its buffer.
    #[must_use]
    pub fn into_data(self) -> Option<Vec<u8>> {
        self.frame.into_data()
    }
}

impl<K: MessageKind> Default for Message<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: MessageKind> Clone for Message<K> {
    fn clone(&self) -> Self {
        Self {
            frame: self.frame.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: MessageKind> PartialEq for Message<K> {
    fn eq(&self, other: &Self) -> bool {
        self.frame == other.frame
    }
}

impl<K: MessageKind> Eq for Message<K> {}

impl<K: MessageKind> fmt::Debug for Message<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("kind", &K::NAME)
            .field("frame", &self.frame)
            .finish()
    }
}
