//! Configurable limits for bounded decoding.

use crate::error::{FrameError, FrameResult, LimitKind};

/// Framing limits applied before a received buffer is installed.
///
/// Buffer installation itself only checks the header length. These limits
/// are enforced by [`decode_message`](crate::decode_message) so a transport
/// can bound memory before handing frames to higher layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum frame size (header plus payload) in bytes.
    pub max_frame_bytes: usize,

    /// Maximum declared header length in bytes.
    pub max_header_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // Far above a single extended APDU, still bounded
            max_frame_bytes: 64 * 1024,
            max_header_len: 255,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_frame_bytes: 256,
            max_header_len: 16,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_frame_bytes: usize::MAX,
            max_header_len: usize::MAX,
        }
    }

    /// Checks a total frame length against `max_frame_bytes`.
    pub const fn check_frame_len(&self, len: usize) -> FrameResult<()> {
        if len > self.max_frame_bytes {
            return Err(FrameError::LimitsExceeded {
                kind: LimitKind::FrameBytes,
                limit: self.max_frame_bytes,
                actual: len,
            });
        }
        Ok(())
    }

    /// Checks a declared header length against `max_header_len`.
    pub const fn check_header_len(&self, len: usize) -> FrameResult<()> {
        if len > self.max_header_len {
            return Err(FrameError::LimitsExceeded {
                kind: LimitKind::HeaderLength,
                limit: self.max_header_len,
                actual: len,
            });
        }
        Ok(())
    }
}
