//! Error types for message framing.

use std::fmt;

/// Result type for framing operations.
pub type FrameResult<T> = Result<T, FrameError>;

/// Errors raised while installing, decoding, or building framed messages.
///
/// Buffer installation only ever produces [`FrameError::InvalidArgument`].
/// The other variants come from bounded decoding and frame building.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FrameError {
    /// The supplied buffer cannot be a frame of the declared kind.
    InvalidArgument(InvalidArgument),

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// Header passed to the frame builder has the wrong length.
    HeaderLengthMismatch { expected: usize, actual: usize },

    /// Frame builder was given the reserved "no data" status.
    ReservedStatus { status: u8 },
}

/// Reasons a buffer was rejected as an invalid argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidArgument {
    /// No buffer was supplied.
    MissingData,

    /// Buffer is shorter than the declared header.
    TooShort { actual: usize, required: usize },
}

/// Specific framing limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    FrameBytes,
    HeaderLength,
}

impl FrameError {
    /// Returns `true` for the invalid-argument kind.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl From<InvalidArgument> for FrameError {
    fn from(err: InvalidArgument) -> Self {
        Self::InvalidArgument(err)
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(err) => write!(f, "invalid argument: {err}"),
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::HeaderLengthMismatch { expected, actual } => {
                write!(
                    f,
                    "header length mismatch: expected {expected} bytes, got {actual}"
                )
            }
            Self::ReservedStatus { status } => {
                write!(f, "status 0x{status:02X} is reserved")
            }
        }
    }
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingData => write!(f, "no data supplied"),
            Self::TooShort { actual, required } => {
                write!(
                    f,
                    "frame too short: {actual} bytes, header needs {required}"
                )
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FrameBytes => "frame bytes",
            Self::HeaderLength => "header length",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for FrameError {}

impl std::error::Error for InvalidArgument {}
