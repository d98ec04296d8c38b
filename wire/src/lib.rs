//! Header/payload framing for tapframe protocol messages.
//!
//! Every message is one byte buffer laid out as `header || payload`. The
//! header length belongs to the message kind and is agreed out of band; it is
//! never carried in the bytes. Header byte 0 is the status/opcode shared by
//! all kinds.
//!
//! # Design Principles
//!
//! - **One validating entry point** - Installing a buffer is the only place a
//!   malformed frame is rejected; every other accessor is total.
//! - **Owned buffers** - A message owns its bytes. Views are read-only and the
//!   payload accessor hands out a copy.
//! - **No domain knowledge** - Opcodes, sessions and fragmentation live in
//!   higher layers.

mod error;
mod frame;
mod kind;
mod limits;
mod message;

pub use error::{FrameError, FrameResult, InvalidArgument, LimitKind};
pub use frame::{build_frame, decode_message};
pub use kind::{Message, MessageKind};
pub use limits::Limits;
pub use message::{FramedMessage, STATUS_NONE};
