//! Wire protocol for the multiplayer position client.
//!
//! Every datagram is `[Header][Payload]`, all scalars big-endian:
//!
//! - [`codec`]: canonical scalar encoding and a bounds-checked reader
//! - [`fixed_str`]: nul-terminated fixed-width string fields
//! - [`header`] / [`position`]: the two fixed-layout records
//! - [`frame`]: header + payload concatenation and splitting
//! - [`message`]: validated position updates (magic, version, msg id)

pub mod codec;
pub mod constants;
pub mod error;
pub mod fixed_str;
pub mod frame;
pub mod header;
pub mod message;
pub mod msg_id;
pub mod position;

pub use error::ProtoError;
pub use fixed_str::FixedStr;
pub use frame::{frame, unframe};
pub use header::{Header, RangeNm};
pub use message::PositionUpdate;
pub use msg_id::MsgId;
pub use position::{Kinematics, PositionMsg};
