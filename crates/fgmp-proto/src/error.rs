use thiserror::Error;

use crate::msg_id::MsgId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtoError {
    #[error("scalar buffer has {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },
    #[error("buffer too short: need {needed} bytes, got {actual}")]
    ShortBuffer { needed: usize, actual: usize },
    #[error("string of {len} bytes does not fit a {width}-byte field")]
    EncodingOverflow { width: usize, len: usize },
    #[error("bad magic {0:#010x}")]
    BadMagic(u32),
    #[error("unsupported version {0:#010x}")]
    UnsupportedVersion(u32),
    #[error("unknown msg id: {0}")]
    UnknownMsgId(u32),
    #[error("unsupported msg id: {0:?}")]
    UnsupportedMsgId(MsgId),
    #[error("declared length {declared} does not match datagram length {actual}")]
    LengthMismatch { declared: u32, actual: usize },
}
