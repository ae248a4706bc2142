//! Session error types.

use std::fmt;
use std::io;

use thiserror::Error;

/// Transport operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportOp {
    Resolve,
    Bind,
    Send,
    Receive,
}

impl fmt::Display for TransportOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportOp::Resolve => "address resolution",
            TransportOp::Bind => "socket bind",
            TransportOp::Send => "send",
            TransportOp::Receive => "receive",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("{op} failed: {source}")]
    Transport {
        op: TransportOp,
        #[source]
        source: io::Error,
    },

    #[error("session closed")]
    Closed,

    #[error("{0} timed out")]
    Timeout(TransportOp),

    #[error("session task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl SessionError {
    pub(crate) fn transport(op: TransportOp, source: io::Error) -> Self {
        Self::Transport { op, source }
    }

    /// OS error code behind a transport failure, if the platform gave one.
    pub fn os_error(&self) -> Option<i32> {
        match self {
            SessionError::Transport { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }

    /// Whether the socket itself is unusable, as opposed to one datagram
    /// having failed.
    pub fn is_fatal(&self) -> bool {
        match self {
            SessionError::Closed => true,
            SessionError::Transport { source, .. } => is_dead_socket(source),
            _ => false,
        }
    }
}

#[cfg(unix)]
fn is_dead_socket(e: &io::Error) -> bool {
    matches!(e.raw_os_error(), Some(libc::EBADF | libc::ENOTSOCK))
}

#[cfg(not(unix))]
fn is_dead_socket(_e: &io::Error) -> bool {
    false
}
