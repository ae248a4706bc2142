//! Multiplayer position client.
//!
//! One UDP endpoint, two independent activities: a periodic sender that
//! streams position frames to the server, and a receiver that decodes
//! whatever the server sends back.
//!
//! # Architecture
//!
//! - [`session`]: the duplex UDP session and its receive loop
//! - [`sender`]: fixed-cadence position sender
//! - [`handle`]: runs both activities as tokio tasks
//! - [`config`]: session configuration
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod handle;
pub mod sender;
pub mod session;

// Re-export commonly used types
pub use config::SessionConfig;
pub use error::{SessionError, TransportOp};
pub use handle::{SessionHandle, spawn};
pub use sender::{KinematicSource, SenderStats, StaticSource, run_sender};
pub use session::{DuplexSession, InboundEvent, ReceiveExit, SessionState};
