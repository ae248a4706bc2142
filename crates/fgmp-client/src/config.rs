use std::net::SocketAddr;
use std::time::Duration;

use fgmp_proto::{constants::DEFAULT_SERVER_PORT, header::RangeNm};

/// Everything a session needs, supplied by the caller at construction.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Server host name or address.
    pub host: String,

    /// Server UDP port.
    pub port: u16,

    /// Local address to bind. `None` binds an ephemeral port on the
    /// wildcard address of the server's family.
    pub local_bind: Option<SocketAddr>,

    /// Period of the position sender.
    pub cadence: Duration,

    /// Truncated to 7 bytes on the wire.
    pub callsign: String,

    /// Model path, truncated to 95 bytes on the wire.
    pub model: String,

    pub range: RangeNm,

    /// Port advertised in every header. 0 means none.
    pub reply_port: u16,

    /// Interpolation hint stamped into every payload.
    pub lag: f64,

    /// Per-call send timeout. `None` never times out.
    pub send_timeout: Option<Duration>,

    /// Per-call receive timeout. `None` waits until data or close.
    pub recv_timeout: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_SERVER_PORT,
            local_bind: None,
            cadence: Duration::from_millis(100),
            callsign: "AFMC".to_string(),
            model: "Aircraft/f16/Models/F-16.xml".to_string(),
            range: RangeNm::default(),
            reply_port: 0,
            lag: 1.0,
            send_timeout: None,
            recv_timeout: None,
        }
    }
}

impl SessionConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }
}
