//! Duplex UDP session.
//!
//! One socket serves two independent activities:
//! - sends toward a destination fixed when the session opens
//! - a receive loop that decodes every inbound datagram and hands it to a
//!   caller-supplied handler
//!
//! tokio's `UdpSocket` allows `send_to` and `recv_from` concurrently through
//! `&self`, so the socket is not behind a lock. The receive path only writes
//! per-call locals; the sender's address is reported with each event and
//! never flows back into the send path.

use std::future::Future;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use fgmp_proto::{
    FixedStr, PositionUpdate, ProtoError,
    constants::MAX_DATAGRAM,
    header::Callsign,
    position::{Kinematics, ModelPath},
};
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::config::SessionConfig;
use crate::error::{SessionError, TransportOp};

/// Lifecycle of an opened session.
///
/// A session only exists once socket setup and address resolution have
/// both succeeded, so there is no observable "unopened" value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Closed,
}

/// Events delivered to the receive handler, one per inbound datagram.
#[derive(Debug)]
pub enum InboundEvent {
    /// A valid position update.
    Position {
        from: SocketAddr,
        update: PositionUpdate,
    },
    /// A datagram that failed framing or validation. It has been discarded.
    Malformed { from: SocketAddr, error: ProtoError },
    /// A receive failure that did not invalidate the socket.
    Error(SessionError),
}

/// Why a receive loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveExit {
    /// The session was closed locally.
    Closed,
    /// The server sent a zero-length datagram, its shutdown signal.
    PeerShutdown,
}

#[derive(Debug)]
pub struct DuplexSession {
    socket: UdpSocket,
    /// Fixed at open; the receive path never touches it.
    remote: SocketAddr,
    callsign: Callsign,
    model: ModelPath,
    config: SessionConfig,
    shutdown: CancellationToken,
}

impl DuplexSession {
    /// Resolve the server address and bind a local socket.
    ///
    /// Any failure is returned as a transport error and no session is
    /// created.
    pub async fn open(config: SessionConfig) -> Result<Self, SessionError> {
        let remote = resolve(&config.host, config.port).await?;

        let local = config.local_bind.unwrap_or_else(|| wildcard_for(remote));
        let socket = UdpSocket::bind(local).await.map_err(|e| {
            error!(%local, error = %e, "Failed to bind UDP socket");
            SessionError::transport(TransportOp::Bind, e)
        })?;

        let callsign: Callsign = bounded_field("callsign", &config.callsign);
        let model: ModelPath = bounded_field("model", &config.model);

        info!(
            %remote,
            local = ?socket.local_addr().ok(),
            callsign = %callsign,
            "Session open"
        );

        Ok(Self {
            socket,
            remote,
            callsign,
            model,
            config,
            shutdown: CancellationToken::new(),
        })
    }

    pub fn remote_addr(&self) -> SocketAddr {
        self.remote
    }

    pub fn local_addr(&self) -> Result<SocketAddr, SessionError> {
        self.socket
            .local_addr()
            .map_err(|e| SessionError::transport(TransportOp::Bind, e))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        if self.shutdown.is_cancelled() {
            SessionState::Closed
        } else {
            SessionState::Open
        }
    }

    /// Close the session. Wakes a pending receive and makes every later
    /// send fail with [`SessionError::Closed`]. Idempotent.
    pub fn close(&self) {
        if !self.shutdown.is_cancelled() {
            info!(remote = %self.remote, "Session closed");
            self.shutdown.cancel();
        }
    }

    /// Resolves once the session is closed.
    pub async fn closed(&self) {
        self.shutdown.cancelled().await
    }

    /// Transmit one datagram to the server.
    ///
    /// At most once: a failed send is reported, never retried.
    pub async fn send(&self, datagram: &[u8]) -> Result<(), SessionError> {
        if self.shutdown.is_cancelled() {
            return Err(SessionError::Closed);
        }

        let sent = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => return Err(SessionError::Closed),
            res = with_timeout(
                self.config.send_timeout,
                TransportOp::Send,
                self.socket.send_to(datagram, self.remote),
            ) => res,
        };

        match sent {
            Ok(n) => {
                trace!("Sent {} bytes to {}", n, self.remote);
                Ok(())
            }
            Err(e) => {
                if e.is_fatal() {
                    error!(error = %e, "Socket unusable; closing session");
                    self.close();
                }
                Err(e)
            }
        }
    }

    /// Build, frame and send one position update.
    pub async fn send_position(&self, kinematics: &Kinematics) -> Result<(), SessionError> {
        let datagram = PositionUpdate::encode(
            self.callsign,
            self.model,
            self.config.range,
            self.config.reply_port,
            kinematics,
            self.config.lag,
        );
        self.send(&datagram).await
    }

    /// Receive datagrams until the session closes, the server signals
    /// shutdown with an empty datagram, or the socket becomes unusable.
    ///
    /// Malformed datagrams and per-datagram receive errors are handed to
    /// `on_event` and the loop carries on.
    pub async fn receive_loop<F>(&self, mut on_event: F) -> Result<ReceiveExit, SessionError>
    where
        F: FnMut(InboundEvent),
    {
        if self.shutdown.is_cancelled() {
            return Err(SessionError::Closed);
        }

        let mut buf = vec![0u8; MAX_DATAGRAM];

        loop {
            let received = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => {
                    debug!("Receive loop stopped by close");
                    return Ok(ReceiveExit::Closed);
                }
                res = with_timeout(
                    self.config.recv_timeout,
                    TransportOp::Receive,
                    self.socket.recv_from(&mut buf),
                ) => res,
            };

            match received {
                // Only the configured server may end the loop. An empty
                // datagram from anyone else is decoded and reported as short.
                Ok((0, from)) if from == self.remote => {
                    info!(%from, "Empty datagram received; peer shut down");
                    return Ok(ReceiveExit::PeerShutdown);
                }
                Ok((n, from)) => {
                    trace!("Received {} bytes from {}", n, from);
                    match PositionUpdate::decode(&buf[..n]) {
                        Ok(update) => on_event(InboundEvent::Position { from, update }),
                        Err(error) => {
                            debug!(%from, %error, "Discarding malformed datagram");
                            on_event(InboundEvent::Malformed { from, error });
                        }
                    }
                }
                Err(e) if e.is_fatal() => {
                    error!(error = %e, "Socket unusable; closing session");
                    self.close();
                    return Err(e);
                }
                Err(e) => {
                    warn!(error = %e, "Receive failed");
                    on_event(InboundEvent::Error(e));
                }
            }
        }
    }
}

async fn resolve(host: &str, port: u16) -> Result<SocketAddr, SessionError> {
    let mut addrs = tokio::net::lookup_host((host, port)).await.map_err(|e| {
        error!(host, port, error = %e, "Failed to resolve server address");
        SessionError::transport(TransportOp::Resolve, e)
    })?;

    addrs.next().ok_or_else(|| {
        SessionError::transport(
            TransportOp::Resolve,
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no address found for {host}:{port}"),
            ),
        )
    })
}

fn wildcard_for(remote: SocketAddr) -> SocketAddr {
    match remote {
        SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
        SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
    }
}

fn bounded_field<const N: usize>(field: &'static str, value: &str) -> FixedStr<N> {
    FixedStr::try_new(value).unwrap_or_else(|e| {
        warn!(field, value, error = %e, "Configured value truncated");
        FixedStr::new(value)
    })
}

async fn with_timeout<T>(
    limit: Option<Duration>,
    op: TransportOp,
    fut: impl Future<Output = io::Result<T>>,
) -> Result<T, SessionError> {
    let res = match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| SessionError::Timeout(op))?,
        None => fut.await,
    };
    res.map_err(|e| SessionError::transport(op, e))
}
