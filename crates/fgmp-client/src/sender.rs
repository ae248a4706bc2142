//! Fixed-cadence position sender.

use std::time::Duration;

use fgmp_proto::Kinematics;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::session::DuplexSession;

/// Supplies the kinematic state to transmit on each tick.
///
/// Flight dynamics live outside this crate; implementations bridge them in.
pub trait KinematicSource: Send {
    fn sample(&mut self) -> Kinematics;
}

/// Source that repeats one fixed state.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSource(pub Kinematics);

impl KinematicSource for StaticSource {
    fn sample(&mut self) -> Kinematics {
        self.0
    }
}

impl<S: KinematicSource + ?Sized> KinematicSource for Box<S> {
    fn sample(&mut self) -> Kinematics {
        (**self).sample()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SenderStats {
    pub sent: u64,
    pub failed: u64,
}

/// Send one position update per `cadence` until the session closes.
///
/// Failed sends are logged and counted; they never stop the loop. Ticks
/// missed while a send is stalled are skipped rather than burst.
pub async fn run_sender<S>(session: &DuplexSession, mut source: S, cadence: Duration) -> SenderStats
where
    S: KinematicSource,
{
    let mut stats = SenderStats::default();
    // interval() panics on a zero period.
    let cadence = cadence.max(Duration::from_millis(1));
    let mut ticker = tokio::time::interval(cadence);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(?cadence, remote = %session.remote_addr(), "Position sender started");

    loop {
        tokio::select! {
            biased;
            _ = session.closed() => break,
            _ = ticker.tick() => {}
        }

        let kinematics = source.sample();
        match session.send_position(&kinematics).await {
            Ok(()) => stats.sent += 1,
            Err(SessionError::Closed) => break,
            Err(e) => {
                stats.failed += 1;
                warn!(error = %e, os_error = ?e.os_error(), "Position send failed");
            }
        }
    }

    debug!(sent = stats.sent, failed = stats.failed, "Position sender stopped");
    stats
}
