//! Runs a session's sender and receiver as two tokio tasks.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::sender::{KinematicSource, SenderStats, run_sender};
use crate::session::{DuplexSession, InboundEvent, ReceiveExit};

/// Handle to a running session.
///
/// Dropping it does not stop the tasks; call [`SessionHandle::close`].
pub struct SessionHandle {
    session: Arc<DuplexSession>,
    sender: JoinHandle<SenderStats>,
    receiver: JoinHandle<Result<ReceiveExit, SessionError>>,
}

/// Open a session and start its sender and receiver.
///
/// The two tasks share nothing but the session; `on_event` runs on the
/// receiver task.
pub async fn spawn<S, F>(
    config: SessionConfig,
    source: S,
    on_event: F,
) -> Result<SessionHandle, SessionError>
where
    S: KinematicSource + 'static,
    F: FnMut(InboundEvent) + Send + 'static,
{
    let cadence = config.cadence;
    let session = Arc::new(DuplexSession::open(config).await?);

    let tx_session = session.clone();
    let sender = tokio::spawn(async move { run_sender(&tx_session, source, cadence).await });

    let rx_session = session.clone();
    let receiver = tokio::spawn(async move { rx_session.receive_loop(on_event).await });

    Ok(SessionHandle {
        session,
        sender,
        receiver,
    })
}

impl SessionHandle {
    pub fn session(&self) -> &Arc<DuplexSession> {
        &self.session
    }

    pub fn close(&self) {
        self.session.close();
    }

    /// Wait for both tasks. The sender only stops on close, so call
    /// [`SessionHandle::close`] first.
    pub async fn join(self) -> Result<(SenderStats, ReceiveExit), SessionError> {
        let stats = self.sender.await?;
        let exit = self.receiver.await??;
        Ok((stats, exit))
    }
}
