//! Cancellable delay between a finished round and the next one.

use std::time::Duration;

use noughts_core::AdvanceTicket;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, instrument};

/// Posts an [`AdvanceTicket`] to the event loop after a fixed delay.
///
/// At most one advance is pending. Scheduling replaces it, and
/// [`RoundTimer::cancel`] or dropping the timer aborts it.
#[derive(Debug)]
pub struct RoundTimer {
    delay: Duration,
    tx: mpsc::UnboundedSender<AdvanceTicket>,
    pending: Option<JoinHandle<()>>,
}

impl RoundTimer {
    /// Creates a timer and the receiver its tickets arrive on.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<AdvanceTicket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let timer = Self {
            delay,
            tx,
            pending: None,
        };
        (timer, rx)
    }

    /// Configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sends `ticket` once the delay has passed. Must run inside a tokio
    /// runtime.
    #[instrument(skip(self), fields(delay_ms = self.delay.as_millis() as u64))]
    pub fn schedule(&mut self, ticket: AdvanceTicket) {
        self.cancel();
        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            if tx.send(ticket).is_err() {
                debug!("Advance receiver closed");
            }
        }));
        debug!("Round advance scheduled");
    }

    /// Aborts the pending advance. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let was_running = !handle.is_finished();
                handle.abort();
                if was_running {
                    debug!("Round advance cancelled");
                }
                was_running
            }
            None => false,
        }
    }

    /// Checks if an advance is still waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RoundTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
