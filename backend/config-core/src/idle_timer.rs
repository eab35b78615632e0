//! Deferred self-termination after a period of inactivity.
//!
//! The timer holds a single deadline. [`IdleTimer::reset`] moves it to
//! `now + timeout`, which supersedes the previously scheduled expiry;
//! [`IdleTimer::expired`] resolves once a deadline passes without being moved.

use std::time::Duration;

use log::{debug, info};
use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};

pub struct IdleTimer {
    timeout: Duration,
    deadline: watch::Sender<Instant>,
}

impl IdleTimer {
    /// Start the timer; the first deadline is `timeout` from now.
    pub fn new(timeout: Duration) -> Self {
        let (deadline, _) = watch::channel(Instant::now() + timeout);
        Self { timeout, deadline }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Push the deadline to `timeout` from now.
    pub fn reset(&self) {
        let deadline = Instant::now() + self.timeout;
        self.deadline.send_replace(deadline);
        debug!("Idle timer reset");
    }

    #[cfg(test)]
    pub(crate) fn deadline(&self) -> Instant {
        *self.deadline.borrow()
    }

    /// Resolve once the deadline passes with no reset in between.
    pub async fn expired(&self) {
        let mut deadline_rx = self.deadline.subscribe();

        loop {
            let deadline = *deadline_rx.borrow_and_update();

            tokio::select! {
                _ = sleep_until(deadline) => {
                    info!("No activity for {:?}, idle timer expired", self.timeout);
                    return;
                }
                changed = deadline_rx.changed() => {
                    // The sender lives in `self`, so this only errors if the timer is gone.
                    if changed.is_err() {
                        return;
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for IdleTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdleTimer")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
