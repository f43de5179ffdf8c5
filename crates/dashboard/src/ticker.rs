//! Per-card countdown ticker.
//!
//! A UI polling loop, not a scheduler: once per period the task re-runs the
//! follow-up engine against the wall clock and publishes the snapshot.
//! Evaluations are stateless and independent, so tickers for different
//! campaigns never interact. Dropping the ticker aborts the task so a torn
//! down view stops evaluating.

use chrono::Utc;
use doorreach_followup::{FollowUpStatus, FollowUpTimeline};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

pub struct CountdownTicker {
    rx: watch::Receiver<FollowUpStatus>,
    handle: JoinHandle<()>,
}

impl CountdownTicker {
    /// Starts a ticker that re-evaluates `timeline` every `period`.
    /// The channel is primed with an immediate evaluation.
    pub fn spawn(timeline: FollowUpTimeline, period: Duration) -> Self {
        let (tx, rx) = watch::channel(timeline.status_at(Utc::now()));
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // First tick fires immediately; the channel already holds that
            // evaluation, so skip it.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(timeline.status_at(Utc::now())).is_err() {
                    debug!("Countdown ticker stopping, no subscribers left");
                    break;
                }
            }
        });
        Self { rx, handle }
    }

    /// A receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<FollowUpStatus> {
        self.rx.clone()
    }

    /// The most recent evaluation without waiting for the next tick.
    pub fn latest(&self) -> FollowUpStatus {
        self.rx.borrow().clone()
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
