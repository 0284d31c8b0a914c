//! Shared background task that expires typing indicators.
//!
//! There is one task per process. It holds a snapshot of the channel whose
//! typing state changed most recently and a single timer armed for the
//! moment that snapshot's oldest entry expires. When the timer fires it asks
//! the UI thread to re-render the channel; the UI purges its own state as
//! part of rendering. Submissions go through a `watch` channel, so a newer
//! snapshot replaces one the task has not looked at yet.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace};

use crate::gateway::{ChannelId, UserId};

/// Marshals "re-render this channel's typing label" onto the UI thread.
pub trait RenderDispatch: Send + Sync + 'static {
    fn request_render(&self, channel: ChannelId);
}

impl<F> RenderDispatch for F
where
    F: Fn(ChannelId) + Send + Sync + 'static,
{
    fn request_render(&self, channel: ChannelId) {
        self(channel)
    }
}

/// Timestamps of the typists in one channel, as submitted by the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct TypingSnapshot {
    pub channel_id: ChannelId,
    pub timeout: Duration,
    pub seen: Vec<(UserId, Instant)>,
}

impl TypingSnapshot {
    pub fn purge(&mut self, now: Instant) -> usize {
        let timeout = self.timeout;
        let before = self.seen.len();
        self.seen
            .retain(|(_, seen)| now.saturating_duration_since(*seen) < timeout);
        before - self.seen.len()
    }

    pub fn next_expiry(&self) -> Option<Instant> {
        self.seen
            .iter()
            .filter_map(|(_, seen)| seen.checked_add(self.timeout))
            .min()
    }
}

/// Handle for submitting snapshots to the aggregator task.
#[derive(Clone)]
pub struct TypingAggregator {
    tx: Arc<watch::Sender<Option<TypingSnapshot>>>,
}

impl TypingAggregator {
    /// Spawn the task on `handle`. It runs until every handle is dropped.
    pub fn spawn<D: RenderDispatch>(handle: &Handle, dispatch: D) -> Self {
        let (tx, rx) = watch::channel(None);
        handle.spawn(run(rx, dispatch));
        Self { tx: Arc::new(tx) }
    }

    /// Replace whatever snapshot is pending.
    pub fn submit(&self, snapshot: TypingSnapshot) {
        trace!(channel_id = %snapshot.channel_id, typists = snapshot.seen.len(), "typing snapshot submitted");
        self.tx.send_replace(Some(snapshot));
    }
}

async fn run<D: RenderDispatch>(mut rx: watch::Receiver<Option<TypingSnapshot>>, dispatch: D) {
    let mut current: Option<TypingSnapshot> = None;
    let timer = sleep_until(Instant::now());
    tokio::pin!(timer);

    loop {
        let armed = current.is_some();
        let fired = tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    debug!("typing aggregator stopped");
                    return;
                }
                current = rx.borrow_and_update().clone();
                false
            }
            _ = &mut timer, if armed => true,
        };

        let Some(snapshot) = current.as_mut() else {
            continue;
        };

        let purged = snapshot.purge(Instant::now());
        if fired || purged > 0 {
            dispatch.request_render(snapshot.channel_id);
        }

        match snapshot.next_expiry() {
            Some(at) => timer.as_mut().reset(at),
            None => current = None,
        }
    }
}
