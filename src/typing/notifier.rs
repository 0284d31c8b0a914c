use std::time::Duration;

use tokio::time::Instant;

use crate::gateway::ChannelId;

/// Rate limit for our own "I am typing" notifications: at most one per
/// channel per timeout window.
#[derive(Debug, Clone)]
pub struct TypingNotifier {
    window: Duration,
    last_sent: Option<(ChannelId, Instant)>,
}

impl TypingNotifier {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_sent: None,
        }
    }

    pub fn set_window(&mut self, window: Duration) {
        self.window = window;
    }

    /// Returns true (and records the send) when a notification is due.
    pub fn should_send(&mut self, channel: ChannelId, now: Instant) -> bool {
        if let Some((last_channel, at)) = self.last_sent {
            if last_channel == channel && now.saturating_duration_since(at) < self.window {
                return false;
            }
        }
        self.last_sent = Some((channel, now));
        true
    }

    /// Forget the last send, e.g. after the message went out.
    pub fn reset(&mut self) {
        self.last_sent = None;
    }
}
