//! Core application state, separated from UI logic.
//!
//! `ClientState` holds the session: the entity cache, per-channel buffers,
//! the active channel and the quick-switcher entries derived from the cache.
//! UI components receive it as a parameter rather than owning it.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::buffer::ChannelBuffer;
use crate::cache::Cache;
use crate::gateway::{ChannelId, GuildId};
use crate::typing::TypingSnapshot;
use crate::ui::quick_switcher::{build_entries, SwitcherEntry};

pub struct ClientState {
    /// Whether a gateway session is up.
    pub is_connected: bool,

    /// Guilds, channels, members and presences.
    pub cache: Cache,

    /// Per-channel buffers, created on first use.
    pub buffers: HashMap<ChannelId, ChannelBuffer>,

    /// Currently visible channel.
    pub active_channel: Option<ChannelId>,

    /// Status toast messages with creation time (auto-expire).
    pub status_messages: Vec<(String, Instant)>,

    /// Lifetime of a typing indicator.
    pub typing_timeout: Duration,

    /// Quick-switcher entries, rebuilt whenever the channel set changes.
    pub switcher_entries: Vec<SwitcherEntry>,
}

impl ClientState {
    pub fn new(typing_timeout: Duration) -> Self {
        Self {
            is_connected: false,
            cache: Cache::new(),
            buffers: HashMap::new(),
            active_channel: None,
            status_messages: Vec::new(),
            typing_timeout,
            switcher_entries: Vec::new(),
        }
    }

    /// Get a mutable reference to a buffer, creating it if needed.
    pub fn ensure_buffer(&mut self, channel: ChannelId) -> &mut ChannelBuffer {
        let timeout = self.typing_timeout;
        self.buffers
            .entry(channel)
            .or_insert_with(|| ChannelBuffer::new(channel, timeout))
    }

    /// Apply a new typing timeout to every buffer. Returns the active
    /// channel's snapshot when it has typists, so expiry can be rescheduled.
    pub fn set_typing_timeout(&mut self, timeout: Duration) -> Option<TypingSnapshot> {
        self.typing_timeout = timeout;
        for buffer in self.buffers.values_mut() {
            buffer.typing.set_timeout(timeout);
        }
        self.active_channel
            .and_then(|id| self.buffers.get(&id))
            .filter(|b| !b.typing.is_empty())
            .map(|b| b.typing.snapshot())
    }

    /// Guild of the active channel, if it is a guild channel.
    pub fn active_guild(&self) -> Option<GuildId> {
        self.active_channel
            .and_then(|id| self.cache.channel(id))
            .and_then(|c| c.guild_id)
    }

    /// Switch to a channel the cache knows about.
    pub fn switch_to_channel(&mut self, channel: ChannelId) -> bool {
        if self.cache.channel(channel).is_none() {
            return false;
        }
        self.active_channel = Some(channel);
        self.ensure_buffer(channel).clear_unread();
        true
    }

    /// Switch to the next channel in sidebar order.
    pub fn next_channel(&mut self) {
        self.step_channel(1);
    }

    /// Switch to the previous channel in sidebar order.
    pub fn prev_channel(&mut self) {
        self.step_channel(-1);
    }

    fn step_channel(&mut self, step: isize) {
        let order = self.cache.channel_order();
        if order.is_empty() {
            return;
        }
        let len = order.len() as isize;
        let next = match self
            .active_channel
            .and_then(|id| order.iter().position(|c| *c == id))
        {
            Some(idx) => (idx as isize + step).rem_euclid(len),
            None => 0,
        };
        self.switch_to_channel(order[next as usize]);
    }

    /// Rebuild the quick-switcher list after the cache changed.
    pub fn refresh_switcher(&mut self) {
        self.switcher_entries = build_entries(&self.cache);
    }

    pub fn push_status(&mut self, message: impl Into<String>) {
        self.status_messages.push((message.into(), Instant::now()));
    }

    /// Purge status messages older than the given duration.
    pub fn purge_old_status_messages(&mut self, max_age_secs: u64) {
        self.status_messages
            .retain(|(_, created)| created.elapsed().as_secs() < max_age_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::fixtures;
    use crate::gateway::UserId;

    fn loaded_state() -> ClientState {
        let mut state = ClientState::new(Duration::from_secs(10));
        state.cache = fixtures::loaded();
        state.refresh_switcher();
        state
    }

    #[test]
    fn test_client_state_new() {
        let state = ClientState::new(Duration::from_secs(10));
        assert!(!state.is_connected);
        assert!(state.buffers.is_empty());
        assert_eq!(state.active_channel, None);
    }

    #[test]
    fn test_ensure_buffer_uses_timeout() {
        let mut state = ClientState::new(Duration::from_secs(7));
        let buffer = state.ensure_buffer(ChannelId(5));
        assert_eq!(buffer.typing.timeout(), Duration::from_secs(7));
        assert_eq!(buffer.typing.channel_id(), ChannelId(5));

        assert!(state.set_typing_timeout(Duration::from_secs(3)).is_none());
        assert_eq!(state.buffers[&ChannelId(5)].typing.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_timeout_change_resubmits_active_typists() {
        let mut state = ClientState::new(Duration::from_secs(10));
        let seen = tokio::time::Instant::now();
        state
            .ensure_buffer(ChannelId(100))
            .typing
            .upsert(UserId(2), "Crab".into(), seen);
        state.ensure_buffer(ChannelId(101));

        state.active_channel = Some(ChannelId(101));
        assert!(state.set_typing_timeout(Duration::from_secs(30)).is_none());

        state.active_channel = Some(ChannelId(100));
        let snapshot = state
            .set_typing_timeout(Duration::from_secs(5))
            .expect("active channel has a typist");
        assert_eq!(snapshot.channel_id, ChannelId(100));
        assert_eq!(snapshot.timeout, Duration::from_secs(5));
        assert_eq!(snapshot.next_expiry(), Some(seen + Duration::from_secs(5)));
    }

    #[test]
    fn test_next_prev_channel() {
        let mut state = loaded_state();

        state.next_channel();
        assert_eq!(state.active_channel, Some(ChannelId(100)));
        state.next_channel();
        assert_eq!(state.active_channel, Some(ChannelId(101)));
        state.next_channel();
        assert_eq!(state.active_channel, Some(ChannelId(300)));
        state.next_channel();
        assert_eq!(state.active_channel, Some(ChannelId(100))); // wrap around

        state.prev_channel();
        assert_eq!(state.active_channel, Some(ChannelId(300)));
    }

    #[test]
    fn test_switch_to_channel() {
        let mut state = loaded_state();
        assert!(state.switch_to_channel(ChannelId(101)));
        assert_eq!(state.active_channel, Some(ChannelId(101)));
        assert_eq!(state.active_guild(), Some(GuildId(10)));

        // Unknown channels are ignored
        assert!(!state.switch_to_channel(ChannelId(999)));
        assert_eq!(state.active_channel, Some(ChannelId(101)));

        assert!(state.switch_to_channel(ChannelId(300)));
        assert_eq!(state.active_guild(), None);
    }

    #[test]
    fn test_status_messages_expire() {
        let mut state = ClientState::new(Duration::from_secs(10));
        state.push_status("Connected");
        state.purge_old_status_messages(4);
        assert_eq!(state.status_messages.len(), 1);
        state.purge_old_status_messages(0);
        assert!(state.status_messages.is_empty());
    }
}
