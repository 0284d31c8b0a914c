use std::time::Duration;

use tokio::time::Instant;

use super::aggregator::TypingSnapshot;
use crate::gateway::{ChannelId, UserId};

#[derive(Debug, Clone, PartialEq)]
pub struct TypingUser {
    pub user_id: UserId,
    pub name: String,
    pub last_seen: Instant,
}

/// Who is typing in one channel.
///
/// Entries are unique per user and kept oldest-first. Anything older than
/// `timeout` is purged before the label is rendered.
#[derive(Debug, Clone)]
pub struct ChannelTypingState {
    channel_id: ChannelId,
    timeout: Duration,
    users: Vec<TypingUser>,
}

impl ChannelTypingState {
    pub fn new(channel_id: ChannelId, timeout: Duration) -> Self {
        Self {
            channel_id,
            timeout,
            users: Vec::new(),
        }
    }

    pub fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn users(&self) -> &[TypingUser] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Insert a typist or refresh an existing one.
    pub fn upsert(&mut self, user_id: UserId, name: String, last_seen: Instant) {
        match self.users.iter_mut().find(|u| u.user_id == user_id) {
            Some(user) => {
                user.name = name;
                user.last_seen = user.last_seen.max(last_seen);
            }
            None => self.users.push(TypingUser {
                user_id,
                name,
                last_seen,
            }),
        }
        self.users.sort_by_key(|u| u.last_seen);
    }

    /// Returns true if the user was typing.
    pub fn remove(&mut self, user_id: UserId) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.user_id != user_id);
        self.users.len() != before
    }

    /// Drop expired entries, returning how many were removed.
    pub fn purge(&mut self, now: Instant) -> usize {
        let timeout = self.timeout;
        let before = self.users.len();
        self.users
            .retain(|u| now.saturating_duration_since(u.last_seen) < timeout);
        before - self.users.len()
    }

    /// When the oldest entry runs out. An expiry past the end of the clock
    /// is never scheduled.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.users
            .first()
            .and_then(|u| u.last_seen.checked_add(self.timeout))
    }

    pub fn snapshot(&self) -> TypingSnapshot {
        TypingSnapshot {
            channel_id: self.channel_id,
            timeout: self.timeout,
            seen: self.users.iter().map(|u| (u.user_id, u.last_seen)).collect(),
        }
    }

    /// Purge, then build the label shown above the composer.
    pub fn render(&mut self, now: Instant) -> String {
        self.purge(now);
        let names: Vec<&str> = self.users.iter().map(|u| u.name.as_str()).collect();
        typing_summary(&names)
    }
}

/// `""`, `"a is typing..."`, `"a and b are typing..."`,
/// `"a, b and c are typing..."` or `"Several people are typing..."`.
pub fn typing_summary(names: &[&str]) -> String {
    match names.len() {
        0 => String::new(),
        1 => format!("{} is typing...", names[0]),
        2 | 3 => format!("{} are typing...", join_names(names)),
        _ => "Several people are typing...".to_string(),
    }
}

/// Human-friendly list join: `a`, `a and b`, `a, b and c`.
pub fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(10);

    fn state() -> ChannelTypingState {
        ChannelTypingState::new(ChannelId(100), TIMEOUT)
    }

    #[test]
    fn test_join_names() {
        assert_eq!(join_names(&[]), "");
        assert_eq!(join_names(&["a"]), "a");
        assert_eq!(join_names(&["a", "b"]), "a and b");
        assert_eq!(join_names(&["a", "b", "c"]), "a, b and c");
    }

    #[test]
    fn test_summary_by_count() {
        assert_eq!(typing_summary(&[]), "");
        assert_eq!(typing_summary(&["Crab"]), "Crab is typing...");
        assert_eq!(typing_summary(&["a", "b"]), "a and b are typing...");
        assert_eq!(typing_summary(&["a", "b", "c"]), "a, b and c are typing...");
        assert_eq!(
            typing_summary(&["a", "b", "c", "d"]),
            "Several people are typing..."
        );
        assert_eq!(
            typing_summary(&["a", "b", "c", "d", "e", "f"]),
            "Several people are typing..."
        );
    }

    #[test]
    fn test_duplicate_upsert_refreshes_instead_of_growing() {
        let start = Instant::now();
        let mut typing = state();
        typing.upsert(UserId(2), "Crab".into(), start);
        typing.upsert(UserId(3), "corro".into(), start + Duration::from_secs(1));
        typing.upsert(UserId(2), "Crab".into(), start + Duration::from_secs(2));

        assert_eq!(typing.len(), 2);
        // Refreshed entry moves behind the older one.
        assert_eq!(typing.users()[0].user_id, UserId(3));
        assert_eq!(typing.users()[1].user_id, UserId(2));
        assert_eq!(typing.users()[1].last_seen, start + Duration::from_secs(2));
    }

    #[test]
    fn test_older_refresh_does_not_rewind() {
        let start = Instant::now();
        let mut typing = state();
        typing.upsert(UserId(2), "Crab".into(), start + Duration::from_secs(5));
        typing.upsert(UserId(2), "Crab".into(), start);
        assert_eq!(typing.users()[0].last_seen, start + Duration::from_secs(5));
    }

    #[test]
    fn test_expired_entries_vanish_on_render() {
        let start = Instant::now();
        let mut typing = state();
        typing.upsert(UserId(2), "Crab".into(), start);
        typing.upsert(UserId(3), "corro".into(), start + Duration::from_secs(4));

        assert_eq!(typing.render(start + Duration::from_secs(9)), "Crab and corro are typing...");
        assert_eq!(typing.render(start + TIMEOUT), "corro is typing...");
        assert_eq!(typing.render(start + Duration::from_secs(14)), "");
        assert!(typing.is_empty());
    }

    #[test]
    fn test_remove() {
        let start = Instant::now();
        let mut typing = state();
        typing.upsert(UserId(2), "Crab".into(), start);
        assert!(typing.remove(UserId(2)));
        assert!(!typing.remove(UserId(2)));
        assert_eq!(typing.render(start), "");
    }

    #[test]
    fn test_next_expiry_tracks_oldest() {
        let start = Instant::now();
        let mut typing = state();
        assert_eq!(typing.next_expiry(), None);

        typing.upsert(UserId(2), "Crab".into(), start + Duration::from_secs(3));
        typing.upsert(UserId(3), "corro".into(), start + Duration::from_secs(1));
        assert_eq!(typing.next_expiry(), Some(start + Duration::from_secs(11)));

        let snapshot = typing.snapshot();
        assert_eq!(snapshot.channel_id, ChannelId(100));
        assert_eq!(snapshot.seen.len(), 2);
        assert_eq!(snapshot.next_expiry(), typing.next_expiry());
    }

    #[test]
    fn test_unreachable_expiry_is_not_scheduled() {
        let start = Instant::now();
        let mut typing = ChannelTypingState::new(ChannelId(100), Duration::MAX);
        typing.upsert(UserId(2), "Crab".into(), start);

        assert_eq!(typing.next_expiry(), None);
        assert_eq!(typing.snapshot().next_expiry(), None);
        assert_eq!(typing.purge(start + Duration::from_secs(3600)), 0);
        assert_eq!(typing.render(start), "Crab is typing...");
    }
}
