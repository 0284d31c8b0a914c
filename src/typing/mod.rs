//! Typing indicators.
//!
//! - `state`: per-channel typist list and the label it renders to
//! - `aggregator`: the shared task that expires entries on a single timer
//! - `notifier`: rate limit for our own typing notifications

mod aggregator;
mod notifier;
mod state;

pub use aggregator::{RenderDispatch, TypingAggregator, TypingSnapshot};
pub use notifier::TypingNotifier;
pub use state::{join_names, typing_summary, ChannelTypingState, TypingUser};

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

use crate::cache::Cache;
use crate::gateway::{TypingStart, UserId};

/// Default lifetime of a typing indicator without a refresh.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Name for a typist: the member info carried by the event, then the guild
/// member cache, then the DM recipients, then the raw id.
pub fn resolve_name(event: &TypingStart, cache: &Cache) -> String {
    if let Some(member) = &event.member {
        return member.display_name().to_string();
    }
    if let Some(member) = event.guild_id.and_then(|g| cache.member(g, event.user_id)) {
        return member.display_name().to_string();
    }
    if let Some(user) = cache.dm_recipient(event.channel_id, event.user_id) {
        return user.display_name().to_string();
    }
    event.user_id.to_string()
}

/// How long ago the gateway says the event happened. Clock skew into the
/// future counts as zero; a timestamp too old to subtract saturates.
pub fn event_age(event: &TypingStart, wall_now: DateTime<Utc>) -> Duration {
    let age = wall_now.timestamp().saturating_sub(event.timestamp);
    Duration::from_secs(age.max(0) as u64)
}

/// Apply a typing-start event to a channel's state.
///
/// Returns false when the event was ignored: it came from the local
/// account, or it is already older than the timeout.
pub fn apply_typing_start(
    state: &mut ChannelTypingState,
    event: &TypingStart,
    local_user: Option<UserId>,
    cache: &Cache,
    now: Instant,
    wall_now: DateTime<Utc>,
) -> bool {
    if local_user == Some(event.user_id) {
        return false;
    }

    let age = event_age(event, wall_now);
    if age >= state.timeout() {
        return false;
    }

    let last_seen = now.checked_sub(age).unwrap_or(now);
    state.upsert(event.user_id, resolve_name(event, cache), last_seen);
    true
}
