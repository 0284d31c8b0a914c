//! Message content rendering: mention and channel-reference expansion.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::cache::Cache;
use crate::gateway::{ChannelId, GuildId, Message, UserId};

static REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(@!?|#)(\d+)>").expect("reference pattern is valid")
});

/// Replace `<@id>`, `<@!id>` and `<#id>` with readable names, as seen from
/// `channel`.
pub fn render_content(
    content: &str,
    channel: ChannelId,
    guild: Option<GuildId>,
    cache: &Cache,
) -> String {
    REFERENCE
        .replace_all(content, |caps: &Captures| {
            let Ok(id) = caps[2].parse::<u64>() else {
                return caps[0].to_string();
            };
            if &caps[1] == "#" {
                match cache.channel(ChannelId(id)) {
                    Some(channel) => format!("#{}", channel.title()),
                    None => "#deleted-channel".to_string(),
                }
            } else {
                match mention_name(UserId(id), channel, guild, cache) {
                    Some(name) => format!("@{}", name),
                    None => "@unknown-user".to_string(),
                }
            }
        })
        .into_owned()
}

/// Channel-aware lookup first (members, DM recipients, us), then the
/// message's own guild for channels the cache has not seen yet.
fn mention_name(
    user: UserId,
    channel: ChannelId,
    guild: Option<GuildId>,
    cache: &Cache,
) -> Option<String> {
    cache.user_name(channel, user).or_else(|| {
        guild
            .and_then(|g| cache.member(g, user))
            .map(|m| m.display_name().to_string())
    })
}

/// Whether the message pings `user`.
pub fn mentions_user(message: &Message, user: UserId) -> bool {
    if message.mentions.iter().any(|u| u.id == user) {
        return true;
    }
    REFERENCE.captures_iter(&message.content).any(|caps| {
        &caps[1] != "#" && caps[2].parse::<u64>().ok() == Some(user.0)
    })
}
