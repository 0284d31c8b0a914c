//! In-memory copy of the account's guilds, channels, members and presences.
//!
//! Filled from READY and kept current by gateway events. The UI thread owns
//! it; nothing here is shared across threads.

use std::collections::HashMap;

use crate::gateway::{Channel, ChannelId, GuildId, Member, Presence, Ready, Status, User, UserId};

#[derive(Debug, Clone, PartialEq)]
pub struct GuildInfo {
    pub id: GuildId,
    pub name: String,
}

#[derive(Debug, Default)]
pub struct Cache {
    me: Option<User>,
    guilds: Vec<GuildInfo>,
    channels: HashMap<ChannelId, Channel>,
    members: HashMap<GuildId, HashMap<UserId, Member>>,
    presences: HashMap<UserId, Status>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with the contents of a READY payload.
    pub fn load_ready(&mut self, ready: Ready) {
        *self = Self::default();
        self.me = Some(ready.user);

        for guild in ready.guilds {
            self.guilds.push(GuildInfo {
                id: guild.id,
                name: guild.name,
            });
            for mut channel in guild.channels {
                channel.guild_id = Some(guild.id);
                self.channels.insert(channel.id, channel);
            }
            let members = self.members.entry(guild.id).or_default();
            for member in guild.members {
                members.insert(member.user.id, member);
            }
        }

        for channel in ready.private_channels {
            self.channels.insert(channel.id, channel);
        }

        for presence in ready.presences {
            self.set_presence(presence);
        }
    }

    pub fn me(&self) -> Option<&User> {
        self.me.as_ref()
    }

    pub fn local_user_id(&self) -> Option<UserId> {
        self.me.as_ref().map(|u| u.id)
    }

    pub fn guilds(&self) -> &[GuildInfo] {
        &self.guilds
    }

    pub fn guild(&self, id: GuildId) -> Option<&GuildInfo> {
        self.guilds.iter().find(|g| g.id == id)
    }

    pub fn channel(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.get(&id)
    }

    /// Messageable channels of a guild in sidebar order.
    pub fn guild_channels(&self, guild: GuildId) -> Vec<&Channel> {
        let mut channels: Vec<&Channel> = self
            .channels
            .values()
            .filter(|c| c.guild_id == Some(guild) && c.is_messageable())
            .collect();
        channels.sort_by(|a, b| a.position.cmp(&b.position).then(a.name.cmp(&b.name)));
        channels
    }

    /// DMs and group DMs, ordered by title.
    pub fn private_channels(&self) -> Vec<&Channel> {
        let mut channels: Vec<&Channel> =
            self.channels.values().filter(|c| c.is_private()).collect();
        channels.sort_by_key(|c| c.title().to_lowercase());
        channels
    }

    /// Every messageable channel in sidebar order: guild channels first,
    /// then DMs.
    pub fn channel_order(&self) -> Vec<ChannelId> {
        let mut order: Vec<ChannelId> = Vec::new();
        for guild in &self.guilds {
            order.extend(self.guild_channels(guild.id).iter().map(|c| c.id));
        }
        order.extend(self.private_channels().iter().map(|c| c.id));
        order
    }

    pub fn upsert_channel(&mut self, channel: Channel) {
        self.channels.insert(channel.id, channel);
    }

    pub fn remove_channel(&mut self, id: ChannelId) -> Option<Channel> {
        self.channels.remove(&id)
    }

    pub fn member(&self, guild: GuildId, user: UserId) -> Option<&Member> {
        self.members.get(&guild).and_then(|m| m.get(&user))
    }

    pub fn upsert_member(&mut self, guild: GuildId, member: Member) {
        self.members
            .entry(guild)
            .or_default()
            .insert(member.user.id, member);
    }

    /// Members of a guild sorted by display name.
    pub fn guild_members(&self, guild: GuildId) -> Vec<&Member> {
        let mut members: Vec<&Member> = self
            .members
            .get(&guild)
            .map(|m| m.values().collect())
            .unwrap_or_default();
        members.sort_by_key(|m| m.display_name().to_lowercase());
        members
    }

    /// A recipient of a private channel.
    pub fn dm_recipient(&self, channel: ChannelId, user: UserId) -> Option<&User> {
        self.channels
            .get(&channel)
            .filter(|c| c.is_private())
            .and_then(|c| c.recipients.iter().find(|u| u.id == user))
    }

    pub fn set_presence(&mut self, presence: Presence) {
        self.presences.insert(presence.user_id, presence.status);
    }

    pub fn presence(&self, user: UserId) -> Status {
        self.presences.get(&user).copied().unwrap_or_default()
    }

    /// Best name for a user as seen from a channel: guild nick, then the
    /// DM recipient's name, then the local account, else `None`.
    pub fn user_name(&self, channel: ChannelId, user: UserId) -> Option<String> {
        let guild = self.channels.get(&channel).and_then(|c| c.guild_id);
        if let Some(member) = guild.and_then(|g| self.member(g, user)) {
            return Some(member.display_name().to_string());
        }
        if let Some(recipient) = self.dm_recipient(channel, user) {
            return Some(recipient.display_name().to_string());
        }
        self.me
            .as_ref()
            .filter(|me| me.id == user)
            .map(|me| me.display_name().to_string())
    }

    pub fn channel_title(&self, id: ChannelId) -> String {
        self.channels
            .get(&id)
            .map(Channel::title)
            .unwrap_or_else(|| format!("channel {}", id))
    }
}
