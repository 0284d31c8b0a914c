//! Gateway wire model.
//!
//! The gateway speaks newline-delimited JSON. Every inbound frame is a
//! [`GatewayEvent`] tagged by `"op"` with its payload under `"d"`; every
//! outbound frame is a [`GatewayCommand`] using the same envelope. Ids are
//! 64-bit snowflakes and travel as decimal strings.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Longest frame accepted from the gateway. READY payloads for large
/// accounts are the biggest frames we see.
pub const MAX_FRAME_LEN: usize = 8 * 1024 * 1024;

mod string_id {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(id: &u64, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Str(String),
            Num(u64),
        }

        match Raw::deserialize(d)? {
            Raw::Str(s) => s.parse().map_err(de::Error::custom),
            Raw::Num(n) => Ok(n),
        }
    }
}

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(#[serde(with = "string_id")] pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

snowflake!(
    /// Identifies an account.
    UserId
);
snowflake!(
    /// Identifies a guild text/voice channel or a DM.
    ChannelId
);
snowflake!(GuildId);
snowflake!(MessageId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

impl User {
    /// Global display name if set, otherwise the username.
    pub fn display_name(&self) -> &str {
        self.global_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.username)
    }
}

/// A user's membership in one guild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub user: User,
    #[serde(default)]
    pub nick: Option<String>,
}

impl Member {
    pub fn display_name(&self) -> &str {
        self.nick
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.user.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Text,
    Voice,
    Category,
    Dm,
    GroupDm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    #[serde(default)]
    pub name: String,
    pub kind: ChannelKind,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub recipients: Vec<User>,
}

impl Channel {
    pub fn is_private(&self) -> bool {
        matches!(self.kind, ChannelKind::Dm | ChannelKind::GroupDm)
    }

    /// Whether messages can be sent and read here.
    pub fn is_messageable(&self) -> bool {
        matches!(
            self.kind,
            ChannelKind::Text | ChannelKind::Dm | ChannelKind::GroupDm
        )
    }

    /// Name shown in lists: recipients for DMs, the channel name otherwise.
    pub fn title(&self) -> String {
        if self.is_private() && self.name.is_empty() {
            let names: Vec<&str> = self.recipients.iter().map(User::display_name).collect();
            if names.is_empty() {
                return "Empty conversation".to_string();
            }
            return names.join(", ");
        }
        self.name.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guild {
    pub id: GuildId,
    pub name: String,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub channel_id: ChannelId,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    pub author: User,
    #[serde(default)]
    pub member: Option<Member>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub mentions: Vec<User>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Online,
    Idle,
    #[serde(rename = "dnd")]
    DoNotDisturb,
    #[default]
    Offline,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Online => "Online",
            Status::Idle => "Idle",
            Status::DoNotDisturb => "Do Not Disturb",
            Status::Offline => "Offline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presence {
    pub user_id: UserId,
    pub status: Status,
}

/// Someone started typing. The gateway repeats this every few seconds for
/// as long as they keep typing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypingStart {
    pub channel_id: ChannelId,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    pub user_id: UserId,
    /// Unix seconds.
    pub timestamp: i64,
    #[serde(default)]
    pub member: Option<Member>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ready {
    pub user: User,
    #[serde(default)]
    pub guilds: Vec<Guild>,
    #[serde(default)]
    pub private_channels: Vec<Channel>,
    #[serde(default)]
    pub presences: Vec<Presence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayEvent {
    Ready(Box<Ready>),
    MessageCreate(Message),
    TypingStart(TypingStart),
    TypingStop {
        channel_id: ChannelId,
        user_id: UserId,
    },
    PresenceUpdate(Presence),
    ChannelCreate(Channel),
    ChannelDelete {
        id: ChannelId,
    },
    InvalidSession {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayCommand {
    Identify {
        token: String,
    },
    SendMessage {
        channel_id: ChannelId,
        content: String,
    },
    Typing {
        channel_id: ChannelId,
    },
}

pub fn decode_event(line: &str) -> Result<GatewayEvent> {
    Ok(serde_json::from_str(line)?)
}

pub fn encode_command(command: &GatewayCommand) -> Result<String> {
    Ok(serde_json::to_string(command)?)
}

/// Server side of the envelope, used by the mock gateway.
pub fn decode_command(line: &str) -> Result<GatewayCommand> {
    Ok(serde_json::from_str(line)?)
}

pub fn encode_event(event: &GatewayEvent) -> Result<String> {
    Ok(serde_json::to_string(event)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_typing_start_with_member() {
        let line = r#"{"op":"TYPING_START","d":{
            "channel_id":"200","guild_id":"10","user_id":"42","timestamp":1700000000,
            "member":{"user":{"id":"42","username":"ferris"},"nick":"Crab"}}}"#;

        match decode_event(line).unwrap() {
            GatewayEvent::TypingStart(ev) => {
                assert_eq!(ev.channel_id, ChannelId(200));
                assert_eq!(ev.guild_id, Some(GuildId(10)));
                assert_eq!(ev.user_id, UserId(42));
                assert_eq!(ev.member.unwrap().display_name(), "Crab");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_ids_accept_numbers_and_serialize_as_strings() {
        let ev = decode_event(r#"{"op":"TYPING_STOP","d":{"channel_id":7,"user_id":"8"}}"#).unwrap();
        assert_eq!(
            ev,
            GatewayEvent::TypingStop {
                channel_id: ChannelId(7),
                user_id: UserId(8)
            }
        );

        let line = encode_command(&GatewayCommand::Typing {
            channel_id: ChannelId(7),
        })
        .unwrap();
        assert_eq!(line, r#"{"op":"TYPING","d":{"channel_id":"7"}}"#);
    }

    #[test]
    fn test_server_side_envelope() {
        let command = decode_command(r#"{"op":"IDENTIFY","d":{"token":"t0k"}}"#).unwrap();
        assert_eq!(
            command,
            GatewayCommand::Identify {
                token: "t0k".into()
            }
        );

        let line = encode_event(&GatewayEvent::ChannelDelete { id: ChannelId(3) }).unwrap();
        assert_eq!(line, r#"{"op":"CHANNEL_DELETE","d":{"id":"3"}}"#);
    }

    #[test]
    fn test_unknown_op_is_an_error() {
        assert!(decode_event(r#"{"op":"VOICE_STATE_UPDATE","d":{}}"#).is_err());
    }

    #[test]
    fn test_display_names() {
        let mut user = User {
            id: UserId(1),
            username: "ferris".into(),
            global_name: None,
            avatar: None,
            bot: false,
        };
        assert_eq!(user.display_name(), "ferris");
        user.global_name = Some(String::new());
        assert_eq!(user.display_name(), "ferris");
        user.global_name = Some("Ferris".into());
        assert_eq!(user.display_name(), "Ferris");

        let member = Member {
            user,
            nick: None,
        };
        assert_eq!(member.display_name(), "Ferris");
    }

    #[test]
    fn test_dm_title_uses_recipients() {
        let dm = Channel {
            id: ChannelId(1),
            guild_id: None,
            name: String::new(),
            kind: ChannelKind::GroupDm,
            topic: None,
            position: 0,
            recipients: vec![
                User {
                    id: UserId(2),
                    username: "a".into(),
                    global_name: None,
                    avatar: None,
                    bot: false,
                },
                User {
                    id: UserId(3),
                    username: "b".into(),
                    global_name: Some("Bee".into()),
                    avatar: None,
                    bot: false,
                },
            ],
        };
        assert!(dm.is_private());
        assert_eq!(dm.title(), "a, Bee");
    }
}
