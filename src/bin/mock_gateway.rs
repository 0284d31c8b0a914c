//! Local gateway for trying the client without a real platform.
//!
//! Listens on `127.0.0.1:7878` (or the address given as the first
//! argument), answers IDENTIFY with a canned READY, echoes sent messages
//! back as MESSAGE_CREATE and plays a short script of typing, message and
//! presence events on a loop.

use std::time::Duration;

use chrono::Utc;
use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::codec::{Framed, LinesCodec};
use tracing::{debug, info, warn};

use cordial::config::DEFAULT_GATEWAY;
use cordial::error::Result;
use cordial::gateway::{
    self, Channel, ChannelId, ChannelKind, GatewayCommand, GatewayEvent, Guild, GuildId, Member,
    Message, MessageId, Presence, Ready, Status, TypingStart, User, UserId, MAX_FRAME_LEN,
};
use cordial::logging;

const SCRIPT_TICK: Duration = Duration::from_secs(3);

const ME: u64 = 1;
const FERRIS: u64 = 2;
const CORRO: u64 = 3;
const DANA: u64 = 4;
const GUILD: u64 = 10;
const GENERAL: u64 = 100;
const RANDOM: u64 = 101;
const DM: u64 = 300;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_GATEWAY.to_string());
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "mock gateway listening");

    loop {
        let (stream, peer) = listener.accept().await?;
        info!(%peer, "client connected");
        tokio::spawn(async move {
            if let Err(e) = serve(stream).await {
                warn!(%peer, "session ended: {}", e);
            } else {
                info!(%peer, "client disconnected");
            }
        });
    }
}

async fn serve(stream: TcpStream) -> Result<()> {
    stream.set_nodelay(true)?;
    let mut framed = Framed::new(stream, LinesCodec::new_with_max_length(MAX_FRAME_LEN));

    // Nothing is sent before a valid IDENTIFY.
    loop {
        let Some(line) = framed.next().await else {
            return Ok(());
        };
        match gateway::decode_command(&line?) {
            Ok(GatewayCommand::Identify { token }) if !token.trim().is_empty() => break,
            Ok(GatewayCommand::Identify { .. }) => {
                let reject = GatewayEvent::InvalidSession {
                    reason: "empty token".into(),
                };
                framed.send(gateway::encode_event(&reject)?).await?;
                return Ok(());
            }
            Ok(other) => debug!(?other, "ignoring command before IDENTIFY"),
            Err(e) => warn!("bad frame: {}", e),
        }
    }

    framed
        .send(gateway::encode_event(&GatewayEvent::Ready(Box::new(ready())))?)
        .await?;

    let mut script = Script::default();
    let mut ticker = interval(SCRIPT_TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            line = framed.next() => {
                let Some(line) = line else {
                    return Ok(());
                };
                let command = match gateway::decode_command(&line?) {
                    Ok(command) => command,
                    Err(e) => {
                        warn!("bad frame: {}", e);
                        continue;
                    }
                };
                match command {
                    GatewayCommand::SendMessage { channel_id, content } => {
                        let echo = script.message(channel_id, user(ME, "me"), content);
                        framed.send(gateway::encode_event(&echo)?).await?;
                    }
                    GatewayCommand::Typing { channel_id } => {
                        debug!(%channel_id, "client is typing");
                    }
                    GatewayCommand::Identify { .. } => {
                        debug!("ignoring repeated IDENTIFY");
                    }
                }
            }
            _ = ticker.tick() => {
                if let Some(event) = script.step() {
                    framed.send(gateway::encode_event(&event)?).await?;
                }
            }
        }
    }
}

/// Scripted activity, one step per tick.
#[derive(Default)]
struct Script {
    step: usize,
    next_message_id: u64,
    corro_idle: bool,
}

impl Script {
    fn step(&mut self) -> Option<GatewayEvent> {
        let step = self.step;
        self.step = (self.step + 1) % 7;
        match step {
            0 => Some(typing(GENERAL, Some(GUILD), FERRIS)),
            1 => Some(typing(GENERAL, Some(GUILD), CORRO)),
            2 => Some(self.message(
                ChannelId(GENERAL),
                user(FERRIS, "ferris"),
                "anyone tried the new borrow checker diagnostics?".into(),
            )),
            3 => Some(typing(DM, None, DANA)),
            4 => {
                self.corro_idle = !self.corro_idle;
                let status = if self.corro_idle {
                    Status::Idle
                } else {
                    Status::Online
                };
                Some(GatewayEvent::PresenceUpdate(Presence {
                    user_id: UserId(CORRO),
                    status,
                }))
            }
            5 => Some(GatewayEvent::TypingStop {
                channel_id: ChannelId(GENERAL),
                user_id: UserId(CORRO),
            }),
            // Let the DM indicator run into its timeout.
            _ => None,
        }
    }

    fn message(&mut self, channel_id: ChannelId, author: User, content: String) -> GatewayEvent {
        self.next_message_id += 1;
        let guild_id = (channel_id != ChannelId(DM)).then_some(GuildId(GUILD));
        GatewayEvent::MessageCreate(Message {
            id: MessageId(self.next_message_id),
            channel_id,
            guild_id,
            author,
            member: None,
            content,
            timestamp: Utc::now(),
            mentions: Vec::new(),
        })
    }
}

fn typing(channel: u64, guild: Option<u64>, user_id: u64) -> GatewayEvent {
    GatewayEvent::TypingStart(TypingStart {
        channel_id: ChannelId(channel),
        guild_id: guild.map(GuildId),
        user_id: UserId(user_id),
        timestamp: Utc::now().timestamp(),
        member: None,
    })
}

fn user(id: u64, name: &str) -> User {
    User {
        id: UserId(id),
        username: name.to_string(),
        global_name: None,
        avatar: None,
        bot: false,
    }
}

fn text_channel(id: u64, name: &str, topic: &str, position: i32) -> Channel {
    Channel {
        id: ChannelId(id),
        guild_id: Some(GuildId(GUILD)),
        name: name.to_string(),
        kind: ChannelKind::Text,
        topic: Some(topic.to_string()),
        position,
        recipients: Vec::new(),
    }
}

fn ready() -> Ready {
    Ready {
        user: user(ME, "me"),
        guilds: vec![Guild {
            id: GuildId(GUILD),
            name: "Cordial Test Lab".into(),
            channels: vec![
                text_channel(GENERAL, "general", "Say hello", 0),
                text_channel(RANDOM, "random", "Anything goes", 1),
            ],
            members: vec![
                Member {
                    user: user(ME, "me"),
                    nick: None,
                },
                Member {
                    user: user(FERRIS, "ferris"),
                    nick: Some("Ferris the Crab".into()),
                },
                Member {
                    user: user(CORRO, "corro"),
                    nick: None,
                },
            ],
        }],
        private_channels: vec![Channel {
            id: ChannelId(DM),
            guild_id: None,
            name: String::new(),
            kind: ChannelKind::Dm,
            topic: None,
            position: 0,
            recipients: vec![user(DANA, "dana")],
        }],
        presences: vec![
            Presence {
                user_id: UserId(ME),
                status: Status::Online,
            },
            Presence {
                user_id: UserId(FERRIS),
                status: Status::Online,
            },
            Presence {
                user_id: UserId(CORRO),
                status: Status::Online,
            },
        ],
    }
}
