use crate::gateway::{Channel, ChannelId, Message, Presence, Ready, TypingStart, UserId};

/// Actions sent from the UI to the Backend
#[derive(Debug, Clone)]
pub enum BackendAction {
    /// Connect to a gateway and identify with `token`
    Connect {
        host: String,
        port: u16,
        use_tls: bool,
        token: String,
    },
    /// Drop the gateway connection
    Disconnect,
    /// Post a message to a channel
    SendMessage { channel_id: ChannelId, content: String },
    /// Tell the channel we are typing. Fire-and-forget.
    SendTyping(ChannelId),
}

/// Events sent from the Backend (and the typing aggregator) to the UI
#[derive(Debug, Clone)]
pub enum GuiEvent {
    /// Transport is up and IDENTIFY was sent
    Connecting(String),
    /// Session established; the cache should be rebuilt from this
    Ready(Box<Ready>),
    /// Disconnected from the gateway
    Disconnected(String),
    /// Something failed; shown as a toast
    Error(String),
    MessageReceived(Box<Message>),
    TypingStarted(TypingStart),
    TypingStopped { channel_id: ChannelId, user_id: UserId },
    PresenceChanged(Presence),
    ChannelCreated(Box<Channel>),
    ChannelDeleted(ChannelId),
    /// The typing aggregator wants this channel's label re-rendered
    TypingRender(ChannelId),
}
