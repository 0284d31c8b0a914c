use std::time::Duration;

use crate::gateway::{ChannelId, MessageId, UserId};
use crate::typing::ChannelTypingState;

/// Maximum messages to keep in a buffer before trimming
const MAX_BUFFER_MESSAGES: usize = 2000;
/// Number of oldest messages to remove when trimming
const BUFFER_TRIM_COUNT: usize = 500;

/// A message ready for display: names resolved, mentions expanded.
#[derive(Clone, Debug)]
pub struct RenderedMessage {
    pub id: MessageId,
    pub author_id: UserId,
    pub author: String,
    pub timestamp: String,
    pub text: String,
    pub mentions_me: bool,
}

/// Everything the UI keeps for one channel.
#[derive(Clone, Debug)]
pub struct ChannelBuffer {
    pub messages: Vec<RenderedMessage>,
    /// Number of unread messages
    pub unread_count: usize,
    /// Whether an unread message mentions us
    pub has_mention: bool,
    /// Who is typing here; owned by this buffer's composer
    pub typing: ChannelTypingState,
    /// Text being composed
    pub draft: String,
}

impl ChannelBuffer {
    pub fn new(channel_id: ChannelId, typing_timeout: Duration) -> Self {
        Self {
            messages: Vec::new(),
            unread_count: 0,
            has_mention: false,
            typing: ChannelTypingState::new(channel_id, typing_timeout),
            draft: String::new(),
        }
    }

    pub fn add_message(&mut self, msg: RenderedMessage, is_active: bool) {
        if !is_active {
            self.unread_count += 1;
            if msg.mentions_me {
                self.has_mention = true;
            }
        }
        self.messages.push(msg);
        // Trim old messages if buffer gets too large
        if self.messages.len() > MAX_BUFFER_MESSAGES {
            self.messages.drain(0..BUFFER_TRIM_COUNT);
        }
    }

    pub fn clear_unread(&mut self) {
        self.unread_count = 0;
        self.has_mention = false;
    }
}
