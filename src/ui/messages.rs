//! Channel header and message list.

use eframe::egui::{self, RichText};

use crate::buffer::{ChannelBuffer, RenderedMessage};
use crate::cache::Cache;
use crate::gateway::{Channel, UserId};
use crate::ui::avatar::render_avatar;
use crate::ui::theme::{user_color, Palette};

const AVATAR_SIZE: f32 = 36.0;

/// Consecutive messages from one author, shown under a single avatar.
pub struct MessageGroup<'a> {
    pub author_id: UserId,
    pub messages: Vec<&'a RenderedMessage>,
}

pub fn group_messages(messages: &[RenderedMessage]) -> Vec<MessageGroup<'_>> {
    let mut groups: Vec<MessageGroup<'_>> = Vec::new();
    for msg in messages {
        match groups.last_mut() {
            Some(group) if group.author_id == msg.author_id => group.messages.push(msg),
            _ => groups.push(MessageGroup {
                author_id: msg.author_id,
                messages: vec![msg],
            }),
        }
    }
    groups
}

/// Channel name and topic above the message list.
pub fn render_channel_header(ui: &mut egui::Ui, channel: &Channel, palette: &Palette) {
    egui::Frame::new()
        .fill(palette.surface[2])
        .inner_margin(egui::Margin::symmetric(16, 10))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let icon = if channel.is_private() { "@" } else { "#" };
                ui.label(RichText::new(icon).size(18.0).color(palette.text_muted));
                ui.label(
                    RichText::new(channel.title())
                        .text_style(egui::TextStyle::Name("channel_name".into()))
                        .strong()
                        .color(palette.text_primary),
                );
                if let Some(topic) = channel.topic.as_deref().filter(|t| !t.is_empty()) {
                    ui.separator();
                    ui.label(
                        RichText::new(topic)
                            .text_style(egui::TextStyle::Name("topic".into()))
                            .color(palette.text_muted),
                    );
                }
            });
        });
    ui.separator();
}

pub fn render_messages(ui: &mut egui::Ui, buffer: &ChannelBuffer, cache: &Cache, palette: &Palette) {
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            ui.add_space(8.0);
            if buffer.messages.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(24.0);
                    ui.label(RichText::new("No messages yet").color(palette.text_muted));
                });
            }
            for group in group_messages(&buffer.messages) {
                render_group(ui, &group, cache, palette);
                ui.add_space(10.0);
            }
        });
}

fn render_group(ui: &mut egui::Ui, group: &MessageGroup<'_>, cache: &Cache, palette: &Palette) {
    let Some(first) = group.messages.first() else {
        return;
    };
    ui.horizontal_top(|ui| {
        ui.add_space(12.0);
        render_avatar(
            ui,
            group.author_id,
            Some(cache.presence(group.author_id)),
            AVATAR_SIZE,
            palette,
        );
        ui.add_space(6.0);
        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(&first.author)
                        .text_style(egui::TextStyle::Name("author".into()))
                        .strong()
                        .color(user_color(group.author_id)),
                );
                ui.label(
                    RichText::new(&first.timestamp)
                        .text_style(egui::TextStyle::Name("timestamp".into()))
                        .color(palette.text_muted),
                );
            });
            for msg in &group.messages {
                let text = RichText::new(&msg.text).color(palette.text_primary);
                if msg.mentions_me {
                    egui::Frame::new()
                        .fill(palette.mention)
                        .corner_radius(4.0)
                        .inner_margin(egui::Margin::symmetric(4, 2))
                        .show(ui, |ui| {
                            ui.label(text);
                        });
                } else {
                    ui.label(text);
                }
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MessageId;

    fn msg(id: u64, author: u64) -> RenderedMessage {
        RenderedMessage {
            id: MessageId(id),
            author_id: UserId(author),
            author: format!("user{}", author),
            timestamp: "12:00".into(),
            text: "hello".into(),
            mentions_me: false,
        }
    }

    #[test]
    fn test_group_consecutive_authors() {
        let messages = vec![msg(1, 2), msg(2, 2), msg(3, 3), msg(4, 2)];
        let groups = group_messages(&messages);
        let sizes: Vec<(u64, usize)> = groups
            .iter()
            .map(|g| (g.author_id.0, g.messages.len()))
            .collect();
        assert_eq!(sizes, vec![(2, 2), (3, 1), (2, 1)]);
    }

    #[test]
    fn test_group_empty() {
        assert!(group_messages(&[]).is_empty());
    }
}
