//! Message composer with the typing label directly above it.

use eframe::egui::{self, RichText};
use tokio::time::Instant;
use tracing::debug;

use crate::app::CordialApp;
use crate::protocol::BackendAction;

/// Height reserved for the typing label so the composer does not jump.
const TYPING_ROW_HEIGHT: f32 = 16.0;

impl CordialApp {
    pub(in crate::app) fn render_composer(&mut self, ctx: &egui::Context) {
        let Some(channel_id) = self.state.active_channel else {
            return;
        };
        let palette = self.palette.clone();
        let connected = self.state.is_connected;
        let title = self.state.cache.channel_title(channel_id);
        let hint = match self.state.cache.channel(channel_id) {
            Some(c) if c.is_private() => format!("Message @{}", title),
            _ => format!("Message #{}", title),
        };

        let buffer = self.state.ensure_buffer(channel_id);
        let label = buffer.typing.render(Instant::now());
        let mut typed = false;
        let mut outgoing: Option<String> = None;

        egui::TopBottomPanel::bottom("composer")
            .frame(
                egui::Frame::new()
                    .fill(palette.surface[2])
                    .inner_margin(egui::Margin::symmetric(16, 6)),
            )
            .show(ctx, |ui| {
                ui.allocate_ui(egui::vec2(ui.available_width(), TYPING_ROW_HEIGHT), |ui| {
                    ui.label(
                        RichText::new(&label)
                            .text_style(egui::TextStyle::Name("typing".into()))
                            .italics()
                            .color(palette.text_secondary),
                    );
                });

                egui::Frame::new()
                    .fill(palette.surface[4])
                    .corner_radius(8.0)
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        let response = ui.add(
                            egui::TextEdit::multiline(&mut buffer.draft)
                                .desired_rows(1)
                                .desired_width(f32::INFINITY)
                                .frame(false)
                                .hint_text(hint),
                        );

                        if response.changed() && !buffer.draft.trim().is_empty() {
                            typed = true;
                        }

                        // Shift+Enter keeps the newline the text edit inserted.
                        let enter = response.has_focus()
                            && ui.input(|i| i.key_pressed(egui::Key::Enter) && !i.modifiers.shift);
                        if enter {
                            let content = buffer.draft.trim().to_string();
                            buffer.draft.clear();
                            if !content.is_empty() {
                                outgoing = Some(content);
                            }
                            response.request_focus();
                        }
                    });
            });

        if !connected {
            if outgoing.is_some() {
                self.state.push_status("Not connected: message not sent");
            }
            return;
        }

        if let Some(content) = outgoing {
            let _ = self.action_tx.send(BackendAction::SendMessage {
                channel_id,
                content,
            });
            self.notifier.reset();
        } else if typed && self.notifier.should_send(channel_id, Instant::now()) {
            debug!(%channel_id, "sending typing notification");
            let _ = self.action_tx.send(BackendAction::SendTyping(channel_id));
        }
    }
}
