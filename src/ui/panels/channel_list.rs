//! Left sidebar: guilds with their text channels, then direct messages.

use eframe::egui::{self, Color32, Stroke};

use crate::gateway::{Channel, ChannelId};
use crate::state::ClientState;
use crate::ui::theme::Palette;

/// Render the left channel list. Returns the channel the user clicked.
pub fn render_channel_list(
    ctx: &egui::Context,
    state: &ClientState,
    palette: &Palette,
) -> Option<ChannelId> {
    let mut clicked = None;

    egui::SidePanel::left("channels_panel")
        .resizable(true)
        .default_width(230.0)
        .min_width(180.0)
        .frame(
            egui::Frame::new()
                .fill(palette.surface[1])
                .inner_margin(egui::Margin::same(0))
                .stroke(Stroke::new(1.0, palette.border_medium)),
        )
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    for guild in state.cache.guilds() {
                        section_header(ui, &guild.name.to_uppercase(), palette);
                        for channel in state.cache.guild_channels(guild.id) {
                            if channel_row(ui, state, channel, "#", palette) {
                                clicked = Some(channel.id);
                            }
                        }
                    }

                    let dms = state.cache.private_channels();
                    if !dms.is_empty() {
                        section_header(ui, "DIRECT MESSAGES", palette);
                        for channel in dms {
                            if channel_row(ui, state, channel, "@", palette) {
                                clicked = Some(channel.id);
                            }
                        }
                    }

                    if state.cache.guilds().is_empty() && !state.is_connected {
                        ui.add_space(24.0);
                        ui.vertical_centered(|ui| {
                            ui.label(
                                egui::RichText::new("Not connected").color(palette.text_muted),
                            );
                        });
                    }
                });
        });

    clicked
}

fn section_header(ui: &mut egui::Ui, title: &str, palette: &Palette) {
    ui.add_space(14.0);
    ui.horizontal(|ui| {
        ui.add_space(16.0);
        ui.label(
            egui::RichText::new(title)
                .text_style(egui::TextStyle::Name("section_header".into()))
                .strong()
                .color(palette.text_muted),
        );
    });
    ui.add_space(4.0);
}

/// One channel row with unread badge. Returns true when clicked.
fn channel_row(
    ui: &mut egui::Ui,
    state: &ClientState,
    channel: &Channel,
    icon: &str,
    palette: &Palette,
) -> bool {
    let is_active = state.active_channel == Some(channel.id);
    let buffer = state.buffers.get(&channel.id);
    let unread = buffer.map_or(0, |b| b.unread_count);
    let has_mention = buffer.is_some_and(|b| b.has_mention);

    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), 30.0),
        egui::Sense::click(),
    );
    let row = rect.shrink2(egui::vec2(8.0, 1.0));

    let bg = if is_active {
        palette.surface[4]
    } else if response.hovered() {
        palette.surface[3]
    } else {
        Color32::TRANSPARENT
    };
    ui.painter().rect_filled(row, 4.0, bg);

    let text_color = if is_active || unread > 0 {
        palette.text_primary
    } else {
        palette.text_muted
    };
    let painter = ui.painter();
    painter.text(
        egui::pos2(row.min.x + 10.0, row.center().y),
        egui::Align2::LEFT_CENTER,
        icon,
        egui::FontId::proportional(16.0),
        palette.text_muted,
    );
    painter.text(
        egui::pos2(row.min.x + 30.0, row.center().y),
        egui::Align2::LEFT_CENTER,
        channel.title(),
        egui::FontId::proportional(14.0),
        text_color,
    );

    if unread > 0 && !is_active {
        let badge_color = if has_mention {
            palette.error
        } else {
            palette.surface[5]
        };
        let text = if unread > 99 {
            "99+".to_string()
        } else {
            unread.to_string()
        };
        let badge = egui::Rect::from_center_size(
            egui::pos2(row.max.x - 18.0, row.center().y),
            egui::vec2(26.0, 16.0),
        );
        painter.rect_filled(badge, 8.0, badge_color);
        painter.text(
            badge.center(),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::proportional(10.5),
            Color32::WHITE,
        );
    }

    response.clicked()
}
