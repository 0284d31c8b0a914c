//! Header bar and central panel.

use eframe::egui::{self, RichText};

use crate::app::CordialApp;
use crate::protocol::BackendAction;
use crate::ui::messages;

impl CordialApp {
    /// Header bar: app menu on the left, connection status on the right.
    pub(in crate::app) fn render_header_bar(&mut self, ctx: &egui::Context) {
        let palette = self.palette.clone();

        egui::TopBottomPanel::top("header_bar")
            .frame(
                egui::Frame::new()
                    .fill(palette.surface[0])
                    .inner_margin(egui::Margin::symmetric(8, 4))
                    .stroke(egui::Stroke::new(1.0, palette.border_medium)),
            )
            .show(ctx, |ui| {
                egui::menu::bar(ui, |ui| {
                    ui.menu_button("Cordial", |ui| {
                        if ui.button("Connect…").clicked() {
                            self.connect_dialog.show();
                            ui.close_menu();
                        }
                        if ui
                            .add_enabled(self.state.is_connected, egui::Button::new("Disconnect"))
                            .clicked()
                        {
                            let _ = self.action_tx.send(BackendAction::Disconnect);
                            ui.close_menu();
                        }
                        ui.separator();
                        if ui
                            .add(egui::Button::new("Quick switcher").shortcut_text("Ctrl+K"))
                            .clicked()
                        {
                            self.quick_switcher.toggle();
                            ui.close_menu();
                        }
                        let mut show_members = self.settings.show_member_list;
                        if ui.checkbox(&mut show_members, "Member list").changed() {
                            self.settings.show_member_list = show_members;
                            self.save_settings();
                        }
                        ui.menu_button("Theme", |ui| {
                            for (name, label) in [("dark", "Dark"), ("light", "Light")] {
                                let selected = self.settings.theme == name;
                                if ui.radio(selected, label).clicked() {
                                    self.set_theme(ctx, name);
                                    ui.close_menu();
                                }
                            }
                        });
                        ui.menu_button("Typing timeout", |ui| {
                            for secs in [5, 10, 30] {
                                let selected = self.settings.typing_timeout_secs == secs;
                                if ui.radio(selected, format!("{} seconds", secs)).clicked() {
                                    self.set_typing_timeout(secs);
                                    ui.close_menu();
                                }
                            }
                        });
                        ui.separator();
                        if ui.add(egui::Button::new("About").shortcut_text("F1")).clicked() {
                            self.about.show();
                            ui.close_menu();
                        }
                        if ui.button("Quit").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let (color, text) = if self.state.is_connected {
                            let name = self
                                .state
                                .cache
                                .me()
                                .map(|u| u.display_name().to_string())
                                .unwrap_or_default();
                            (palette.status_online, format!("Connected as {}", name))
                        } else {
                            (palette.text_muted, "Offline".to_string())
                        };
                        ui.label(RichText::new(text).color(palette.text_secondary));
                        ui.label(RichText::new("●").color(color));
                    });
                });
            });
    }

    /// Channel header and messages for the active channel.
    pub(in crate::app) fn render_central_panel(&mut self, ctx: &egui::Context) {
        let palette = &self.palette;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(palette.surface[2]).inner_margin(0.0))
            .show(ctx, |ui| {
                let active = self.state.active_channel.and_then(|id| {
                    let channel = self.state.cache.channel(id)?;
                    Some((channel, self.state.buffers.get(&id)))
                });
                let Some((channel, buffer)) = active else {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            RichText::new("Pick a channel to start chatting")
                                .color(palette.text_muted),
                        );
                    });
                    return;
                };

                messages::render_channel_header(ui, channel, palette);
                if let Some(buffer) = buffer {
                    messages::render_messages(ui, buffer, &self.state.cache, palette);
                }
            });
    }
}
