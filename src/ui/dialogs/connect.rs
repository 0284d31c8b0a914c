//! Connect dialog: gateway address, TLS and token.

use eframe::egui;

use super::DialogAction;
use crate::config::ConnectionConfig;

pub struct ConnectDialog {
    pub open: bool,
    form: ConnectionConfig,
    error: Option<String>,
}

impl ConnectDialog {
    pub fn new(form: ConnectionConfig) -> Self {
        Self {
            open: false,
            form,
            error: None,
        }
    }

    pub fn show(&mut self) {
        self.open = true;
        self.error = None;
    }

    pub fn form(&self) -> &ConnectionConfig {
        &self.form
    }

    /// Check the form; on success the dialog closes and yields the action.
    pub fn submit(&mut self) -> Option<DialogAction> {
        if let Err(e) = self.form.parse_gateway() {
            self.error = Some(e.to_string());
            return None;
        }
        if self.form.token.trim().is_empty() {
            self.error = Some("A token is required".into());
            return None;
        }
        self.open = false;
        self.error = None;
        Some(DialogAction::Connect(self.form.clone()))
    }

    pub fn render(&mut self, ctx: &egui::Context) -> Option<DialogAction> {
        if !self.open {
            return None;
        }

        let mut action = None;
        let mut still_open = true;
        egui::Window::new("Connect")
            .open(&mut still_open)
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::Grid::new("connect_form")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Gateway");
                        ui.text_edit_singleline(&mut self.form.gateway);
                        ui.end_row();

                        ui.label("Account");
                        ui.text_edit_singleline(&mut self.form.account);
                        ui.end_row();

                        ui.label("Token");
                        ui.add(egui::TextEdit::singleline(&mut self.form.token).password(true));
                        ui.end_row();

                        ui.label("");
                        ui.checkbox(&mut self.form.use_tls, "Use TLS");
                        ui.end_row();
                    });

                if let Some(error) = &self.error {
                    ui.colored_label(ui.visuals().error_fg_color, error);
                }

                ui.add_space(6.0);
                if ui.button("Connect").clicked() {
                    action = self.submit();
                }
            });

        if !still_open {
            self.open = false;
        }
        action
    }
}
