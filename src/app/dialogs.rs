//! Dialog rendering and their actions.

use eframe::egui;

use super::CordialApp;
use crate::ui;
use crate::ui::dialogs::DialogAction;

impl CordialApp {
    pub(super) fn render_dialogs(&mut self, ctx: &egui::Context) {
        ui::dialogs::render_status_toasts(ctx, &self.state.status_messages, &self.palette);

        self.about.render(ctx);

        if let Some(action) = self.connect_dialog.render(ctx) {
            self.handle_dialog_action(action);
        }
    }

    fn handle_dialog_action(&mut self, action: DialogAction) {
        match action {
            DialogAction::Connect(connection) => self.connect(connection),
        }
    }
}
