//! Frame loop and global shortcuts.

use eframe::egui;
use std::time::Duration;

use super::CordialApp;
use crate::ui;
use crate::ui::dialogs::TOAST_LIFETIME_SECS;

impl eframe::App for CordialApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_events();

        ctx.input(|i| {
            if i.modifiers.command && i.key_pressed(egui::Key::K) {
                self.quick_switcher.toggle();
            }
            if i.modifiers.command && i.key_pressed(egui::Key::N) {
                self.state.next_channel();
            }
            if i.modifiers.command && i.key_pressed(egui::Key::P) {
                self.state.prev_channel();
            }
            if i.key_pressed(egui::Key::F1) {
                self.about.toggle();
            }
        });

        // Keep polling for backend events.
        ctx.request_repaint_after(Duration::from_millis(100));
        self.state.purge_old_status_messages(TOAST_LIFETIME_SECS);

        self.render_header_bar(ctx);

        if let Some(channel) = ui::panels::render_channel_list(ctx, &self.state, &self.palette) {
            self.state.switch_to_channel(channel);
        }

        if self.settings.show_member_list {
            if let Some(guild) = self.state.active_guild() {
                ui::panels::render_member_list(ctx, &self.state.cache, guild, &self.palette);
            }
        }

        self.render_composer(ctx);
        self.render_central_panel(ctx);
        self.render_dialogs(ctx);

        if let Some(channel) =
            self.quick_switcher
                .render(ctx, &self.state.switcher_entries, &self.palette)
        {
            self.state.switch_to_channel(channel);
        }
    }
}
