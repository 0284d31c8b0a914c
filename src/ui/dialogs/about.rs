//! About dialog (F1).

use eframe::egui;

#[derive(Default)]
pub struct AboutDialog {
    pub open: bool,
}

impl AboutDialog {
    pub fn new() -> Self {
        Self { open: false }
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn show(&mut self) {
        self.open = true;
    }

    pub fn hide(&mut self) {
        self.open = false;
    }

    /// Render the dialog. Returns whether it is still open.
    pub fn render(&mut self, ctx: &egui::Context) -> bool {
        if !self.open {
            return false;
        }

        let mut still_open = true;
        egui::Window::new("About Cordial")
            .open(&mut still_open)
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("Cordial");
                    ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                    ui.add_space(6.0);
                    ui.label(env!("CARGO_PKG_DESCRIPTION"));
                    ui.add_space(6.0);
                    ui.label(format!("License: {}", env!("CARGO_PKG_LICENSE")));
                });
                ui.separator();
                ui.label("Ctrl+K  Quick switcher");
                ui.label("Ctrl+N / Ctrl+P  Next / previous channel");
                ui.label("F1  This dialog");
            });

        if !still_open {
            self.open = false;
        }
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about_dialog_toggle() {
        let mut dialog = AboutDialog::new();
        assert!(!dialog.open);
        dialog.toggle();
        assert!(dialog.open);
        dialog.toggle();
        assert!(!dialog.open);
    }

    #[test]
    fn test_about_dialog_show_hide() {
        let mut dialog = AboutDialog::new();
        dialog.show();
        assert!(dialog.open);
        dialog.hide();
        assert!(!dialog.open);
    }
}
