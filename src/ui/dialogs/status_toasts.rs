//! Status toasts, floating in the top-right corner.

use eframe::egui;
use std::time::Instant;

use crate::ui::theme::Palette;

/// Seconds a toast stays on screen.
pub const TOAST_LIFETIME_SECS: u64 = 4;

pub fn render_status_toasts(
    ctx: &egui::Context,
    status_messages: &[(String, Instant)],
    palette: &Palette,
) {
    if status_messages.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("status_toast_area"))
        .anchor(egui::Align2::RIGHT_TOP, [-12.0, 44.0])
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(palette.surface[6])
                .stroke(egui::Stroke::new(1.0, palette.border_strong))
                .corner_radius(6.0)
                .inner_margin(egui::Margin::symmetric(12, 8))
                .show(ui, |ui| {
                    for (msg, _) in status_messages {
                        ui.label(egui::RichText::new(msg).color(palette.text_primary));
                    }
                });
        });
}
