//! Global egui style: text hierarchy, spacing and widget visuals.

use eframe::egui::{self, Color32, CornerRadius, FontFamily, FontId, Stroke, TextStyle};
use std::collections::BTreeMap;

use super::colors::Palette;

/// Text styles, including the named ones used by the chat views:
/// `author`, `timestamp`, `topic`, `section_header`, `channel_name`
/// and `typing`.
pub fn configure_text_styles() -> BTreeMap<TextStyle, FontId> {
    use FontFamily::{Monospace, Proportional};

    [
        (TextStyle::Small, FontId::new(10.0, Proportional)),
        (TextStyle::Body, FontId::new(14.0, Proportional)),
        (TextStyle::Button, FontId::new(13.0, Proportional)),
        (TextStyle::Heading, FontId::new(16.0, Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, Monospace)),
        (TextStyle::Name("author".into()), FontId::new(14.0, Proportional)),
        (TextStyle::Name("timestamp".into()), FontId::new(11.0, Proportional)),
        (TextStyle::Name("topic".into()), FontId::new(12.0, Proportional)),
        (TextStyle::Name("section_header".into()), FontId::new(11.0, Proportional)),
        (TextStyle::Name("channel_name".into()), FontId::new(14.0, Proportional)),
        (TextStyle::Name("typing".into()), FontId::new(11.5, Proportional)),
    ]
    .into()
}

/// Apply the palette and the text hierarchy to the whole context.
///
/// Called once at startup and again whenever the theme changes.
pub fn apply_app_style(ctx: &egui::Context, palette: &Palette) {
    let mut visuals = if palette.name == "Light" {
        egui::Visuals::light()
    } else {
        egui::Visuals::dark()
    };

    visuals.panel_fill = palette.surface[2];
    visuals.window_fill = palette.surface[6];
    visuals.window_stroke = Stroke::new(1.0, palette.border_strong);
    visuals.extreme_bg_color = palette.surface[0];
    visuals.selection.bg_fill = palette.accent.gamma_multiply(0.45);
    visuals.hyperlink_color = palette.accent;

    let radius = CornerRadius::same(6);
    visuals.widgets.inactive.bg_fill = palette.surface[4];
    visuals.widgets.inactive.weak_bg_fill = palette.surface[4];
    visuals.widgets.inactive.bg_stroke = Stroke::NONE;
    visuals.widgets.inactive.corner_radius = radius;

    visuals.widgets.hovered.bg_fill = palette.surface[5];
    visuals.widgets.hovered.weak_bg_fill = palette.surface[5];
    visuals.widgets.hovered.bg_stroke = Stroke::NONE;
    visuals.widgets.hovered.corner_radius = radius;

    visuals.widgets.active.bg_fill = palette.accent;
    visuals.widgets.active.weak_bg_fill = palette.accent;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);
    visuals.widgets.active.corner_radius = radius;

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.text_styles = configure_text_styles();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(12);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);
    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_styles_present() {
        let styles = configure_text_styles();
        for name in ["author", "timestamp", "topic", "section_header", "channel_name", "typing"] {
            assert!(
                styles.contains_key(&TextStyle::Name(name.into())),
                "missing text style {}",
                name
            );
        }
    }
}
