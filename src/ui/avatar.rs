//! Round avatars: identicon, presence dot and hover ring.

use eframe::egui::{self, Color32, Response, Sense, Stroke, Ui};

use crate::gateway::{Status, UserId};
use crate::ui::theme::{user_color, user_hash, Palette};

/// Draw a circular avatar for `user` and return its response.
///
/// Identicon cells stay inside the circle. While hovered the ring switches
/// to the accent color; remote avatar images are not fetched.
pub fn render_avatar(
    ui: &mut Ui,
    user: UserId,
    status: Option<Status>,
    size: f32,
    palette: &Palette,
) -> Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), Sense::hover());
    let painter = ui.painter();
    let center = rect.center();
    let radius = size / 2.0;

    painter.circle_filled(center, radius, user_color(user));

    let fg_color = Color32::from_white_alpha(200);
    let rounding = size / 6.0 * 0.2;
    for cell in identicon_cells(rect, identicon_pattern(user)) {
        painter.rect_filled(cell, rounding, fg_color);
    }

    let ring = if response.hovered() {
        Stroke::new(2.0, palette.accent)
    } else {
        Stroke::new(1.5, Color32::from_white_alpha(15))
    };
    painter.circle_stroke(center, radius, ring);

    if let Some(dot) = status.and_then(|s| palette.status_color(s)) {
        let dot_radius = (size * 0.16).max(3.5);
        let dot_center = center + egui::vec2(radius, radius) * std::f32::consts::FRAC_1_SQRT_2;
        painter.circle_filled(dot_center, dot_radius + 2.0, palette.surface[1]);
        painter.circle_filled(dot_center, dot_radius, dot);
    }

    response
}

/// Filled identicon cells laid out over `rect`. Only cells whose every
/// corner lies inside the inscribed circle are returned.
pub fn identicon_cells(rect: egui::Rect, pattern: u16) -> Vec<egui::Rect> {
    let center = rect.center();
    let radius = rect.width().min(rect.height()) / 2.0;
    let cell = rect.width() / 6.0;
    let offset = cell * 0.5;
    let side = cell * 0.85;

    let mut cells = Vec::new();
    for row in 0..5 {
        for col in 0..5 {
            if !identicon_cell(pattern, row, col) {
                continue;
            }
            let min = egui::pos2(
                rect.left() + offset + col as f32 * cell,
                rect.top() + offset + row as f32 * cell,
            );
            let square = egui::Rect::from_min_size(min, egui::vec2(side, side));
            let inside = [
                square.left_top(),
                square.right_top(),
                square.left_bottom(),
                square.right_bottom(),
            ]
            .iter()
            .all(|corner| (*corner - center).length() <= radius);
            if inside {
                cells.push(square);
            }
        }
    }
    cells
}

/// 15-bit pattern for a horizontally mirrored 5x5 identicon.
pub fn identicon_pattern(user: UserId) -> u16 {
    // Keep the center column partly filled so no avatar is blank.
    ((user_hash(user) >> 16) as u16 & 0x7FFF) | 0x0084
}

/// Whether the identicon cell at `row`, `col` is filled.
pub fn identicon_cell(pattern: u16, row: usize, col: usize) -> bool {
    let mirrored = if col < 3 { col } else { 4 - col };
    pattern & (1 << (row * 3 + mirrored)) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identicon_is_deterministic() {
        assert_eq!(identicon_pattern(UserId(7)), identicon_pattern(UserId(7)));
        let distinct: std::collections::HashSet<_> =
            (0..50).map(|i| identicon_pattern(UserId(i))).collect();
        assert!(distinct.len() > 40);
    }

    #[test]
    fn test_identicon_cells_stay_inside_circle() {
        let rect = egui::Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(36.0, 36.0));
        let center = rect.center();

        let cells = identicon_cells(rect, 0x7FFF);
        assert!(!cells.is_empty());
        // Corner cells of a full pattern poke past the rim and are dropped.
        assert!(cells.len() < 25);
        for cell in &cells {
            for corner in [cell.left_top(), cell.right_top(), cell.left_bottom(), cell.right_bottom()] {
                assert!((corner - center).length() <= 18.0);
            }
        }
    }

    #[test]
    fn test_identicon_is_mirrored() {
        let pattern = identicon_pattern(UserId(123456789));
        for row in 0..5 {
            assert_eq!(identicon_cell(pattern, row, 0), identicon_cell(pattern, row, 4));
            assert_eq!(identicon_cell(pattern, row, 1), identicon_cell(pattern, row, 3));
        }
    }

    #[test]
    fn test_identicon_never_blank() {
        for id in 0..200 {
            let pattern = identicon_pattern(UserId(id));
            assert!(pattern & 0x0084 == 0x0084);
        }
    }
}
