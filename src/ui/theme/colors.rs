//! Palettes and deterministic per-user colors.

use eframe::egui::Color32;

use crate::gateway::{Status, UserId};

/// Color scheme with a 7-level surface hierarchy.
///
/// - `surface[0]`: app background
/// - `surface[1]`: sidebars
/// - `surface[2]`: message area
/// - `surface[3]`: hover
/// - `surface[4]`: selection
/// - `surface[5]`: elevated panels
/// - `surface[6]`: dialogs and popovers
#[derive(Clone, Debug)]
pub struct Palette {
    pub name: String,
    pub surface: [Color32; 7],
    pub accent: Color32,
    pub accent_hover: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
    pub mention: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub border_subtle: Color32,
    pub border_medium: Color32,
    pub border_strong: Color32,
    pub status_online: Color32,
    pub status_idle: Color32,
    pub status_dnd: Color32,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            surface: [
                Color32::from_rgb(30, 31, 34),
                Color32::from_rgb(43, 45, 49),
                Color32::from_rgb(49, 51, 56),
                Color32::from_rgb(53, 55, 60),
                Color32::from_rgb(64, 66, 73),
                Color32::from_rgb(56, 58, 64),
                Color32::from_rgb(35, 36, 40),
            ],
            accent: Color32::from_rgb(88, 101, 242),
            accent_hover: Color32::from_rgb(71, 82, 196),
            success: Color32::from_rgb(35, 165, 90),
            warning: Color32::from_rgb(240, 178, 50),
            error: Color32::from_rgb(242, 63, 67),
            mention: Color32::from_rgba_unmultiplied(250, 168, 26, 30),
            text_primary: Color32::from_rgb(242, 243, 245),
            text_secondary: Color32::from_rgb(181, 186, 193),
            text_muted: Color32::from_rgb(148, 155, 164),
            border_subtle: Color32::from_rgb(38, 40, 44),
            border_medium: Color32::from_rgb(31, 33, 36),
            border_strong: Color32::from_rgb(78, 80, 88),
            status_online: Color32::from_rgb(35, 165, 90),
            status_idle: Color32::from_rgb(240, 178, 50),
            status_dnd: Color32::from_rgb(242, 63, 67),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            surface: [
                Color32::from_rgb(227, 229, 232),
                Color32::from_rgb(242, 243, 245),
                Color32::from_rgb(255, 255, 255),
                Color32::from_rgb(235, 237, 239),
                Color32::from_rgb(215, 218, 221),
                Color32::from_rgb(248, 249, 250),
                Color32::from_rgb(255, 255, 255),
            ],
            accent: Color32::from_rgb(88, 101, 242),
            accent_hover: Color32::from_rgb(71, 82, 196),
            success: Color32::from_rgb(36, 128, 70),
            warning: Color32::from_rgb(196, 130, 0),
            error: Color32::from_rgb(218, 55, 60),
            mention: Color32::from_rgba_unmultiplied(250, 168, 26, 40),
            text_primary: Color32::from_rgb(6, 6, 7),
            text_secondary: Color32::from_rgb(78, 80, 88),
            text_muted: Color32::from_rgb(92, 94, 102),
            border_subtle: Color32::from_rgb(225, 226, 228),
            border_medium: Color32::from_rgb(210, 212, 216),
            border_strong: Color32::from_rgb(180, 183, 188),
            status_online: Color32::from_rgb(36, 128, 70),
            status_idle: Color32::from_rgb(196, 130, 0),
            status_dnd: Color32::from_rgb(218, 55, 60),
        }
    }

    /// Palette for a settings value; anything but "light" is dark.
    pub fn named(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Dot color for a presence, `None` for offline.
    pub fn status_color(&self, status: Status) -> Option<Color32> {
        match status {
            Status::Online => Some(self.status_online),
            Status::Idle => Some(self.status_idle),
            Status::DoNotDisturb => Some(self.status_dnd),
            Status::Offline => None,
        }
    }
}

const USER_COLORS: [Color32; 12] = [
    Color32::from_rgb(231, 76, 60),
    Color32::from_rgb(46, 204, 113),
    Color32::from_rgb(52, 152, 219),
    Color32::from_rgb(155, 89, 182),
    Color32::from_rgb(241, 196, 15),
    Color32::from_rgb(230, 126, 34),
    Color32::from_rgb(26, 188, 156),
    Color32::from_rgb(236, 100, 166),
    Color32::from_rgb(88, 101, 242),
    Color32::from_rgb(39, 174, 96),
    Color32::from_rgb(243, 156, 18),
    Color32::from_rgb(127, 140, 141),
];

/// FNV-1a over the id's bytes.
pub fn user_hash(user: UserId) -> u64 {
    let mut hash: u64 = 1469598103934665603;
    for b in user.0.to_le_bytes() {
        hash ^= b as u64;
        hash = hash.wrapping_mul(1099511628211);
    }
    hash
}

/// Stable accent color for a user (avatar background, author names).
pub fn user_color(user: UserId) -> Color32 {
    USER_COLORS[(user_hash(user) % USER_COLORS.len() as u64) as usize]
}
