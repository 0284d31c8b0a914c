//! UI building blocks: theme, avatars, panels, dialogs and overlays.

pub mod avatar;
pub mod dialogs;
pub mod messages;
pub mod panels;
pub mod quick_switcher;
pub mod theme;
