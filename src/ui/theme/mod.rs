//! Color palettes and global styling.

pub mod colors;
pub mod style;

pub use colors::{user_color, user_hash, Palette};
pub use style::{apply_app_style, configure_text_styles};
