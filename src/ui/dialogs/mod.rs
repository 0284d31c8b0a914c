//! Dialogs and overlays.
//!
//! Dialogs own their form state and hand results back as `DialogAction`s
//! which the app applies in its update loop.

mod about;
mod actions;
mod connect;
mod status_toasts;

pub use about::AboutDialog;
pub use actions::DialogAction;
pub use connect::ConnectDialog;
pub use status_toasts::{render_status_toasts, TOAST_LIFETIME_SECS};
