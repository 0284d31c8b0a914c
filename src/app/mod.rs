//! The eframe application.
//!
//! - `core`: `CordialApp` and its startup/shutdown
//! - `events`: draining backend events into the client state
//! - `update`: the frame loop and global shortcuts
//! - `dialogs`: dialog rendering and their actions
//! - `ui::panels`: header bar and central panel
//! - `ui::composer`: message input with the typing label above it

pub mod core;
pub mod dialogs;
pub mod events;
pub mod ui;
pub mod update;

pub use core::CordialApp;
