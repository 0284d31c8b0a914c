//! Cordial, a desktop chat client built with egui.
//!
//! Architecture:
//! - Main thread: runs the egui UI
//! - Backend thread: runs a Tokio runtime for gateway I/O and the typing
//!   aggregator
//! - Communication via crossbeam channels

use eframe::egui;

use cordial::app::CordialApp;
use cordial::logging;

fn main() -> eframe::Result<()> {
    logging::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Cordial")
            .with_inner_size([1200.0, 780.0])
            .with_min_inner_size([800.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Cordial",
        options,
        Box::new(
            |cc| -> Result<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>> {
                Ok(Box::new(CordialApp::new(cc)?))
            },
        ),
    )
}
