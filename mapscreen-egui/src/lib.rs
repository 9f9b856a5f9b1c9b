//! Egui front end for the [`mapscreen`] map screen.
//!
//! [`ScreenApp`] draws the screen with `eframe`, and [`EguiMapWidget`] is the galileo map widget
//! it configures. [`InitBuilder`] loads the configuration and opens the native window through
//! `galileo-egui`, which also sets up logging and the tokio runtime the reveal timer runs on.

mod app;
mod egui_map;
pub mod images;
mod init;

pub use app::ScreenApp;
pub use egui_map::{EguiMapWidget, EguiMessenger, MapUi};
pub use init::InitBuilder;
