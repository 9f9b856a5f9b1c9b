//! Opens the map screen in a native window.
//!
//! The configuration is read from `mapscreen.json` in the working directory when that file
//! exists. Set `RUST_LOG` to change the log level.

use mapscreen_egui::InitBuilder;

const CONFIG_FILE: &str = "mapscreen.json";

fn main() -> eframe::Result {
    InitBuilder::new().with_config_file(CONFIG_FILE).init()
}
