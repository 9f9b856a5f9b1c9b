//! Mapscreen is a single map screen: an interactive map with two fixed markers joined by a line,
//! a map type selector switching between three raster tile presets, and a status area that
//! reveals an image after a delay.
//!
//! # Quick start
//!
//! ```no_run
//! use mapscreen::map::Map;
//! use mapscreen::{MainScreen, ScreenConfig};
//!
//! # let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
//! # runtime.block_on(async {
//! let mut screen = MainScreen::create(ScreenConfig::default(), Map::default(), None)?;
//!
//! // somewhere in the UI loop
//! screen.process_messages();
//! screen.select_map_type(1)?;
//! # Ok::<(), mapscreen::error::ScreenError>(())
//! # });
//! ```
//!
//! # Main components
//!
//! * [`MainScreen`] owns the state of the screen and is driven by the UI context.
//! * [`map::MapWidget`] is what the screen needs from a map widget. [`map::MapState`] backs it
//!   with a [`galileo::Map`]: one raster tile layer per preset and a feature layer per overlay.
//!   [`map::Map`] is the widget without a UI; UI front ends pair the state with their own
//!   galileo widget.
//! * [`MapLayerSelector`] swaps the tile source of the map between the [`tile_source::PRESETS`].
//! * [`reveal::RevealController`] runs the reveal timer in the background and reports back
//!   through the [`ui_queue`].

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod color;
mod config;
pub mod error;
pub mod geo;
mod layer_selector;
pub mod map;
pub mod overlay;
pub mod reveal;
mod screen;
pub mod tile_source;
pub mod ui_queue;

pub use color::Color;
pub use config::ScreenConfig;
pub use galileo::{DummyMessenger, Messenger};
pub use layer_selector::MapLayerSelector;
pub use screen::MainScreen;
