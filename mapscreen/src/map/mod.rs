//! The map of the screen: the [`MapWidget`] contract, the engine layers and [`Map`], the
//! widget without a UI.

use std::sync::Arc;

use galileo::{MapBuilder, Messenger};

use crate::error::ScreenError;
use crate::geo::GeoPoint2d;
use crate::overlay::{Overlay, OverlayCollection};
use crate::tile_source::TileSourcePreset;

mod config;
pub mod layers;
mod state;

pub use config::MapConfig;
pub use state::MapState;

/// Operations the screen needs from a map widget.
///
/// The map engine behind a widget owns tile download, caching and drawing. The screen only
/// configures it through this trait.
pub trait MapWidget {
    /// Replaces the tile source tiles are loaded from.
    fn set_tile_source(&mut self, preset: &TileSourcePreset) -> Result<(), ScreenError>;
    /// Preset of the tile source tiles are currently loaded from.
    fn active_tile_source(&self) -> &TileSourcePreset;

    /// Sets the zoom level. The value is clamped to the zoom range of the active tile source.
    fn set_zoom(&mut self, zoom: f64);
    /// Current zoom level.
    fn zoom(&self) -> f64;

    /// Moves the center of the map to the point.
    fn set_center(&mut self, center: GeoPoint2d);
    /// Current center of the map.
    fn center(&self) -> GeoPoint2d;

    /// Shows or hides the zoom in/out buttons of the widget.
    fn set_builtin_zoom_controls(&mut self, enabled: bool);
    /// Enables or disables two-finger gestures (pinch zoom).
    fn set_multi_touch_controls(&mut self, enabled: bool);

    /// Overlays drawn over the tiles.
    fn overlays(&self) -> &OverlayCollection;
    /// Draws `overlay` over the tiles and the overlays added before it.
    fn add_overlay(&mut self, overlay: Overlay);
}

/// Engine map with the screen state, without a UI.
///
/// UI front ends hold the engine map in their own widget; `Map` is used by tests and headless
/// consumers.
pub struct Map {
    inner: galileo::Map,
    state: MapState,
}

impl Default for Map {
    fn default() -> Self {
        Self::new(empty_engine_map())
    }
}

impl std::fmt::Debug for Map {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map")
            .field("state", &self.state)
            .field("layers", &self.inner.layers().len())
            .finish()
    }
}

impl Map {
    /// Wraps an engine map. The tile layer is added below the layers `inner` already has once
    /// a tile source is set.
    pub fn new(inner: galileo::Map) -> Self {
        Self {
            inner,
            state: MapState::default(),
        }
    }

    /// The engine map.
    pub fn inner(&self) -> &galileo::Map {
        &self.inner
    }

    /// Screen state of the map.
    pub fn state(&self) -> &MapState {
        &self.state
    }

    /// Whether the zoom buttons should be shown.
    pub fn builtin_zoom_controls(&self) -> bool {
        self.state.builtin_zoom_controls()
    }

    /// Whether two-finger gestures are handled.
    pub fn multi_touch_controls(&self) -> bool {
        self.state.multi_touch_controls()
    }

    /// Changes the zoom by `delta` levels.
    pub fn zoom_by(&mut self, delta: f64) {
        self.state.zoom_by(&mut self.inner, delta);
    }

    /// Sets the messenger the map and its tile layers notify when they need to be redrawn.
    pub fn set_messenger(&mut self, messenger: Option<impl Messenger + 'static>) {
        let messenger = messenger.map(|m| Arc::new(m) as Arc<dyn Messenger>);
        self.inner
            .set_messenger(messenger.clone().map(layers::SharedMessenger));
        self.state.set_messenger(messenger);
    }
}

/// Engine map centered at (0, 0) at z-level 0, with no layers.
pub fn empty_engine_map() -> galileo::Map {
    MapBuilder::default()
        .with_latlon(0.0, 0.0)
        .with_resolution(layers::resolution_for_zoom(0.0))
        .build()
}

impl MapWidget for Map {
    fn set_tile_source(&mut self, preset: &TileSourcePreset) -> Result<(), ScreenError> {
        self.state.set_tile_source(&mut self.inner, preset)
    }

    fn active_tile_source(&self) -> &TileSourcePreset {
        self.state.tile_source()
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.state.set_zoom(&mut self.inner, zoom);
    }

    fn zoom(&self) -> f64 {
        self.state.zoom(&self.inner)
    }

    fn set_center(&mut self, center: GeoPoint2d) {
        self.state.set_center(&mut self.inner, center);
    }

    fn center(&self) -> GeoPoint2d {
        self.state.center(&self.inner)
    }

    fn set_builtin_zoom_controls(&mut self, enabled: bool) {
        self.state.set_builtin_zoom_controls(&self.inner, enabled);
    }

    fn set_multi_touch_controls(&mut self, enabled: bool) {
        self.state.set_multi_touch_controls(enabled);
    }

    fn overlays(&self) -> &OverlayCollection {
        self.state.overlays()
    }

    fn add_overlay(&mut self, overlay: Overlay) {
        self.state.add_overlay(&mut self.inner, overlay);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use approx::assert_relative_eq;
    use galileo::layer::Layer;
    use galileo::DummyMessenger;

    use super::*;
    use crate::latlon;
    use crate::overlay::{ConnectorLine, MapMarker};
    use crate::tile_source::{STANDARD, TOPOGRAPHIC, TRANSIT};
    use crate::Color;

    #[derive(Clone, Default)]
    struct CountingMessenger(Arc<AtomicUsize>);

    impl Messenger for CountingMessenger {
        fn request_redraw(&self) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn constructs_map_with_default_parameters() {
        let map = Map::default();
        assert_eq!(map.active_tile_source().id(), "Mapnik");
        assert_eq!(map.zoom(), 0.0);
        assert_relative_eq!(map.center().lat(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(map.center().lon(), 0.0, epsilon = 1e-9);
        assert!(!map.builtin_zoom_controls());
        assert!(!map.multi_touch_controls());
        assert!(map.overlays().is_empty());
        assert!(map.inner().layers().is_empty());
    }

    #[test]
    fn tile_layer_is_replaced_in_place() {
        let mut map = Map::default();
        map.set_tile_source(&STANDARD).unwrap();
        map.add_overlay(MapMarker::new(latlon!(1.0, 2.0), "A", "a").into());
        assert_eq!(map.inner().layers().len(), 2);

        map.set_tile_source(&TRANSIT).unwrap();
        map.set_tile_source(&TOPOGRAPHIC).unwrap();

        let layers = map.inner().layers();
        assert_eq!(layers.len(), 2);
        let attribution = layers.get(0).and_then(|layer| layer.attribution()).unwrap();
        assert!(attribution.get_text().contains("OpenTopoMap"));
        assert!(layers.get(1).and_then(|layer| layer.attribution()).is_none());
    }

    #[test]
    fn overlays_get_their_own_layers() {
        let mut map = Map::default();
        map.set_tile_source(&STANDARD).unwrap();
        map.add_overlay(MapMarker::new(latlon!(1.0, 2.0), "A", "a").into());
        map.add_overlay(
            ConnectorLine::new(latlon!(1.0, 2.0), latlon!(3.0, 4.0), Color::BLUE, 5.0).into(),
        );

        assert_eq!(map.overlays().len(), 2);
        assert_eq!(map.inner().layers().len(), 3);
    }

    #[test]
    fn zoom_is_clamped_to_tile_source() {
        let mut map = Map::default();
        map.set_zoom(19.0);
        assert_eq!(map.zoom(), 19.0);

        map.set_tile_source(&TRANSIT).unwrap();
        assert_eq!(map.zoom(), 18.0);

        map.set_zoom(-3.0);
        assert_eq!(map.zoom(), 0.0);

        map.zoom_by(2.5);
        assert_relative_eq!(map.zoom(), 2.5, epsilon = 1e-9);
    }

    #[test]
    fn switching_source_keeps_center() {
        let mut map = Map::default();
        map.set_center(latlon!(10.0, 20.0));
        map.set_tile_source(&TOPOGRAPHIC).unwrap();

        assert_relative_eq!(map.center().lat(), 10.0, epsilon = 1e-6);
        assert_relative_eq!(map.center().lon(), 20.0, epsilon = 1e-6);
        assert_eq!(map.active_tile_source(), &TOPOGRAPHIC);
    }

    #[test]
    fn changes_request_redraw() {
        let messenger = CountingMessenger::default();
        let mut map = Map::default();
        map.set_messenger(Some(messenger.clone()));

        map.set_zoom(3.0);
        map.set_tile_source(&TRANSIT).unwrap();
        map.add_overlay(MapMarker::new(latlon!(0.0, 0.0), "A", "a").into());
        assert_eq!(messenger.0.load(Ordering::Relaxed), 3);

        map.set_messenger(Some(DummyMessenger {}));
        map.set_zoom(4.0);
        assert_eq!(messenger.0.load(Ordering::Relaxed), 3);
    }
}
