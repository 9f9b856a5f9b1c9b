use std::sync::Arc;

use galileo::Messenger;

use super::layers::{self, resolution_for_zoom, zoom_for_resolution};
use crate::error::ScreenError;
use crate::geo::GeoPoint2d;
use crate::overlay::{Overlay, OverlayCollection};
use crate::tile_source::{TileSourcePreset, STANDARD};

/// What the screen keeps next to an engine map: the active tile preset, user controls and the
/// overlays.
///
/// The methods operate on the engine [`galileo::Map`] given to them. The tile layer of the
/// active preset is always the bottom layer of that map, and each overlay gets its own layer
/// on top of it, in the order the overlays were added.
pub struct MapState {
    tile_source: TileSourcePreset,
    has_tile_layer: bool,
    builtin_zoom_controls: bool,
    multi_touch_controls: bool,
    overlays: OverlayCollection,
    messenger: Option<Arc<dyn Messenger>>,
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            tile_source: STANDARD,
            has_tile_layer: false,
            builtin_zoom_controls: false,
            multi_touch_controls: false,
            overlays: OverlayCollection::default(),
            messenger: None,
        }
    }
}

impl std::fmt::Debug for MapState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapState")
            .field("tile_source", &self.tile_source.id())
            .field("builtin_zoom_controls", &self.builtin_zoom_controls)
            .field("multi_touch_controls", &self.multi_touch_controls)
            .field("overlays", &self.overlays.len())
            .finish()
    }
}

impl MapState {
    /// Sets the messenger tile layers notify when a tile is loaded. Applies to tile layers
    /// created after the call.
    pub fn set_messenger(&mut self, messenger: Option<Arc<dyn Messenger>>) {
        self.messenger = messenger;
    }

    /// Replaces the tile layer of `map` with one loading tiles from `preset`, then clamps the
    /// zoom to the range of the new source. On error the map keeps its current tile layer.
    pub fn set_tile_source(
        &mut self,
        map: &mut galileo::Map,
        preset: &TileSourcePreset,
    ) -> Result<(), ScreenError> {
        let layer = layers::tile_layer(preset.source(), self.messenger.clone())?;

        let map_layers = map.layers_mut();
        if self.has_tile_layer {
            map_layers.remove(0);
        }
        map_layers.insert(0, layer);

        log::debug!("Switched tile source to {}", preset.id());
        self.has_tile_layer = true;
        self.tile_source = *preset;

        let zoom = self.zoom(map);
        self.set_zoom(map, zoom);

        Ok(())
    }

    /// Preset of the current tile layer.
    pub fn tile_source(&self) -> &TileSourcePreset {
        &self.tile_source
    }

    /// Current zoom level of `map`.
    pub fn zoom(&self, map: &galileo::Map) -> f64 {
        zoom_for_resolution(map.view().resolution())
    }

    /// Sets the zoom level of `map`, clamped to the range of the active tile source.
    pub fn set_zoom(&self, map: &mut galileo::Map, zoom: f64) {
        let zoom = self.tile_source.source().clamp_zoom(zoom);
        let view = map.view().with_resolution(resolution_for_zoom(zoom));
        map.set_view(view);
    }

    /// Changes the zoom level of `map` by `delta`.
    pub fn zoom_by(&self, map: &mut galileo::Map, delta: f64) {
        let zoom = self.zoom(map);
        self.set_zoom(map, zoom + delta);
    }

    /// Current center of `map`.
    pub fn center(&self, map: &galileo::Map) -> GeoPoint2d {
        map.view().position().map(GeoPoint2d::from).unwrap_or_default()
    }

    /// Moves the center of `map` to the point.
    pub fn set_center(&self, map: &mut galileo::Map, center: GeoPoint2d) {
        let position: galileo_types::geo::impls::GeoPoint2d = center.into();
        let view = map.view().with_position(&position);
        map.set_view(view);
    }

    /// Whether the zoom buttons are shown.
    pub fn builtin_zoom_controls(&self) -> bool {
        self.builtin_zoom_controls
    }

    /// Shows or hides the zoom buttons.
    pub fn set_builtin_zoom_controls(&mut self, map: &galileo::Map, enabled: bool) {
        self.builtin_zoom_controls = enabled;
        map.redraw();
    }

    /// Whether pinch gestures zoom the map.
    pub fn multi_touch_controls(&self) -> bool {
        self.multi_touch_controls
    }

    /// Enables or disables pinch gestures.
    pub fn set_multi_touch_controls(&mut self, enabled: bool) {
        self.multi_touch_controls = enabled;
    }

    /// Overlays added to the map.
    pub fn overlays(&self) -> &OverlayCollection {
        &self.overlays
    }

    /// Adds a layer drawing `overlay` at the top of `map`.
    pub fn add_overlay(&mut self, map: &mut galileo::Map, overlay: Overlay) {
        match &overlay {
            Overlay::Marker(marker) => map.layers_mut().push(layers::marker_layer(marker)),
            Overlay::Line(line) => map.layers_mut().push(layers::line_layer(line)),
        }

        self.overlays.push(overlay);
        map.redraw();
    }
}
