use serde::{Deserialize, Serialize};

use super::MapWidget;
use crate::error::ScreenError;
use crate::geo::GeoPoint2d;
use crate::latlon;
use crate::overlay::{ConnectorLine, MapMarker};
use crate::tile_source::PRESETS;
use crate::Color;

const INSTITUTE: GeoPoint2d = latlon!(-33.4493141, -70.6624069);
const GYM: GeoPoint2d = latlon!(-33.460973, -70.640032);

/// Initial setup of the map widget of the screen, applied once with [`MapConfig::apply`].
///
/// ```
/// use mapscreen::map::{Map, MapConfig, MapWidget};
///
/// let mut map = Map::default();
/// MapConfig::default().with_zoom(12.0).apply(&mut map)?;
///
/// assert_eq!(map.zoom(), 12.0);
/// assert_eq!(map.overlays().len(), 3);
/// assert_eq!(map.inner().layers().len(), 4);
/// # Ok::<(), mapscreen::error::ScreenError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    center: GeoPoint2d,
    zoom: f64,
    initial_preset: usize,
    markers: Vec<MapMarker>,
    line: Option<ConnectorLine>,
    builtin_zoom_controls: bool,
    multi_touch_controls: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: INSTITUTE,
            zoom: 15.0,
            initial_preset: 0,
            markers: vec![
                MapMarker::new(INSTITUTE, "IP Santo Tomás, Chile", "Un Instituto Tomista"),
                MapMarker::new(GYM, "Gimmnasio Smart Fit Grajales", "Un Parque"),
            ],
            line: Some(ConnectorLine::new(
                INSTITUTE,
                GYM,
                Color::from_argb(0xFF0000FF),
                5.0,
            )),
            builtin_zoom_controls: true,
            multi_touch_controls: true,
        }
    }
}

impl MapConfig {
    /// Sets the initial center of the map.
    pub fn with_center(mut self, center: GeoPoint2d) -> Self {
        self.center = center;
        self
    }

    /// Sets the initial zoom level.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Sets the index of the preset in [`PRESETS`] the map starts with.
    pub fn with_initial_preset(mut self, index: usize) -> Self {
        self.initial_preset = index;
        self
    }

    /// Replaces the markers.
    pub fn with_markers(mut self, markers: Vec<MapMarker>) -> Self {
        self.markers = markers;
        self
    }

    /// Replaces the line drawn over the markers.
    pub fn with_line(mut self, line: Option<ConnectorLine>) -> Self {
        self.line = line;
        self
    }

    /// Enables or disables zoom buttons and multi-touch gestures.
    pub fn with_controls(mut self, builtin_zoom_controls: bool, multi_touch_controls: bool) -> Self {
        self.builtin_zoom_controls = builtin_zoom_controls;
        self.multi_touch_controls = multi_touch_controls;
        self
    }

    /// Initial center of the map.
    pub fn center(&self) -> GeoPoint2d {
        self.center
    }

    /// Initial zoom level.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Index of the initial preset.
    pub fn initial_preset(&self) -> usize {
        self.initial_preset
    }

    /// Markers added to the map.
    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    /// Line added over the markers.
    pub fn line(&self) -> Option<&ConnectorLine> {
        self.line.as_ref()
    }

    /// Applies the configuration to the widget.
    ///
    /// Sets the tile source, the controls, the zoom and the center, then adds the markers and
    /// the line over the tiles. Nothing is applied if the initial preset index is invalid.
    pub fn apply(&self, widget: &mut impl MapWidget) -> Result<(), ScreenError> {
        let preset = PRESETS
            .get(self.initial_preset)
            .ok_or(ScreenError::InvalidPresetIndex {
                index: self.initial_preset,
                len: PRESETS.len(),
            })?;

        widget.set_tile_source(preset)?;
        widget.set_builtin_zoom_controls(self.builtin_zoom_controls);
        widget.set_multi_touch_controls(self.multi_touch_controls);
        widget.set_zoom(self.zoom);
        widget.set_center(self.center);

        for marker in &self.markers {
            widget.add_overlay(marker.clone().into());
        }
        if let Some(line) = &self.line {
            widget.add_overlay(line.clone().into());
        }

        log::debug!(
            "Map configured: {} markers, line: {}, preset: {}",
            self.markers.len(),
            self.line.is_some(),
            preset.id()
        );

        Ok(())
    }
}
