//! Objects drawn on top of the base tiles.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint2d;
use crate::Color;

/// Point of the marker icon that is placed at the marker position, as fractions of the icon
/// width (`u`) and height (`v`) measured from its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Horizontal fraction.
    pub u: f32,
    /// Vertical fraction.
    pub v: f32,
}

impl Anchor {
    /// Middle of the icon along an axis.
    pub const CENTER: f32 = 0.5;
    /// Bottom edge of the icon.
    pub const BOTTOM: f32 = 1.0;

    /// Creates a new anchor.
    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }

    /// Pin-like anchor: horizontally centered, at the bottom edge.
    pub const fn center_bottom() -> Self {
        Self::new(Self::CENTER, Self::BOTTOM)
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::center_bottom()
    }
}

/// Pin placed on the map with a title and a snippet shown in its info window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    position: GeoPoint2d,
    title: String,
    snippet: String,
    #[serde(default)]
    anchor: Anchor,
}

impl MapMarker {
    /// Creates a marker with the [center-bottom](Anchor::center_bottom) anchor.
    pub fn new(position: GeoPoint2d, title: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            position,
            title: title.into(),
            snippet: snippet.into(),
            anchor: Anchor::default(),
        }
    }

    /// Replaces the anchor of the marker.
    pub fn with_anchor(self, anchor: Anchor) -> Self {
        Self { anchor, ..self }
    }

    /// Position of the marker.
    pub fn position(&self) -> GeoPoint2d {
        self.position
    }

    /// Title of the marker.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Secondary text of the marker.
    pub fn snippet(&self) -> &str {
        &self.snippet
    }

    /// Anchor of the marker icon.
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }
}

/// Straight line between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorLine {
    points: [GeoPoint2d; 2],
    color: Color,
    width: f32,
}

impl ConnectorLine {
    /// Creates a line going from `start` to `end`.
    pub fn new(start: GeoPoint2d, end: GeoPoint2d, color: Color, width: f32) -> Self {
        Self {
            points: [start, end],
            color,
            width,
        }
    }

    /// Ends of the line, in order.
    pub fn points(&self) -> &[GeoPoint2d; 2] {
        &self.points
    }

    /// Stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Stroke width in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }
}

/// Anything that can be added to an [`OverlayCollection`].
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    /// A marker.
    Marker(MapMarker),
    /// A line.
    Line(ConnectorLine),
}

impl From<MapMarker> for Overlay {
    fn from(value: MapMarker) -> Self {
        Self::Marker(value)
    }
}

impl From<ConnectorLine> for Overlay {
    fn from(value: ConnectorLine) -> Self {
        Self::Line(value)
    }
}

/// Ordered collection of the overlays of a map.
///
/// Overlays are drawn in the order they were added. The collection is append-only: once added,
/// an overlay stays unchanged for the lifetime of the map.
#[derive(Debug, Default, Clone)]
pub struct OverlayCollection(Vec<Overlay>);

impl OverlayCollection {
    /// Appends an overlay at the top of the collection.
    pub fn push(&mut self, overlay: impl Into<Overlay>) {
        let overlay = overlay.into();
        log::trace!("Adding overlay {overlay:?}");
        self.0.push(overlay);
    }

    /// Number of overlays.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no overlays were added.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the overlay at the index.
    pub fn get(&self, index: usize) -> Option<&Overlay> {
        self.0.get(index)
    }

    /// Iterates over overlays in drawing order.
    pub fn iter(&self) -> impl Iterator<Item = &Overlay> + '_ {
        self.0.iter()
    }

    /// Iterates over markers in drawing order.
    pub fn markers(&self) -> impl Iterator<Item = &MapMarker> + '_ {
        self.0.iter().filter_map(|overlay| match overlay {
            Overlay::Marker(marker) => Some(marker),
            Overlay::Line(_) => None,
        })
    }

    /// Iterates over lines in drawing order.
    pub fn lines(&self) -> impl Iterator<Item = &ConnectorLine> + '_ {
        self.0.iter().filter_map(|overlay| match overlay {
            Overlay::Line(line) => Some(line),
            Overlay::Marker(_) => None,
        })
    }
}

impl Index<usize> for OverlayCollection {
    type Output = Overlay;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}
