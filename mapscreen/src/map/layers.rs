//! Map engine layers built from tile sources and overlays.

use std::sync::Arc;

use galileo::error::GalileoError;
use galileo::layer::feature_layer::FeatureLayer;
use galileo::layer::raster_tile_layer::RasterTileLayerBuilder;
use galileo::layer::{Layer, RasterTileLayer};
use galileo::symbol::{CirclePointSymbol, SimpleContourSymbol};
use galileo::tile_schema::TileIndex;
use galileo::{Messenger, TileSchema};
use galileo_types::geo::impls::GeoPoint2d;
use galileo_types::geo::Crs;
use galileo_types::geometry_type::GeoSpace2d;
use galileo_types::impls::Contour;
use galileo_types::Disambig;

use crate::overlay::{ConnectorLine, MapMarker};
use crate::tile_source::TileSource;

// resolution of z-level 0 on the standard web tile scheme
const TOP_RESOLUTION: f64 = 156_543.033_928_000_14;

const MARKER_COLOR: galileo::Color = galileo::Color::RED;
const MARKER_SIZE: f64 = 14.0;

/// Map resolution (meters per pixel) of a fractional zoom level.
pub fn resolution_for_zoom(zoom: f64) -> f64 {
    TOP_RESOLUTION / 2f64.powf(zoom)
}

/// Fractional zoom level of a map resolution. Inverse of [`resolution_for_zoom`].
pub fn zoom_for_resolution(resolution: f64) -> f64 {
    (TOP_RESOLUTION / resolution).log2()
}

/// Shares one messenger between the map and its layers.
pub(crate) struct SharedMessenger(pub(crate) Arc<dyn Messenger>);

impl Messenger for SharedMessenger {
    fn request_redraw(&self) {
        self.0.request_redraw();
    }
}

/// Raster layer loading its tiles from `source`.
///
/// Tile URLs rotate over the base URLs of the source. The tile scheme stops at the highest
/// z-level the source serves, so no tiles above it are ever requested. `messenger` is notified
/// when a tile is loaded.
pub fn tile_layer(
    source: &TileSource,
    messenger: Option<Arc<dyn Messenger>>,
) -> Result<RasterTileLayer, GalileoError> {
    let source = *source;
    let mut builder = RasterTileLayerBuilder::new_rest(move |index: &TileIndex| {
        source.tile_url(index).unwrap_or_default()
    })
    .with_tile_schema(TileSchema::web(source.max_zoom() + 1));

    if let Some(attribution) = source.attribution() {
        builder = builder.with_attribution(
            attribution.text().to_owned(),
            attribution.url().unwrap_or_default().to_owned(),
        );
    }

    if let Some(messenger) = messenger {
        builder = builder.with_messenger(SharedMessenger(messenger));
    }

    builder.build()
}

/// Layer drawing a marker as a dot at its position.
pub fn marker_layer(marker: &MapMarker) -> impl Layer {
    let position: GeoPoint2d = marker.position().into();
    FeatureLayer::new(
        vec![position],
        CirclePointSymbol::new(MARKER_COLOR, MARKER_SIZE),
        Crs::WGS84,
    )
}

/// Layer drawing a line with its color and width.
pub fn line_layer(line: &ConnectorLine) -> impl Layer {
    let points: Vec<GeoPoint2d> = line.points().iter().map(|&p| p.into()).collect();
    let contour: Disambig<Contour<GeoPoint2d>, GeoSpace2d> = Disambig::new(Contour::open(points));

    FeatureLayer::new(
        vec![contour],
        SimpleContourSymbol::new(line.color().into(), line.width() as f64),
        Crs::WGS84,
    )
}
