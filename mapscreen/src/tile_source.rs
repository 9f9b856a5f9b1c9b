//! Raster tile sources and the fixed set of presets offered by the map type selector.

pub use galileo::tile_schema::TileIndex;

/// Credit line a tile provider requires to be displayed next to its tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribution {
    text: &'static str,
    url: Option<&'static str>,
}

impl Attribution {
    /// Creates a new `Attribution` with the given text and optional URL.
    pub const fn new(text: &'static str, url: Option<&'static str>) -> Self {
        Self { text, url }
    }

    /// Text of the attribution.
    pub fn text(&self) -> &'static str {
        self.text
    }

    /// URL with more information about the attribution, if any.
    pub fn url(&self) -> Option<&'static str> {
        self.url
    }
}

/// XYZ raster tile source: a set of equivalent base URLs plus the grid parameters.
///
/// The URL of a tile is `{base_url}{z}/{x}/{y}{extension}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSource {
    name: &'static str,
    min_zoom: u32,
    max_zoom: u32,
    tile_size: u32,
    extension: &'static str,
    base_urls: &'static [&'static str],
    attribution: Option<Attribution>,
}

impl TileSource {
    /// Creates a new tile source. `base_urls` must not be empty.
    pub const fn new(
        name: &'static str,
        min_zoom: u32,
        max_zoom: u32,
        tile_size: u32,
        extension: &'static str,
        base_urls: &'static [&'static str],
    ) -> Self {
        assert!(!base_urls.is_empty(), "tile source without base urls");
        assert!(min_zoom <= max_zoom, "invalid zoom range");

        Self {
            name,
            min_zoom,
            max_zoom,
            tile_size,
            extension,
            base_urls,
            attribution: None,
        }
    }

    /// Sets the attribution of the source.
    pub const fn with_attribution(self, attribution: Attribution) -> Self {
        Self {
            attribution: Some(attribution),
            ..self
        }
    }

    /// Name of the source, used as its identity by the tile cache of the map engine.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Lowest z-level the source serves.
    pub fn min_zoom(&self) -> u32 {
        self.min_zoom
    }

    /// Highest z-level the source serves.
    pub fn max_zoom(&self) -> u32 {
        self.max_zoom
    }

    /// Width and height of a tile in pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// File extension appended to tile paths, including the dot.
    pub fn extension(&self) -> &'static str {
        self.extension
    }

    /// Base URLs tiles are requested from.
    pub fn base_urls(&self) -> &'static [&'static str] {
        self.base_urls
    }

    /// Attribution of the provider.
    pub fn attribution(&self) -> Option<Attribution> {
        self.attribution
    }

    /// Base URL the given tile is requested from. Tiles are spread over the hosts by
    /// `(x + y) mod hosts`, so the same tile always goes to the same host.
    pub fn base_url_for(&self, index: &TileIndex) -> &'static str {
        let hosts = self.base_urls.len() as i64;
        let host = (index.x as i64 + index.y as i64).rem_euclid(hosts);
        self.base_urls[host as usize]
    }

    /// Returns the URL of the tile, or `None` if the source does not contain it.
    ///
    /// ```
    /// use mapscreen::tile_source::{TileIndex, PRESETS};
    ///
    /// let url = PRESETS[1].source().tile_url(&TileIndex::new(4, 9, 4));
    /// assert_eq!(url.as_deref(), Some("https://tile.memomaps.de/tilegen/4/4/9.png"));
    /// ```
    pub fn tile_url(&self, index: &TileIndex) -> Option<String> {
        if !self.contains(index) {
            return None;
        }

        Some(format!(
            "{}{}/{}/{}{}",
            self.base_url_for(index),
            index.z,
            index.x,
            index.y,
            self.extension
        ))
    }

    /// Returns true if the tile exists in the source.
    pub fn contains(&self, index: &TileIndex) -> bool {
        if index.z < self.min_zoom || index.z > self.max_zoom {
            return false;
        }

        let tiles = 1i64 << index.z;
        (0..tiles).contains(&(index.x as i64)) && (0..tiles).contains(&(index.y as i64))
    }

    /// Clamps a fractional zoom level to the range the source serves.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom as f64, self.max_zoom as f64)
    }
}

/// One choice of the map type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSourcePreset {
    id: &'static str,
    display_name: &'static str,
    source: TileSource,
}

impl TileSourcePreset {
    /// Creates a new preset.
    pub const fn new(id: &'static str, display_name: &'static str, source: TileSource) -> Self {
        Self {
            id,
            display_name,
            source,
        }
    }

    /// Identifier of the preset.
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Label shown in the selector.
    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Tile source applied to the map when the preset is selected.
    pub fn source(&self) -> &TileSource {
        &self.source
    }
}

const OSM_ATTRIBUTION: Attribution = Attribution::new(
    "© OpenStreetMap contributors",
    Some("https://www.openstreetmap.org/copyright"),
);

/// Default OpenStreetMap rendering.
pub const STANDARD: TileSourcePreset = TileSourcePreset::new(
    "Mapnik",
    "Standard Map",
    TileSource::new(
        "Mapnik",
        0,
        19,
        256,
        ".png",
        &[
            "https://a.tile.openstreetmap.org/",
            "https://b.tile.openstreetmap.org/",
            "https://c.tile.openstreetmap.org/",
        ],
    )
    .with_attribution(OSM_ATTRIBUTION),
);

/// ÖPNVKarte public transport map.
pub const TRANSIT: TileSourcePreset = TileSourcePreset::new(
    "PublicTransport",
    "Transit Map",
    TileSource::new(
        "PublicTransport",
        0,
        18,
        256,
        ".png",
        &["https://tile.memomaps.de/tilegen/"],
    )
    .with_attribution(Attribution::new(
        "Map memomaps.de CC-BY-SA, map data © OpenStreetMap contributors",
        Some("https://memomaps.de/"),
    )),
);

/// OpenTopoMap topographic map.
///
/// The `USGS_Satellite` id does not describe these tiles. It is kept as is because it is the
/// cache identity existing installations already use for them.
pub const TOPOGRAPHIC: TileSourcePreset = TileSourcePreset::new(
    "USGS_Satellite",
    "Topographic Map",
    TileSource::new(
        "USGS_Satellite",
        0,
        18,
        256,
        ".png",
        &[
            "https://a.tile.opentopomap.org/",
            "https://b.tile.opentopomap.org/",
            "https://c.tile.opentopomap.org/",
        ],
    )
    .with_attribution(Attribution::new(
        "Map data: © OpenStreetMap contributors, SRTM | Map style: © OpenTopoMap (CC-BY-SA)",
        Some("https://opentopomap.org/"),
    )),
);

/// Presets in the order they are offered. Index 0 is the default.
pub const PRESETS: [TileSourcePreset; 3] = [STANDARD, TRANSIT, TOPOGRAPHIC];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_table() {
        let names: Vec<_> = PRESETS.iter().map(|p| p.display_name()).collect();
        assert_eq!(names, ["Standard Map", "Transit Map", "Topographic Map"]);

        let ids: Vec<_> = PRESETS.iter().map(|p| p.id()).collect();
        assert_eq!(ids, ["Mapnik", "PublicTransport", "USGS_Satellite"]);

        assert_eq!(
            PRESETS[1].source().base_urls(),
            ["https://tile.memomaps.de/tilegen/"]
        );
        assert_eq!(
            PRESETS[2].source().base_urls(),
            [
                "https://a.tile.opentopomap.org/",
                "https://b.tile.opentopomap.org/",
                "https://c.tile.opentopomap.org/",
            ]
        );

        for preset in &PRESETS {
            assert_eq!(preset.source().tile_size(), 256);
            assert_eq!(preset.source().extension(), ".png");
            assert_eq!(preset.source().min_zoom(), 0);
            assert!(preset.source().attribution().is_some());
        }
        assert_eq!(PRESETS[0].source().max_zoom(), 19);
        assert_eq!(PRESETS[1].source().max_zoom(), 18);
        assert_eq!(PRESETS[2].source().max_zoom(), 18);
    }

    #[test]
    fn tile_urls_rotate_over_hosts() {
        let source = TOPOGRAPHIC.source();
        assert_eq!(
            source.tile_url(&TileIndex::new(0, 0, 1)).as_deref(),
            Some("https://a.tile.opentopomap.org/1/0/0.png")
        );
        assert_eq!(
            source.tile_url(&TileIndex::new(1, 0, 1)).as_deref(),
            Some("https://b.tile.opentopomap.org/1/1/0.png")
        );
        assert_eq!(
            source.tile_url(&TileIndex::new(1, 1, 1)).as_deref(),
            Some("https://c.tile.opentopomap.org/1/1/1.png")
        );
        assert_eq!(
            source.tile_url(&TileIndex::new(2, 1, 2)).as_deref(),
            Some("https://a.tile.opentopomap.org/2/2/1.png")
        );
        assert_eq!(
            source.tile_url(&TileIndex::new(9952, 19617, 15)).as_deref(),
            Some("https://b.tile.opentopomap.org/15/9952/19617.png")
        );
    }

    #[test]
    fn tiles_outside_of_source_have_no_url() {
        let source = TRANSIT.source();
        assert_eq!(source.tile_url(&TileIndex::new(0, 0, 19)), None);
        assert_eq!(source.tile_url(&TileIndex::new(2, 0, 1)), None);
        assert_eq!(source.tile_url(&TileIndex::new(0, 2, 1)), None);
        assert_eq!(source.tile_url(&TileIndex::new(-1, 0, 1)), None);
        assert!(STANDARD.source().contains(&TileIndex::new(0, 0, 19)));
    }
}
