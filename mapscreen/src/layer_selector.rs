use crate::error::ScreenError;
use crate::map::MapWidget;
use crate::tile_source::{TileSourcePreset, PRESETS};

/// Map type dropdown: holds the selected preset and swaps the tile source of the map when the
/// selection changes.
#[derive(Debug, Clone)]
pub struct MapLayerSelector {
    presets: &'static [TileSourcePreset],
    selected: usize,
}

impl Default for MapLayerSelector {
    fn default() -> Self {
        Self::new(&PRESETS)
    }
}

impl MapLayerSelector {
    /// Creates a selector over the given presets with the first one selected.
    ///
    /// # Panics
    ///
    /// Panics if `presets` is empty.
    pub fn new(presets: &'static [TileSourcePreset]) -> Self {
        assert!(!presets.is_empty(), "selector needs at least one preset");
        Self {
            presets,
            selected: 0,
        }
    }

    /// Presets in the order they are offered.
    pub fn choices(&self) -> &'static [TileSourcePreset] {
        self.presets
    }

    /// Index of the selected preset.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The selected preset.
    pub fn selected_preset(&self) -> &'static TileSourcePreset {
        &self.presets[self.selected]
    }

    /// Selects the preset at `index` and makes it the tile source of the widget.
    ///
    /// Selecting the already selected preset applies it again, which leaves the widget as it
    /// was. An out-of-range index, or a tile layer that cannot be created, changes nothing.
    pub fn select(
        &mut self,
        index: usize,
        widget: &mut impl MapWidget,
    ) -> Result<&'static TileSourcePreset, ScreenError> {
        let presets = self.presets;
        let preset = presets.get(index).ok_or(ScreenError::InvalidPresetIndex {
            index,
            len: presets.len(),
        })?;

        log::info!("Map type selected: {}", preset.display_name());
        widget.set_tile_source(preset)?;
        self.selected = index;

        Ok(preset)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::map::{Map, MapConfig};
    use crate::tile_source::{STANDARD, TOPOGRAPHIC, TRANSIT};

    fn configured_map() -> Map {
        let mut map = Map::default();
        MapConfig::default().apply(&mut map).unwrap();
        map
    }

    #[test]
    fn offers_three_presets() {
        let selector = MapLayerSelector::default();
        let names: Vec<_> = selector
            .choices()
            .iter()
            .map(|preset| preset.display_name())
            .collect();
        assert_eq!(names, ["Standard Map", "Transit Map", "Topographic Map"]);
        assert_eq!(selector.selected(), 0);
        assert_eq!(selector.selected_preset(), &STANDARD);
    }

    #[test]
    fn selection_sets_tile_source() {
        let mut map = configured_map();
        let mut selector = MapLayerSelector::default();

        for (index, expected) in [STANDARD, TRANSIT, TOPOGRAPHIC].iter().enumerate() {
            let preset = selector.select(index, &mut map).unwrap();
            assert_eq!(preset, expected);
            assert_eq!(map.active_tile_source(), expected);
            assert_eq!(selector.selected(), index);
        }
    }

    #[test]
    fn reselecting_is_idempotent() {
        let mut map = configured_map();
        let mut selector = MapLayerSelector::default();

        selector.select(1, &mut map).unwrap();
        let zoom = map.zoom();
        let center = map.center();
        let layers = map.inner().layers().len();

        selector.select(1, &mut map).unwrap();
        assert_eq!(map.active_tile_source(), &TRANSIT);
        assert_eq!(map.zoom(), zoom);
        assert_eq!(map.center(), center);
        assert_eq!(map.inner().layers().len(), layers);
        assert_eq!(map.overlays().len(), 3);
        assert_eq!(selector.selected(), 1);
    }

    #[test]
    fn out_of_range_selection_changes_nothing() {
        let mut map = configured_map();
        let mut selector = MapLayerSelector::default();
        selector.select(2, &mut map).unwrap();

        assert_matches!(
            selector.select(3, &mut map),
            Err(ScreenError::InvalidPresetIndex { index: 3, len: 3 })
        );
        assert_eq!(map.active_tile_source(), &TOPOGRAPHIC);
        assert_eq!(selector.selected(), 2);
    }
}
