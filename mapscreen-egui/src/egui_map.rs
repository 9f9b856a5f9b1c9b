use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use egui::{Align2, Ui};
use galileo_egui::{EguiMap, EguiMapState};
use mapscreen::error::ScreenError;
use mapscreen::geo::GeoPoint2d;
use mapscreen::map::{MapState, MapWidget};
use mapscreen::overlay::{Overlay, OverlayCollection};
use mapscreen::tile_source::TileSourcePreset;
use mapscreen::Messenger;

const CONTROLS_OFFSET: [f32; 2] = [-10.0, -50.0];
const LEGEND_OFFSET: [f32; 2] = [10.0, -10.0];

/// Map widget the screen app can draw.
pub trait MapUi: MapWidget {
    /// Draws the map into all the space available in `ui` and handles user input over it.
    fn show_ui(&mut self, ui: &mut Ui);
}

/// Galileo map shown in egui, configured by the screen through [`MapWidget`].
///
/// Tiles, markers and the line are layers of the galileo map. Dragging pans the map and
/// scrolling zooms it. Zoom buttons and pinch zoom follow the controls set on the widget. The
/// titles and snippets of the markers are listed in a collapsible window.
pub struct EguiMapWidget {
    map: EguiMapState,
    state: MapState,
    messenger: EguiMessenger,
}

impl EguiMapWidget {
    /// Creates a widget showing `map`. Tile layers created by the widget repaint `ctx` when
    /// their tiles arrive.
    pub fn new(map: EguiMapState, ctx: &egui::Context) -> Self {
        let messenger = EguiMessenger::new(ctx.clone());
        let mut state = MapState::default();
        state.set_messenger(Some(Arc::new(messenger.clone())));

        Self {
            map,
            state,
            messenger,
        }
    }

    /// Messenger that repaints the egui context and redraws the map on the next frame.
    pub fn messenger(&self) -> &EguiMessenger {
        &self.messenger
    }

    fn show_zoom_controls(&mut self, ctx: &egui::Context) {
        let mut delta = 0.0;
        egui::Window::new("Zoom")
            .title_bar(false)
            .resizable(false)
            .anchor(Align2::RIGHT_BOTTOM, CONTROLS_OFFSET)
            .auto_sized()
            .show(ctx, |ui| {
                if ui.button("+").clicked() {
                    delta += 1.0;
                }
                if ui.button("−").clicked() {
                    delta -= 1.0;
                }
            });

        if delta != 0.0 {
            self.state.zoom_by(self.map.map_mut(), delta);
        }
    }

    fn show_marker_legend(&self, ctx: &egui::Context) {
        if self.state.overlays().markers().next().is_none() {
            return;
        }

        egui::Window::new("Markers")
            .resizable(false)
            .default_open(false)
            .anchor(Align2::LEFT_BOTTOM, LEGEND_OFFSET)
            .auto_sized()
            .show(ctx, |ui| {
                for marker in self.state.overlays().markers() {
                    ui.strong(marker.title());
                    ui.label(marker.snippet());
                }
            });
    }

    fn handle_pinch(&mut self, ui: &Ui, rect: egui::Rect) {
        let Some(touch) = ui.input(|input| input.multi_touch()) else {
            return;
        };

        if !rect.contains(touch.center_pos) {
            return;
        }

        let delta = pinch_zoom_levels(touch.zoom_delta);
        if delta != 0.0 {
            self.state.zoom_by(self.map.map_mut(), delta);
        }
    }
}

impl MapUi for EguiMapWidget {
    fn show_ui(&mut self, ui: &mut Ui) {
        if self.messenger.take_pending() {
            self.map.request_redraw();
        }

        if self.state.multi_touch_controls() {
            let rect = ui.available_rect_before_wrap();
            self.handle_pinch(ui, rect);
        }

        EguiMap::new(&mut self.map).show_ui(ui);

        if self.state.builtin_zoom_controls() {
            self.show_zoom_controls(ui.ctx());
        }
        self.show_marker_legend(ui.ctx());
    }
}

impl MapWidget for EguiMapWidget {
    fn set_tile_source(&mut self, preset: &TileSourcePreset) -> Result<(), ScreenError> {
        self.state.set_tile_source(self.map.map_mut(), preset)
    }

    fn active_tile_source(&self) -> &TileSourcePreset {
        self.state.tile_source()
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.state.set_zoom(self.map.map_mut(), zoom);
    }

    fn zoom(&self) -> f64 {
        self.state.zoom(self.map.map())
    }

    fn set_center(&mut self, center: GeoPoint2d) {
        self.state.set_center(self.map.map_mut(), center);
    }

    fn center(&self) -> GeoPoint2d {
        self.state.center(self.map.map())
    }

    fn set_builtin_zoom_controls(&mut self, enabled: bool) {
        self.state.set_builtin_zoom_controls(self.map.map(), enabled);
    }

    fn set_multi_touch_controls(&mut self, enabled: bool) {
        self.state.set_multi_touch_controls(enabled);
    }

    fn overlays(&self) -> &OverlayCollection {
        self.state.overlays()
    }

    fn add_overlay(&mut self, overlay: Overlay) {
        self.state.add_overlay(self.map.map_mut(), overlay);
    }
}

/// Number of zoom levels a pinch changing the finger distance by `factor` zooms in.
fn pinch_zoom_levels(factor: f32) -> f64 {
    if factor <= 0.0 {
        return 0.0;
    }

    (factor as f64).log2()
}

/// [`Messenger`] that schedules a repaint of an egui context.
///
/// The request is remembered until the map widget takes it, so that the map is drawn again on
/// the next frame and not just the UI around it.
#[derive(Debug, Clone)]
pub struct EguiMessenger {
    context: egui::Context,
    pending: Arc<AtomicBool>,
}

impl EguiMessenger {
    /// Creates a messenger for the context.
    pub fn new(context: egui::Context) -> Self {
        Self {
            context,
            pending: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns whether a redraw was requested since the last call.
    pub fn take_pending(&self) -> bool {
        self.pending.swap(false, Ordering::Relaxed)
    }
}

impl Messenger for EguiMessenger {
    fn request_redraw(&self) {
        log::trace!("Redraw requested");
        self.pending.store(true, Ordering::Relaxed);
        self.context.request_repaint();
    }
}
