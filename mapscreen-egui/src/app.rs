use std::sync::Arc;

use egui::load::SizedTexture;
use egui::{TextureHandle, TextureOptions};
use mapscreen::error::ScreenError;
use mapscreen::{MainScreen, Messenger, ScreenConfig};

use crate::egui_map::{EguiMapWidget, MapUi};
use crate::images;

const IMAGE_MAX_HEIGHT: f32 = 160.0;

/// Map screen rendered with egui: status label, spinner and image in the top panel, followed by
/// the map type selector, with the map filling the rest of the window.
pub struct ScreenApp<W: MapUi = EguiMapWidget> {
    screen: MainScreen<W>,
    image: Option<TextureHandle>,
    image_failed: bool,
}

impl<W: MapUi> ScreenApp<W> {
    /// Creates the screen showing `map`. `messenger` wakes the UI up when the reveal timer
    /// fires. Must be called within a tokio runtime.
    pub fn new(
        map: W,
        messenger: Option<Arc<dyn Messenger>>,
        config: ScreenConfig,
    ) -> Result<Self, ScreenError> {
        let screen = MainScreen::create(config, map, messenger)?;

        Ok(Self {
            screen,
            image: None,
            image_failed: false,
        })
    }

    /// State of the screen.
    pub fn screen(&self) -> &MainScreen<W> {
        &self.screen
    }

    /// Mutable state of the screen.
    pub fn screen_mut(&mut self) -> &mut MainScreen<W> {
        &mut self.screen
    }

    /// Texture of the revealed image, once it is loaded.
    pub fn image_texture(&self) -> Option<&TextureHandle> {
        self.image.as_ref()
    }

    /// Processes pending messages and draws the screen.
    pub fn show(&mut self, ctx: &egui::Context) {
        self.screen.process_messages();
        self.load_image(ctx);

        let reveal = self.screen.reveal();
        let label = reveal.label_text().to_owned();
        let progress_visible = reveal.progress_visible();
        let image_visible = reveal.image_visible();

        let selector = self.screen.selector();
        let choices = selector.choices();
        let mut selected = selector.selected();

        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if progress_visible {
                    ui.spinner();
                }
                ui.label(label);
            });

            if image_visible {
                if let Some(texture) = &self.image {
                    ui.add(
                        egui::Image::new(SizedTexture::from_handle(texture))
                            .max_height(IMAGE_MAX_HEIGHT),
                    );
                }
            }

            egui::ComboBox::from_label("Map type")
                .selected_text(choices[selected].display_name())
                .show_ui(ui, |ui| {
                    for (index, preset) in choices.iter().enumerate() {
                        ui.selectable_value(&mut selected, index, preset.display_name());
                    }
                });
        });

        if selected != self.screen.selector().selected() {
            if let Err(err) = self.screen.select_map_type(selected) {
                log::error!("Failed to change map type: {err}");
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.screen.map_mut().show_ui(ui);
        });
    }

    fn load_image(&mut self, ctx: &egui::Context) {
        if self.image.is_some() || self.image_failed {
            return;
        }

        let Some(resource) = self.screen.reveal().image() else {
            return;
        };

        match images::load(resource) {
            Ok(image) => {
                self.image = Some(ctx.load_texture(resource.name(), image, TextureOptions::LINEAR));
            }
            Err(err) => {
                log::error!("Failed to load image '{}': {err}", resource.name());
                self.image_failed = true;
            }
        }
    }
}

impl<W: MapUi> eframe::App for ScreenApp<W> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

impl<W: MapUi> Drop for ScreenApp<W> {
    fn drop(&mut self) {
        self.screen.destroy();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use mapscreen::geo::GeoPoint2d;
    use mapscreen::map::{Map, MapWidget};
    use mapscreen::overlay::{Overlay, OverlayCollection};
    use mapscreen::reveal::{ImageResource, RevealOptions, RevealState};
    use mapscreen::tile_source::{TileSourcePreset, STANDARD, TRANSIT};

    use super::*;

    /// Headless map: counts the frames it was asked to draw.
    struct FrameCountingMap {
        map: Map,
        frames: Arc<AtomicUsize>,
    }

    impl MapWidget for FrameCountingMap {
        fn set_tile_source(&mut self, preset: &TileSourcePreset) -> Result<(), ScreenError> {
            self.map.set_tile_source(preset)
        }

        fn active_tile_source(&self) -> &TileSourcePreset {
            self.map.active_tile_source()
        }

        fn set_zoom(&mut self, zoom: f64) {
            self.map.set_zoom(zoom);
        }

        fn zoom(&self) -> f64 {
            self.map.zoom()
        }

        fn set_center(&mut self, center: GeoPoint2d) {
            self.map.set_center(center);
        }

        fn center(&self) -> GeoPoint2d {
            self.map.center()
        }

        fn set_builtin_zoom_controls(&mut self, enabled: bool) {
            self.map.set_builtin_zoom_controls(enabled);
        }

        fn set_multi_touch_controls(&mut self, enabled: bool) {
            self.map.set_multi_touch_controls(enabled);
        }

        fn overlays(&self) -> &OverlayCollection {
            self.map.overlays()
        }

        fn add_overlay(&mut self, overlay: Overlay) {
            self.map.add_overlay(overlay);
        }
    }

    impl MapUi for FrameCountingMap {
        fn show_ui(&mut self, ui: &mut egui::Ui) {
            self.frames.fetch_add(1, Ordering::Relaxed);
            ui.label("map");
        }
    }

    fn create_app(config: ScreenConfig) -> (ScreenApp<FrameCountingMap>, Arc<AtomicUsize>) {
        let frames = Arc::new(AtomicUsize::new(0));
        let map = FrameCountingMap {
            map: Map::default(),
            frames: frames.clone(),
        };

        (ScreenApp::new(map, None, config).unwrap(), frames)
    }

    fn run_frame(ctx: &egui::Context, app: &mut ScreenApp<FrameCountingMap>) {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(400.0, 600.0),
            )),
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| app.show(ctx));
    }

    #[tokio::test(start_paused = true)]
    async fn reveals_image_after_delay() {
        let ctx = egui::Context::default();
        let (mut app, frames) = create_app(ScreenConfig::default());

        run_frame(&ctx, &mut app);
        assert_eq!(frames.load(Ordering::Relaxed), 1);
        assert_eq!(app.screen().reveal().state(), RevealState::Loading);
        assert!(app.image_texture().is_none());

        tokio::time::sleep(Duration::from_secs(7)).await;
        app.screen_mut().reveal_controller().wait().await;
        run_frame(&ctx, &mut app);

        assert_eq!(app.screen().reveal().state(), RevealState::Loaded);
        assert_eq!(
            app.screen().reveal().label_text(),
            "Imagen cargada correctamente"
        );
        assert_eq!(
            app.image_texture().map(|texture| texture.size()),
            Some([96, 64])
        );
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_image_leaves_slot_empty() {
        let ctx = egui::Context::default();
        let config = ScreenConfig {
            reveal: RevealOptions {
                delay_ms: 10,
                image: ImageResource::new("missing"),
                ..Default::default()
            },
            ..Default::default()
        };
        let (mut app, _) = create_app(config);

        tokio::time::sleep(Duration::from_millis(20)).await;
        app.screen_mut().reveal_controller().wait().await;
        run_frame(&ctx, &mut app);
        run_frame(&ctx, &mut app);

        assert_eq!(app.screen().reveal().state(), RevealState::Loaded);
        assert!(app.image_texture().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn map_keeps_selected_source_between_frames() {
        let ctx = egui::Context::default();
        let (mut app, frames) = create_app(ScreenConfig::default());
        run_frame(&ctx, &mut app);
        assert_eq!(app.screen().map().active_tile_source(), &STANDARD);

        app.screen_mut().select_map_type(1).unwrap();
        run_frame(&ctx, &mut app);

        assert_eq!(app.screen().selector().selected(), 1);
        assert_eq!(app.screen().map().active_tile_source(), &TRANSIT);
        assert_eq!(app.screen().map().zoom(), 15.0);
        assert_eq!(app.screen().map().map.inner().layers().len(), 4);
        assert_eq!(frames.load(Ordering::Relaxed), 2);
    }
}
