use std::path::PathBuf;
use std::sync::Arc;

use galileo_egui::EguiMapState;
use mapscreen::map::empty_engine_map;
use mapscreen::{Messenger, ScreenConfig};

use crate::{EguiMapWidget, ScreenApp};

const DEFAULT_APP_NAME: &str = "Mapas";

/// Loads the configuration and runs the screen in a native window.
///
/// The window, the logger and the tokio runtime the reveal timer runs on are set up by
/// [`galileo_egui::InitBuilder`].
pub struct InitBuilder {
    config: Option<ScreenConfig>,
    config_path: Option<PathBuf>,
    native_options: Option<eframe::NativeOptions>,
    app_name: String,
}

impl Default for InitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InitBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: None,
            config_path: None,
            native_options: None,
            app_name: DEFAULT_APP_NAME.to_owned(),
        }
    }

    /// Uses the given configuration.
    pub fn with_config(mut self, config: ScreenConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Reads the configuration from the JSON file when it exists. Ignored if a configuration is
    /// set with [`InitBuilder::with_config`].
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Window options.
    pub fn with_native_options(mut self, options: eframe::NativeOptions) -> Self {
        self.native_options = Some(options);
        self
    }

    /// Name of the application, used as the window title.
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    /// Runs the application. Blocks until the window is closed.
    pub fn init(self) -> eframe::Result {
        let config = self.load_config()?;

        let native_options = self.native_options.unwrap_or_else(|| eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(&self.app_name)
                .with_inner_size([420.0, 760.0]),
            ..Default::default()
        });

        galileo_egui::InitBuilder::new(empty_engine_map())
            .with_native_options(native_options)
            .with_app_builder(move |map_state, cc| build_app(map_state, &cc.egui_ctx, config))
            .init()
    }

    fn load_config(&self) -> eframe::Result<ScreenConfig> {
        let config = match (&self.config, &self.config_path) {
            (Some(config), _) => config.clone(),
            (None, Some(path)) => ScreenConfig::load_or_default(path)
                .map_err(|err| eframe::Error::AppCreation(Box::new(err)))?,
            (None, None) => ScreenConfig::default(),
        };

        Ok(config)
    }
}

fn build_app(
    map_state: EguiMapState,
    ctx: &egui::Context,
    config: ScreenConfig,
) -> Box<dyn eframe::App> {
    let map = EguiMapWidget::new(map_state, ctx);
    let messenger: Arc<dyn Messenger> = Arc::new(map.messenger().clone());

    match ScreenApp::new(map, Some(messenger), config) {
        Ok(app) => Box::new(app),
        Err(err) => {
            log::error!("Failed to create the map screen: {err}");
            Box::new(StartupError(err.to_string()))
        }
    }
}

/// Shown instead of the screen when it cannot be created.
struct StartupError(String);

impl eframe::App for StartupError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.colored_label(ui.visuals().error_fg_color, &self.0);
        });
    }
}
