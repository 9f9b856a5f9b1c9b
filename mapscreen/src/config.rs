use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScreenError;
use crate::map::MapConfig;
use crate::reveal::RevealOptions;

/// Configuration of the screen. Missing fields take their default values, so `{}` is a valid
/// configuration.
///
/// ```json
/// {
///     "reveal": { "delay_ms": 2000, "success_message": "Ready" },
///     "map": { "zoom": 13.0, "initial_preset": 1 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Deferred reveal settings.
    pub reveal: RevealOptions,
    /// Initial map setup.
    pub map: MapConfig,
}

impl ScreenConfig {
    /// Parses the configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ScreenError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads the configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScreenError> {
        let path = path.as_ref();
        log::debug!("Loading screen configuration from {}", path.display());

        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Reads the configuration from the file if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ScreenError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::load(path)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = ScreenConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ScreenConfig::default());
        assert_eq!(config.reveal.delay(), Duration::from_secs(7));
        assert_eq!(config.map.zoom(), 15.0);
    }

    #[test]
    fn partial_override() {
        let config = ScreenConfig::from_json_str(
            r#"{
                "reveal": { "delay_ms": 2000, "success_message": "Ready", "image": "park" },
                "map": { "zoom": 13.0, "initial_preset": 1 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.reveal.delay(), Duration::from_secs(2));
        assert_eq!(config.reveal.success_message, "Ready");
        assert_eq!(config.reveal.loading_message, "Cargando imagen...");
        assert_eq!(config.reveal.image.name(), "park");
        assert_eq!(config.map.zoom(), 13.0);
        assert_eq!(config.map.initial_preset(), 1);
        assert_eq!(config.map.markers().len(), 2);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert_matches!(
            ScreenConfig::from_json_str("{ \"reveal\": 5 }"),
            Err(ScreenError::Config(_))
        );
        assert_matches!(
            ScreenConfig::from_json_str("not json"),
            Err(ScreenError::Config(_))
        );
    }

    #[test]
    fn missing_file() {
        let path = std::env::temp_dir().join("mapscreen-config-that-does-not-exist.json");
        assert_matches!(ScreenConfig::load(&path), Err(ScreenError::Io(_)));
        assert_eq!(
            ScreenConfig::load_or_default(&path).unwrap(),
            ScreenConfig::default()
        );
    }

    #[test]
    fn round_trip_through_file() {
        let path =
            std::env::temp_dir().join(format!("mapscreen-config-{}.json", std::process::id()));
        let config = ScreenConfig {
            map: MapConfig::default().with_initial_preset(2),
            ..Default::default()
        };
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = ScreenConfig::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.unwrap(), config);
    }
}
