//! Error types used by the crate.

use thiserror::Error;

/// Map screen error type.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// Index of a tile source preset is out of range.
    #[error("preset index {index} is out of range, there are {len} presets")]
    InvalidPresetIndex {
        /// Requested index.
        index: usize,
        /// Number of presets.
        len: usize,
    },
    /// The reveal timer can be started only once.
    #[error("reveal timer is already started")]
    RevealAlreadyStarted,
    /// The reveal timer was started outside of a tokio runtime.
    #[error("no async runtime to run the reveal timer on")]
    NoRuntime,
    /// The map engine failed to create a layer.
    #[error("failed to create map layer: {0}")]
    Layer(#[from] galileo::error::GalileoError),
    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// Configuration file could not be read.
    #[error("failed to read configuration file")]
    Io(#[from] std::io::Error),
}
