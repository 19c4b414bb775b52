use std::path::PathBuf;

use fusion_core::Vec2;

/// Errors that can occur while loading or validating a game configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} has an empty item name")]
    EmptyName(String),

    #[error("spawn area {min}..{max} must be finite with min not exceeding max")]
    InvalidSpawnArea { min: Vec2, max: Vec2 },

    #[error("victory threshold must be at least 1")]
    ZeroThreshold,
}
