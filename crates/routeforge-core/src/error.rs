use std::path::PathBuf;

/// Errors raised while loading or saving session configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("No config directory available on this platform")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Persisted state that violates an invariant of the store it belongs to
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StateError {
    #[error("transform scale must be positive and finite, got {0}")]
    InvalidScale(f64),

    #[error("transform center is not a finite point")]
    NonFiniteCenter,

    #[error("dim factor {0} outside [0, 1]")]
    DimFactorOutOfRange(f64),

    #[error("start pass number must be at least 1, got {0}")]
    InvalidStartPass(u32),

    #[error("routing layer at position {position} claims index {layer_index}")]
    LayerOutOfOrder { position: usize, layer_index: usize },
}
