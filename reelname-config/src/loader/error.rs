use reelname_core::PatternError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(
        "failed to parse config {origin}: toml error: {toml}; json error: {json}"
    )]
    Unrecognized {
        origin: String,
        toml: toml::de::Error,
        json: serde_json::Error,
    },
    #[error("frame_rate must be greater than zero")]
    ZeroFrameRate,
    #[error("naming.step must be greater than zero")]
    ZeroStep,
    #[error(transparent)]
    Pattern(#[from] PatternError),
}
