pub mod error;

use crate::models::EngineConfig;
use error::ConfigLoadError;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

pub const CONFIG_PATH_VAR: &str = "REELNAME_CONFIG_PATH";
pub const CONFIG_JSON_VAR: &str = "REELNAME_CONFIG_JSON";

const DEFAULT_CANDIDATES: &[&str] = &[
    "reelname.toml",
    "reelname.json",
    "config/reelname.toml",
    "config/reelname.json",
];

/// Source that produced the engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
    Explicit(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: EngineConfig,
    pub source: ConfigSource,
}

impl EngineConfig {
    /// Evaluation order:
    /// 1) `$REELNAME_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$REELNAME_CONFIG_JSON` (inline JSON),
    /// 3) the first default file found in the working directory,
    /// 4) defaults.
    pub fn load_from_env() -> Result<ConfigLoad, ConfigLoadError> {
        Self::load_with(|key| env::var(key).ok(), Path::new("."))
    }

    /// Same as [`EngineConfig::load_from_env`] with the environment
    /// supplied by `lookup` and default files searched under `base_dir`.
    pub fn load_with<F>(
        lookup: F,
        base_dir: &Path,
    ) -> Result<ConfigLoad, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path_str) = lookup(CONFIG_PATH_VAR)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            info!("Loaded config from ${}: {}", CONFIG_PATH_VAR, path.display());
            return Ok(ConfigLoad {
                config,
                source: ConfigSource::EnvPath(path),
            });
        }

        if let Some(raw) = lookup(CONFIG_JSON_VAR)
            && !raw.trim().is_empty()
        {
            let config = Self::parse_json(&raw, CONFIG_JSON_VAR)?;
            info!("Loaded config from ${}", CONFIG_JSON_VAR);
            return Ok(ConfigLoad {
                config,
                source: ConfigSource::EnvInline,
            });
        }

        if let Some(path) = Self::find_default_file(base_dir) {
            let config = Self::load_from_file(&path)?;
            info!("Loaded config from {}", path.display());
            return Ok(ConfigLoad {
                config,
                source: ConfigSource::File(path),
            });
        }

        debug!("No config found, using defaults");
        Ok(ConfigLoad {
            config: Self::default(),
            source: ConfigSource::Default,
        })
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let origin = path.display().to_string();

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents, &origin),
            Some("toml") | Some("tml") => toml::from_str(&contents)
                .map_err(|source| ConfigLoadError::Toml { origin, source }),
            _ => Self::parse_from_str(&contents, &origin),
        }
    }

    /// Try TOML first, then JSON.
    pub fn parse_from_str(
        contents: &str,
        origin: &str,
    ) -> Result<Self, ConfigLoadError> {
        toml::from_str(contents).or_else(|toml| {
            serde_json::from_str(contents).map_err(|json| {
                ConfigLoadError::Unrecognized {
                    origin: origin.to_string(),
                    toml,
                    json,
                }
            })
        })
    }

    pub fn parse_json(raw: &str, origin: &str) -> Result<Self, ConfigLoadError> {
        serde_json::from_str(raw).map_err(|source| ConfigLoadError::Json {
            origin: origin.to_string(),
            source,
        })
    }

    fn find_default_file(base_dir: &Path) -> Option<PathBuf> {
        DEFAULT_CANDIDATES
            .iter()
            .map(|candidate| base_dir.join(candidate))
            .find(|path| path.exists())
    }
}
