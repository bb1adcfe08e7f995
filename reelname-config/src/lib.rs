//! Shared configuration library for reelname.
//!
//! Holds the naming template, numbering sequence, layer suffix, frame rate
//! and the ordered shot token rule set, loaded from the environment or a
//! TOML/JSON file and validated into compiled engine values.

#![allow(missing_docs)]

pub mod loader;
pub mod models;

pub use loader::{
    CONFIG_JSON_VAR, CONFIG_PATH_VAR, ConfigLoad, ConfigSource,
    error::ConfigLoadError,
};
pub use models::{EngineConfig, NamingConfig, ResolvedConfig, ShotRuleSpec};
