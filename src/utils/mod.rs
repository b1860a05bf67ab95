/// TOML infrastructure configuration.
pub mod toml_config;

pub use toml_config::{ConfigError, FolioConfig};
