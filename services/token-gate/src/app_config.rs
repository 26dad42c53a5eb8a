use crate::environment_config::Environment;
use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::{env, path::PathBuf};
use stm_axum::{DEFAULT_TOKEN_HEADER, DEFAULT_TOKEN_PATH};
use stm_core::pool::TokenPoolConfig;

const CONFIG_FILE_VAR: &str = "STM_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "./config.json";

fn default_port() -> u16 {
    8080
}

fn default_token_header() -> String {
    DEFAULT_TOKEN_HEADER.to_string()
}

fn default_token_path() -> String {
    DEFAULT_TOKEN_PATH.to_string()
}

/// The application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request header carrying the token checked on the guarded routes.
    #[serde(default = "default_token_header")]
    pub token_header: String,
    /// Path of the token publishing endpoint.
    #[serde(default = "default_token_path")]
    pub token_path: String,
    #[serde(default)]
    pub pool: TokenPoolConfig,
}

impl AppConfig {
    /// Path of the optional json config file.
    pub fn config_file() -> PathBuf {
        env::var_os(CONFIG_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    pub fn load(config_file: PathBuf) -> Result<Self, ConfigError> {
        log::info!("Loading configuration from {} (optional) and the environment", config_file.display());
        let builder = Config::builder().add_source(File::from(config_file).format(FileFormat::Json).required(false));
        Self::build(builder.add_source(Environment::new()))
    }

    fn build(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self, ConfigError> {
        let config = builder.build()?;
        log::trace!("{config:#?}");
        config.try_deserialize::<Self>()
    }
}
