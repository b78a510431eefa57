use core::fmt::{Debug, Display};

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct Config {
    pub database_url: String,
    /// How many events one person may be asked to buy.
    #[serde(default = "default_duty_cap")]
    pub duty_cap: usize,
}

const fn default_duty_cap() -> usize {
    50
}

#[derive(thiserror::Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Figment(#[from] figment::Error),
}

impl Debug for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

pub fn get_config() -> Result<Config, ConfigError> {
    Ok(Figment::new()
        .merge(Toml::file("tda.toml"))
        .merge(Env::prefixed("TDA_"))
        .extract()?)
}
