mod basic;

pub use basic::{BasicConfig, StoreBackend};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";

impl Config {
    /// Builds a Figment that merges defaults, a config TOML file and `DATABASE_URL`.
    ///
    /// `DATABASE_URL` is the only environment variable read; it overrides
    /// `basic.database_url`.
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
        } else {
            figment
        };
        figment.merge(
            Env::raw()
                .only(&["DATABASE_URL"])
                .map(|_| "basic.database_url".into()),
        )
    }

    /// Loads configuration by merging defaults, `config.toml` if present, and the environment.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    /// Address the HTTP server binds to.
    pub fn listen_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from((self.basic.listen_addr, self.basic.listen_port))
    }
}
