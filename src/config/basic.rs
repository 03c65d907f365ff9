use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Which `Store` implementation backs the handlers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// SQLite through `DbActor` (persistent).
    #[default]
    Sqlite,
    /// In-process maps; contents are lost on restart.
    Memory,
}

/// Basic (core) configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicConfig {
    /// HTTP server listen address (e.g., "0.0.0.0", "127.0.0.1").
    /// TOML: `basic.listen_addr`. Default: `0.0.0.0`.
    #[serde(default = "default_listen_ip")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port.
    /// TOML: `basic.listen_port`. Default: `3000`.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Database URL for SQLite.
    /// TOML: `basic.database_url`, env: `DATABASE_URL`. Default: `sqlite://acervo.db`.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Log level for tracing subscriber initialization (e.g., "error", "warn", "info", "debug", "trace").
    /// TOML: `basic.loglevel`. Default: `info`.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,

    /// TOML: `basic.store` (`"sqlite"` or `"memory"`). Default: `sqlite`.
    #[serde(default)]
    pub store: StoreBackend,

    /// Pre-fill the memory store with two sample items. Ignored for SQLite.
    /// TOML: `basic.seed_sample_items`. Default: `false`.
    #[serde(default)]
    pub seed_sample_items: bool,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_ip(),
            listen_port: default_listen_port(),
            database_url: default_database_url(),
            loglevel: default_loglevel(),
            store: StoreBackend::default(),
            seed_sample_items: false,
        }
    }
}

/// Default IP address for the HTTP server listen address.
fn default_listen_ip() -> IpAddr {
    Ipv4Addr::new(0, 0, 0, 0).into()
}

/// Default port for the HTTP server.
fn default_listen_port() -> u16 {
    3000
}

fn default_database_url() -> String {
    "sqlite://acervo.db".to_string()
}

fn default_loglevel() -> String {
    "info".to_string()
}
