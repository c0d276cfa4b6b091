use crate::error::RosterError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default config file, looked up in the working directory.
pub const CONFIG_FILE: &str = "roster.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    pub loglevel: String,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            loglevel: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Full connection URL. When set, the individual parts below are ignored.
    pub url: Option<String>,
    pub host: String,
    pub port: Option<u16>,
    pub user: String,
    pub password: Option<String>,
    pub name: String,
    pub connect_timeout_secs: u64,
    /// `None` opens one connection per operation.
    pub pool_size: Option<u32>,
    pub init_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: None,
            user: "root".to_string(),
            password: None,
            name: "school".to_string(),
            connect_timeout_secs: 10,
            pool_size: None,
            init_schema: true,
        }
    }
}

/// Database engines reachable through the `Any` driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    MySql,
}

impl Backend {
    pub fn from_url(url: &Url) -> Result<Self, RosterError> {
        match url.scheme() {
            "sqlite" => Ok(Backend::Sqlite),
            "mysql" | "mariadb" => Ok(Backend::MySql),
            other => Err(RosterError::Config(format!(
                "unsupported database scheme {other:?}"
            ))),
        }
    }
}

impl DatabaseConfig {
    /// Resolve the connection URL, assembling a MySQL URL from the parts when
    /// no explicit `url` is configured.
    pub fn connect_url(&self) -> Result<Url, RosterError> {
        if let Some(raw) = self.url.as_deref() {
            let url = Url::parse(raw)?;
            Backend::from_url(&url)?;
            return Ok(url);
        }

        let mut url = Url::parse("mysql://localhost")?;
        url.set_host(Some(&self.host))?;
        url.set_port(self.port)
            .map_err(|_| RosterError::Config("cannot set port on database URL".to_string()))?;
        url.set_username(&self.user)
            .map_err(|_| RosterError::Config("cannot set user on database URL".to_string()))?;
        url.set_password(self.password.as_deref())
            .map_err(|_| RosterError::Config("cannot set password on database URL".to_string()))?;
        url.set_path(&self.name);
        Ok(url)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }
}

/// Render a URL for logs with the password masked.
pub fn redacted(url: &Url) -> String {
    let mut shown = url.clone();
    if shown.password().is_some() {
        let _ = shown.set_password(Some("****"));
    }
    shown.to_string()
}

/// Environment variables holding text settings, in merge order. The legacy
/// `MYSQL_PASSWORD` comes last and wins.
const TEXT_VARS: [(&str, &str); 7] = [
    ("ROSTER_BASIC__LOGLEVEL", "basic.loglevel"),
    ("ROSTER_DATABASE__URL", "database.url"),
    ("ROSTER_DATABASE__HOST", "database.host"),
    ("ROSTER_DATABASE__USER", "database.user"),
    ("ROSTER_DATABASE__PASSWORD", "database.password"),
    ("ROSTER_DATABASE__NAME", "database.name"),
    ("MYSQL_PASSWORD", "database.password"),
];

/// Raw value of `var`, matched case-insensitively like `Env` does.
fn env_text(var: &str) -> Option<String> {
    std::env::vars_os().find_map(|(k, v)| {
        let k = k.to_str()?;
        if k.eq_ignore_ascii_case(var) {
            v.into_string().ok()
        } else {
            None
        }
    })
}

impl Config {
    /// Layer defaults, `roster.toml` (or `$ROSTER_CONFIG`), `ROSTER_*`
    /// variables and the legacy `MYSQL_PASSWORD` variable.
    pub fn figment() -> Figment {
        let file = std::env::var_os("ROSTER_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed("ROSTER_").split("__"));

        // `Env` parses values, so `123456` or `true` would no longer be
        // strings. Text settings are re-read verbatim on top.
        TEXT_VARS
            .iter()
            .fold(figment, |figment, &(var, key)| match env_text(var) {
                Some(value) => figment.merge(Serialized::default(key, value)),
                None => figment,
            })
    }

    pub fn load() -> Result<Self, RosterError> {
        Ok(Self::figment().extract()?)
    }
}
