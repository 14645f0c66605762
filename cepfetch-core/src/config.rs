use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

use crate::error::{CepError, CoreResult};

pub const VIACEP_BASE: &str = "https://viacep.com.br";
pub const APICEP_BASE: &str = "https://cdn.apicep.com";

/// Base URLs of the two lookup services. Paths are fixed by each provider.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Providers {
    #[serde(default = "default_viacep_base")]
    pub viacep_base: String,
    #[serde(default = "default_apicep_base")]
    pub apicep_base: String,
}

impl Default for Providers {
    fn default() -> Self {
        Self {
            viacep_base: default_viacep_base(),
            apicep_base: default_apicep_base(),
        }
    }
}

fn default_viacep_base() -> String {
    VIACEP_BASE.to_string()
}
fn default_apicep_base() -> String {
    APICEP_BASE.to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HttpCfg {
    /// TCP connect timeout in milliseconds (default 5000ms)
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Total request timeout in milliseconds (default 60000ms)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Optional per-host idle connection pool cap (None = reqwest default)
    #[serde(default)]
    pub pool_max_idle_per_host: Option<usize>,
}

impl Default for HttpCfg {
    fn default() -> Self {
        Self {
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            pool_max_idle_per_host: None,
        }
    }
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}
fn default_request_timeout_ms() -> u64 {
    60_000
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RaceCfg {
    /// Wait for the first provider answer at most this long per code.
    #[serde(default = "default_deadline_ms")]
    pub deadline_ms: u64,
    /// How many codes are raced at the same time. 1 = one code after another.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for RaceCfg {
    fn default() -> Self {
        Self {
            deadline_ms: default_deadline_ms(),
            concurrency: default_concurrency(),
        }
    }
}

impl RaceCfg {
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }
}

fn default_deadline_ms() -> u64 {
    1_000
}
fn default_concurrency() -> usize {
    1
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub providers: Providers,
    /// HTTP client configuration (timeouts, pooling).
    #[serde(default)]
    pub http: HttpCfg,
    #[serde(default)]
    pub race: RaceCfg,
}

impl Config {
    /// Load a Config from a file path (JSON or TOML by extension). If the
    /// extension is missing or unrecognized, try JSON first, then TOML.
    pub fn from_path<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(CepError::from)?;
        let s = std::str::from_utf8(&bytes).map_err(|e| CepError::Other(e.into()))?;
        let cfg: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => {
                serde_json::from_str::<Self>(s).map_err(|e| CepError::Other(e.into()))?
            }
            Some("toml") => toml::from_str::<Self>(s).map_err(|e| CepError::Other(e.into()))?,
            _ => serde_json::from_str::<Self>(s)
                .map_err(|e| CepError::Other(e.into()))
                .or_else(|_| toml::from_str::<Self>(s).map_err(|e| CepError::Other(e.into())))?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.race.concurrency == 0 {
            return Err(CepError::Validation(
                "race.concurrency must be at least 1".into(),
            ));
        }
        for (key, base) in [
            ("providers.viacep_base", &self.providers.viacep_base),
            ("providers.apicep_base", &self.providers.apicep_base),
        ] {
            if !(base.starts_with("http://") || base.starts_with("https://")) {
                return Err(CepError::Validation(format!(
                    "{key} must be an http(s) URL, got '{base}'"
                )));
            }
        }
        Ok(())
    }
}
