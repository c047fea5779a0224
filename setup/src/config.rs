use anyhow::{Context, Result};
use dataset_loader::{FetchOptions, CALL_LOGS_URL, USERS_URL};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = "callcenter.yaml";
pub const DEFAULT_DATABASE: &str = "call_center.db";

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub database: Option<PathBuf>,
    pub users_url: Option<String>,
    pub call_logs_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub user_agent: Option<String>,
}

/// Reads `path`, or `callcenter.yaml` from the working directory when no path
/// is given. A missing default file is not an error.
pub fn load_config(path: Option<&Path>) -> Result<Option<Config>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = Path::new(DEFAULT_CONFIG);
            if p.exists() { p.to_path_buf() } else { return Ok(None); }
        }
    };
    let s = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let cfg = serde_yaml::from_str(&s).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(cfg))
}

/// Effective settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database: PathBuf,
    pub users_url: String,
    pub call_logs_url: String,
    pub fetch: FetchOptions,
}

impl Settings {
    pub fn resolve(cfg: Option<Config>, database: Option<PathBuf>) -> Self {
        let cfg = cfg.unwrap_or_default();
        let mut fetch = FetchOptions { timeout_ms: cfg.timeout_ms, ..FetchOptions::default() };
        if let Some(ua) = cfg.user_agent {
            fetch.user_agent = ua;
        }
        Settings {
            database: database.or(cfg.database).unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE)),
            users_url: cfg.users_url.unwrap_or_else(|| USERS_URL.to_string()),
            call_logs_url: cfg.call_logs_url.unwrap_or_else(|| CALL_LOGS_URL.to_string()),
            fetch,
        }
    }
}
