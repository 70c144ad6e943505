//! Startup configuration: where the backend lives.
//!
//! The backend base URL is process-wide immutable configuration resolved
//! once at startup, never a compiled-in constant. Resolution order: CLI
//! flag, then the `DOCDECK_BACKEND_URL` environment variable, then
//! `config.toml` under the XDG config directory.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the backend base URL.
pub const BACKEND_URL_ENV: &str = "DOCDECK_BACKEND_URL";

/// Errors from configuration resolution.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("cannot determine home directory")]
    #[diagnostic(
        code(docdeck::config::no_home),
        help("Set the HOME environment variable or ensure a valid user profile exists.")
    )]
    NoHome,

    #[error("failed to read config file: {path}")]
    #[diagnostic(
        code(docdeck::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {path}")]
    #[diagnostic(
        code(docdeck::config::parse),
        help("Check the TOML syntax in the config file.")
    )]
    Parse { path: String, message: String },

    #[error("failed to write config file: {path}")]
    #[diagnostic(
        code(docdeck::config::write),
        help("Ensure you have write permissions to the config directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no backend URL configured")]
    #[diagnostic(
        code(docdeck::config::no_backend_url),
        help(
            "Pass --backend-url <url>, set DOCDECK_BACKEND_URL, or add `backend_url = \"http://...\"` to {config_path}."
        )
    )]
    NoBackendUrl { config_path: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// On-disk settings, persisted as TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the document backend.
    pub backend_url: Option<String>,
}

impl Settings {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}

/// `$XDG_CONFIG_HOME/docdeck/config.toml`, with the standard `~/.config`
/// fallback.
pub fn config_file() -> ConfigResult<PathBuf> {
    let home = std::env::var("HOME")
        .map(PathBuf::from)
        .map_err(|_| ConfigError::NoHome)?;

    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home.join(".config"))
        .join("docdeck");

    Ok(config_dir.join("config.toml"))
}

/// Resolve the backend base URL from flag, environment, and config file.
pub fn resolve_backend_url(flag: Option<String>) -> ConfigResult<String> {
    let env = std::env::var(BACKEND_URL_ENV)
        .ok()
        .filter(|v| !v.is_empty());

    let path = config_file()?;
    let file = if path.is_file() {
        Settings::load(&path)?.backend_url
    } else {
        None
    };

    pick_backend_url(flag, env, file).ok_or_else(|| ConfigError::NoBackendUrl {
        config_path: path.display().to_string(),
    })
}

/// Precedence: flag over environment over config file.
fn pick_backend_url(
    flag: Option<String>,
    env: Option<String>,
    file: Option<String>,
) -> Option<String> {
    flag.or(env).or(file)
}
