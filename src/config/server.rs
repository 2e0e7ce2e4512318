// src/config/server.rs
//! Process-level settings for the HTTP binary, read from the environment
//! (after `.env` is loaded by `main`).
//!
//! - `BIND_ADDR`       socket address, default `0.0.0.0:8001`
//! - `LOG_FORMAT`      `compact` (default) | `json`
//! - `METRICS_ENABLED` `1` mounts `/metrics`
//! - `DEBUG_ROUTES`    `1` mounts `/debug/*`
//!
//! Lexicon settings live in `crate::lexicon` (`EMOTION_LEXICON_PATH`,
//! `EMOTION_SARCASM_THRESHOLD`).

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
pub const ENV_METRICS_ENABLED: &str = "METRICS_ENABLED";
pub const ENV_DEBUG_ROUTES: &str = "DEBUG_ROUTES";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => bail!("unknown {ENV_LOG_FORMAT} '{other}' (expected compact|json)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
    pub metrics_enabled: bool,
    pub debug_routes: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8001)),
            log_format: LogFormat::Compact,
            metrics_enabled: false,
            debug_routes: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Same as `from_env` over an arbitrary key lookup.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = get(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid {ENV_BIND_ADDR} '{raw_addr}'"))?;

        let log_format = match get(ENV_LOG_FORMAT) {
            Some(s) => s.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            log_format,
            metrics_enabled: flag(get(ENV_METRICS_ENABLED)),
            debug_routes: flag(get(ENV_DEBUG_ROUTES)),
        })
    }
}

fn flag(raw: Option<String>) -> bool {
    matches!(
        raw.as_deref().map(str::trim),
        Some("1") | Some("true") | Some("TRUE") | Some("yes")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cfg(pairs: &[(&str, &str)]) -> Result<ServerConfig> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(cfg(&[]).unwrap(), ServerConfig::default());
    }

    #[test]
    fn reads_all_keys() {
        let c = cfg(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("LOG_FORMAT", "JSON"),
            ("METRICS_ENABLED", "1"),
            ("DEBUG_ROUTES", "true"),
        ])
        .unwrap();
        assert_eq!(c.bind_addr.port(), 9000);
        assert_eq!(c.log_format, LogFormat::Json);
        assert!(c.metrics_enabled && c.debug_routes);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(cfg(&[("BIND_ADDR", "nowhere")]).is_err());
        assert!(cfg(&[("LOG_FORMAT", "pretty")]).is_err());
        assert!(!cfg(&[("DEBUG_ROUTES", "0")]).unwrap().debug_routes);
    }
}
