use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

/// Process configuration, read from the environment (and `.env`, loaded by
/// `main` before this runs).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    /// Single allowed browser origin. `None` means permissive CORS.
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("KUDOS_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match lookup("KUDOS_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("KUDOS_PORT is not a valid port: {raw}"))?,
            None => {
                info!("KUDOS_PORT not set, using default: 3001");
                3001
            }
        };
        let db_path = lookup("KUDOS_DB_PATH")
            .unwrap_or_else(|| "kudos.db".into())
            .into();
        let cors_origin = lookup("KUDOS_CORS_ORIGIN").filter(|v| !v.trim().is_empty());

        Ok(Self {
            host,
            port,
            db_path,
            cors_origin,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.port, 3001);
        assert_eq!(cfg.db_path, PathBuf::from("kudos.db"));
        assert!(cfg.cors_origin.is_none());
        assert_eq!(cfg.addr().unwrap().port(), 3001);
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("KUDOS_HOST", "127.0.0.1"),
            ("KUDOS_PORT", "8080"),
            ("KUDOS_DB_PATH", "/tmp/k.db"),
            ("KUDOS_CORS_ORIGIN", "http://localhost:5173"),
        ])
        .unwrap();
        assert_eq!(cfg.addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(cfg.cors_origin.as_deref(), Some("http://localhost:5173"));
    }

    #[test]
    fn rejects_bad_port() {
        assert!(config(&[("KUDOS_PORT", "eighty")]).is_err());
    }
}
