use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, TicketError};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: Option<String>,
    pub session: Option<String>,
    pub user_id: Option<i64>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| TicketError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        Self::parse(&contents).map_err(|e| TicketError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TicketError::ConfigWrite {
                path: config_path.clone(),
                source: e,
            })?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| TicketError::InvalidInput(format!("cannot encode config: {e}")))?;

        std::fs::write(&config_path, contents).map_err(|e| TicketError::ConfigWrite {
            path: config_path,
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "tickets")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(TicketError::NoConfigDir)
    }

    /// Server URL: explicit flag, then TICKETS_BASE_URL, then the config file.
    pub fn base_url(&self, explicit: Option<&str>) -> Result<Url> {
        let raw = explicit
            .map(String::from)
            .or_else(|| std::env::var("TICKETS_BASE_URL").ok())
            .or_else(|| self.base_url.clone())
            .ok_or(TicketError::MissingBaseUrl)?;

        parse_base_url(&raw)
    }

    /// Session cookie, env var taking precedence over config file
    pub fn session(&self) -> Option<String> {
        std::env::var("TICKETS_SESSION")
            .ok()
            .or_else(|| self.session.clone())
    }

    /// Get user, preferring explicit argument over default
    pub fn resolve_user(&self, explicit: Option<i64>) -> Result<i64> {
        explicit.or(self.user_id).ok_or(TicketError::NoUser)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|_| TicketError::InvalidUrl(raw.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TicketError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
base_url = "http://localhost:5000"
session = "abc"
user_id = 7
timeout_secs = 5
"#,
        )
        .unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(config.session.as_deref(), Some("abc"));
        assert_eq!(config.user_id, Some(7));
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_explicit_base_url_wins() {
        let config = Config {
            base_url: Some("http://config.example".to_string()),
            ..Config::default()
        };
        let url = config.base_url(Some("https://flag.example")).unwrap();
        assert_eq!(url.host_str(), Some("flag.example"));
    }

    #[test]
    fn test_base_url_rejects_other_schemes() {
        assert!(matches!(
            parse_base_url("ftp://example.com"),
            Err(TicketError::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_base_url("not a url"),
            Err(TicketError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_resolve_user() {
        let config = Config {
            user_id: Some(3),
            ..Config::default()
        };
        assert_eq!(config.resolve_user(Some(9)).unwrap(), 9);
        assert_eq!(config.resolve_user(None).unwrap(), 3);
        assert!(matches!(
            Config::default().resolve_user(None),
            Err(TicketError::NoUser)
        ));
    }
}
