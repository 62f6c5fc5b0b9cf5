//! Client configuration loaded from the environment
//!
//! Values may come from the process environment or a `.env` file loaded by
//! the binary before `ClientConfig::from_env` runs.

use std::env;
use std::time::Duration;
use url::Url;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const PRODUCTION_API_URL: &str = "https://api.petcare.app";
const DEVELOPMENT_API_URL: &str = "http://localhost:3001";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REMINDER_INTERVAL_SECS: u64 = 60;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
  #[error("Invalid configuration for {key}: {reason}")]
  Invalid { key: String, reason: String },
}

impl ConfigError {
  fn invalid(key: &str, reason: impl Into<String>) -> Self {
    ConfigError::Invalid {
      key: key.to_string(),
      reason: reason.into(),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Client Configuration
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Backend base URL without a trailing slash
  pub api_base_url: String,
  pub http_timeout: Duration,
  pub reminder_interval: Duration,
}

impl ClientConfig {
  /// Build a config pointing at `api_base_url` with default timings
  pub fn new(api_base_url: &str) -> Result<Self, ConfigError> {
    Ok(Self {
      api_base_url: normalize_base_url("PET_CARE_API_URL", api_base_url)?,
      http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
      reminder_interval: Duration::from_secs(DEFAULT_REMINDER_INTERVAL_SECS),
    })
  }

  pub fn from_env() -> Result<Self, ConfigError> {
    let api_base_url = match env::var("PET_CARE_API_URL") {
      Ok(url) if !url.trim().is_empty() => url,
      _ => default_api_url().to_string(),
    };

    let mut config = Self::new(&api_base_url)?;
    config.http_timeout = Duration::from_secs(read_secs(
      "PET_CARE_HTTP_TIMEOUT_SECS",
      DEFAULT_HTTP_TIMEOUT_SECS,
    )?);
    config.reminder_interval = Duration::from_secs(read_secs(
      "PET_CARE_REMINDER_INTERVAL_SECS",
      DEFAULT_REMINDER_INTERVAL_SECS,
    )?);

    Ok(config)
  }
}

/// Host selected by `PET_CARE_ENV` when no explicit URL is configured
fn default_api_url() -> &'static str {
  match env::var("PET_CARE_ENV").as_deref() {
    Ok("production") => PRODUCTION_API_URL,
    _ => DEVELOPMENT_API_URL,
  }
}

fn normalize_base_url(key: &str, raw: &str) -> Result<String, ConfigError> {
  let url = Url::parse(raw.trim()).map_err(|e| ConfigError::invalid(key, e.to_string()))?;

  if url.scheme() != "http" && url.scheme() != "https" {
    return Err(ConfigError::invalid(
      key,
      format!("unsupported scheme '{}'", url.scheme()),
    ));
  }

  Ok(url.as_str().trim_end_matches('/').to_string())
}

fn read_secs(key: &str, default: u64) -> Result<u64, ConfigError> {
  match env::var(key) {
    Ok(raw) => {
      let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(key, format!("'{}' is not a whole number", raw)))?;
      if secs == 0 {
        return Err(ConfigError::invalid(key, "must be greater than zero"));
      }
      Ok(secs)
    }
    Err(_) => Ok(default),
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn test_defaults_to_development_host() {
    temp_env::with_vars(
      [
        ("PET_CARE_API_URL", None::<&str>),
        ("PET_CARE_ENV", None),
        ("PET_CARE_HTTP_TIMEOUT_SECS", None),
        ("PET_CARE_REMINDER_INTERVAL_SECS", None),
      ],
      || {
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_base_url, "http://localhost:3001");
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.reminder_interval, Duration::from_secs(60));
      },
    );
  }

  #[test]
  #[serial]
  fn test_production_env_selects_production_host() {
    temp_env::with_vars(
      [("PET_CARE_API_URL", None), ("PET_CARE_ENV", Some("production"))],
      || {
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_base_url, "https://api.petcare.app");
      },
    );
  }

  #[test]
  #[serial]
  fn test_explicit_url_wins_and_trailing_slash_is_dropped() {
    temp_env::with_vars(
      [
        ("PET_CARE_API_URL", Some("http://10.0.0.5:8080/")),
        ("PET_CARE_ENV", Some("production")),
      ],
      || {
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_base_url, "http://10.0.0.5:8080");
      },
    );
  }

  #[test]
  #[serial]
  fn test_interval_override() {
    temp_env::with_vars(
      [
        ("PET_CARE_API_URL", None::<&str>),
        ("PET_CARE_REMINDER_INTERVAL_SECS", Some("15")),
      ],
      || {
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.reminder_interval, Duration::from_secs(15));
      },
    );
  }

  #[test]
  #[serial]
  fn test_zero_interval_is_rejected() {
    temp_env::with_var("PET_CARE_REMINDER_INTERVAL_SECS", Some("0"), || {
      let err = ClientConfig::from_env().unwrap_err();
      assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "PET_CARE_REMINDER_INTERVAL_SECS"));
    });
  }

  #[test]
  #[serial]
  fn test_non_http_scheme_is_rejected() {
    temp_env::with_var("PET_CARE_API_URL", Some("ftp://example.com"), || {
      assert!(ClientConfig::from_env().is_err());
    });
  }

  #[test]
  fn test_new_rejects_garbage() {
    assert!(ClientConfig::new("not a url").is_err());
  }
}
