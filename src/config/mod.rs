use std::env;
use std::path::PathBuf;

use crate::error::AppError;

/// Upper bound for the autosave delay (one hour).
pub const MAX_DEBOUNCE_MS: u64 = 60 * 60 * 1000;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub request: RequestConfig,
    pub session: SessionConfig,
}

/// Chat-completion provider configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub max_connections: u32,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub generate_timeout_ms: u64,
    pub validate_timeout_ms: u64,
}

/// Answer session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Delay after the last edit before an autosave write is issued.
    pub debounce_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let provider = ProviderConfig {
            base_url: env::var("DEEPSEEK_BASE_URL")
                .unwrap_or_else(|_| ProviderConfig::default().base_url),
            model: env::var("DEEPSEEK_MODEL").unwrap_or_else(|_| ProviderConfig::default().model),
            temperature: env::var("GENERATION_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.7),
            max_tokens: env::var("GENERATION_MAX_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2000),
        };
        provider.validate()?;

        let database = DatabaseConfig {
            path: PathBuf::from(
                env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/askdiary.db".to_string()),
            ),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let request = RequestConfig {
            generate_timeout_ms: env::var("GENERATE_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30000),
            validate_timeout_ms: env::var("VALIDATE_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10000),
        };

        let session = SessionConfig {
            debounce_ms: env::var("AUTOSAVE_DEBOUNCE_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(500),
        };
        session.validate()?;

        Ok(Config {
            provider,
            database,
            logging,
            request,
            session,
        })
    }
}

impl ProviderConfig {
    fn validate(&self) -> Result<(), AppError> {
        if self.base_url.trim().is_empty() {
            return Err(AppError::Config {
                message: "DEEPSEEK_BASE_URL cannot be empty".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::Config {
                message: format!(
                    "GENERATION_TEMPERATURE must be between 0 and 2, got {}",
                    self.temperature
                ),
            });
        }
        Ok(())
    }
}

impl SessionConfig {
    fn validate(&self) -> Result<(), AppError> {
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(AppError::Config {
                message: format!(
                    "AUTOSAVE_DEBOUNCE_MS must be at most {}, got {}",
                    MAX_DEBOUNCE_MS, self.debounce_ms
                ),
            });
        }
        Ok(())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.deepseek.com/v1".to_string(),
            model: "deepseek-chat".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            generate_timeout_ms: 30000,
            validate_timeout_ms: 10000,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_config_defaults() {
        let request = RequestConfig::default();
        assert_eq!(request.generate_timeout_ms, 30000);
        assert_eq!(request.validate_timeout_ms, 10000);
    }

    #[test]
    fn test_provider_config_rejects_out_of_range_temperature() {
        let provider = ProviderConfig {
            temperature: 2.5,
            ..ProviderConfig::default()
        };
        assert!(matches!(provider.validate(), Err(AppError::Config { .. })));
    }

    #[test]
    fn test_provider_config_rejects_empty_base_url() {
        let provider = ProviderConfig {
            base_url: "  ".to_string(),
            ..ProviderConfig::default()
        };
        assert!(provider.validate().is_err());
        assert!(ProviderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_session_config_bounds_debounce() {
        assert!(SessionConfig::default().validate().is_ok());
        let at_limit = SessionConfig {
            debounce_ms: MAX_DEBOUNCE_MS,
        };
        assert!(at_limit.validate().is_ok());
        let too_long = SessionConfig {
            debounce_ms: MAX_DEBOUNCE_MS + 1,
        };
        assert!(matches!(too_long.validate(), Err(AppError::Config { .. })));
    }
}
