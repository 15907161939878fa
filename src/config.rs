//! Handler configuration.
//!
//! Values come from the process environment (after loading `.env`), with
//! defaults for anything unset:
//!
//! | Variable                          | Default       |
//! |-----------------------------------|---------------|
//! | `JOB_HANDLER_DEFAULT_ENVIRONMENT` | `development` |
//! | `JOB_HANDLER_API_KEY_SECRET`      | `API_KEY`     |
//! | `JOB_HANDLER_OBSERVER`            | `log`         |
//! | `JOB_HANDLER_LOG_FORMAT`          | `pretty`      |

use crate::error::ConfigError;
use crate::observability::ObservabilityConfig;

pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_API_KEY_SECRET: &str = "API_KEY";

/// Configuration for the job handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Runtime profile used when the context has no `ENVIRONMENT`.
    pub default_environment: String,
    /// Name of the secret reported (masked) during `invoke`.
    pub api_key_secret: String,
    /// Observer backend.
    pub observability: ObservabilityConfig,
    /// Log output format for the runner binary.
    pub log_format: LogFormat,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            default_environment: DEFAULT_ENVIRONMENT.to_string(),
            api_key_secret: DEFAULT_API_KEY_SECRET.to_string(),
            observability: ObservabilityConfig::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl HandlerConfig {
    /// Load `.env` if present, then resolve from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through `lookup`, falling back to defaults.
    pub fn resolve<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_format = match optional(&lookup, "JOB_HANDLER_LOG_FORMAT")? {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|message| ConfigError::InvalidValue {
                    key: "JOB_HANDLER_LOG_FORMAT".to_string(),
                    message,
                })?,
            None => defaults.log_format,
        };

        Ok(Self {
            default_environment: optional(&lookup, "JOB_HANDLER_DEFAULT_ENVIRONMENT")?
                .unwrap_or(defaults.default_environment),
            api_key_secret: optional(&lookup, "JOB_HANDLER_API_KEY_SECRET")?
                .unwrap_or(defaults.api_key_secret),
            observability: ObservabilityConfig {
                backend: optional(&lookup, "JOB_HANDLER_OBSERVER")?
                    .unwrap_or(defaults.observability.backend),
            },
            log_format,
        })
    }
}

/// Read a variable; set-but-empty is an error rather than a silent default.
fn optional<F>(lookup: &F, key: &str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "must not be empty".to_string(),
        }),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!(
                "invalid log format '{}', expected 'pretty' or 'json'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = HandlerConfig::resolve(lookup_from(&[])).unwrap();
        assert_eq!(config, HandlerConfig::default());
        assert_eq!(config.default_environment, "development");
        assert_eq!(config.api_key_secret, "API_KEY");
        assert_eq!(config.observability.backend, "log");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = HandlerConfig::resolve(lookup_from(&[
            ("JOB_HANDLER_DEFAULT_ENVIRONMENT", "staging"),
            ("JOB_HANDLER_API_KEY_SECRET", "SERVICE_TOKEN"),
            ("JOB_HANDLER_OBSERVER", "noop"),
            ("JOB_HANDLER_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.default_environment, "staging");
        assert_eq!(config.api_key_secret, "SERVICE_TOKEN");
        assert_eq!(config.observability.backend, "noop");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_empty_values() {
        let err = HandlerConfig::resolve(lookup_from(&[("JOB_HANDLER_DEFAULT_ENVIRONMENT", " ")]))
            .unwrap_err();
        assert!(err.to_string().contains("JOB_HANDLER_DEFAULT_ENVIRONMENT"));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let err = HandlerConfig::resolve(lookup_from(&[("JOB_HANDLER_LOG_FORMAT", "xml")]))
            .unwrap_err();
        assert!(err.to_string().contains("invalid log format 'xml'"));
    }
}
