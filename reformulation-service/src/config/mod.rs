use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Environment variable holding the model provider credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

const DEFAULT_MODEL: &str = "gpt-4.1-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Deserialize)]
pub struct ReformulationConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub environment: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub openai: OpenAiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// `None` when the credential was absent at startup.
    pub api_key: Option<String>,
    /// Model identifier sent with every request (e.g., gpt-4.1-mini)
    pub model: String,
    /// Provider API root, overridable for local stubs
    pub base_url: String,
}

impl ReformulationConfig {
    /// Load the service configuration.
    ///
    /// A missing credential is fatal only when `ENVIRONMENT=prod`; elsewhere it
    /// is recorded as `None` and reported by [`ReformulationConfig::api_key`].
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let environment = get_env("ENVIRONMENT", Some("dev"), false)?;
        let is_prod = environment == "prod";

        let api_key = match load_api_key() {
            Ok(key) => Some(key),
            Err(e) if is_prod => return Err(e),
            Err(_) => None,
        };

        Ok(ReformulationConfig {
            common: common_config,
            environment,
            log_level: get_env("LOG_LEVEL", Some("info"), false)?,
            otlp_endpoint: get_optional_env("OTLP_ENDPOINT"),
            openai: OpenAiConfig {
                api_key,
                model: get_env("OPENAI_MODEL", Some(DEFAULT_MODEL), false)?,
                base_url: get_env("OPENAI_BASE_URL", Some(DEFAULT_BASE_URL), false)?,
            },
        })
    }

    /// The provider credential, or the configuration error explaining its absence.
    pub fn api_key(&self) -> Result<&str, AppError> {
        self.openai
            .api_key
            .as_deref()
            .ok_or_else(missing_api_key_error)
    }
}

/// Read the provider credential from the process environment.
///
/// `.env` is consulted first but never overrides variables already set.
pub fn load_api_key() -> Result<String, AppError> {
    dotenvy::dotenv().ok();
    get_optional_env(API_KEY_VAR).ok_or_else(missing_api_key_error)
}

fn missing_api_key_error() -> AppError {
    AppError::ConfigError(anyhow::anyhow!(
        "{} is not set. Configure it before starting the service.",
        API_KEY_VAR
    ))
}

/// Unset and empty variables are both treated as absent.
fn get_optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match get_optional_env(key) {
        Some(val) => Ok(val),
        None => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn config_with_key(api_key: Option<&str>) -> ReformulationConfig {
        ReformulationConfig {
            common: core_config::Config::default(),
            environment: "test".to_string(),
            log_level: "info".to_string(),
            otlp_endpoint: None,
            openai: OpenAiConfig {
                api_key: api_key.map(str::to_string),
                model: DEFAULT_MODEL.to_string(),
                base_url: DEFAULT_BASE_URL.to_string(),
            },
        }
    }

    #[test]
    fn api_key_present() {
        let config = config_with_key(Some("sk-test"));
        assert_eq!(config.api_key().unwrap(), "sk-test");
    }

    #[test]
    fn missing_api_key_is_config_error() {
        let config = config_with_key(None);
        match config.api_key() {
            Err(AppError::ConfigError(e)) => assert!(e.to_string().contains(API_KEY_VAR)),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn default_used_for_unset_optional_var() {
        let value = get_env("REFORMULATION_TEST_SURELY_UNSET", Some("fallback"), false).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn unset_required_var_fails_in_prod() {
        let result = get_env("REFORMULATION_TEST_SURELY_UNSET", Some("fallback"), true);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    // Tests below mutate process-wide variables and must not interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Run `f` with the given variables set (`Some`) or removed (`None`),
    /// restoring their previous values afterwards.
    fn with_env<T>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let saved: Vec<(String, Option<String>)> = vars
            .iter()
            .map(|(key, _)| (key.to_string(), env::var(key).ok()))
            .collect();
        for (key, value) in vars {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }

        let result = f();

        for (key, value) in saved {
            match value {
                Some(v) => env::set_var(&key, v),
                None => env::remove_var(&key),
            }
        }
        result
    }

    #[test]
    fn load_api_key_reads_environment() {
        let key = with_env(&[(API_KEY_VAR, Some("sk-from-env"))], load_api_key);
        assert_eq!(key.unwrap(), "sk-from-env");
    }

    #[test]
    fn empty_api_key_counts_as_absent() {
        let result = with_env(&[(API_KEY_VAR, Some(""))], load_api_key);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn unset_api_key_is_config_error() {
        let result = with_env(&[(API_KEY_VAR, None)], load_api_key);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn load_fails_in_prod_without_api_key() {
        let result = with_env(
            &[(API_KEY_VAR, Some("")), ("ENVIRONMENT", Some("prod"))],
            ReformulationConfig::load,
        );
        match result {
            Err(AppError::ConfigError(e)) => assert!(e.to_string().contains(API_KEY_VAR)),
            other => panic!("expected ConfigError, got {:?}", other.map(|c| c.environment)),
        }
    }

    #[test]
    fn load_degrades_outside_prod_without_api_key() {
        let config = with_env(
            &[(API_KEY_VAR, None), ("ENVIRONMENT", Some("dev"))],
            ReformulationConfig::load,
        )
        .expect("non-prod load should succeed without a key");

        assert_eq!(config.environment, "dev");
        assert!(config.openai.api_key.is_none());
        assert!(matches!(config.api_key(), Err(AppError::ConfigError(_))));
    }

    #[test]
    fn load_keeps_api_key_in_prod() {
        let config = with_env(
            &[(API_KEY_VAR, Some("sk-prod")), ("ENVIRONMENT", Some("prod"))],
            ReformulationConfig::load,
        )
        .expect("prod load should succeed with a key");

        assert_eq!(config.api_key().unwrap(), "sk-prod");
    }
}
