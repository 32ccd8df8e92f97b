use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_GENAI_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
pub const DEFAULT_FAST_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_PRO_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_USER_AGENT: &str = "gastro/0.1 (insights)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Parsing and validation over an arbitrary env-var lookup, so tests can feed
/// a `HashMap` instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_optional_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .parse::<u64>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(None),
        }
    };

    let genai_api_key = require("GEMINI_API_KEY")?;

    let env = parse_environment(&or_default("GASTRO_ENV", "development"))?;
    let log_level = or_default("GASTRO_LOG_LEVEL", "info");
    let genai_base_url = or_default("GASTRO_GENAI_BASE_URL", DEFAULT_GENAI_BASE_URL);
    // The API key travels in a request header; plain http is only for local mocks.
    if env == Environment::Production && !genai_base_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "GASTRO_GENAI_BASE_URL".to_string(),
            reason: "must use https when GASTRO_ENV=production".to_string(),
        });
    }
    let fast_model = or_default("GASTRO_FAST_MODEL", DEFAULT_FAST_MODEL);
    let pro_model = or_default("GASTRO_PRO_MODEL", DEFAULT_PRO_MODEL);
    let request_timeout_secs = parse_optional_u64("GASTRO_REQUEST_TIMEOUT_SECS")?;
    if request_timeout_secs == Some(0) {
        return Err(ConfigError::InvalidEnvVar {
            var: "GASTRO_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("GASTRO_USER_AGENT", DEFAULT_USER_AGENT);
    let feedback_path = PathBuf::from(or_default(
        "GASTRO_FEEDBACK_PATH",
        "./config/feedback.yaml",
    ));

    Ok(AppConfig {
        env,
        log_level,
        genai_api_key,
        genai_base_url,
        fast_model,
        pro_model,
        request_timeout_secs,
        user_agent,
        feedback_path,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GASTRO_ENV".to_string(),
            reason: format!(
                "unknown environment '{other}'; expected development, test, or production"
            ),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
