use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
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
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("SOCIALDATA_ENV", "development"))?;
    let bind_addr = parse_addr("SOCIALDATA_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SOCIALDATA_LOG_LEVEL", "info");

    let public_url = or_default("SOCIALDATA_PUBLIC_URL", "http://localhost:3000");
    if !(public_url.starts_with("http://") || public_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "SOCIALDATA_PUBLIC_URL".to_string(),
            reason: format!("'{public_url}' is not an absolute http(s) URL"),
        });
    }

    let feeds_path = PathBuf::from(or_default("SOCIALDATA_FEEDS_PATH", "./config/feeds.yaml"));
    let engine_store_path = PathBuf::from(or_default(
        "SOCIALDATA_ENGINE_STORE_PATH",
        "./config/linkedin_engine.json",
    ));

    let linkedin_client_id = optional("LINKEDIN_CLIENT_ID");
    let linkedin_client_secret = optional("LINKEDIN_CLIENT_SECRET");
    let linkedin_connect_scopes =
        parse_scopes(&or_default("LINKEDIN_CONNECT_SCOPES", "r_organization_social"));
    if linkedin_connect_scopes.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "LINKEDIN_CONNECT_SCOPES".to_string(),
            reason: "at least one scope is required".to_string(),
        });
    }

    let linkedin_request_timeout_secs = parse_u64("LINKEDIN_REQUEST_TIMEOUT_SECS", "30")?;
    if linkedin_request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "LINKEDIN_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        public_url,
        feeds_path,
        engine_store_path,
        linkedin_client_id,
        linkedin_client_secret,
        linkedin_connect_scopes,
        linkedin_request_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SOCIALDATA_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Split a comma- or whitespace-separated scope list, dropping duplicates.
fn parse_scopes(raw: &str) -> Vec<String> {
    let mut scopes: Vec<String> = Vec::new();
    for scope in raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        if !scopes.iter().any(|s| s == scope) {
            scopes.push(scope.to_string());
        }
    }
    scopes
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
