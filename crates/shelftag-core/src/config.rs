use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let shop_domain = require("SHELFTAG_SHOP_DOMAIN")?;
    let admin_token = require("SHELFTAG_ADMIN_TOKEN")?;
    let webhook_secret = require("SHELFTAG_WEBHOOK_SECRET")?;
    let callback_url = require("SHELFTAG_CALLBACK_URL")?;

    let env = parse_environment(&or_default("SHELFTAG_ENV", "development"));

    let bind_addr = parse_addr("SHELFTAG_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SHELFTAG_LOG_LEVEL", "info");
    let api_version = or_default("SHELFTAG_API_VERSION", "2024-10");

    let request_timeout_secs = parse_u64("SHELFTAG_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("SHELFTAG_MAX_RETRIES", "3")?;
    let retry_delay_secs = parse_u64("SHELFTAG_RETRY_DELAY_SECS", "1")?;
    let page_size = parse_u32("SHELFTAG_PAGE_SIZE", "250")?;
    let inter_page_delay_ms = parse_u64("SHELFTAG_INTER_PAGE_DELAY_MS", "250")?;
    let inter_call_delay_ms = parse_u64("SHELFTAG_INTER_CALL_DELAY_MS", "1000")?;
    let cooldown_secs = parse_u64("SHELFTAG_COOLDOWN_SECS", "30")?;
    let batch_size = parse_usize("SHELFTAG_BATCH_SIZE", "25")?;
    let batch_interval_secs = parse_u64("SHELFTAG_BATCH_INTERVAL_SECS", "5")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        shop_domain,
        api_version,
        admin_token,
        webhook_secret,
        callback_url,
        request_timeout_secs,
        max_retries,
        retry_delay_secs,
        page_size,
        inter_page_delay_ms,
        inter_call_delay_ms,
        cooldown_secs,
        batch_size,
        batch_interval_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("SHELFTAG_SHOP_DOMAIN", "example.myshopify.com");
        m.insert("SHELFTAG_ADMIN_TOKEN", "shpat_test_token");
        m.insert("SHELFTAG_WEBHOOK_SECRET", "whsec_test");
        m.insert(
            "SHELFTAG_CALLBACK_URL",
            "https://shelftag.example.com/webhooks/products-update",
        );
        m
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_shop_domain() {
        let mut map = full_env();
        map.remove("SHELFTAG_SHOP_DOMAIN");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SHELFTAG_SHOP_DOMAIN"),
            "expected MissingEnvVar(SHELFTAG_SHOP_DOMAIN), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_admin_token() {
        let mut map = full_env();
        map.remove("SHELFTAG_ADMIN_TOKEN");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SHELFTAG_ADMIN_TOKEN"),
            "expected MissingEnvVar(SHELFTAG_ADMIN_TOKEN), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_webhook_secret() {
        let mut map = full_env();
        map.remove("SHELFTAG_WEBHOOK_SECRET");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SHELFTAG_WEBHOOK_SECRET"),
            "expected MissingEnvVar(SHELFTAG_WEBHOOK_SECRET), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = full_env();
        map.insert("SHELFTAG_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELFTAG_BIND_ADDR"),
            "expected InvalidEnvVar(SHELFTAG_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_all_required_vars() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.api_version, "2024-10");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.retry_delay_secs, 1);
        assert_eq!(cfg.page_size, 250);
        assert_eq!(cfg.inter_page_delay_ms, 250);
        assert_eq!(cfg.inter_call_delay_ms, 1000);
        assert_eq!(cfg.cooldown_secs, 30);
        assert_eq!(cfg.batch_size, 25);
        assert_eq!(cfg.batch_interval_secs, 5);
    }

    #[test]
    fn cooldown_secs_override() {
        let mut map = full_env();
        map.insert("SHELFTAG_COOLDOWN_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.cooldown_secs, 60);
    }

    #[test]
    fn cooldown_secs_invalid() {
        let mut map = full_env();
        map.insert("SHELFTAG_COOLDOWN_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELFTAG_COOLDOWN_SECS"),
            "expected InvalidEnvVar(SHELFTAG_COOLDOWN_SECS), got: {result:?}"
        );
    }

    #[test]
    fn batch_size_override() {
        let mut map = full_env();
        map.insert("SHELFTAG_BATCH_SIZE", "100");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.batch_size, 100);
    }

    #[test]
    fn batch_interval_invalid() {
        let mut map = full_env();
        map.insert("SHELFTAG_BATCH_INTERVAL_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELFTAG_BATCH_INTERVAL_SECS"),
            "expected InvalidEnvVar(SHELFTAG_BATCH_INTERVAL_SECS), got: {result:?}"
        );
    }

    #[test]
    fn max_retries_override() {
        let mut map = full_env();
        map.insert("SHELFTAG_MAX_RETRIES", "5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_retries, 5);
    }

    #[test]
    fn debug_redacts_secrets() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("shpat_test_token"), "admin token leaked");
        assert!(!rendered.contains("whsec_test"), "webhook secret leaked");
        assert!(rendered.contains("[redacted]"));
    }
}
