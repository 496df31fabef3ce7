use crate::error::ConfigError;

/// Credentials of an authenticated marketplace user.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    pub user_id: i64,
    pub api_key: String,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("user_id", &self.user_id)
            .field("api_key", &"[redacted]")
            .finish()
    }
}

#[derive(Clone)]
pub struct SdkConfig {
    pub base_url: String,
    pub credentials: Option<ApiCredentials>,
    pub language: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
}

impl std::fmt::Debug for SdkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdkConfig")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("language", &self.language)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Load SDK configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_sdk_config() -> Result<SdkConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_sdk_config(|key| std::env::var(key))
}

/// Build SDK configuration using the provided env-var lookup function.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn build_sdk_config<F>(lookup: F) -> Result<SdkConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let base_url = require("MPSDK_BASE_URL")?;
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(invalid(
            "MPSDK_BASE_URL",
            format!("expected an http(s) URL, got \"{base_url}\""),
        ));
    }

    let credentials = match lookup("MPSDK_API_KEY").ok().filter(|k| !k.is_empty()) {
        Some(api_key) => {
            let raw = require("MPSDK_USER_ID")?;
            let user_id = raw
                .parse::<i64>()
                .map_err(|e| invalid("MPSDK_USER_ID", e.to_string()))?;
            Some(ApiCredentials { user_id, api_key })
        }
        None => None,
    };

    let language = lookup("MPSDK_LANGUAGE").ok().filter(|l| !l.is_empty());

    let request_timeout_secs = or_default("MPSDK_REQUEST_TIMEOUT_SECS", "30")
        .parse::<u64>()
        .map_err(|e| invalid("MPSDK_REQUEST_TIMEOUT_SECS", e.to_string()))?;
    let user_agent = or_default("MPSDK_USER_AGENT", "mpsdk/0.1 (marketplace-client)");
    let log_level = or_default("MPSDK_LOG_LEVEL", "info");

    Ok(SdkConfig {
        base_url,
        credentials,
        language,
        request_timeout_secs,
        user_agent,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
