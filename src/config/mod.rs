use std::env;
use std::time::Duration;

/// Credential defaults used when the environment does not provide real ones.
pub const PLACEHOLDER_STORE: &str = "changeme-store";
pub const PLACEHOLDER_API_KEY: &str = "changeme-key";
pub const PLACEHOLDER_API_SECRET: &str = "changeme-secret";

/// Configuration loading failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub upstream_base_url: String,
    pub upstream_timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let string = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            store_name: string("ZORT_STORE", PLACEHOLDER_STORE),
            api_key: string("ZORT_API_KEY", PLACEHOLDER_API_KEY),
            api_secret: string("ZORT_API_SECRET", PLACEHOLDER_API_SECRET),
            upstream_base_url: string("UPSTREAM_BASE_URL", "https://open-api.zortout.com/v4"),
            upstream_timeout_secs: parse_or(&lookup, "UPSTREAM_TIMEOUT_SECS", 15)?,
            cache_ttl_secs: parse_or(&lookup, "CACHE_TTL_SECS", 300)?,
            host: string("BACKEND_HOST", "0.0.0.0"),
            port: parse_or(&lookup, "PORT", 3000)?,
            static_dir: string("STATIC_DIR", "public"),
        })
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// True when every credential is set to something other than a placeholder.
    pub fn api_configured(&self) -> bool {
        [
            (&self.store_name, PLACEHOLDER_STORE),
            (&self.api_key, PLACEHOLDER_API_KEY),
            (&self.api_secret, PLACEHOLDER_API_SECRET),
        ]
        .iter()
        .all(|(value, placeholder)| !value.is_empty() && value.as_str() != *placeholder)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_source(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.upstream_timeout(), Duration::from_secs(15));
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.upstream_base_url, "https://open-api.zortout.com/v4");
        assert_eq!(config.static_dir, "public");
    }

    #[test]
    fn placeholder_credentials_are_not_configured() {
        let config = config_from(&[]).unwrap();
        assert!(!config.api_configured());

        let partial = config_from(&[("ZORT_STORE", "shop@example.test"), ("ZORT_API_KEY", "k")]).unwrap();
        assert!(!partial.api_configured());
    }

    #[test]
    fn real_credentials_are_configured() {
        let config = config_from(&[
            ("ZORT_STORE", "shop@example.test"),
            ("ZORT_API_KEY", "key"),
            ("ZORT_API_SECRET", "secret"),
        ])
        .unwrap();
        assert!(config.api_configured());
    }

    #[test]
    fn empty_credential_is_not_configured() {
        let config = config_from(&[
            ("ZORT_STORE", "shop@example.test"),
            ("ZORT_API_KEY", ""),
            ("ZORT_API_SECRET", "secret"),
        ])
        .unwrap();
        assert!(!config.api_configured());
    }

    #[test]
    fn unparseable_number_is_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
        assert_eq!(err.to_string(), "Invalid value for PORT: \"eighty\"");
    }

    #[test]
    fn numeric_overrides_are_parsed() {
        let config = config_from(&[("PORT", "8080"), ("CACHE_TTL_SECS", " 60 ")]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.cache_ttl_secs, 60);
    }
}
