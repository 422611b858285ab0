use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Main configuration structure loaded from coursecraft.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// HTTP transport configuration handed to the router at startup
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: SocketAddr,
    /// "production" restricts CORS to `allowed_origins`; anything else mirrors the caller
    pub environment: String,
    pub allowed_origins: Vec<String>,
    pub max_body_bytes: usize,
    pub request_timeout_ms: u64,
    /// Request budget per client IP per minute; 0 disables rate limiting
    pub rate_limit_per_minute: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            environment: "development".to_string(),
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
            max_body_bytes: 50 * 1024 * 1024,
            request_timeout_ms: 10_000,
            rate_limit_per_minute: 120,
        }
    }
}

impl HttpConfig {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Parse configured origins into header values
    pub fn origin_header_values(&self) -> anyhow::Result<Vec<HeaderValue>> {
        self.allowed_origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o)
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect()
    }
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "coursecraft=info,tower_http=info".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "coursecraft=info,tower_http=info".to_string()),
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables.
    /// Uses COURSECRAFT_CONFIG environment variable or defaults to "coursecraft.toml"
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(None)
    }

    /// Same as [`Config::load`], with an explicit config path taking precedence
    pub fn load_from(path: Option<&str>) -> anyhow::Result<Self> {
        if let Ok(env_path) = std::env::var("COURSECRAFT_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::from_path(".env");
        }

        let config_path = path.map(str::to_string).unwrap_or_else(|| {
            std::env::var("COURSECRAFT_CONFIG").unwrap_or_else(|_| "coursecraft.toml".to_string())
        });

        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            toml::from_str(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.runtime = RuntimeConfig::load_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Apply env-style overrides from `lookup` (env-first)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("COURSECRAFT_HTTP_BIND") {
            match v.parse::<SocketAddr>() {
                Ok(bind) => self.http.bind = bind,
                Err(_) => tracing::warn!("Ignoring unparsable COURSECRAFT_HTTP_BIND '{}'", v),
            }
        }
        if let Some(origins) = lookup("COURSECRAFT_FRONTEND_ORIGIN") {
            self.http.allowed_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            tracing::debug!("COURSECRAFT_FRONTEND_ORIGIN env override applied");
        }
        if let Some(env) = lookup("COURSECRAFT_ENVIRONMENT").or_else(|| lookup("NODE_ENV")) {
            self.http.environment = env;
        }
        if let Some(bytes) = lookup("COURSECRAFT_MAX_BODY_BYTES").and_then(|v| v.parse().ok()) {
            self.http.max_body_bytes = bytes;
        }
        if let Some(ms) = lookup("COURSECRAFT_HTTP_REQUEST_TIMEOUT_MS").and_then(|v| v.parse().ok())
        {
            self.http.request_timeout_ms = ms;
        }
        if let Some(rpm) = lookup("COURSECRAFT_RATE_LIMIT_PER_MINUTE").and_then(|v| v.parse().ok())
        {
            self.http.rate_limit_per_minute = rpm;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        self.http.origin_header_values()?;
        if self.http.is_production() && self.http.allowed_origins.is_empty() {
            anyhow::bail!("production environment requires at least one allowed origin");
        }
        if self.http.max_body_bytes == 0 {
            anyhow::bail!("max_body_bytes must be > 0");
        }
        if self.http.request_timeout_ms == 0 {
            anyhow::bail!("request_timeout_ms must be > 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(!config.http.is_production());
        assert_eq!(config.http.rate_limit_per_minute, 120);
        assert_eq!(config.http.max_body_bytes, 50 * 1024 * 1024);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[
            ("COURSECRAFT_HTTP_BIND", "0.0.0.0:8080"),
            (
                "COURSECRAFT_FRONTEND_ORIGIN",
                "https://app.example.com, https://admin.example.com",
            ),
            ("NODE_ENV", "production"),
            ("COURSECRAFT_RATE_LIMIT_PER_MINUTE", "0"),
        ]));
        assert_eq!(config.http.bind.port(), 8080);
        assert_eq!(
            config.http.allowed_origins,
            vec!["https://app.example.com", "https://admin.example.com"]
        );
        assert!(config.http.is_production());
        assert_eq!(config.http.rate_limit_per_minute, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_bind_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[("COURSECRAFT_HTTP_BIND", "not-an-addr")]));
        assert_eq!(config.http.bind, HttpConfig::default().bind);
    }

    #[test]
    fn test_production_requires_origins() {
        let mut config = Config::default();
        config.http.environment = "production".to_string();
        config.http.allowed_origins.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_origin_rejected() {
        let mut config = Config::default();
        config.http.allowed_origins = vec!["http://bad\norigin".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [http]
            bind = "0.0.0.0:9000"
            environment = "production"
            "#,
        )
        .unwrap();
        assert_eq!(config.http.bind.port(), 9000);
        assert!(config.http.is_production());
        assert_eq!(config.http.request_timeout_ms, 10_000);
        assert_eq!(config.http.allowed_origins.len(), 2);
    }
}
