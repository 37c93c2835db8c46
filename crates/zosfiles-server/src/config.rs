//! Configuration management

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default z/OSMF root URL.
pub const DEFAULT_ZOSMF_BASE_URL: &str = "https://localhost:443";

/// Default z/OSMF transport timeout in seconds.
pub const DEFAULT_ZOSMF_TIMEOUT_SECS: u64 = 60;

/// Default CORS allowed origin for local development.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub zosmf: ZosmfConfig,
    pub cors: CorsConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// Remote z/OSMF connection
#[derive(Clone, Serialize, Deserialize)]
pub struct ZosmfConfig {
    pub base_url: String,
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub timeout_secs: u64,
    pub accept_invalid_certs: bool,
}

impl fmt::Debug for ZosmfConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZosmfConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

impl Default for ZosmfConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ZOSMF_BASE_URL.to_string(),
            username: None,
            password: None,
            timeout_secs: DEFAULT_ZOSMF_TIMEOUT_SECS,
            accept_invalid_certs: false,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_env();
        config.validate()?;

        Ok(config)
    }

    /// Read the environment without touching `.env` or validating
    pub fn from_env() -> Self {
        Config {
            server: ServerConfig {
                host: std::env::var("ZOSFILES_HOST")
                    .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                port: env_parse("ZOSFILES_PORT", DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: env_parse(
                    "ZOSFILES_SHUTDOWN_TIMEOUT",
                    DEFAULT_SHUTDOWN_TIMEOUT_SECS,
                ),
            },
            zosmf: ZosmfConfig {
                base_url: std::env::var("ZOSMF_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_ZOSMF_BASE_URL.to_string()),
                username: env_optional("ZOSMF_USERNAME"),
                password: env_optional("ZOSMF_PASSWORD"),
                timeout_secs: env_parse("ZOSMF_TIMEOUT_SECS", DEFAULT_ZOSMF_TIMEOUT_SECS),
                accept_invalid_certs: env_parse("ZOSMF_ACCEPT_INVALID_CERTS", false),
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_CORS_ALLOWED_ORIGIN.to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                allow_credentials: env_parse("CORS_ALLOW_CREDENTIALS", true),
            },
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        let base_url = Url::parse(&self.zosmf.base_url).map_err(|e| {
            anyhow::anyhow!("Invalid z/OSMF base URL '{}': {}", self.zosmf.base_url, e)
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            anyhow::bail!(
                "z/OSMF base URL must use http or https, got '{}'",
                base_url.scheme()
            );
        }

        if self.zosmf.timeout_secs == 0 {
            anyhow::bail!("z/OSMF timeout must be greater than 0");
        }

        if self.zosmf.username.is_some() != self.zosmf.password.is_some() {
            anyhow::bail!("ZOSMF_USERNAME and ZOSMF_PASSWORD must be set together");
        }

        if self.zosmf.accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled for z/OSMF");
        }

        if self.cors.allowed_origins.is_empty() {
            tracing::warn!("No CORS origins configured - all origins will be allowed");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            },
            zosmf: ZosmfConfig::default(),
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
                allow_credentials: true,
            },
        }
    }
}
