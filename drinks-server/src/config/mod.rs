pub(crate) use crate::config::auth::AuthConfig;
pub(crate) use crate::config::store::StoreConfig;
use confique::Config;
use thiserror::Error;

pub mod auth;
pub mod store;

/// Optional configuration file read from the working directory
const CONFIG_FILE: &str = "drinks.toml";

/// Errors found while validating loaded settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] confique::Error),
    #[error("Invalid URL '{0}': {1}")]
    InvalidUrl(String, url::ParseError),
    #[error("Unsupported signing algorithm '{0}'")]
    UnsupportedAlgorithm(String),
    #[error("At least one signing algorithm must be allowed")]
    NoAlgorithms,
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Main configuration structure for the drinks server
#[derive(Debug, Config, Clone)]
pub struct Settings {
    /// The port the server will listen on (default: 5000)
    #[config(env = "DRINKS_PORT", default = 5000)]
    pub port: u16,

    /// Token verification configuration
    #[config(nested)]
    pub auth: AuthConfig,

    /// Record store configuration
    #[config(nested)]
    pub store: StoreConfig,
}

impl Settings {
    /// Load settings from `drinks.toml` (if present) overlaid by `DRINKS_*` environment variables
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Settings::builder().env().file(CONFIG_FILE).load()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check the values that can only be judged after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.auth.allowed_algorithms()?;
        self.auth.jwks_url()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn for_test_with_mocks(jwks_mock: &wiremock::MockServer) -> Self {
        Self {
            port: 0, // Let the OS choose a port
            auth: AuthConfig {
                domain: jwks_mock.address().to_string(),
                audience: crate::test_utils::TEST_AUDIENCE.to_string(),
                algorithms: "RS256".to_string(),
                issuer: Some(crate::test_utils::TEST_ISSUER.to_string()),
                jwks_url: Some(format!("{}/.well-known/jwks.json", jwks_mock.uri())),
                jwks_timeout: 2,
                jwks_cache_ttl: 0,
                leeway: 0,
            },
            store: StoreConfig::default(),
        }
    }
}
