//! Token verification configuration

use confique::Config;
use jsonwebtoken::Algorithm;
use std::str::FromStr;
use url::Url;

use super::ConfigError;

/// Settings for verifying bearer tokens issued by the external identity provider
#[derive(Debug, Config, Clone)]
pub struct AuthConfig {
    /// Issuer domain, e.g. "tenant.us.auth0.com"
    #[config(env = "DRINKS_AUTH_DOMAIN")]
    pub domain: String,

    /// Audience every accepted token must carry
    #[config(env = "DRINKS_AUTH_AUDIENCE")]
    pub audience: String,

    /// Accepted signing algorithms, comma-separated (default: "RS256")
    #[config(env = "DRINKS_AUTH_ALGORITHMS", default = "RS256")]
    pub algorithms: String,

    /// Issuer URL override (default: https://<domain>/)
    #[config(env = "DRINKS_AUTH_ISSUER")]
    pub issuer: Option<String>,

    /// Key set URL override (default: <issuer>.well-known/jwks.json)
    #[config(env = "DRINKS_AUTH_JWKS_URL")]
    pub jwks_url: Option<String>,

    /// Timeout for fetching the key set in seconds (default: 5)
    #[config(env = "DRINKS_AUTH_JWKS_TIMEOUT", default = 5)]
    pub jwks_timeout: u64,

    /// How long a fetched key set is reused in seconds, 0 disables caching (default: 0)
    #[config(env = "DRINKS_AUTH_JWKS_CACHE_TTL", default = 0)]
    pub jwks_cache_ttl: u64,

    /// Allowed clock skew on token expiry in seconds (default: 0)
    #[config(env = "DRINKS_AUTH_LEEWAY", default = 0)]
    pub leeway: u64,
}

impl AuthConfig {
    /// Issuer every accepted token must name in its `iss` claim
    pub fn issuer_url(&self) -> String {
        self.issuer
            .clone()
            .unwrap_or_else(|| format!("https://{}/", self.domain))
    }

    /// Location of the issuer's published key set
    pub fn jwks_url(&self) -> Result<Url, ConfigError> {
        if let Some(url) = &self.jwks_url {
            return Url::parse(url).map_err(|e| ConfigError::InvalidUrl(url.clone(), e));
        }
        let issuer = self.issuer_url();
        let mut base = Url::parse(&issuer).map_err(|e| ConfigError::InvalidUrl(issuer, e))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(".well-known/jwks.json")
            .map_err(|e| ConfigError::InvalidUrl(base.to_string(), e))
    }

    /// Parse the algorithm allowlist. Only RSA signatures can be checked against
    /// the published key set, so anything else is rejected.
    pub fn allowed_algorithms(&self) -> Result<Vec<Algorithm>, ConfigError> {
        let algorithms = self
            .algorithms
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|name| {
                let alg = Algorithm::from_str(name)
                    .map_err(|_| ConfigError::UnsupportedAlgorithm(name.to_string()))?;
                match alg {
                    Algorithm::RS256
                    | Algorithm::RS384
                    | Algorithm::RS512
                    | Algorithm::PS256
                    | Algorithm::PS384
                    | Algorithm::PS512 => Ok(alg),
                    _ => Err(ConfigError::UnsupportedAlgorithm(name.to_string())),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        if algorithms.is_empty() {
            return Err(ConfigError::NoAlgorithms);
        }
        Ok(algorithms)
    }
}
