use super::jwks::KeySetCache;
use super::AuthError;
use crate::config::{AuthConfig, ConfigError};
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{Algorithm, Validation};
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// The `aud` claim, which issuers send either as one string or as a list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Many(Vec<String>),
}

/// Decoded payload of a verified token
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Claims {
    #[serde(default)]
    pub iss: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub aud: Option<Audience>,
    #[serde(default)]
    pub exp: Option<i64>,
    /// Granted permissions, lowercased on decode
    #[serde(default, deserialize_with = "lowercase_permissions")]
    pub permissions: Option<BTreeSet<String>>,
}

impl Claims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}

fn lowercase_permissions<'de, D>(deserializer: D) -> Result<Option<BTreeSet<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let permissions: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(permissions.map(|permissions| {
        permissions
            .into_iter()
            .map(|permission| permission.to_lowercase())
            .collect()
    }))
}

/// Validates bearer tokens against the issuer's key set
pub struct TokenVerifier {
    keys: KeySetCache,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(
        keys: KeySetCache,
        algorithms: Vec<Algorithm>,
        audience: &str,
        issuer: &str,
        leeway: u64,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.algorithms = algorithms;
        validation.set_audience(&[audience]);
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "aud", "iss"]);
        validation.leeway = leeway;
        Self { keys, validation }
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, ConfigError> {
        let keys = KeySetCache::new(
            config.jwks_url()?,
            Duration::from_secs(config.jwks_timeout),
            Duration::from_secs(config.jwks_cache_ttl),
        )?;
        Ok(Self::new(
            keys,
            config.allowed_algorithms()?,
            &config.audience,
            &config.issuer_url(),
            config.leeway,
        ))
    }

    /// Verify the token's signature and standard claims and return its payload
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = jsonwebtoken::decode_header(token).map_err(|e| {
            AuthError::InvalidHeader(format!("Unable to parse authentication token: {e}"))
        })?;

        if !self.validation.algorithms.contains(&header.alg) {
            return Err(AuthError::InvalidHeader(format!(
                "signing algorithm {:?} is not allowed",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidHeader("token header has no key id".to_string()))?;
        let key = self.keys.signing_key(&kid).await?;

        let data = jsonwebtoken::decode::<Claims>(token, &key, &self.validation)
            .map_err(verification_error)?;

        debug!(
            "Verified token for '{}' signed with key '{}', valid until {}",
            data.claims.sub.as_deref().unwrap_or("unknown"),
            kid,
            data.claims
                .expires_at()
                .map_or_else(|| "unknown".to_string(), |at| at.to_rfc3339())
        );
        Ok(data.claims)
    }
}

fn verification_error(err: JwtError) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        ErrorKind::InvalidAudience
        | ErrorKind::InvalidIssuer
        | ErrorKind::InvalidSubject
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims(err.to_string()),
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidRsaKey(_) | ErrorKind::InvalidKeyFormat => {
            AuthError::UnknownSigningKey(err.to_string())
        }
        _ => AuthError::InvalidHeader(format!("Unable to parse authentication token: {err}")),
    }
}
