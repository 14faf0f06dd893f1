//! Signing keys published by the token issuer

use super::AuthError;
use jsonwebtoken::DecodingKey;
use log::debug;
use moka::future::Cache as MokaCache;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// One entry of the issuer's key set, limited to what RSA verification needs
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SigningKey {
    #[serde(default)]
    pub kid: Option<String>,
    pub kty: String,
    #[serde(rename = "use", default)]
    pub key_use: Option<String>,
    #[serde(default)]
    pub n: Option<String>,
    #[serde(default)]
    pub e: Option<String>,
}

impl SigningKey {
    /// Build the RSA verification key; incomplete key material is never passed on
    pub fn decoding_key(&self) -> Result<DecodingKey, AuthError> {
        let kid = self.kid.as_deref().unwrap_or_default();
        if self.kty != "RSA" {
            return Err(AuthError::UnknownSigningKey(format!(
                "key '{kid}' has unsupported type '{}'",
                self.kty
            )));
        }
        if matches!(self.key_use.as_deref(), Some(key_use) if key_use != "sig") {
            return Err(AuthError::UnknownSigningKey(format!(
                "key '{kid}' is not a signing key"
            )));
        }
        let (Some(n), Some(e)) = (&self.n, &self.e) else {
            return Err(AuthError::UnknownSigningKey(format!(
                "key '{kid}' is missing its modulus or exponent"
            )));
        };
        DecodingKey::from_rsa_components(n, e).map_err(|err| {
            AuthError::UnknownSigningKey(format!("key '{kid}' is unusable: {err}"))
        })
    }
}

/// The issuer's published key set
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct KeySet {
    pub keys: Vec<SigningKey>,
}

impl KeySet {
    pub fn find(&self, kid: &str) -> Option<&SigningKey> {
        self.keys.iter().find(|key| key.kid.as_deref() == Some(kid))
    }
}

/// Resolves key identifiers against the remote key set.
///
/// Without a TTL every lookup fetches the set again. With a TTL the set is
/// reused until it expires, and an unknown `kid` forces one refetch so that
/// rotated keys are picked up.
#[derive(Clone)]
pub struct KeySetCache {
    client: reqwest::Client,
    url: Url,
    cache: Option<MokaCache<Url, Arc<KeySet>>>,
}

impl KeySetCache {
    pub fn new(url: Url, timeout: Duration, cache_ttl: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(2)))
            .build()?;

        let cache = (!cache_ttl.is_zero()).then(|| {
            MokaCache::builder()
                .max_capacity(1)
                .time_to_live(cache_ttl)
                .build()
        });

        Ok(Self { client, url, cache })
    }

    /// Fetch the key set from the issuer
    pub async fn fetch(&self) -> Result<KeySet, AuthError> {
        debug!("Fetching key set from {}", self.url);
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| AuthError::KeySetUnavailable(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AuthError::KeySetUnavailable(format!(
                "issuer answered with status {}",
                response.status()
            )));
        }

        response
            .json::<KeySet>()
            .await
            .map_err(|e| AuthError::KeySetUnavailable(format!("invalid key set: {e}")))
    }

    /// Resolve the verification key for `kid`
    pub async fn signing_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        if let Some(cache) = &self.cache {
            if let Some(keys) = cache.get(&self.url).await {
                if let Some(key) = keys.find(kid) {
                    return key.decoding_key();
                }
                debug!("Key '{}' not in cached key set, refetching", kid);
            }
        }

        let keys = Arc::new(self.fetch().await?);
        if let Some(cache) = &self.cache {
            cache.insert(self.url.clone(), keys.clone()).await;
        }

        keys.find(kid)
            .ok_or_else(|| AuthError::UnknownSigningKey(format!("no key with id '{kid}'")))?
            .decoding_key()
    }
}
