//! GitHub Actions secret store.
//!
//! Talks to the repository secrets REST API. Writes are sealed with the
//! target repository's public key (libsodium sealed box), so the value only
//! exists in the clear inside this process and the platform.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use crypto_box::aead::OsRng;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::SecretStore;
use crate::core::config::Config;
use crate::core::constants::{self, env};
use crate::core::types::{RepositoryRef, SecretName, SecretValue};
use crate::error::{ConfigError, PlatformError, Result};

const API_VERSION: &str = "2022-11-28";
const ACCEPT: &str = "application/vnd.github+json";

/// Repository public key used to seal secret values.
#[derive(Debug, Clone, Deserialize)]
struct RepoPublicKey {
    key_id: String,
    key: String,
}

#[derive(Deserialize)]
struct SecretPage {
    total_count: usize,
    secrets: Vec<SecretEntry>,
}

#[derive(Deserialize)]
struct SecretEntry {
    name: String,
}

#[derive(Serialize)]
struct PutSecret<'a> {
    encrypted_value: String,
    key_id: &'a str,
}

#[derive(Deserialize)]
struct ApiMessage {
    message: String,
}

/// GitHub REST client for repository secrets.
pub struct GitHub {
    client: reqwest::Client,
    api_url: String,
    token: Zeroizing<String>,
    keys: Mutex<HashMap<String, RepoPublicKey>>,
}

impl GitHub {
    /// Create a client for `api_url` authenticating with `token`.
    ///
    /// `timeout` bounds every individual HTTP request.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Transport` if the HTTP client cannot be built.
    pub fn new(
        api_url: &str,
        token: impl Into<String>,
        timeout: Duration,
    ) -> std::result::Result<Self, PlatformError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("secret-sync/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: Zeroizing::new(token.into()),
            keys: Mutex::new(HashMap::new()),
        })
    }

    /// Create a client from configuration and the platform token variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoToken` when no token variable is set.
    pub fn from_config(config: &Config) -> Result<Self> {
        let token = env::TOKENS
            .iter()
            .find_map(|key| std::env::var(key).ok().filter(|v| !v.trim().is_empty()))
            .ok_or(ConfigError::NoToken)?;

        Ok(Self::new(config.api_url(), token, config.timeout())?)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.api_url, path))
            .bearer_auth(self.token.as_str())
            .header(reqwest::header::ACCEPT, ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    async fn public_key(
        &self,
        repo: &RepositoryRef,
    ) -> std::result::Result<RepoPublicKey, PlatformError> {
        let cache_key = repo.to_string();
        if let Some(key) = self.cached_key(&cache_key) {
            return Ok(key);
        }

        let path = format!("/repos/{}/{}/actions/secrets/public-key", repo.org, repo.name);
        let response = self
            .request(Method::GET, &path)
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response).await?;
        let key: RepoPublicKey = response.json().await.map_err(transport_error)?;

        debug!(repo = %repo, key_id = %key.key_id, "fetched repository public key");
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(cache_key, key.clone());
        Ok(key)
    }

    fn cached_key(&self, repo: &str) -> Option<RepoPublicKey> {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(repo)
            .cloned()
    }
}

#[async_trait]
impl SecretStore for GitHub {
    async fn list(
        &self,
        repo: &RepositoryRef,
    ) -> std::result::Result<BTreeSet<SecretName>, PlatformError> {
        let mut names = BTreeSet::new();
        let mut seen = 0;

        for page in 1.. {
            let path = format!(
                "/repos/{}/{}/actions/secrets?per_page={}&page={}",
                repo.org,
                repo.name,
                constants::LIST_PAGE_SIZE,
                page
            );
            let response = self
                .request(Method::GET, &path)
                .send()
                .await
                .map_err(transport_error)?;
            let response = check_status(response).await?;
            let body: SecretPage = response.json().await.map_err(transport_error)?;

            let count = body.secrets.len();
            seen += count;
            names.extend(
                body.secrets
                    .into_iter()
                    .filter_map(|s| SecretName::new(s.name).ok()),
            );

            if count < constants::LIST_PAGE_SIZE || seen >= body.total_count {
                break;
            }
        }

        debug!(repo = %repo, count = names.len(), "listed repository secrets");
        Ok(names)
    }

    async fn write(
        &self,
        repo: &RepositoryRef,
        name: &SecretName,
        value: &SecretValue,
    ) -> std::result::Result<(), PlatformError> {
        let key = self.public_key(repo).await?;
        let encrypted_value = seal(&key.key, value)?;
        trace!(name = %name, len = value.len(), "sealed secret value");

        let path = format!(
            "/repos/{}/{}/actions/secrets/{}",
            repo.org, repo.name, name
        );
        let response = self
            .request(Method::PUT, &path)
            .json(&PutSecret {
                encrypted_value,
                key_id: &key.key_id,
            })
            .send()
            .await
            .map_err(transport_error)?;
        check_status(response).await?;

        Ok(())
    }
}

/// Seal `value` for the base64-encoded curve25519 `public_key`.
fn seal(public_key: &str, value: &SecretValue) -> std::result::Result<String, PlatformError> {
    let raw = BASE64
        .decode(public_key.trim())
        .map_err(|e| PlatformError::InvalidPublicKey(e.to_string()))?;
    let bytes: [u8; crypto_box::KEY_SIZE] = raw.as_slice().try_into().map_err(|_| {
        PlatformError::InvalidPublicKey(format!(
            "expected {} bytes, got {}",
            crypto_box::KEY_SIZE,
            raw.len()
        ))
    })?;

    let sealed = crypto_box::PublicKey::from(bytes)
        .seal(&mut OsRng, value.as_bytes())
        .map_err(|_| PlatformError::Encryption)?;

    Ok(BASE64.encode(sealed))
}

fn transport_error(err: reqwest::Error) -> PlatformError {
    if err.is_timeout() {
        PlatformError::Timeout
    } else {
        PlatformError::Transport(err.to_string())
    }
}

async fn check_status(response: Response) -> std::result::Result<Response, PlatformError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let rate_exhausted = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");
    let message = response
        .json::<ApiMessage>()
        .await
        .map(|m| m.message)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_string());

    debug!(status = status.as_u16(), message = %message, "platform request failed");

    Err(match status {
        StatusCode::TOO_MANY_REQUESTS => PlatformError::RateLimited,
        StatusCode::FORBIDDEN if rate_exhausted => PlatformError::RateLimited,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PlatformError::Unauthorized,
        StatusCode::NOT_FOUND => PlatformError::RepositoryNotFound,
        other => PlatformError::Api {
            status: other.as_u16(),
            message,
        },
    })
}
