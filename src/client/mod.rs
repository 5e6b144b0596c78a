//! Remote API client for the admin panel backend

pub mod cache;

use crate::config::Config;
use crate::models::{Application, ErrorBody, LoginRequest, LoginResponse};
use crate::session::SessionStore;
use self::cache::SnapshotCache;
use std::sync::Arc;
use std::time::Duration;

/// Fallback message when a failed response carries no usable error body.
pub const GENERIC_FETCH_ERROR: &str = "Arizalarni yuklab bo'lmadi";

/// Remote failures are retried this many times before surfacing.
const MAX_FETCH_RETRIES: u32 = 1;

/// Errors surfaced by the API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No bearer token in the session store; no request was sent.
    #[error("Avtorizatsiya talab qilinadi")]
    Unauthorized,
    /// Non-2xx response; the message comes from the error body when present.
    #[error("{message}")]
    Remote { status: u16, message: String },
    /// The request never produced a response.
    #[error("Tarmoq xatosi: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Authenticated client for the admin panel REST backend.
///
/// The session store is injected so callers control where credentials live;
/// the client itself only reads the token and never invents one.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
    cache: SnapshotCache<Vec<Application>>,
}

impl ApiClient {
    pub fn new(config: &Config, session: Arc<SessionStore>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
            cache: SnapshotCache::new(Duration::from_secs(config.cache_freshness_secs)),
        }
    }

    /// Exchange admin credentials for a bearer token and store it in the
    /// session.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let url = format!("{}/auth/login/", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }

        let body: LoginResponse = response.json().await?;
        self.session.set_token(body.token);
        tracing::info!("Admin {} logged in", username);
        Ok(())
    }

    /// Drop the stored token, ending the session.
    pub fn logout(&self) {
        self.session.clear();
        tracing::info!("Session cleared");
    }

    /// Fetch the housing-application collection.
    ///
    /// A fresh cached snapshot is reused without touching the network. A
    /// missing token fails before any request is sent. Remote and transport
    /// failures are retried once, then surfaced.
    pub async fn fetch_applications(&mut self) -> Result<Vec<Application>, ApiError> {
        let token = self.session.token().ok_or(ApiError::Unauthorized)?;

        if let Some(snapshot) = self.cache.get_fresh() {
            tracing::debug!("Serving {} applications from cache", snapshot.len());
            return Ok(snapshot);
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.fetch_applications_once(&token).await {
                Ok(snapshot) => {
                    self.cache.store(snapshot.clone());
                    return Ok(snapshot);
                }
                Err(e) if attempt <= MAX_FETCH_RETRIES => {
                    tracing::warn!("Fetching applications failed (attempt {}): {}", attempt, e);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Drop the cached snapshot so the next fetch revalidates, e.g. after the
    /// network comes back.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    async fn fetch_applications_once(&self, token: &str) -> Result<Vec<Application>, ApiError> {
        let url = format!("{}/applications/", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }

        let body: serde_json::Value = response.json().await?;
        Ok(collection_from_body(body))
    }
}

/// Extract a human-readable message from a failed response.
///
/// The backend optionally sends `{"detail": "..."}`; anything else falls back
/// to the generic message.
async fn remote_error(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let message = match response.json::<ErrorBody>().await {
        Ok(ErrorBody {
            detail: Some(detail),
        }) if !detail.is_empty() => detail,
        _ => GENERIC_FETCH_ERROR.to_string(),
    };
    ApiError::Remote { status, message }
}

/// Normalize an untrusted 2xx body into a collection.
///
/// A non-array body degrades to an empty collection; array elements that do
/// not deserialize are skipped.
fn collection_from_body(body: serde_json::Value) -> Vec<Application> {
    let serde_json::Value::Array(items) = body else {
        tracing::warn!("Applications endpoint returned a non-array body");
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Application>(item) {
            Ok(application) => Some(application),
            Err(e) => {
                tracing::warn!("Skipping malformed application record: {}", e);
                None
            }
        })
        .collect()
}
