//! Infrastructure implementation of the `PlatformApi` port over HTTPS.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, RANGE, USER_AGENT};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::ports::PlatformApi;
use crate::domain::error::ApiError;
use crate::domain::release::{App, Dyno, Release};

/// Media type selecting version 3 of the platform API.
pub const API_ACCEPT: &str = "application/vnd.heroku+json; version=3";

/// Range header asking for only the newest release.
pub const LATEST_RELEASE_RANGE: &str = "version ..; max=1, order=desc";

/// Per-request timeout. There are no retries.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Production implementation of `PlatformApi` backed by `reqwest`.
pub struct HerokuApiClient {
    http: Client,
    base: Url,
}

impl HerokuApiClient {
    /// Build a client for `base_url` authenticating with `token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty, the URL is invalid, or the
    /// HTTP client cannot be built.
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(ApiError::MissingToken.into());
        }
        let base = Url::parse(base_url).with_context(|| format!("invalid API URL: {base_url}"))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("invalid API URL: {base_url}");
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(API_ACCEPT));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .context("API token contains invalid characters")?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("pswait/", env!("CARGO_PKG_VERSION"))),
        );

        let http = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("cannot build HTTP client")?;

        Ok(Self { http, base })
    }

    /// Build a client from `HEROKU_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingToken`] if the variable is unset or empty.
    pub fn from_env(base_url: &str) -> Result<Self> {
        let token = std::env::var("HEROKU_API_KEY").unwrap_or_default();
        Self::new(base_url, &token)
    }

    /// URL for `/apps/{app}/{rest..}`, with `app` encoded as one path segment.
    fn app_url(&self, app: &str, rest: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("apps").push(app).extend(rest);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, range: Option<&str>) -> Result<T> {
        let path = url.path().to_string();
        let mut request = self.http.get(url);
        if let Some(range) = range {
            request = request.header(RANGE, range);
        }

        let response = request.send().await.map_err(|e| ApiError::Transport {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let status = response.status();
        debug!(method = "GET", path = %path, status = status.as_u16(), "api response");

        let body = response.text().await.map_err(|e| ApiError::Transport {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body, status.canonical_reason()),
                path,
            }
            .into());
        }

        serde_json::from_str(&body).map_err(|e| {
            ApiError::Decode {
                path,
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// Pull the human-readable `message` out of an API error body.
fn error_message(body: &str, reason: Option<&str>) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| reason.unwrap_or("request failed").to_string())
}

impl PlatformApi for HerokuApiClient {
    async fn app(&self, app: &str) -> Result<App> {
        self.get_json(self.app_url(app, &[]), None).await
    }

    async fn latest_releases(&self, app: &str) -> Result<Vec<Release>> {
        self.get_json(self.app_url(app, &["releases"]), Some(LATEST_RELEASE_RANGE))
            .await
    }

    async fn dynos(&self, app: &str) -> Result<Vec<Dyno>> {
        self.get_json(self.app_url(app, &["dynos"]), None).await
    }
}
