//! HTTP client for the resume analysis service.
//!
//! Endpoints consumed:
//! - `POST /login` (form-encoded `username`, `password`)
//! - `POST /register` (JSON `email`, `password`)
//! - `GET /me` (bearer token)
//! - `POST /api/analyze-resume` (bearer token, multipart field `resume`)
//! - `GET /health`

mod error;
mod types;

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use types::{AnalysisResult, TokenGrant, UploadPayload, User};

/// Which credential submission endpoint to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialMode {
    Login,
    Register,
}

impl CredentialMode {
    /// Human-readable message shown on the success screen.
    pub fn success_message(self) -> &'static str {
        match self {
            CredentialMode::Login => "Login successful! Redirecting...",
            CredentialMode::Register => "Account created! Redirecting...",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CredentialMode::Login => "login",
            CredentialMode::Register => "register",
        }
    }
}

/// Service API client.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    base_url: String,
    http: reqwest::Client,
}

impl ServiceClient {
    /// Creates a client for `base_url` with an optional request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Creates a client from loaded configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        Self::new(config.base_url(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Submits credentials to `/login` or `/register` and returns the granted token.
    ///
    /// # Errors
    /// Returns the service's rejection (with its `detail` message) or a transport error.
    pub async fn submit_credentials(
        &self,
        mode: CredentialMode,
        email: &str,
        password: &str,
    ) -> ApiResult<TokenGrant> {
        match mode {
            CredentialMode::Login => self.login(email, password).await,
            CredentialMode::Register => self.register(email, password).await,
        }
    }

    /// # Errors
    /// Returns the service's rejection or a transport error.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<TokenGrant> {
        tracing::debug!(email, "POST /login");
        let request = self
            .http
            .post(self.url("/login"))
            .form(&[("username", email), ("password", password)]);
        send_json(request).await
    }

    /// # Errors
    /// Returns the service's rejection or a transport error.
    pub async fn register(&self, email: &str, password: &str) -> ApiResult<TokenGrant> {
        tracing::debug!(email, "POST /register");
        let request = self
            .http
            .post(self.url("/register"))
            .json(&serde_json::json!({ "email": email, "password": password }));
        send_json(request).await
    }

    /// Fetches the user identified by `token`.
    ///
    /// # Errors
    /// Any non-2xx response, transport failure, or malformed payload.
    pub async fn me(&self, token: &str) -> ApiResult<User> {
        tracing::debug!(token = %crate::credentials::redact(token), "GET /me");
        let request = self.http.get(self.url("/me")).bearer_auth(token);
        send_json(request).await
    }

    /// Submits a document for analysis.
    ///
    /// # Errors
    /// `Unauthorized` on 401, `Rejected` on other non-2xx, `Transport` when
    /// unreachable, `Parse` when the 2xx body is not an analysis result.
    pub async fn analyze(&self, token: &str, upload: UploadPayload) -> ApiResult<AnalysisResult> {
        tracing::debug!(
            token = %crate::credentials::redact(token),
            file = %upload.file_name,
            bytes = upload.bytes.len(),
            "POST /api/analyze-resume"
        );
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.mime_type)
            .map_err(|e| ApiError::parse(format!("invalid MIME type: {e}")))?;
        let form = Form::new().part("resume", part);
        let request = self
            .http
            .post(self.url("/api/analyze-resume"))
            .bearer_auth(token)
            .multipart(form);
        send_json(request).await
    }

    /// Returns the service health document.
    ///
    /// # Errors
    /// Any non-2xx response or transport failure.
    pub async fn health(&self) -> ApiResult<serde_json::Value> {
        let request = self.http.get(self.url("/health"));
        send_json(request).await
    }
}

async fn send_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> ApiResult<T> {
    let response = request.send().await.map_err(|e| {
        tracing::warn!(error = %e, "service unreachable");
        ApiError::transport(&e)
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status.as_u16(), &body);
        tracing::warn!(status = status.as_u16(), kind = %err.kind, "service rejected request");
        return Err(err);
    }

    let body = response.bytes().await.map_err(|e| ApiError::transport(&e))?;
    serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "malformed service response");
        ApiError::parse(format!("Unexpected response from service: {e}"))
    })
}
