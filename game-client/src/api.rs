use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use game_types::ErrorResponse;

use crate::session::SessionStore;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication rejected")]
    Unauthorized,
    #[error(
        "Request failed with status {status}: {}",
        .message.as_deref().unwrap_or("no details")
    )]
    Status { status: u16, message: Option<String> },
    #[error("Invalid JSON in response: {source}")]
    InvalidJson {
        body: String,
        source: serde_json::Error,
    },
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// HTTP status behind the failure, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|status| status.as_u16()),
            ApiError::InvalidJson { .. } | ApiError::InvalidBaseUrl(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Credentials {
    /// Speaks for the stored session.
    Session,
    Anonymous,
}

/// Shared transport for the backend API.
///
/// Session requests carry the current bearer token, and a 401 reply clears
/// the session before the error reaches the caller. Credential exchanges go
/// through [`ApiClient::post_credentials`], which does neither.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration, session: SessionStore) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(APP_USER_AGENT)
            .build()?;
        Self::with_client(http, base_url, session)
    }

    pub fn with_client(http: Client, base_url: &str, session: SessionStore) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            http,
            base_url: parsed,
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Append percent-encoded path segments to the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        self.send(self.http.get(url)).await
    }

    pub async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.send(self.http.post(url).json(body)).await
    }

    /// POST outside the session: no bearer token, and a 401 leaves the
    /// current identity alone. Used for login and signup.
    pub async fn post_credentials<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.execute(self.http.post(url).json(body), Credentials::Anonymous).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = match self.session.token() {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        };
        self.execute(request, Credentials::Session).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        credentials: Credentials,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            if credentials == Credentials::Session {
                tracing::info!("Server rejected credentials for {}, signing out", response.url().path());
                self.session.clear().await;
            }
            return Err(ApiError::Unauthorized);
        }

        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|error| error.summary());
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        // An empty 200 is read as JSON null
        let text = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(text).map_err(|source| ApiError::InvalidJson { body, source })
    }
}
