use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use game_persistence::StorageError;
use game_types::{AuthResponse, BearerToken, LoginRequest, SignupRequest};

use crate::api::{ApiClient, ApiError};

/// The two auth endpoints. Kept apart from [`ApiClient`] so the session
/// store can be driven by a fake in tests.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;
    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError>;
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post_credentials(&["auth", "login"], request).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        self.post_credentials(&["auth", "signup"], request).await
    }
}

/// User-facing sign-in failures. Messages are shown as-is.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Could not create an account with those details")]
    SignupRejected,
    #[error("Something went wrong. Please try again.")]
    Unavailable,
    #[error("Could not save your session on this device")]
    Storage(#[from] StorageError),
}

impl AuthError {
    pub fn from_login_failure(err: &ApiError) -> Self {
        match err.status() {
            Some(400 | 401 | 403 | 404) => AuthError::InvalidCredentials,
            _ => AuthError::Unavailable,
        }
    }

    pub fn from_signup_failure(err: &ApiError) -> Self {
        match err.status() {
            Some(status) if (400..500).contains(&status) => AuthError::SignupRejected,
            _ => AuthError::Unavailable,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenClaims {
    exp: Option<i64>,
}

/// Read the `exp` claim of a JWT without verifying it.
///
/// The backend stays the authority on validity; this only lets a restored
/// session skip a token that has visibly run out. Opaque tokens yield `None`.
pub fn token_expiry(token: &BearerToken) -> Option<i64> {
    let mut parts = token.as_str().split('.');
    let (Some(_), Some(payload), Some(_), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| tracing::debug!("Token payload is not base64: {:?}", e))
        .ok()?;

    serde_json::from_slice::<TokenClaims>(&payload_bytes)
        .map_err(|e| tracing::debug!("Token payload is not JSON claims: {:?}", e))
        .ok()?
        .exp
}

pub fn is_token_expired(token: &BearerToken, now_millis: i64) -> bool {
    token_expiry(token).is_some_and(|exp| exp.saturating_mul(1000) <= now_millis)
}
