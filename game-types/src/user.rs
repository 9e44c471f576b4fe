use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Authenticated identity as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Opaque bearer token handed out by `/auth/login` and `/auth/signup`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens end up in logs through Debug on session types; keep them out.
impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

impl From<String> for BearerToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of a successful login or signup.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_shape() {
        let body = r#"{
            "access_token": "abc.def.ghi",
            "user": { "id": "u-1", "name": "Ada", "email": "ada@example.com" }
        }"#;

        let response: AuthResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.access_token, "abc.def.ghi");
        assert_eq!(response.user.name, "Ada");
        assert_eq!(response.user.avatar, None);
    }

    #[test]
    fn test_user_without_avatar_omits_field() {
        let user = User {
            id: "u-1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            avatar: None,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("avatar").is_none());
    }

    #[test]
    fn test_bearer_token_is_redacted_in_debug() {
        let token = BearerToken::new("secret-token");
        assert_eq!(format!("{:?}", token), "BearerToken(***)");
        assert_eq!(token.as_str(), "secret-token");
    }
}
