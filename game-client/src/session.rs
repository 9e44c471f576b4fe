use std::sync::Arc;

use tokio::sync::{OnceCell, watch};

use game_core::Clock;
use game_persistence::{LocalStorageRepository, StorageEntry, StorageError, StoredValue};
use game_types::{AuthResponse, BearerToken, LoginRequest, SignupRequest, User};

use crate::auth::{AuthApi, AuthError, is_token_expired};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: BearerToken,
}

/// Who is signed in. `Unknown` until the persisted session has been read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Unknown,
    Authenticated(Session),
    Anonymous,
}

impl AuthState {
    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Unknown)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(session) => Some(&session.user),
            _ => None,
        }
    }

    pub fn token(&self) -> Option<&BearerToken> {
        match self {
            AuthState::Authenticated(session) => Some(&session.token),
            _ => None,
        }
    }
}

/// Process-wide authentication state.
///
/// Cheap to clone; all clones observe the same state. Identity and token are
/// always written, and cleared, together.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    state: watch::Sender<AuthState>,
    storage: LocalStorageRepository,
    restored: OnceCell<()>,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    pub fn new(storage: LocalStorageRepository, clock: Arc<dyn Clock>) -> Self {
        let (state, _) = watch::channel(AuthState::Unknown);
        Self {
            inner: Arc::new(SessionInner {
                state,
                storage,
                restored: OnceCell::new(),
                clock,
            }),
        }
    }

    pub fn state(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.inner.state.borrow().user().cloned()
    }

    pub fn token(&self) -> Option<BearerToken> {
        self.inner.state.borrow().token().cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.inner.state.subscribe()
    }

    /// Hydrate from durable storage. Runs once per store; later calls return
    /// the current state. A sign-in that lands first is never overwritten.
    pub async fn restore(&self) -> AuthState {
        self.inner
            .restored
            .get_or_init(|| async {
                let restored = match self.load_persisted().await {
                    Ok(Some(session)) => {
                        tracing::info!("Restored session for {}", session.user.email);
                        AuthState::Authenticated(session)
                    }
                    Ok(None) => AuthState::Anonymous,
                    Err(e) => {
                        tracing::warn!("Failed to restore session: {}", e);
                        AuthState::Anonymous
                    }
                };

                self.inner.state.send_if_modified(|state| {
                    if state.is_loading() {
                        *state = restored;
                        true
                    } else {
                        false
                    }
                });
            })
            .await;

        self.state()
    }

    async fn load_persisted(&self) -> Result<Option<Session>, StorageError> {
        let storage = &self.inner.storage;
        let user = storage.load::<User>().await?;
        let token = storage.load::<BearerToken>().await?;

        match (user, token) {
            (Some(user), Some(token)) => {
                if is_token_expired(&token, self.inner.clock.now_millis()) {
                    tracing::info!("Stored token for {} has expired, discarding", user.email);
                    self.delete_persisted().await?;
                    return Ok(None);
                }
                Ok(Some(Session { user, token }))
            }
            (None, None) => Ok(None),
            _ => {
                tracing::warn!("Discarding half-written session");
                self.delete_persisted().await?;
                Ok(None)
            }
        }
    }

    pub async fn login(&self, api: &dyn AuthApi, email: &str, password: &str) -> Result<User, AuthError> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let response = api.login(&request).await.map_err(|e| {
            tracing::warn!("Login failed for {}: {}", request.email, e);
            AuthError::from_login_failure(&e)
        })?;

        self.establish(response).await
    }

    pub async fn signup(
        &self,
        api: &dyn AuthApi,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let request = SignupRequest {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let response = api.signup(&request).await.map_err(|e| {
            tracing::warn!("Signup failed for {}: {}", request.email, e);
            AuthError::from_signup_failure(&e)
        })?;

        self.establish(response).await
    }

    async fn establish(&self, response: AuthResponse) -> Result<User, AuthError> {
        let session = Session {
            user: response.user,
            token: BearerToken::from(response.access_token),
        };

        // Durable first; memory changes only once both slots have landed
        self.inner
            .storage
            .save_all(vec![
                StorageEntry::of(&session.user)?,
                StorageEntry::of(&session.token)?,
            ])
            .await?;

        let user = session.user.clone();
        self.inner.state.send_replace(AuthState::Authenticated(session));
        tracing::info!("Signed in as {}", user.email);
        Ok(user)
    }

    /// Forget the session locally. No network call is made.
    pub async fn logout(&self) -> Result<(), StorageError> {
        let previous = self.inner.state.send_replace(AuthState::Anonymous);
        if let Some(user) = previous.user() {
            tracing::info!("Signed out {}", user.email);
        }
        self.delete_persisted().await
    }

    /// Logout for paths that cannot surface a storage failure.
    pub async fn clear(&self) {
        if let Err(e) = self.logout().await {
            tracing::warn!("Failed to clear stored session: {}", e);
        }
    }

    async fn delete_persisted(&self) -> Result<(), StorageError> {
        self.inner
            .storage
            .delete_keys(&[<User as StoredValue>::KEY, <BearerToken as StoredValue>::KEY])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use async_trait::async_trait;
    use game_core::ManualClock;
    use game_persistence::connection::connect_to_memory_database;
    use migration::{Migrator, MigratorTrait};
    use std::sync::Mutex;

    struct FakeAuth {
        reply: Mutex<Option<Result<AuthResponse, ApiError>>>,
    }

    impl FakeAuth {
        fn replying(reply: Result<AuthResponse, ApiError>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
            }
        }

        fn take(&self) -> Result<AuthResponse, ApiError> {
            self.reply.lock().unwrap().take().expect("fake called twice")
        }
    }

    #[async_trait]
    impl AuthApi for FakeAuth {
        async fn login(&self, _request: &LoginRequest) -> Result<AuthResponse, ApiError> {
            self.take()
        }

        async fn signup(&self, _request: &SignupRequest) -> Result<AuthResponse, ApiError> {
            self.take()
        }
    }

    fn test_user() -> User {
        User {
            id: "user-1".to_string(),
            name: "Test Kid".to_string(),
            email: "kid@example.com".to_string(),
            avatar: None,
        }
    }

    fn auth_response(token: &str) -> AuthResponse {
        AuthResponse {
            access_token: token.to_string(),
            user: test_user(),
        }
    }

    async fn setup_storage() -> LocalStorageRepository {
        let db = connect_to_memory_database().await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        LocalStorageRepository::new(db)
    }

    fn store_with(storage: LocalStorageRepository) -> SessionStore {
        SessionStore::new(storage, Arc::new(ManualClock::new(1_700_000_000_000)))
    }

    #[tokio::test]
    async fn test_restore_empty_storage_is_anonymous() {
        let store = store_with(setup_storage().await);
        assert!(store.state().is_loading());

        assert_eq!(store.restore().await, AuthState::Anonymous);
        assert_eq!(store.token(), None);
    }

    #[tokio::test]
    async fn test_login_persists_and_restores() {
        let storage = setup_storage().await;
        let store = store_with(storage.clone());
        store.restore().await;

        let api = FakeAuth::replying(Ok(auth_response("opaque-token")));
        let user = store.login(&api, " kid@example.com ", "pw").await.unwrap();
        assert_eq!(user, test_user());
        assert_eq!(store.token(), Some(BearerToken::new("opaque-token")));

        // A fresh process sees the same session
        let reopened = store_with(storage);
        let state = reopened.restore().await;
        assert_eq!(state.user(), Some(&test_user()));
        assert_eq!(state.token(), Some(&BearerToken::new("opaque-token")));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_state_unchanged() {
        let storage = setup_storage().await;
        let store = store_with(storage.clone());
        store.restore().await;

        let api = FakeAuth::replying(Err(ApiError::Unauthorized));
        let err = store.login(&api, "kid@example.com", "wrong").await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(store.state(), AuthState::Anonymous);
        assert!(storage.load::<User>().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_signup_server_error_is_unavailable() {
        let store = store_with(setup_storage().await);
        let api = FakeAuth::replying(Err(ApiError::Status {
            status: 503,
            message: None,
        }));

        let err = store.signup(&api, "Kid", "kid@example.com", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::Unavailable));
    }

    #[tokio::test]
    async fn test_logout_clears_memory_and_storage() {
        let storage = setup_storage().await;
        let store = store_with(storage.clone());
        let api = FakeAuth::replying(Ok(auth_response("opaque-token")));
        store.login(&api, "kid@example.com", "pw").await.unwrap();

        let mut updates = store.subscribe();
        store.logout().await.unwrap();

        assert!(updates.has_changed().unwrap());
        assert_eq!(*updates.borrow_and_update(), AuthState::Anonymous);
        assert!(storage.load::<User>().await.unwrap().is_none());
        assert!(storage.load::<BearerToken>().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_before_restore_is_kept() {
        let storage = setup_storage().await;
        let store = store_with(storage);

        let api = FakeAuth::replying(Ok(auth_response("opaque-token")));
        store.login(&api, "kid@example.com", "pw").await.unwrap();

        assert!(store.restore().await.is_authenticated());
    }

    #[tokio::test]
    async fn test_half_written_session_is_discarded() {
        let storage = setup_storage().await;
        storage.save(&BearerToken::new("orphan")).await.unwrap();

        let store = store_with(storage.clone());
        assert_eq!(store.restore().await, AuthState::Anonymous);
        assert!(storage.load::<BearerToken>().await.unwrap().is_none());
    }
}
