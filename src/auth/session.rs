//! Session context: the bearer token, where it is persisted, and who is
//! told when it goes away.

use super::is_token_expired;
use crate::error::AuthError;
use async_lock::RwLock;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Persistence for the auth token between app launches.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, AuthError>;
    fn save(&self, token: &str) -> Result<(), AuthError>;
    fn clear(&self) -> Result<(), AuthError>;
}

/// Keeps the token in memory only. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, AuthError> {
        self.token
            .lock()
            .map_err(|_| AuthError::Storage("token store lock poisoned".to_string()))
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, AuthError> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, token: &str) -> Result<(), AuthError> {
        *self.lock()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.lock()? = None;
        Ok(())
    }
}

/// Keeps the token in a single file. A missing file means signed out.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, AuthError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuthError::Storage(e.to_string())),
        }
    }

    fn save(&self, token: &str) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| AuthError::Storage(e.to_string()))?;
            }
        }
        std::fs::write(&self.path, token).map_err(|e| AuthError::Storage(e.to_string()))
    }

    fn clear(&self) -> Result<(), AuthError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::Storage(e.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    SignedOut,
    SignedIn,
}

/// Explicit auth context shared by the HTTP layer and the app.
///
/// Lifecycle: [`hydrate`](Self::hydrate) once at startup,
/// [`sign_in`](Self::sign_in) after login, [`teardown`](Self::teardown) on
/// logout or when the backend rejects the token.
pub struct Session {
    store: Arc<dyn TokenStore>,
    token: RwLock<Option<String>>,
    state: watch::Sender<SessionState>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let (state, _) = watch::channel(SessionState::SignedOut);
        Self {
            store,
            token: RwLock::new(None),
            state,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// Load a persisted token. Expired tokens are discarded and cleared from
    /// the store.
    pub async fn hydrate(&self) -> Result<SessionState, AuthError> {
        let loaded = self.store.load()?;
        match loaded {
            Some(token) if !is_token_expired(&token, Utc::now()) => {
                *self.token.write().await = Some(token);
                self.state.send_replace(SessionState::SignedIn);
                tracing::debug!("Session hydrated from token store");
                Ok(SessionState::SignedIn)
            }
            Some(_) => {
                tracing::debug!("Discarding expired persisted token");
                self.teardown().await;
                Ok(SessionState::SignedOut)
            }
            None => {
                self.teardown().await;
                Ok(SessionState::SignedOut)
            }
        }
    }

    /// Persist and activate a freshly issued token.
    pub async fn sign_in(&self, token: impl Into<String>) -> Result<(), AuthError> {
        let token = token.into();
        if is_token_expired(&token, Utc::now()) {
            return Err(AuthError::TokenExpired);
        }
        self.store.save(&token)?;
        *self.token.write().await = Some(token);
        self.state.send_replace(SessionState::SignedIn);
        Ok(())
    }

    /// Forget the token everywhere and notify subscribers.
    ///
    /// Storage failures are logged; the in-memory session is cleared anyway.
    pub async fn teardown(&self) {
        *self.token.write().await = None;
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear persisted token: {}", e);
        }
        self.state.send_replace(SessionState::SignedOut);
    }

    /// The current token, if signed in and not expired.
    pub async fn token(&self) -> Option<String> {
        self.token
            .read()
            .await
            .clone()
            .filter(|t| !is_token_expired(t, Utc::now()))
    }

    /// The current token, or an error that tells the app to go to login.
    ///
    /// An expired token tears the session down.
    pub async fn require_token(&self) -> Result<String, AuthError> {
        let current = self.token.read().await.clone();
        match current {
            None => Err(AuthError::NotAuthenticated),
            Some(token) if is_token_expired(&token, Utc::now()) => {
                self.teardown().await;
                Err(AuthError::TokenExpired)
            }
            Some(token) => Ok(token),
        }
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub fn is_signed_in(&self) -> bool {
        self.state() == SessionState::SignedIn
    }

    /// Receiver that observes every sign-in and teardown.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
