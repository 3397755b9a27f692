//! Session lifecycle: login, logout and rehydration.
//!
//! The session moves between three states:
//!
//! - **Anonymous**: no credential.
//! - **Authenticating**: a token exchange is in flight.
//! - **Authenticated**: credential and decoded identity are both present.
//!
//! The identity is derived from the access token every time the credential
//! changes and is never stored on its own. A credential whose access token
//! cannot be decoded is never held in memory.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use stockdesk_auth::{decode, Credential, DecodeError, Identity, View};

use crate::backend::{AuthBackend, BackendError};
use crate::navigation::Navigator;
use crate::store::{StoreError, TokenStore};

/// Observable session state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticating,
    Authenticated,
}

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("username and password are required")]
    MissingCredentials,

    #[error("a login is already in progress")]
    InProgress,

    #[error("credentials rejected (HTTP {status})")]
    Rejected { status: u16 },

    #[error("network error: {0}")]
    Network(String),

    #[error("token endpoint did not answer within {0:?}")]
    Timeout(Duration),

    #[error("invalid token response: {0}")]
    InvalidResponse(String),

    #[error("issued access token is undecodable: {0}")]
    Decode(#[from] DecodeError),

    #[error("could not persist credential: {0}")]
    Store(#[from] StoreError),

    #[error("login superseded by logout")]
    Superseded,
}

impl From<BackendError> for LoginError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::Api(status, _) => LoginError::Rejected { status },
            BackendError::Network(msg) => LoginError::Network(msg),
            BackendError::Parse(msg) => LoginError::InvalidResponse(msg),
        }
    }
}

#[derive(Debug, Clone)]
struct Session {
    credential: Credential,
    identity: Identity,
}

#[derive(Debug, Default)]
struct Inner {
    session: Option<Session>,
    /// Id of the login attempt currently in flight.
    in_flight: Option<u64>,
    next_attempt: u64,
}

/// Owns the session state and its persistence.
///
/// Share it as `Arc<SessionManager>`; every method takes `&self`.
pub struct SessionManager {
    store: Arc<dyn TokenStore>,
    backend: Arc<dyn AuthBackend>,
    navigator: Arc<dyn Navigator>,
    login_timeout: Duration,
    inner: RwLock<Inner>,
}

impl SessionManager {
    pub const DEFAULT_LOGIN_TIMEOUT: Duration = Duration::from_secs(10);

    /// A manager in the Anonymous state. Call [`SessionManager::rehydrate`]
    /// once at startup to pick up a persisted session.
    pub fn new(
        store: Arc<dyn TokenStore>,
        backend: Arc<dyn AuthBackend>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            store,
            backend,
            navigator,
            login_timeout: Self::DEFAULT_LOGIN_TIMEOUT,
            inner: RwLock::new(Inner::default()),
        }
    }

    pub fn with_login_timeout(mut self, timeout: Duration) -> Self {
        self.login_timeout = timeout;
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn state(&self) -> SessionState {
        let inner = self.read();
        if inner.in_flight.is_some() {
            SessionState::Authenticating
        } else if inner.session.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn credential(&self) -> Option<Credential> {
        self.read().session.as_ref().map(|s| s.credential.clone())
    }

    pub fn identity(&self) -> Option<Identity> {
        self.read().session.as_ref().map(|s| s.identity.clone())
    }

    /// True iff a credential is held.
    pub fn is_authenticated(&self) -> bool {
        self.read().session.is_some()
    }

    /// Access token to send as `Authorization: Bearer <token>`.
    pub fn bearer_token(&self) -> Option<String> {
        self.read()
            .session
            .as_ref()
            .map(|s| s.credential.access_token.clone())
    }

    /// Exchange credentials for a token pair and start a session.
    ///
    /// On any failure the previous state is kept and nothing is written to
    /// the store. A second call while one is in flight is rejected.
    pub async fn login(&self, username: &str, password: &str) -> Result<Identity, LoginError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(LoginError::MissingCredentials);
        }

        let attempt = self.begin_login()?;
        debug!(username, attempt, "login started");

        let (credential, identity) = match self.exchange(username, password).await {
            Ok(pair) => pair,
            Err(e) => {
                self.end_login(attempt);
                warn!(username, error = %e, "login failed");
                return Err(e);
            }
        };

        // A logout while the request was in flight wins.
        if !self.is_current(attempt) {
            info!(username, "discarding login result superseded by logout");
            return Err(LoginError::Superseded);
        }

        if let Err(e) = self.store.save(&credential).await {
            self.end_login(attempt);
            error!(username, error = %e, "failed to persist credential");
            return Err(LoginError::Store(e));
        }

        if !self.commit_login(attempt, credential, identity.clone()) {
            // A logout cleared the store before our save landed. A newer
            // login may have committed since; its tokens stay.
            if self.read().session.is_none() {
                if let Err(e) = self.store.clear().await {
                    error!(error = %e, "failed to clear superseded credential");
                }
            }
            info!(username, "discarding login result superseded by logout");
            return Err(LoginError::Superseded);
        }

        info!(username, role = %identity.role, "login succeeded");
        self.navigator.navigate(View::LANDING);
        Ok(identity)
    }

    fn begin_login(&self) -> Result<u64, LoginError> {
        let mut inner = self.write();
        if inner.in_flight.is_some() {
            return Err(LoginError::InProgress);
        }
        inner.next_attempt += 1;
        let attempt = inner.next_attempt;
        inner.in_flight = Some(attempt);
        Ok(attempt)
    }

    fn is_current(&self, attempt: u64) -> bool {
        self.read().in_flight == Some(attempt)
    }

    fn end_login(&self, attempt: u64) {
        let mut inner = self.write();
        if inner.in_flight == Some(attempt) {
            inner.in_flight = None;
        }
    }

    fn commit_login(&self, attempt: u64, credential: Credential, identity: Identity) -> bool {
        let mut inner = self.write();
        if inner.in_flight != Some(attempt) {
            return false;
        }
        inner.in_flight = None;
        inner.session = Some(Session {
            credential,
            identity,
        });
        true
    }

    async fn exchange(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(Credential, Identity), LoginError> {
        let credential = tokio::time::timeout(
            self.login_timeout,
            self.backend.obtain_token(username, password),
        )
        .await
        .map_err(|_| LoginError::Timeout(self.login_timeout))??;

        let identity = decode(&credential.access_token)?;
        Ok((credential, identity))
    }

    /// End the session: clear the store, drop credential and identity, go to
    /// the login view. Calling it while Anonymous only navigates.
    ///
    /// In-memory state is dropped even when clearing the store fails; the
    /// store error is returned so the caller can report it.
    pub async fn logout(&self) -> Result<(), StoreError> {
        let had_session = {
            let mut inner = self.write();
            inner.in_flight = None;
            inner.session.take().is_some()
        };

        let result = self.store.clear().await;
        match &result {
            Ok(()) if had_session => info!("logged out"),
            Ok(()) => debug!("logout while anonymous"),
            Err(e) => error!(error = %e, "failed to clear token store on logout"),
        }

        self.navigator.navigate(View::Login);
        result
    }

    /// Rebuild the session from the store without a network call.
    ///
    /// An undecodable stored access token clears the store. A store read
    /// failure leaves the session Anonymous.
    pub async fn rehydrate(&self) -> SessionState {
        let stored = match self.store.load().await {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "could not read token store; starting anonymous");
                return self.state();
            }
        };

        let Some(credential) = stored else {
            debug!("no stored session");
            return self.state();
        };

        match decode(&credential.access_token) {
            Ok(identity) => {
                info!(username = %identity.display_name, "session restored");
                self.write().session = Some(Session {
                    credential,
                    identity,
                });
            }
            Err(e) => {
                warn!(error = %e, "stored access token is undecodable; clearing stored session");
                self.write().session = None;
                if let Err(e) = self.store.clear().await {
                    error!(error = %e, "failed to clear undecodable session");
                }
            }
        }

        self.state()
    }

    /// The backend rejected the current access token (HTTP 401).
    pub async fn handle_unauthorized(&self) {
        warn!("backend rejected the session; logging out");
        // `logout` already logs a store failure.
        let _ = self.logout().await;
    }

    /// A request sent with `token` came back 401. Logs out only if `token`
    /// is still the session's access token; returns whether it did.
    pub async fn handle_rejected_token(&self, token: &str) -> bool {
        if self.bearer_token().as_deref() != Some(token) {
            debug!("ignoring 401 for a token that is no longer current");
            return false;
        }
        self.handle_unauthorized().await;
        true
    }
}
