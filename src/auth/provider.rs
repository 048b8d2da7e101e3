//! Authentication provider seam.
//!
//! The sync adapter and session bridge only need three things from an auth SDK: who is signed
//! in, a bearer token (optionally force-refreshed), and a stream of auth-state changes.
//! [`LocalAuth`] provides them in-process for development and tests.

use crate::errors::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use std::{
    future::Future,
    sync::{Arc, Mutex, PoisonError},
};
use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

/// The signed-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Stable user id; also the owner partition id
    pub uid: String,
    /// Contact email, if the provider exposes one
    pub email: Option<String>,
}

/// A bearer credential for the current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdToken {
    /// Opaque token string
    pub token: String,
    /// When the token stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl IdToken {
    /// Whether the token has expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Source of the current credential.
pub trait AuthProvider: Send + Sync {
    /// Signed-in user, if any.
    fn current_user(&self) -> Option<AuthUser>;

    /// Token for the current user. With `force_refresh` a new token is obtained even if the
    /// cached one is still valid.
    ///
    /// # Errors
    /// Returns [`Error::NotAuthenticated`] when nobody is signed in.
    fn id_token(&self, force_refresh: bool) -> impl Future<Output = Result<IdToken>> + Send;

    /// Auth-state changes. The value is replaced on sign-in, sign-out, and silent refresh.
    fn watch(&self) -> watch::Receiver<Option<AuthUser>>;
}

#[derive(Debug, Default)]
struct Session {
    user: Option<AuthUser>,
    token: Option<IdToken>,
    refreshes: u64,
}

/// In-process auth provider.
///
/// Clones share the same session.
#[derive(Debug, Clone)]
pub struct LocalAuth {
    session: Arc<Mutex<Session>>,
    state: Arc<watch::Sender<Option<AuthUser>>>,
    token_lifetime: Duration,
}

impl Default for LocalAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalAuth {
    /// Signed out, with one-hour tokens.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self {
            session: Arc::new(Mutex::new(Session::default())),
            state: Arc::new(state),
            token_lifetime: Duration::hours(1),
        }
    }

    /// Overrides how long issued tokens stay valid.
    #[must_use]
    pub fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = lifetime;
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn issue(&self) -> IdToken {
        IdToken {
            token: Uuid::new_v4().simple().to_string(),
            expires_at: Utc::now() + self.token_lifetime,
        }
    }

    /// Signs `uid` in and announces the change.
    pub fn sign_in(&self, uid: impl Into<String>, email: Option<String>) -> AuthUser {
        let user = AuthUser {
            uid: uid.into(),
            email,
        };
        {
            let mut session = self.lock();
            session.user = Some(user.clone());
            session.token = Some(self.issue());
        }
        info!(uid = %user.uid, "Signed in");
        self.state.send_replace(Some(user.clone()));
        user
    }

    /// Signs out and announces the change.
    pub fn sign_out(&self) {
        {
            let mut session = self.lock();
            session.user = None;
            session.token = None;
        }
        info!("Signed out");
        self.state.send_replace(None);
    }

    /// Replaces the token without changing the user, as an SDK does in the background.
    pub fn refresh_silently(&self) {
        let user = {
            let mut session = self.lock();
            if session.user.is_none() {
                return;
            }
            session.token = Some(self.issue());
            session.refreshes += 1;
            session.user.clone()
        };
        debug!("Token refreshed silently");
        self.state.send_replace(user);
    }

    /// Number of refreshes since creation, forced or silent.
    #[must_use]
    pub fn refresh_count(&self) -> u64 {
        self.lock().refreshes
    }

    fn token(&self, force_refresh: bool) -> Result<IdToken> {
        let mut session = self.lock();
        if session.user.is_none() {
            return Err(Error::NotAuthenticated);
        }
        let now = Utc::now();
        match &session.token {
            Some(token) if !force_refresh && !token.is_expired_at(now) => Ok(token.clone()),
            _ => {
                let token = self.issue();
                session.token = Some(token.clone());
                session.refreshes += 1;
                Ok(token)
            }
        }
    }
}

impl AuthProvider for LocalAuth {
    fn current_user(&self) -> Option<AuthUser> {
        self.lock().user.clone()
    }

    fn id_token(&self, force_refresh: bool) -> impl Future<Output = Result<IdToken>> + Send {
        std::future::ready(self.token(force_refresh))
    }

    fn watch(&self) -> watch::Receiver<Option<AuthUser>> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[tokio::test]
    async fn test_token_requires_sign_in() {
        let auth = LocalAuth::new();
        assert!(auth.current_user().is_none());
        assert!(matches!(auth.id_token(false).await, Err(Error::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_forced_refresh_issues_new_token() -> Result<()> {
        let auth = LocalAuth::new();
        auth.sign_in("user-1", Some("a@example.com".to_string()));

        let cached = auth.id_token(false).await?;
        assert_eq!(auth.id_token(false).await?, cached);
        assert_eq!(auth.refresh_count(), 0);

        let fresh = auth.id_token(true).await?;
        assert_ne!(fresh.token, cached.token);
        assert_eq!(auth.refresh_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_expired_token_is_replaced() -> Result<()> {
        let auth = LocalAuth::new().with_token_lifetime(Duration::zero());
        auth.sign_in("user-1", None);
        let first = auth.id_token(false).await?;
        let second = auth.id_token(false).await?;
        assert_ne!(first.token, second.token);
        Ok(())
    }

    #[tokio::test]
    async fn test_watch_sees_every_change() {
        let auth = LocalAuth::new();
        let mut rx = auth.watch();

        auth.sign_in("user-1", None);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().map(|u| u.uid.as_str()), Some("user-1"));

        auth.refresh_silently();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_some());

        auth.sign_out();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
    }
}
