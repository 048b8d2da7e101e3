//! Session bridge - keeps one server-readable cookie in step with the auth state.
//!
//! Route protection only looks at this cookie, so the bridge runs on every auth change: a
//! signed-in user gets the cookie set with their current token, a signed-out state clears it.

use super::provider::AuthProvider;
use crate::{
    config::AppConfig,
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};
use std::{
    future::Future,
    sync::{Arc, Mutex, PoisonError},
};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// JSON body of the set-session request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRequest {
    /// Bearer token to store in the cookie
    pub token: String,
}

/// Fixed cookie attributes, derived from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieSettings {
    /// Cookie name
    pub name: String,
    /// Lifetime in seconds
    pub max_age_secs: u64,
    /// Whether the cookie is limited to HTTPS
    pub secure: bool,
}

impl CookieSettings {
    /// Settings for `config`: `Secure` only in production.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            name: config.session.cookie_name.clone(),
            max_age_secs: u64::from(config.session.max_age_days) * 24 * 60 * 60,
            secure: config.environment.is_production(),
        }
    }

    /// `Set-Cookie` value that removes the cookie.
    #[must_use]
    pub fn clear_header(&self) -> String {
        let mut header = format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", self.name);
        if self.secure {
            header.push_str("; Secure");
        }
        header
    }
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// The session cookie carrying a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    /// Fixed attributes
    pub settings: CookieSettings,
    /// Bearer token
    pub value: String,
}

impl SessionCookie {
    /// `Set-Cookie` header value, always `HttpOnly` and `SameSite=Lax`.
    #[must_use]
    pub fn header_value(&self) -> String {
        let mut header = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            self.settings.name, self.value, self.settings.max_age_secs
        );
        if self.settings.secure {
            header.push_str("; Secure");
        }
        header
    }
}

/// Where the session cookie is set and cleared. Both operations are idempotent.
pub trait SessionEndpoint: Send + Sync {
    /// Sets the cookie from `request` (the POST with a `{token}` body).
    fn set_session(&self, request: SessionRequest) -> impl Future<Output = Result<()>> + Send;

    /// Clears the cookie (the DELETE with no body).
    fn clear_session(&self) -> impl Future<Output = Result<()>> + Send;
}

/// In-process cookie jar standing in for the session endpoint.
#[derive(Debug, Clone)]
pub struct MemoryCookieJar {
    settings: CookieSettings,
    cookie: Arc<Mutex<Option<SessionCookie>>>,
}

impl MemoryCookieJar {
    /// An empty jar.
    #[must_use]
    pub fn new(settings: CookieSettings) -> Self {
        Self {
            settings,
            cookie: Arc::new(Mutex::new(None)),
        }
    }

    /// The cookie currently set, if any.
    #[must_use]
    pub fn current(&self) -> Option<SessionCookie> {
        self.cookie
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a request would be treated as authenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    /// `Set-Cookie` header reflecting the jar's current state.
    #[must_use]
    pub fn set_cookie_header(&self) -> String {
        self.current().map_or_else(
            || self.settings.clear_header(),
            |cookie| cookie.header_value(),
        )
    }

    fn store(&self, cookie: Option<SessionCookie>) {
        *self.cookie.lock().unwrap_or_else(PoisonError::into_inner) = cookie;
    }
}

impl SessionEndpoint for MemoryCookieJar {
    fn set_session(&self, request: SessionRequest) -> impl Future<Output = Result<()>> + Send {
        let result = if request.token.trim().is_empty() {
            Err(Error::validation("token", "must not be empty"))
        } else {
            self.store(Some(SessionCookie {
                settings: self.settings.clone(),
                value: request.token,
            }));
            Ok(())
        };
        std::future::ready(result)
    }

    fn clear_session(&self) -> impl Future<Output = Result<()>> + Send {
        self.store(None);
        std::future::ready(Ok(()))
    }
}

/// Pushes the auth state into the session endpoint.
#[derive(Debug, Clone)]
pub struct SessionBridge<A, E> {
    auth: A,
    endpoint: E,
}

impl<A, E> SessionBridge<A, E>
where
    A: AuthProvider + 'static,
    E: SessionEndpoint + 'static,
{
    /// Bridges `auth` to `endpoint`.
    pub const fn new(auth: A, endpoint: E) -> Self {
        Self { auth, endpoint }
    }

    /// The endpoint being kept in step.
    pub const fn endpoint(&self) -> &E {
        &self.endpoint
    }

    /// Sets or clears the cookie to match the current auth state.
    pub async fn sync(&self) -> Result<()> {
        if self.auth.current_user().is_none() {
            self.endpoint.clear_session().await?;
            debug!("Session cookie cleared");
            return Ok(());
        }
        match self.auth.id_token(false).await {
            Ok(token) => {
                self.endpoint
                    .set_session(SessionRequest { token: token.token })
                    .await?;
                debug!("Session cookie set");
                Ok(())
            }
            // Signed out between the two calls.
            Err(Error::NotAuthenticated) => self.endpoint.clear_session().await,
            Err(e) => Err(e),
        }
    }

    /// Runs [`SessionBridge::sync`] now and after every auth change until the provider goes
    /// away.
    pub fn spawn(self) -> JoinHandle<()>
    where
        A: Send + Sync,
        E: Send + Sync,
    {
        let mut changes = self.auth.watch();
        tokio::spawn(async move {
            info!("Session bridge started");
            loop {
                if let Err(e) = self.sync().await {
                    warn!("Failed to sync session cookie: {}", e);
                }
                if changes.changed().await.is_err() {
                    break;
                }
            }
            info!("Session bridge stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        auth::provider::LocalAuth,
        config::Environment,
    };

    fn production_settings() -> CookieSettings {
        let mut config = AppConfig::default();
        config.environment = Environment::Production;
        CookieSettings::from_config(&config)
    }

    #[test]
    fn test_cookie_header_attributes() {
        let cookie = SessionCookie {
            settings: CookieSettings::default(),
            value: "abc".to_string(),
        };
        assert_eq!(
            cookie.header_value(),
            "session=abc; Path=/; Max-Age=604800; HttpOnly; SameSite=Lax"
        );

        let secure = SessionCookie {
            settings: production_settings(),
            value: "abc".to_string(),
        };
        assert!(secure.header_value().ends_with("; Secure"));
        assert!(production_settings().clear_header().contains("Max-Age=0"));
    }

    #[test]
    fn test_session_request_json_shape() {
        let request: SessionRequest = serde_json::from_str(r#"{"token":"t-1"}"#).unwrap();
        assert_eq!(request.token, "t-1");
    }

    #[tokio::test]
    async fn test_jar_operations_are_idempotent() -> Result<()> {
        let jar = MemoryCookieJar::new(CookieSettings::default());
        let request = SessionRequest {
            token: "t-1".to_string(),
        };
        jar.set_session(request.clone()).await?;
        jar.set_session(request).await?;
        assert_eq!(jar.current().unwrap().value, "t-1");

        jar.clear_session().await?;
        jar.clear_session().await?;
        assert!(!jar.is_authenticated());
        assert!(jar.set_cookie_header().contains("Max-Age=0"));

        let empty = jar
            .set_session(SessionRequest {
                token: " ".to_string(),
            })
            .await;
        assert!(matches!(empty, Err(Error::Validation { field: "token", .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_sync_follows_auth_state() -> Result<()> {
        let auth = LocalAuth::new();
        let jar = MemoryCookieJar::new(CookieSettings::default());
        let bridge = SessionBridge::new(auth.clone(), jar.clone());

        bridge.sync().await?;
        assert!(!jar.is_authenticated());

        auth.sign_in("user-1", None);
        bridge.sync().await?;
        let token = auth.id_token(false).await?;
        assert_eq!(jar.current().unwrap().value, token.token);

        auth.sign_out();
        bridge.sync().await?;
        assert!(!jar.is_authenticated());
        Ok(())
    }

    #[tokio::test]
    async fn test_spawned_bridge_tracks_silent_refresh() -> Result<()> {
        let auth = LocalAuth::new();
        let jar = MemoryCookieJar::new(CookieSettings::default());
        let handle = SessionBridge::new(auth.clone(), jar.clone()).spawn();

        auth.sign_in("user-1", None);
        wait_until(|| jar.is_authenticated()).await;
        let before = jar.current().unwrap().value;

        auth.refresh_silently();
        wait_until(|| jar.current().is_some_and(|c| c.value != before)).await;
        assert_eq!(jar.current().unwrap().value, auth.id_token(false).await?.token);

        auth.sign_out();
        wait_until(|| !jar.is_authenticated()).await;
        handle.abort();
        Ok(())
    }

    async fn wait_until(condition: impl Fn() -> bool) {
        for _ in 0..200 {
            if condition() {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        panic!("condition not reached");
    }
}
