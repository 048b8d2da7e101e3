//! Authentication: the provider seam and the session-cookie bridge.

/// Auth provider trait and the in-process provider
pub mod provider;
/// Session cookie kept in step with auth state
pub mod session;

pub use provider::{AuthProvider, AuthUser, IdToken, LocalAuth};
pub use session::{
    CookieSettings, MemoryCookieJar, SessionBridge, SessionCookie, SessionEndpoint,
    SessionRequest,
};
