//! Session context
//!
//! The signed-in user and bearer token, passed explicitly to every service call.

use std::fmt;

use mims::{
    roles::{Capability, Role},
    users::User,
};
use serde::Deserialize;
use zeroize::Zeroize;

/// Bearer token issued by the backend.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wrap a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(**redacted**)")?;
        Ok(())
    }
}

impl Drop for ApiToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Token and user returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    /// Bearer token
    #[serde(alias = "access")]
    pub token: ApiToken,

    /// Signed-in user
    #[serde(rename = "usuario")]
    pub user: User,
}

/// Explicit authentication state handed to the API client.
///
/// A context may hold only a token (e.g. one passed on the command line) without knowing the user.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    token: Option<ApiToken>,
    user: Option<User>,
}

impl SessionContext {
    /// Context with no credentials.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context carrying a bearer token for an unknown user.
    pub fn with_token(token: ApiToken) -> Self {
        Self {
            token: Some(token),
            user: None,
        }
    }

    /// Replace the current credentials with a fresh login.
    pub fn sign_in(&mut self, session: Session) {
        self.token = Some(session.token);
        self.user = Some(session.user);
    }

    /// Drop the credentials, returning the user that was signed in.
    pub fn sign_out(&mut self) -> Option<User> {
        self.token = None;
        self.user.take()
    }

    /// Bearer token, if any.
    pub fn token(&self) -> Option<&ApiToken> {
        self.token.as_ref()
    }

    /// Signed-in user, if known.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Role of the signed-in user.
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    /// Checks whether a bearer token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Checks the capability table for the signed-in user. Anonymous visitors may only browse.
    pub fn can(&self, capability: Capability) -> bool {
        match self.role() {
            Some(role) => role.can(capability),
            None => capability == Capability::BrowseCatalog,
        }
    }
}
