//! Core traits and types shared by every resource client.

use crate::types::AnyJson;

/// The HTTP layer that performs requests against the SynapsePay API.
///
/// Implementations own connection handling, timeouts and status handling. Every call
/// receives the caller's [`Session`] so the transport can attach the authentication
/// headers for the current user.
///
/// Responses are decoded JSON. Failures are reported through [`Transport::Error`] and
/// surface to callers of the resource clients without translation.
pub trait Transport {
    type Error: std::error::Error;

    fn get(
        &self,
        path: &str,
        session: &Session,
    ) -> impl Future<Output = Result<AnyJson, Self::Error>>;

    fn post(
        &self,
        path: &str,
        body: &AnyJson,
        session: &Session,
    ) -> impl Future<Output = Result<AnyJson, Self::Error>>;

    fn patch(
        &self,
        path: &str,
        body: &AnyJson,
        session: &Session,
    ) -> impl Future<Output = Result<AnyJson, Self::Error>>;
}

/// Authentication context of the "current user".
///
/// Some operations update it from what the API returns: [`find`](crate::users::Users::find)
/// and [`create`](crate::users::Users::create) cache the user's `_id`, and
/// [`refresh`](crate::users::Users::refresh) caches the new `oauth_key`. Looking up any user
/// therefore switches the session to that user.
///
/// A `Session` is not shared state: operations that change it take `&mut Session`. Callers
/// that juggle several users across threads must serialize access themselves, or keep one
/// `Session` per user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<String>,
    oauth_key: Option<String>,
}

/// A partial set of header values to merge into a [`Session`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderUpdate {
    pub user_id: Option<String>,
    pub oauth_key: Option<String>,
}

impl HeaderUpdate {
    pub fn user_id(user_id: impl Into<String>) -> Self {
        HeaderUpdate {
            user_id: Some(user_id.into()),
            oauth_key: None,
        }
    }

    pub fn oauth_key(oauth_key: impl Into<String>) -> Self {
        HeaderUpdate {
            user_id: None,
            oauth_key: Some(oauth_key.into()),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Start a session for a user whose id is already known.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Session {
            user_id: Some(user_id.into()),
            oauth_key: None,
        }
    }

    pub fn with_oauth_key(mut self, oauth_key: impl Into<String>) -> Self {
        self.oauth_key = Some(oauth_key.into());
        self
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn oauth_key(&self) -> Option<&str> {
        self.oauth_key.as_deref()
    }

    /// Merge the given values. Fields left as `None` keep their current value; the latest
    /// write wins for the rest.
    pub fn update_headers(&mut self, update: HeaderUpdate) {
        if let Some(user_id) = update.user_id {
            self.user_id = Some(user_id);
        }
        if let Some(oauth_key) = update.oauth_key {
            self.oauth_key = Some(oauth_key);
        }
    }
}
