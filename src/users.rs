//! The `/users` resource.
//!
//! [`Users`] turns user operations into requests on a [`Transport`]:
//!
//! ```no_run
//! # async fn run<T: synapse_pay_rest::concepts::Transport>(transport: T)
//! # -> Result<(), synapse_pay_rest::errors::Error<T::Error>> {
//! use synapse_pay_rest::{concepts::Session, users::{UserFields, Users}};
//!
//! let users = Users::new(&transport);
//! let mut session = Session::new();
//!
//! let fields = UserFields::builder()
//!     .email("jane@example.com")
//!     .phone_numbers(vec!["555-555-5555".to_string()])
//!     .legal_names(vec!["Jane Doe".to_string()])
//!     .build();
//!
//! // `session` now points at the new user.
//! users.create(&mut session, fields).await?;
//! users.update(&session, serde_json::json!({ "update": { "login": { "email": "new@example.com" } } })).await?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use bon::Builder;
use serde_json::{Map, json};
use url::form_urlencoded;

use crate::{
    concepts::{HeaderUpdate, Session, Transport},
    errors::{Error, Result},
    types::{AnyJson, Base64Attachment, QueryOptions, is_empty_payload},
};

/// Build `/users` or `/users/{user_id}`.
///
/// The id is escaped into a single path segment. An empty id is treated as unset.
pub fn users_path(user_id: Option<&str>) -> String {
    match user_id.filter(|id| !id.is_empty()) {
        Some(user_id) => format!("/users/{}", path_segment(user_id)),
        None => "/users".to_string(),
    }
}

/// Build `/oauth/{user_id}`. An unset id yields `/oauth/` and is left for the API to reject.
pub fn oauth_path(user_id: Option<&str>) -> String {
    format!("/oauth/{}", path_segment(user_id.unwrap_or_default()))
}

fn path_segment(id: &str) -> String {
    form_urlencoded::byte_serialize(id.as_bytes()).collect()
}

/// Fields for creating a user without writing the raw payload.
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    #[builder(into)]
    pub email: String,
    pub phone_numbers: Vec<String>,
    pub legal_names: Vec<String>,
    /// Your own identifier for the user.
    #[builder(into)]
    pub supp_id: Option<String>,
    #[builder(into)]
    pub note: Option<String>,
    /// Only sent when `true`.
    pub is_business: Option<bool>,
    pub cip_tag: Option<u32>,
}

impl UserFields {
    /// Synthesize the API payload.
    ///
    /// Fails if a required field is empty. Optional fields go under `extra` when set.
    pub fn to_payload<E>(&self) -> Result<AnyJson, E> {
        if self.email.is_empty() {
            return Err(Error::MissingField("email"));
        }
        if self.phone_numbers.is_empty() {
            return Err(Error::MissingField("phone_numbers"));
        }
        if self.legal_names.is_empty() {
            return Err(Error::MissingField("legal_names"));
        }

        let mut extra = Map::new();
        if let Some(supp_id) = &self.supp_id {
            extra.insert("supp_id".to_string(), json!(supp_id));
        }
        if let Some(note) = &self.note {
            extra.insert("note".to_string(), json!(note));
        }
        if self.is_business == Some(true) {
            extra.insert("is_business".to_string(), json!(true));
        }
        if let Some(cip_tag) = self.cip_tag {
            extra.insert("cip_tag".to_string(), json!(cip_tag));
        }

        Ok(json!({
            "logins": [{ "email": self.email }],
            "phone_numbers": self.phone_numbers,
            "legal_names": self.legal_names,
            "extra": extra,
        }))
    }
}

/// Input for [`Users::create`]: either a raw payload or fields to synthesize one from.
#[derive(Debug, Clone, PartialEq)]
pub enum NewUser {
    Payload(AnyJson),
    Fields(UserFields),
}

impl From<AnyJson> for NewUser {
    fn from(payload: AnyJson) -> Self {
        NewUser::Payload(payload)
    }
}

impl From<UserFields> for NewUser {
    fn from(fields: UserFields) -> Self {
        NewUser::Fields(fields)
    }
}

/// Client for the `/users` resource.
///
/// Borrows the transport; one `Users` per transport is enough, and it holds no state of
/// its own. The "current user" lives in the [`Session`] passed to each call.
pub struct Users<'t, T: Transport> {
    transport: &'t T,
}

impl<'t, T: Transport> Users<'t, T> {
    pub fn new(transport: &'t T) -> Self {
        Users { transport }
    }

    /// Exchange a refresh token for a new OAuth key for the session's user.
    ///
    /// Caches the returned `oauth_key` on the session.
    pub async fn refresh(
        &self,
        session: &mut Session,
        payload: AnyJson,
    ) -> Result<AnyJson, T::Error> {
        require_payload(&payload)?;

        let path = oauth_path(session.user_id());
        let response = self
            .transport
            .post(&path, &payload, session)
            .await
            .map_err(Error::Transport)?;

        if let Some(oauth_key) = response.get("oauth_key").and_then(AnyJson::as_str) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                "Refreshed oauth key for user '{}'",
                session.user_id().unwrap_or_default()
            );
            session.update_headers(HeaderUpdate::oauth_key(oauth_key));
        }
        Ok(response)
    }

    /// List users, one page of the API's default or the given size.
    pub async fn all(
        &self,
        session: &Session,
        per_page: Option<u32>,
    ) -> Result<Vec<AnyJson>, T::Error> {
        let options = QueryOptions::builder().maybe_per_page(per_page).build();
        let response = self.list(session, &options).await?;
        users_field(response)
    }

    /// Fetch a single user and make it the session's current user.
    pub async fn find(&self, session: &mut Session, user_id: &str) -> Result<AnyJson, T::Error> {
        self.get(session, Some(user_id), &QueryOptions::default()).await
    }

    /// Find users whose name or email contains `query`.
    pub async fn search(
        &self,
        session: &Session,
        query: &str,
        per_page: Option<u32>,
    ) -> Result<Vec<AnyJson>, T::Error> {
        let options = QueryOptions::builder()
            .query(query)
            .maybe_per_page(per_page)
            .build();
        let response = self.list(session, &options).await?;
        users_field(response)
    }

    /// Fetch one user, or the listing when `user_id` is `None`.
    ///
    /// An empty `user_id` fails with [`Error::MissingField`] before any request.
    ///
    /// Only the single-user fetch caches the returned `_id` on the session; `options` are
    /// ignored in that case. Listings leave the session untouched.
    pub async fn get(
        &self,
        session: &mut Session,
        user_id: Option<&str>,
        options: &QueryOptions,
    ) -> Result<AnyJson, T::Error> {
        let Some(user_id) = user_id else {
            return self.list(session, options).await;
        };
        if user_id.is_empty() {
            return Err(Error::MissingField("user_id"));
        }

        let path = users_path(Some(user_id));
        let response = self
            .transport
            .get(&path, session)
            .await
            .map_err(Error::Transport)?;
        cache_user_id(session, &response);
        Ok(response)
    }

    async fn list(
        &self,
        session: &Session,
        options: &QueryOptions,
    ) -> Result<AnyJson, T::Error> {
        let path = options.apply_to(&users_path(None));
        self.transport
            .get(&path, session)
            .await
            .map_err(Error::Transport)
    }

    /// Patch the session's current user.
    pub async fn update(&self, session: &Session, payload: AnyJson) -> Result<AnyJson, T::Error> {
        require_payload(&payload)?;
        self.patch_current_user(session, &payload).await
    }

    /// Create a user from a raw payload or from [`UserFields`].
    ///
    /// See [`create_from_payload`](Self::create_from_payload) and
    /// [`create_from_fields`](Self::create_from_fields).
    pub async fn create(
        &self,
        session: &mut Session,
        new_user: impl Into<NewUser>,
    ) -> Result<AnyJson, T::Error> {
        match new_user.into() {
            NewUser::Payload(payload) => self.create_from_payload(session, payload).await,
            NewUser::Fields(fields) => self.create_from_fields(session, &fields).await,
        }
    }

    /// Create a user from a payload sent as-is, and make it the session's current user.
    pub async fn create_from_payload(
        &self,
        session: &mut Session,
        payload: AnyJson,
    ) -> Result<AnyJson, T::Error> {
        require_payload(&payload)?;

        let path = users_path(None);
        let response = self
            .transport
            .post(&path, &payload, session)
            .await
            .map_err(Error::Transport)?;
        cache_user_id(session, &response);
        Ok(response)
    }

    /// Create a user from the given fields, and make it the session's current user.
    pub async fn create_from_fields(
        &self,
        session: &mut Session,
        fields: &UserFields,
    ) -> Result<AnyJson, T::Error> {
        let payload = fields.to_payload()?;
        self.create_from_payload(session, payload).await
    }

    #[deprecated(note = "use `Users::update` instead")]
    pub async fn add_doc(
        &self,
        session: &Session,
        payload: AnyJson,
    ) -> Result<AnyJson, T::Error> {
        #[cfg(feature = "tracing")]
        tracing::warn!("Users::add_doc is deprecated. Use Users::update instead.");
        require_payload(&payload)?;
        self.patch_current_user(session, &payload).await
    }

    #[deprecated(note = "use `Users::update` instead")]
    pub async fn answer_kba(
        &self,
        session: &Session,
        payload: AnyJson,
    ) -> Result<AnyJson, T::Error> {
        #[cfg(feature = "tracing")]
        tracing::warn!("Users::answer_kba is deprecated. Use Users::update instead.");
        require_payload(&payload)?;
        self.patch_current_user(session, &payload).await
    }

    /// Attach a file to the current user, inferring its MIME type from the extension.
    #[deprecated(note = "use `Users::update` instead")]
    #[allow(deprecated)]
    pub async fn attach_file(
        &self,
        session: &Session,
        path: impl AsRef<Path>,
    ) -> Result<AnyJson, T::Error> {
        #[cfg(feature = "tracing")]
        tracing::warn!("Users::attach_file is deprecated. Use Users::update instead.");
        let path = path.as_ref();
        let file_type = mime_guess::from_path(path)
            .first_raw()
            .ok_or_else(|| Error::UnknownFileType {
                path: path.display().to_string(),
            })?;

        self.attach_file_with_type(session, path, file_type).await
    }

    /// Attach a file to the current user as a base64 `data:` URI of the given MIME type.
    #[deprecated(note = "use `Users::update` instead")]
    pub async fn attach_file_with_type(
        &self,
        session: &Session,
        path: impl AsRef<Path>,
        file_type: &str,
    ) -> Result<AnyJson, T::Error> {
        if file_type.is_empty() {
            return Err(Error::MissingField("file_type"));
        }
        let contents = std::fs::read(path.as_ref())?;
        let attachment = Base64Attachment::encode(file_type, &contents);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Attaching '{}' ({file_type}, {} bytes)",
            path.as_ref().display(),
            contents.len()
        );

        let payload = json!({ "doc": { "attachment": attachment } });
        self.patch_current_user(session, &payload).await
    }

    async fn patch_current_user(
        &self,
        session: &Session,
        payload: &AnyJson,
    ) -> Result<AnyJson, T::Error> {
        let path = users_path(session.user_id());
        self.transport
            .patch(&path, payload, session)
            .await
            .map_err(Error::Transport)
    }
}

fn require_payload<E>(payload: &AnyJson) -> Result<(), E> {
    if is_empty_payload(payload) {
        Err(Error::MissingField("payload"))
    } else {
        Ok(())
    }
}

fn cache_user_id(session: &mut Session, response: &AnyJson) {
    if let Some(user_id) = response.get("_id").and_then(AnyJson::as_str) {
        #[cfg(feature = "tracing")]
        tracing::debug!("Current user is now '{user_id}'");
        session.update_headers(HeaderUpdate::user_id(user_id));
    }
}

fn users_field<E>(mut response: AnyJson) -> Result<Vec<AnyJson>, E> {
    match response.get_mut("users").map(AnyJson::take) {
        Some(AnyJson::Array(users)) => Ok(users),
        _ => Err(Error::MissingResponseField("users")),
    }
}
