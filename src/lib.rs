//! # SynapsePay REST
//!
//! A typed client for the SynapsePay REST API: onboarding users and attaching the KYC
//! documents that verify them.
//!
//! ## Core Components Overview
//!
//! - **[`concepts`]**: The [`Transport`](concepts::Transport) trait every resource client
//!   sends requests through, and the [`Session`](concepts::Session) holding the current
//!   user's authentication context.
//! - **[`users`]**: The `/users` resource: create, fetch, search, update and OAuth refresh.
//! - **[`documents`]**: Physical, social and virtual verification documents.
//! - **[`types`]**: Common re-usable types, e.g. query options and file attachments.
//! - **[`config`]**: Credentials and environment selection.
//! - **[`http_client`]**: A `reqwest` based transport (feature `http-client`).
//!
//! ## Sessions
//!
//! There is no hidden "current user". Operations that act on the current user take a
//! [`Session`](concepts::Session), and operations that learn a new user id or OAuth key
//! write it back to the session they were given:
//!
//! ```no_run
//! use synapse_pay_rest::{
//!     concepts::Session,
//!     config::ClientConfig,
//!     http_client::HttpTransport,
//!     users::Users,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::new(
//!     ClientConfig::builder()
//!         .client_id("client_id")
//!         .client_secret("client_secret")
//!         .fingerprint("fingerprint")
//!         .ip_address("127.0.0.1")
//!         .build(),
//! );
//! let users = Users::new(&transport);
//!
//! let mut session = Session::new();
//! let user = users.find(&mut session, "5641019e86c273308e8be2d8").await?;
//! assert_eq!(session.user_id(), user["_id"].as_str());
//!
//! let refresh_token = user["refresh_token"].clone();
//! users
//!     .refresh(&mut session, serde_json::json!({ "refresh_token": refresh_token }))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod concepts;
pub mod config;
pub mod documents;
pub mod errors;
pub mod types;
pub mod users;

#[cfg(feature = "http-client")]
pub mod http_client;
