use http::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use url::Url;

use crate::{
    concepts::{Session, Transport},
    config::ClientConfig,
    types::AnyJson,
};

const GATEWAY_HEADER: HeaderName = HeaderName::from_static("x-sp-gateway");
const USER_HEADER: HeaderName = HeaderName::from_static("x-sp-user");
const USER_IP_HEADER: HeaderName = HeaderName::from_static("x-sp-user-ip");

/// A [`Transport`] that talks to the SynapsePay API over HTTPS.
///
/// Every request carries the gateway credentials and client IP from the [`ClientConfig`],
/// plus `X-SP-USER: {oauth_key}|{fingerprint}` built from the caller's [`Session`].
/// Non-success statuses are returned as [`HttpTransportError::HttpRequestError`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    pub config: ClientConfig,
    pub client: reqwest::Client,
    pub headers: HeaderMap,
}

#[derive(Debug, thiserror::Error)]
pub enum HttpTransportError {
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
    #[error("HTTP request error: {0}")]
    HttpRequestError(#[from] reqwest::Error),
    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Self {
        HttpTransport {
            config,
            client: reqwest::Client::new(),
            headers: HeaderMap::new(),
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Add a header sent with every request.
    pub fn header(mut self, key: &HeaderName, value: &HeaderValue) -> Self {
        self.headers.insert(key, value.to_owned());
        self
    }

    /// Resolve an API path such as `/users?page=2` against the configured base URL.
    pub fn url_for(&self, path: &str) -> Result<Url, HttpTransportError> {
        Ok(Url::parse(&format!(
            "{}{path}",
            self.config.resolved_base_url()
        ))?)
    }

    /// Headers for a request made on behalf of `session`.
    pub fn request_headers(&self, session: &Session) -> Result<HeaderMap, HttpTransportError> {
        let mut headers = self.headers.clone();
        headers.insert(
            GATEWAY_HEADER,
            HeaderValue::from_str(&format!(
                "{}|{}",
                self.config.client_id, self.config.client_secret
            ))?,
        );
        headers.insert(
            USER_HEADER,
            HeaderValue::from_str(&format!(
                "{}|{}",
                session.oauth_key().unwrap_or_default(),
                self.config.fingerprint
            ))?,
        );
        headers.insert(
            USER_IP_HEADER,
            HeaderValue::from_str(&self.config.ip_address)?,
        );
        Ok(headers)
    }

    async fn send_json<B: Serialize>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
        session: &Session,
    ) -> Result<AnyJson, HttpTransportError> {
        let url = self.url_for(path)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("{method} {url}");

        let mut request = self
            .client
            .request(method, url)
            .headers(self.request_headers(session)?);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?.error_for_status()?.json().await?;
        Ok(response)
    }
}

impl Transport for HttpTransport {
    type Error = HttpTransportError;

    async fn get(&self, path: &str, session: &Session) -> Result<AnyJson, Self::Error> {
        self.send_json::<AnyJson>(reqwest::Method::GET, path, None, session)
            .await
    }

    async fn post(
        &self,
        path: &str,
        body: &AnyJson,
        session: &Session,
    ) -> Result<AnyJson, Self::Error> {
        self.send_json(reqwest::Method::POST, path, Some(body), session)
            .await
    }

    async fn patch(
        &self,
        path: &str,
        body: &AnyJson,
        session: &Session,
    ) -> Result<AnyJson, Self::Error> {
        self.send_json(reqwest::Method::PATCH, path, Some(body), session)
            .await
    }
}
