//! The API client: authorization gate and request dispatcher.
//!
//! The [`Client`] type is the entry point for every operation. Use
//! [`ClientBuilder`] to configure and create clients. The facade operations
//! themselves live in [`crate::api`].

use crate::{
    request::{RequestBody, RequestMetadata, MEDIA_PART_NAME},
    translate::{translate_response, FailedResponse},
    uri::{UriBuilder, DEFAULT_API_BASE},
    Error, Parameters, Response, Result,
};
use http::{header, HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A client for the Twitter 1.1 REST API.
///
/// Clients are cheap to clone and safe to share between tasks: the only
/// state is immutable configuration behind an `Arc`, including whether the
/// client was built with credentials.
///
/// # Examples
///
/// ```no_run
/// use twine::{Client, PageParams};
///
/// # async fn example() -> Result<(), twine::Error> {
/// let client = Client::builder()
///     .bearer_token("AAAA...")
///     .build()?;
///
/// let timeline = client.home_timeline(PageParams::new().count(50)).await?;
/// for tweet in &timeline {
///     println!("{}: {}", tweet.from_user().unwrap_or("?"), tweet.text);
/// }
///
/// let tweet = client.update_status("Hello from Rust").await?;
/// println!("Posted {}", tweet.id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    uris: UriBuilder,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
    authorized: bool,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.uris.base().as_str())
            .field("authorized", &self.inner.authorized)
            .finish()
    }
}

impl Client {
    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Returns `true` if the client was built with credentials.
    pub fn is_authorized(&self) -> bool {
        self.inner.authorized
    }

    /// The URI assembler bound to this client's API base.
    pub fn uris(&self) -> &UriBuilder {
        &self.inner.uris
    }

    /// Fails with [`Error::NotAuthorized`] unless the client holds
    /// credentials.
    ///
    /// Every operation that writes or reads user-private data calls this
    /// before building its request, so an unauthorized client never touches
    /// the network for them.
    pub fn require_authorization(&self) -> Result<()> {
        if self.inner.authorized {
            return Ok(());
        }
        tracing::debug!("Rejected call on a client without credentials");
        Err(Error::authorization_required())
    }

    /// Issues one request and deserializes a 2xx body into `Res`.
    ///
    /// Non-2xx responses are classified by [`crate::translate()`] and never
    /// deserialized. A 2xx body that does not fit `Res` is
    /// [`Error::MalformedResponse`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use twine::{Client, Parameters, RequestMetadata, SavedSearch};
    ///
    /// # async fn example() -> Result<(), twine::Error> {
    /// let client = Client::builder().bearer_token("token").build()?;
    ///
    /// let mut form = Parameters::new();
    /// form.add("query", "#rustlang");
    /// let request = RequestMetadata::post_form("saved_searches/create.json", form);
    ///
    /// let response = client.call::<SavedSearch>(request).await?;
    /// println!("Saved search {} in {:?}", response.data.id, response.latency);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call<Res>(&self, metadata: RequestMetadata) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        let start_time = Instant::now();
        let response = match self.execute_request(&metadata).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    method = %metadata.method,
                    path = %metadata.path,
                    "Request failed"
                );
                return Err(e);
            }
        };
        self.parse_response(response, &metadata, start_time.elapsed())
            .await
    }

    /// Sends a GET and returns the deserialized body.
    pub async fn get<Res>(&self, path: impl Into<String>, query: Parameters) -> Result<Res>
    where
        Res: DeserializeOwned,
    {
        let response = self.call::<Res>(RequestMetadata::get(path, query)).await?;
        Ok(response.into_data())
    }

    /// Sends a POST with a URL-encoded form and returns the deserialized body.
    pub async fn post_form<Res>(&self, path: impl Into<String>, form: Parameters) -> Result<Res>
    where
        Res: DeserializeOwned,
    {
        let response = self.call::<Res>(RequestMetadata::post_form(path, form)).await?;
        Ok(response.into_data())
    }

    async fn execute_request(&self, metadata: &RequestMetadata) -> Result<reqwest::Response> {
        let url = self.inner.uris.build_uri(&metadata.path, &metadata.query)?;

        tracing::debug!(
            method = %metadata.method,
            url = %url,
            "Executing HTTP request"
        );

        let mut request = self
            .inner
            .http_client
            .request(metadata.method.clone(), url)
            .header(header::ACCEPT, "application/json");

        for (name, value) in &self.inner.default_headers {
            request = request.header(name, value);
        }

        for (name, value) in &metadata.headers {
            request = request.header(name, value);
        }

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        request = match &metadata.body {
            RequestBody::Empty => request,
            RequestBody::Form(fields) => request.form(fields.as_pairs()),
            RequestBody::Multipart { fields, media } => {
                let mut form = Form::new();
                for (name, value) in fields.iter() {
                    form = form.text(name.to_string(), value.to_string());
                }
                let mut part = Part::bytes(media.bytes.clone()).file_name(media.file_name.clone());
                if let Some(content_type) = &media.content_type {
                    part = part.mime_str(content_type).map_err(|e| {
                        Error::ConfigurationError(format!("Invalid media content type: {}", e))
                    })?;
                }
                request.multipart(form.part(MEDIA_PART_NAME, part))
            }
        };

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout
            } else {
                Error::Network(e)
            }
        })
    }

    async fn parse_response<Res>(
        &self,
        response: reqwest::Response,
        metadata: &RequestMetadata,
        latency: Duration,
    ) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        let status = response.status();
        let headers = response.headers().clone();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            path = %metadata.path,
            "Received HTTP response"
        );

        if !status.is_success() {
            let raw_response = response.text().await.unwrap_or_default();

            if status.is_server_error() {
                tracing::warn!(
                    status = status.as_u16(),
                    response = %raw_response,
                    "Server error (5xx)"
                );
            } else {
                tracing::error!(
                    status = status.as_u16(),
                    response = %raw_response,
                    "API error response"
                );
            }

            let failed = FailedResponse::new(status, headers, raw_response)
                .with_submitted_content(metadata.body.submitted_status().map(str::to_string));
            return Err(translate_response(failed));
        }

        let raw_body = response.text().await?;

        match serde_json::from_str::<Res>(&raw_body) {
            Ok(data) => Ok(Response::new(data, raw_body, status, headers, latency)),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    raw_response = %raw_body,
                    "Failed to deserialize response"
                );

                Err(Error::MalformedResponse {
                    raw_response: raw_body,
                    serde_error: e.to_string(),
                    status,
                })
            }
        }
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use twine::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), twine::Error> {
/// let client = ClientBuilder::new()
///     .bearer_token("AAAA...")
///     .timeout(Duration::from_secs(30))
///     .default_header("User-Agent", "my-app/1.0")?
///     .build()?;
/// assert!(client.is_authorized());
///
/// // Anonymous clients can only reach public resources.
/// let anonymous = ClientBuilder::new().build()?;
/// assert!(!anonymous.is_authorized());
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<String>,
    default_headers: HeaderMap,
    bearer_token: Option<String>,
    authorized: Option<bool>,
    timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            base_url: None,
            default_headers: HeaderMap::new(),
            bearer_token: None,
            authorized: None,
            timeout: None,
            http_client: None,
        }
    }

    /// Overrides the API base, `https://api.twitter.com/1.1/` by default.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        UriBuilder::new(url.as_ref())?;
        self.base_url = Some(url.as_ref().to_string());
        Ok(self)
    }

    /// Sends `Authorization: Bearer <token>` with every request and marks the
    /// client as authorized.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Declares whether the client may act for a user.
    ///
    /// Use this with [`ClientBuilder::http_client`] when the injected
    /// transport signs requests itself. Without it, a client is authorized
    /// exactly when it has a bearer token.
    pub fn authorized(mut self, authorized: bool) -> Self {
        self.authorized = Some(authorized);
        self
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets a per-request timeout, passed straight to the transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uses a preconfigured `reqwest::Client` as the transport.
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or bearer token is invalid, or if the
    /// transport cannot be created.
    pub fn build(self) -> Result<Client> {
        let uris = UriBuilder::new(self.base_url.as_deref().unwrap_or(DEFAULT_API_BASE))?;

        let mut default_headers = self.default_headers;
        if let Some(token) = &self.bearer_token {
            let mut value = HeaderValue::try_from(format!("Bearer {}", token))
                .map_err(|e| Error::ConfigurationError(format!("Invalid bearer token: {}", e)))?;
            value.set_sensitive(true);
            default_headers.insert(header::AUTHORIZATION, value);
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder().build().map_err(|e| {
                Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?,
        };

        let authorized = self
            .authorized
            .unwrap_or(self.bearer_token.is_some());

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                uris,
                default_headers,
                timeout: self.timeout,
                authorized,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_authorizes() {
        let client = Client::builder().bearer_token("token").build().unwrap();
        assert!(client.is_authorized());
        assert!(client.require_authorization().is_ok());
    }

    #[test]
    fn test_anonymous_client_is_gated() {
        let client = Client::builder().build().unwrap();
        assert!(!client.is_authorized());
        assert!(matches!(
            client.require_authorization(),
            Err(Error::NotAuthorized { .. })
        ));
    }

    #[test]
    fn test_explicit_authorization_overrides_token() {
        let client = Client::builder().authorized(true).build().unwrap();
        assert!(client.is_authorized());

        let client = Client::builder()
            .bearer_token("token")
            .authorized(false)
            .build()
            .unwrap();
        assert!(!client.is_authorized());
    }

    #[test]
    fn test_default_base_url() {
        let client = Client::builder().build().unwrap();
        assert_eq!(client.uris().base().as_str(), DEFAULT_API_BASE);
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(matches!(
            Client::builder().base_url("not a url"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            Client::builder().default_header("bad header", "value"),
            Err(Error::ConfigurationError(_))
        ));
        assert!(matches!(
            Client::builder().bearer_token("line\nbreak").build(),
            Err(Error::ConfigurationError(_))
        ));
    }
}
