//! Main CampusClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::api::RemoteResource;
use crate::api::Resource;
use crate::api::http_error;
use crate::auth::TokenProvider;
use crate::error::ApiError;
use crate::error::Error;

/// The client for the campus administration API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely.
///
/// # Example
///
/// ```ignore
/// use campus_lib::{CampusClient, auth::StaticTokenProvider};
/// use campus_lib::api::Resource;
/// use campus_lib::model::School;
///
/// let client = CampusClient::builder()
///     .url("https://api.example.com")
///     .token_provider(StaticTokenProvider::new("my-token"))
///     .build();
///
/// let schools = client.resource::<School>(Resource::SCHOOL);
/// ```
#[derive(Clone)]
pub struct CampusClient {
    inner: Arc<CampusClientInner>,
}

struct CampusClientInner {
    base_url: String,
    token_provider: Arc<dyn TokenProvider>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl CampusClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> CampusClientBuilder<Missing, Missing> {
        CampusClientBuilder::new()
    }

    /// Returns the base URL of the API.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns a typed handle to one resource.
    pub fn resource<T>(&self, resource: Resource) -> RemoteResource<T> {
        RemoteResource::new(self.clone(), resource)
    }

    /// Resolves a path against the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let base = format!("{}/", self.inner.base_url.trim_end_matches('/'));
        Url::parse(&base)
            .and_then(|base| base.join(path.trim_start_matches('/')))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.inner.base_url, e)))
    }

    /// Sends an authenticated JSON request and returns the body of a 2xx
    /// response.
    pub(crate) async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<String, Error> {
        let token = self
            .inner
            .token_provider
            .get_token(&self.inner.base_url)
            .await?;

        log::debug!("{} {}", method, url);
        let mut request = self
            .inner
            .http_client
            .request(method, url)
            .bearer_auth(&token.access_token)
            .json(body);

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        let text = response.text().await.map_err(ApiError::from)?;

        if status.is_success() {
            Ok(text)
        } else {
            Err(http_error(status.as_u16(), &text).into())
        }
    }

    fn map_send_error(&self, err: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if err.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(err),
        }
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`CampusClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The API base URL
/// - `token_provider` - A [`TokenProvider`] implementation
pub struct CampusClientBuilder<U, P> {
    url: U,
    token_provider: P,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl CampusClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token_provider: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for CampusClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> CampusClientBuilder<Missing, P> {
    /// Sets the API base URL.
    pub fn url(self, url: impl Into<String>) -> CampusClientBuilder<Set<String>, P> {
        CampusClientBuilder {
            url: Set(url.into()),
            token_provider: self.token_provider,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> CampusClientBuilder<U, Missing> {
    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> CampusClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        CampusClientBuilder {
            url: self.url,
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, P> CampusClientBuilder<U, P> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl CampusClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`CampusClient`].
    ///
    /// Fails only if the underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<CampusClient, ApiError> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(CampusClient {
            inner: Arc::new(CampusClientInner {
                base_url: self.url.0,
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
