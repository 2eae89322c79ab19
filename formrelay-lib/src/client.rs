//! Main FormClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::Error;

/// The main client for submitting forms to a site's endpoints.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely. Relative action targets are resolved against the
/// configured base URL.
///
/// # Example
///
/// ```ignore
/// use formrelay_lib::FormClient;
///
/// let client = FormClient::builder()
///     .base_url("https://site.example.com")
///     .build();
///
/// let outcome = client.submit(&form).await?;
/// ```
#[derive(Clone)]
pub struct FormClient {
    inner: Arc<FormClientInner>,
}

struct FormClientInner {
    base_url: String,
    http_client: Client,
    timeout: Option<Duration>,
}

impl FormClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> FormClientBuilder<Missing> {
        FormClientBuilder::new()
    }

    /// Returns the base URL that relative action targets resolve against.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.inner.http_client
    }

    pub(crate) fn timeout(&self) -> Option<Duration> {
        self.inner.timeout
    }

    /// Resolves a form's action target to an absolute URL.
    ///
    /// Absolute targets are used as-is; relative ones are joined against the
    /// base URL. Resolution failure is reported before any request is made.
    pub(crate) fn resolve_action(&self, action: &str) -> Result<Url, Error> {
        match Url::parse(action) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = Url::parse(&self.inner.base_url)
                    .map_err(|source| Error::invalid_action(&self.inner.base_url, source))?;
                base.join(action)
                    .map_err(|source| Error::invalid_action(action, source))
            }
            Err(source) => Err(Error::invalid_action(action, source)),
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

/// Builder for constructing a [`FormClient`].
///
/// Uses the typestate pattern to ensure the required base URL is set at
/// compile time.
///
/// # Example
///
/// ```ignore
/// let client = FormClient::builder()
///     .base_url("https://site.example.com")
///     .timeout(Duration::from_secs(30))
///     .build();
/// ```
pub struct FormClientBuilder<BaseUrl> {
    base_url: BaseUrl,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl FormClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the site base URL that relative action targets resolve against.
    pub fn base_url(self, url: impl Into<String>) -> FormClientBuilder<Set<String>> {
        FormClientBuilder {
            base_url: Set(url.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for FormClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> FormClientBuilder<B> {
    /// Sets the per-request timeout.
    ///
    /// No timeout is applied by default; a hung request is left to the
    /// underlying transport.
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

impl FormClientBuilder<Set<String>> {
    /// Builds the [`FormClient`].
    ///
    /// This method is only available once `base_url` has been set.
    pub fn build(self) -> FormClient {
        let http_client = self.http_client.unwrap_or_else(|| {
            let mut builder = Client::builder();
            if let Some(timeout) = self.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }
            builder.build().expect("Failed to build HTTP client")
        });

        FormClient {
            inner: Arc::new(FormClientInner {
                base_url: self.base_url.0,
                http_client,
                timeout: self.timeout,
            }),
        }
    }
}
