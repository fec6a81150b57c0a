use std::fmt::Debug;

use http::Uri;
use http::uri::{PathAndQuery, Scheme};
use url::Url;

use crate::error::RequestError;

/// The server a request is sent to.
///
/// Requests only carry a path and a query string, an `Endpoint` provides the
/// scheme, authority and base path needed to turn them into a full URI.
///
/// # Example
///
/// ```rust
/// use clawrest_core::Endpoint;
/// use http::uri::Scheme;
///
/// let endpoint = Endpoint::builder()
///     .with_scheme(Scheme::HTTPS)
///     .with_host("api.github.com")
///     .with_port(443)
///     .build();
///
/// let uri = endpoint.uri_for("repos/tomitribe/orange/pulls")?;
/// assert_eq!(uri.to_string(), "https://api.github.com:443/repos/tomitribe/orange/pulls");
/// # Ok::<(), clawrest_core::RequestError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    scheme: Scheme,
    host: String,
    port: u16,
    base_path: String,
}

impl Endpoint {
    /// Creates a builder with the default configuration.
    pub fn builder() -> EndpointBuilder {
        EndpointBuilder::default()
    }

    /// The base path, without trailing `/`.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Joins the base path and a request path into a full URI.
    ///
    /// The request path may be relative, a `/` separator is added when missing.
    ///
    /// # Errors
    ///
    /// Fails if the resulting URI is not valid.
    pub fn uri_for(&self, path: &str) -> Result<Uri, RequestError> {
        let separator = if path.starts_with('/') { "" } else { "/" };
        let full_path = [self.base_path.as_str(), separator, path].concat();

        let uri = Uri::builder()
            .scheme(self.scheme.clone())
            .authority(format!("{}:{}", self.host, self.port))
            .path_and_query(full_path)
            .build()?;
        Ok(uri)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        EndpointBuilder::default().build()
    }
}

/// Builder for [`Endpoint`], defaults to `http://127.0.0.1:80` without base path.
#[derive(Debug, Clone)]
pub struct EndpointBuilder {
    scheme: Scheme,
    host: String,
    port: u16,
    base_path: Option<PathAndQuery>,
}

impl EndpointBuilder {
    /// Builds the endpoint.
    pub fn build(self) -> Endpoint {
        let Self {
            scheme,
            host,
            port,
            base_path,
        } = self;

        let base_path = base_path
            .as_ref()
            .map(|it| it.path().trim_end_matches('/').to_string())
            .unwrap_or_default();

        Endpoint {
            scheme,
            host,
            port,
            base_path,
        }
    }

    /// Sets the HTTP scheme.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the hostname or IP address of the server.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port of the server.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the base path prepended to every request path.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidBasePath`] if the path contains invalid characters
    /// (such as spaces) or cannot be parsed as a valid URI path.
    pub fn with_base_path<P>(mut self, base_path: P) -> Result<Self, RequestError>
    where
        P: TryInto<PathAndQuery>,
        P::Error: Debug + 'static,
    {
        let base_path = base_path
            .try_into()
            .map_err(|err| RequestError::InvalidBasePath {
                error: format!("{err:?}"),
            })?;
        self.base_path = Some(base_path);
        Ok(self)
    }

    /// Configures scheme, host, port and base path from a base URL.
    ///
    /// The port defaults to the well-known port of the scheme.
    ///
    /// ```rust
    /// use clawrest_core::Endpoint;
    ///
    /// let endpoint = Endpoint::builder()
    ///     .with_base_url("https://api.example.com/v1/")?
    ///     .build();
    /// assert_eq!(endpoint.base_path(), "/v1");
    /// # Ok::<(), clawrest_core::RequestError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Fails if the URL cannot be parsed, has no host, or uses an unsupported scheme.
    pub fn with_base_url(self, base_url: &str) -> Result<Self, RequestError> {
        let url = Url::parse(base_url)?;

        let scheme = match url.scheme() {
            "http" => Scheme::HTTP,
            "https" => Scheme::HTTPS,
            other => {
                return Err(RequestError::InvalidBasePath {
                    error: format!("unsupported scheme '{other}'"),
                });
            }
        };
        let host = url
            .host_str()
            .ok_or_else(|| RequestError::InvalidBasePath {
                error: format!("no host in '{base_url}'"),
            })?
            .to_string();
        let port = url.port_or_known_default().unwrap_or(80);

        self.with_scheme(scheme)
            .with_host(host)
            .with_port(port)
            .with_base_path(url.path())
    }
}

impl Default for EndpointBuilder {
    fn default() -> Self {
        Self {
            scheme: Scheme::HTTP,
            host: "127.0.0.1".to_string(),
            port: 80,
            base_path: None,
        }
    }
}
