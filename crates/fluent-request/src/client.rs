//! HTTP client wrapper

use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::Method;

use crate::config::ClientConfig;
use crate::error::HttpError;
use crate::request::RequestBuilder;
use crate::response::Response;

static SHARED_CLIENT: OnceCell<reqwest::Client> = OnceCell::new();

/// Process-wide client behind [`HttpClient::from_env`] and the free verb
/// functions, built on first use
fn shared_client() -> Response<reqwest::Client> {
    SHARED_CLIENT
        .get_or_try_init(|| {
            reqwest::Client::builder()
                .build()
                .map_err(|e| HttpError::Build(e.to_string()))
        })
        .cloned()
}

/// HTTP client wrapper
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Create a new HTTP client with default settings (no timeout)
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
            config: ClientConfig::default(),
        }
    }

    /// Create a client configured from the process environment.
    ///
    /// The connection pool is shared with every other client created this
    /// way; only the configuration is read anew.
    pub fn from_env() -> Response<Self> {
        Ok(Self {
            inner: shared_client()?,
            config: ClientConfig::from_env(),
        })
    }

    /// Create a new HTTP client builder
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Create an HttpClient from a reqwest::Client
    pub fn from_reqwest(client: reqwest::Client) -> Self {
        Self {
            inner: client,
            config: ClientConfig::default(),
        }
    }

    pub(crate) fn inner(&self) -> &reqwest::Client {
        &self.inner
    }

    /// Settings applied to requests created by this client
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Request builder for an arbitrary method
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        RequestBuilder::new(self, method, url)
    }

    /// GET request builder
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    /// POST request builder
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.request(Method::POST, url)
    }

    /// PUT request builder
    pub fn put(&self, url: &str) -> RequestBuilder {
        self.request(Method::PUT, url)
    }

    /// PATCH request builder
    pub fn patch(&self, url: &str) -> RequestBuilder {
        self.request(Method::PATCH, url)
    }

    /// DELETE request builder
    pub fn delete(&self, url: &str) -> RequestBuilder {
        self.request(Method::DELETE, url)
    }
}

/// HTTP client builder
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    config: ClientConfig,
}

impl HttpClientBuilder {
    /// Replace the whole configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Time allowed for each request, from send until the body is read
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = Some(timeout);
        self
    }

    /// Build the HTTP client
    pub fn build(self) -> Response<HttpClient> {
        let inner = reqwest::Client::builder()
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;

        Ok(HttpClient {
            inner,
            config: self.config,
        })
    }
}

fn env_request(method: Method, url: &str) -> RequestBuilder {
    match HttpClient::from_env() {
        Ok(client) => client.request(method, url),
        Err(err) => RequestBuilder::failed(method, url, err),
    }
}

/// GET request builder using a client configured from the environment
pub fn get(url: &str) -> RequestBuilder {
    env_request(Method::GET, url)
}

/// POST request builder using a client configured from the environment
pub fn post(url: &str) -> RequestBuilder {
    env_request(Method::POST, url)
}

/// PUT request builder using a client configured from the environment
pub fn put(url: &str) -> RequestBuilder {
    env_request(Method::PUT, url)
}

/// PATCH request builder using a client configured from the environment
pub fn patch(url: &str) -> RequestBuilder {
    env_request(Method::PATCH, url)
}

/// DELETE request builder using a client configured from the environment
pub fn delete(url: &str) -> RequestBuilder {
    env_request(Method::DELETE, url)
}
