//! HTTP request builder

use std::time::Duration;

use cookie::Cookie;
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE, COOKIE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::client::HttpClient;
use crate::error::HttpError;
use crate::response::{Decoded, RawResponse, Response};

/// Chainable HTTP request builder
///
/// Configuration calls take the builder by value and hand it back, so a
/// request reads as one expression ending in [`send`](Self::send) or
/// [`send_json`](Self::send_json). Nothing is validated until then: a bad
/// URL, header or body is reported by the terminal call.
pub struct RequestBuilder {
    client: Option<reqwest::Client>,
    method: Method,
    url: String,
    timeout: Option<Duration>,
    body: Option<Vec<u8>>,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    cookies: Vec<Cookie<'static>>,
    error: Option<HttpError>,
}

impl std::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .field("query", &self.query)
            .field("headers", &self.headers.len())
            .field("cookies", &self.cookies.len())
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl RequestBuilder {
    pub(crate) fn new(client: &HttpClient, method: Method, url: &str) -> Self {
        Self {
            client: Some(client.inner().clone()),
            method,
            url: url.to_string(),
            timeout: client.config().read_timeout,
            body: None,
            query: Vec::new(),
            headers: Vec::new(),
            cookies: Vec::new(),
            error: None,
        }
    }

    /// Builder whose client could not be created; `send` reports `error`
    pub(crate) fn failed(method: Method, url: &str, error: HttpError) -> Self {
        Self {
            client: None,
            method,
            url: url.to_string(),
            timeout: None,
            body: None,
            query: Vec::new(),
            headers: Vec::new(),
            cookies: Vec::new(),
            error: Some(error),
        }
    }

    /// Add a header. Repeated keys are sent as separate entries.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Attach a cookie
    pub fn cookie(mut self, cookie: Cookie<'static>) -> Self {
        self.cookies.push(cookie);
        self
    }

    /// Add a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the request body to the JSON encoding of `body`
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        match serde_json::to_vec(body) {
            Ok(bytes) => {
                self.body = Some(bytes);
                if matches!(self.error, Some(HttpError::Serialization(_))) {
                    self.error = None;
                }
            }
            Err(e) => {
                tracing::warn!("Could not serialize request body: {}", e);
                if !matches!(self.error, Some(HttpError::Build(_))) {
                    self.error = Some(HttpError::from(e));
                }
            }
        }
        self
    }

    /// Override the client's read timeout for this request
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// HTTP method of the request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Target URL with the accumulated query parameters appended
    pub fn url(&self) -> Response<Url> {
        let mut url = Url::parse(&self.url)
            .map_err(|e| HttpError::Build(format!("Invalid URL {:?}: {}", self.url, e)))?;

        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        Ok(url)
    }

    fn into_request(mut self) -> Response<(reqwest::Client, reqwest::Request)> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        let client = self
            .client
            .take()
            .ok_or_else(|| HttpError::Build("No HTTP client".to_string()))?;

        let url = self.url()?;
        let mut request = reqwest::Request::new(self.method, url);
        let headers = request.headers_mut();

        for (key, value) in &self.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| HttpError::Build(format!("Invalid header name {:?}: {}", key, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| HttpError::Build(format!("Invalid value for header {}: {}", key, e)))?;
            headers.append(name, value);
        }

        if !self.cookies.is_empty() {
            let joined = self
                .cookies
                .iter()
                .map(|c| format!("{}={}", c.name(), c.value()))
                .collect::<Vec<_>>()
                .join("; ");
            let value = HeaderValue::from_str(&joined)
                .map_err(|e| HttpError::Build(format!("Invalid cookie: {}", e)))?;
            headers.append(COOKIE, value);
        }

        if let Some(body) = self.body {
            if !headers.contains_key(CONTENT_TYPE) {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
            *request.body_mut() = Some(body.into());
        }

        *request.timeout_mut() = self.timeout;

        Ok((client, request))
    }

    /// Send the request and read the whole response body.
    ///
    /// Any status code is a successful result, see
    /// [`RawResponse::error_for_status`] to reject 4xx and 5xx.
    pub async fn send(self) -> Response<RawResponse> {
        let (client, request) = self.into_request()?;

        let target = redacted(request.url());
        tracing::debug!("Sending {} request to {}", request.method(), target);

        let response = client.execute(request).await.map_err(HttpError::from)?;
        tracing::debug!("Received {} from {}", response.status(), target);

        RawResponse::read(response).await
    }

    /// Send the request and decode the response body as JSON.
    ///
    /// A body that does not decode into `R` yields [`HttpError::Decode`],
    /// which still carries the received response.
    pub async fn send_json<R: DeserializeOwned>(self) -> Response<Decoded<R>> {
        let response = self.send().await?;

        match serde_json::from_slice::<R>(response.bytes()) {
            Ok(data) => Ok(Decoded { response, data }),
            Err(e) => {
                tracing::warn!(
                    "Could not decode response from {} ({}): {}",
                    redacted(response.url()),
                    response.status(),
                    e
                );
                Err(HttpError::Decode {
                    message: e.to_string(),
                    response: Box::new(response),
                })
            }
        }
    }
}

/// URL safe for logs: no query string and no credentials
fn redacted(url: &Url) -> Url {
    let mut url = url.clone();
    url.set_query(None);
    url.set_fragment(None);
    let _ = url.set_username("");
    let _ = url.set_password(None);
    url
}
