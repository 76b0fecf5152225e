//! HTTP response types

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::HttpError;

/// HTTP Response type - generic over the body type R and error type E
/// This is the primary return type for all HTTP operations
pub type Response<R, E = HttpError> = Result<R, E>;

/// Received HTTP response with the body already read into memory
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: u16,
    headers: HeaderMap,
    url: Url,
    body: Vec<u8>,
}

impl RawResponse {
    /// Drain a reqwest response into a RawResponse
    pub(crate) async fn read(response: reqwest::Response) -> Response<Self> {
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let url = response.url().clone();
        let body = response.bytes().await.map_err(HttpError::from)?;

        Ok(Self {
            status,
            headers,
            url,
            body: body.to_vec(),
        })
    }

    /// Get the HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Check if the response status is a success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the response status is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if the response status is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of a response header, if present and valid ASCII
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Final URL of the response, after redirects
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the response body as bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Get the response body as text
    pub fn text(&self) -> Response<String> {
        String::from_utf8(self.body.clone())
            .map_err(|e| HttpError::Other(format!("Response body is not UTF-8: {}", e)))
    }

    /// Decode the response body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Response<T> {
        serde_json::from_slice(&self.body).map_err(|e| HttpError::Decode {
            message: e.to_string(),
            response: Box::new(self.clone()),
        })
    }

    /// Turn a 4xx or 5xx response into [`HttpError::Status`]
    pub fn error_for_status(self) -> Response<Self> {
        if self.is_client_error() || self.is_server_error() {
            return Err(HttpError::Status {
                status: self.status,
                message: String::from_utf8_lossy(&self.body).into_owned(),
            });
        }

        Ok(self)
    }

    /// Consume the response, returning the body bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }
}

/// A response together with the value decoded from its JSON body
#[derive(Debug, Clone)]
pub struct Decoded<T> {
    /// The received response
    pub response: RawResponse,
    /// Value decoded from the response body
    pub data: T,
}

impl<T> Decoded<T> {
    /// Split into the response and the decoded value
    pub fn into_parts(self) -> (RawResponse, T) {
        (self.response, self.data)
    }

    /// Discard the response, keeping the decoded value
    pub fn into_data(self) -> T {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            headers: HeaderMap::new(),
            url: Url::parse("http://localhost/").expect("Valid URL"),
            body: body.as_bytes().to_vec(),
        }
    }

    #[derive(Debug, Deserialize)]
    struct Point {
        x: i32,
    }

    #[test]
    fn test_response_type_is_result() {
        let success: Response<i32> = Ok(42);
        assert!(matches!(success, Ok(42)));

        let error: Response<i32> = Err(HttpError::Timeout);
        assert!(matches!(error, Err(HttpError::Timeout)));
    }

    #[test]
    fn test_status_ranges() {
        assert!(raw(204, "").is_success());
        assert!(raw(404, "").is_client_error());
        assert!(raw(503, "").is_server_error());
        assert!(!raw(302, "").is_success());
    }

    #[test]
    fn test_json_decodes_body() {
        let point: Point = raw(200, r#"{"x":1}"#).json().expect("Valid JSON");
        assert_eq!(point.x, 1);
    }

    #[test]
    fn test_json_error_keeps_response() {
        let err = raw(200, "not json")
            .json::<Point>()
            .expect_err("Invalid JSON should fail");

        assert!(err.is_decode());
        let response = err.response().expect("Decode error carries the response");
        assert_eq!(response.status(), 200);
        assert_eq!(response.bytes(), b"not json");
    }

    #[test]
    fn test_text_rejects_invalid_utf8() {
        let mut response = raw(200, "");
        response.body = vec![0xff, 0xfe];
        assert!(response.text().is_err());
    }

    #[test]
    fn test_error_for_status() {
        assert!(raw(200, "ok").error_for_status().is_ok());

        match raw(500, "boom").error_for_status() {
            Err(HttpError::Status { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("Expected HttpError::Status, got {:?}", other),
        }
    }

    #[test]
    fn test_decoded_into_parts() {
        let decoded = Decoded {
            response: raw(201, ""),
            data: 7,
        };
        let (response, data) = decoded.into_parts();
        assert_eq!(response.status(), 201);
        assert_eq!(data, 7);
    }
}
