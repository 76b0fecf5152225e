//! HTTP error types

use thiserror::Error;

use crate::response::RawResponse;

/// HTTP errors that can occur while building, sending or decoding a request
#[derive(Debug, Error)]
pub enum HttpError {
    /// HTTP error with status code
    #[error("HTTP error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),
    /// Request timeout
    #[error("Request timeout")]
    Timeout,
    /// Request body could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Response body is not valid JSON or does not match the target type
    #[error("Decode error: {message}")]
    Decode {
        /// Decoder message
        message: String,
        /// The response whose body failed to decode
        response: Box<RawResponse>,
    },
    /// Request could not be built (malformed URL, header or method)
    #[error("Request build error: {0}")]
    Build(String),
    /// Other error
    #[error("{0}")]
    Other(String),
}

impl HttpError {
    /// The request could not be constructed from the accumulated state
    pub fn is_construction(&self) -> bool {
        matches!(self, HttpError::Build(_) | HttpError::Serialization(_))
    }

    /// The network call itself failed
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            HttpError::Connection(_) | HttpError::Timeout | HttpError::Other(_)
        )
    }

    /// The response arrived but its body could not be decoded
    pub fn is_decode(&self) -> bool {
        matches!(self, HttpError::Decode { .. })
    }

    /// Response received before the error, if any
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            HttpError::Decode { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Take the response received before the error, if any
    pub fn into_response(self) -> Option<RawResponse> {
        match self {
            HttpError::Decode { response, .. } => Some(*response),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HttpError::Timeout
        } else if err.is_builder() {
            HttpError::Build(err.to_string())
        } else if err.is_connect() {
            HttpError::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            HttpError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            HttpError::Other(err.to_string())
        }
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        HttpError::Serialization(err.to_string())
    }
}
