//! Fluent builder for outbound HTTP requests
//!
//! A [`RequestBuilder`] collects the method, URL, query parameters, headers,
//! cookies and JSON body of a request through chained calls, then sends it
//! and optionally decodes the JSON response.
//!
//! # Example
//!
//! ```no_run
//! use fluent_request::{Cookie, HttpError};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize)]
//! struct NewUser<'a> {
//!     name: &'a str,
//! }
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: u64,
//! }
//!
//! async fn example() -> Result<u64, HttpError> {
//!     let user = fluent_request::post("https://api.example.com/users")
//!         .header("Authorization", "Bearer token")
//!         .cookie(Cookie::new("session", "abc"))
//!         .query("notify", "true")
//!         .json(&NewUser { name: "ada" })
//!         .send_json::<User>()
//!         .await?;
//!
//!     Ok(user.data.id)
//! }
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;

pub use client::{delete, get, patch, post, put, HttpClient, HttpClientBuilder};
pub use config::{parse_read_timeout, ClientConfig, ENV_READ_TIMEOUT};
pub use cookie::Cookie;
pub use error::HttpError;
pub use request::RequestBuilder;
pub use reqwest::Method;
pub use response::{Decoded, RawResponse, Response};
