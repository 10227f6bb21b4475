//! NS API client error types.

use super::convert::ConversionError;

/// Errors from the NS API client.
#[derive(Debug, thiserror::Error)]
pub enum NsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credentials rejected by the API
    #[error("unauthorized: check NS_API_USERNAME and NS_API_PASSWORD")]
    Unauthorized,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// API answered with an `<error>` document
    #[error("upstream error: {message}")]
    Upstream { message: String },

    /// Request succeeded but returned no data
    #[error("empty response from {endpoint}")]
    EmptyBody { endpoint: &'static str },

    /// XML could not be decoded
    #[error("XML parse error: {message}")]
    Xml {
        message: String,
        body: Option<String>,
    },

    /// Document root is not the one this endpoint returns
    #[error("unexpected document root <{found}>, expected <{expected}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    /// A record was missing or had a malformed field
    #[error("invalid record: {0}")]
    Conversion(#[from] ConversionError),

    /// Username or password cannot be sent in a header
    #[error("credentials contain characters not allowed in a header")]
    InvalidCredentials,

    /// Base URL could not be combined with the endpoint
    #[error("invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// Required configuration is missing
    #[error("not configured: {0}")]
    NotConfigured(String),
}
