use thiserror::Error;

/// Errors raised while configuring a [`Client`](crate::Client).
///
/// Once a client exists, request outcomes are reported as
/// [`ApiResponse`](crate::ApiResponse) values rather than errors.
#[derive(Error, Debug)]
pub enum BoostaError {
    /// No API key was given and `BOOSTA_API_KEY` is unset or empty.
    #[error("Missing BOOSTA_API_KEY environment variable.")]
    MissingApiKey,

    /// The API key cannot be sent as an HTTP header value.
    #[error("invalid API key: {message}")]
    InvalidApiKey { message: String },

    /// The configured base URL does not parse.
    #[error("invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    /// The underlying reqwest client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// A convenience alias for `Result<T, BoostaError>`.
pub type Result<T> = std::result::Result<T, BoostaError>;
