//! Error types for API calls.
//!
//! Every failed call surfaces exactly one [`Error`]. API-level failures are
//! classified once by [`crate::translate()`]; transport and configuration
//! problems keep their own variants. Where a response body exists it is kept
//! on the error for debugging.

use http::{HeaderMap, StatusCode};
use std::fmt;

/// The message returned by the authorization gate.
pub(crate) const AUTHORIZATION_REQUIRED: &str = "Authorization is required for the operation, but the API binding was created without authorization.";

/// The main error type for API calls.
///
/// # Examples
///
/// ```no_run
/// use twine::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder().bearer_token("token").build()?;
///
/// match client.update_status("Hello again").await {
///     Ok(tweet) => println!("Posted {}", tweet.id),
///     Err(Error::DuplicateContent { content }) => {
///         eprintln!("Already posted: {:?}", content);
///     }
///     Err(Error::ContentTooLong { message }) => eprintln!("Too long: {}", message),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The client has no credentials for the operation, or the API rejected
    /// the credentials it sent.
    ///
    /// Raised by the authorization gate before any request is made, and by
    /// the translator for 401 responses and 403 responses without a message.
    #[error("Not authorized: {}", .message.as_deref().unwrap_or("no message"))]
    NotAuthorized {
        /// The message from the gate or the response body, if any.
        message: Option<String>,
    },

    /// The API refused content that was already posted.
    #[error("Duplicate content{}", .content.as_deref().map(|c| format!(": {}", c)).unwrap_or_default())]
    DuplicateContent {
        /// The submitted status text, when the request carried one.
        content: Option<String>,
    },

    /// The API refused content over the length limit.
    #[error("Content too long: {message}")]
    ContentTooLong {
        /// The message from the response body.
        message: String,
    },

    /// The API refused the operation (HTTP 403).
    #[error("Operation not permitted ({denial}): {message}")]
    OperationNotPermitted {
        /// Which refusal was recognized.
        denial: PermissionDenial,
        /// The message from the response body.
        message: String,
    },

    /// A 2xx response body did not deserialize into the declared type.
    ///
    /// This signals a contract mismatch between client and server rather than
    /// a domain error.
    ///
    /// # Fields
    ///
    /// * `raw_response` - The raw response body as a string
    /// * `serde_error` - The error message from serde
    /// * `status` - The HTTP status code of the response
    #[error("Malformed response (status {status}): {serde_error}")]
    MalformedResponse {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// A non-2xx response that matched no known error signature.
    #[error("API request failed with HTTP {status}: {raw_response}")]
    ApiFailure {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body
        raw_response: String,
        /// The response headers
        headers: HeaderMap,
    },

    /// A network-level error occurred (connection failed, DNS lookup failed, etc.).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request exceeded the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// Invalid configuration was provided.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An invalid URL was provided or assembled.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// The kind of refusal behind [`Error::OperationNotPermitted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDenial {
    /// A plain 403 with no more specific signature.
    Forbidden,
    /// The status may not be shared (retweeting a protected tweet, for example).
    SharingNotAllowed,
}

impl fmt::Display for PermissionDenial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PermissionDenial::Forbidden => "forbidden",
            PermissionDenial::SharingNotAllowed => "sharing not allowed",
        })
    }
}

impl Error {
    pub(crate) fn authorization_required() -> Self {
        Error::NotAuthorized {
            message: Some(AUTHORIZATION_REQUIRED.to_string()),
        }
    }

    /// Returns `true` for [`Error::NotAuthorized`].
    pub fn is_authorization_error(&self) -> bool {
        matches!(self, Error::NotAuthorized { .. })
    }

    /// Returns the HTTP status code if this error came from a response.
    ///
    /// Translated domain errors do not keep the status; it is implied by the
    /// variant.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::ApiFailure { status, .. } => Some(*status),
            Error::MalformedResponse { status, .. } => Some(*status),
            Error::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::ApiFailure { raw_response, .. } => Some(raw_response),
            Error::MalformedResponse { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }
}

/// A specialized `Result` type for API calls.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_error_message() {
        let err = Error::authorization_required();
        assert!(err.is_authorization_error());
        assert_eq!(err.to_string(), format!("Not authorized: {}", AUTHORIZATION_REQUIRED));
    }

    #[test]
    fn test_duplicate_content_display() {
        let err = Error::DuplicateContent {
            content: Some("Test Message".to_string()),
        };
        assert_eq!(err.to_string(), "Duplicate content: Test Message");

        let err = Error::DuplicateContent { content: None };
        assert_eq!(err.to_string(), "Duplicate content");
    }

    #[test]
    fn test_accessors() {
        let err = Error::ApiFailure {
            status: StatusCode::BAD_GATEWAY,
            raw_response: "upstream".to_string(),
            headers: HeaderMap::new(),
        };
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
        assert_eq!(err.raw_response(), Some("upstream"));

        let err = Error::ContentTooLong {
            message: "Status is over 140 characters.".to_string(),
        };
        assert_eq!(err.status(), None);
        assert_eq!(err.raw_response(), None);
    }
}
