//! Classification of non-2xx responses into [`Error`] variants.
//!
//! The classification is an ordered list of [`ErrorSignature`]s. Each one
//! pairs a predicate over the failed response with a constructor for the
//! error it stands for. The first matching signature wins; a response that
//! matches none becomes [`Error::ApiFailure`].
//!
//! Two body shapes are understood: the legacy `{"error": "..."}` and the
//! current `{"errors": [{"code": 187, "message": "..."}]}`. Bodies that are
//! not JSON, or JSON of another shape, are treated as carrying no message.

use crate::error::{Error, PermissionDenial};
use http::{HeaderMap, StatusCode};
use serde_json::Value;

/// Error code for "Status is a duplicate."
const CODE_DUPLICATE_STATUS: u64 = 187;
/// Error code for "Status is over 140 characters."
const CODE_STATUS_TOO_LONG: u64 = 186;
/// Error code for "Sharing is not permissible for this status."
const CODE_SHARING_NOT_PERMITTED: u64 = 37;

/// A non-2xx response, with whatever could be recovered from its body.
#[derive(Debug, Clone)]
pub struct FailedResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The raw response body.
    pub body: String,
    /// The response headers.
    pub headers: HeaderMap,
    /// The first error message found in the body.
    pub message: Option<String>,
    /// The first numeric error code found in the body.
    pub code: Option<u64>,
    /// The status text the request submitted, if any.
    pub submitted_content: Option<String>,
}

impl FailedResponse {
    /// Parses `body` for an error message and code. Never fails.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<String>) -> Self {
        let body = body.into();
        let (message, code) = parse_error_body(&body);
        Self {
            status,
            body,
            headers,
            message,
            code,
            submitted_content: None,
        }
    }

    /// Records the status text the failed request carried.
    pub fn with_submitted_content(mut self, content: Option<String>) -> Self {
        self.submitted_content = content;
        self
    }

    fn is_forbidden(&self) -> bool {
        self.status == StatusCode::FORBIDDEN
    }

    fn message_contains(&self, needle: &str) -> bool {
        self.message
            .as_deref()
            .is_some_and(|m| m.to_lowercase().contains(needle))
    }

    fn message_or_status(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| self.status.to_string())
    }
}

fn parse_error_body(body: &str) -> (Option<String>, Option<u64>) {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return (None, None);
    };

    if let Some(message) = value.get("error").and_then(Value::as_str) {
        return (non_empty(message), None);
    }

    match value.get("errors") {
        Some(Value::Array(items)) => items
            .first()
            .map(|item| {
                let message = item.get("message").and_then(Value::as_str).and_then(non_empty);
                let code = item.get("code").and_then(Value::as_u64);
                (message, code)
            })
            .unwrap_or((None, None)),
        Some(Value::String(message)) => (non_empty(message), None),
        _ => (None, None),
    }
}

fn non_empty(message: &str) -> Option<String> {
    let trimmed = message.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Matches "over N characters" anywhere in `message`.
fn mentions_length_limit(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.match_indices("over ").any(|(index, needle)| {
        let rest = &lower[index + needle.len()..];
        let digits = rest.chars().take_while(char::is_ascii_digit).count();
        digits > 0 && rest[digits..].starts_with(" characters")
    })
}

/// One rule of the classification table.
pub struct ErrorSignature {
    name: &'static str,
    predicate: fn(&FailedResponse) -> bool,
    constructor: fn(FailedResponse) -> Error,
}

impl ErrorSignature {
    /// A short identifier, used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if this signature applies to `response`.
    pub fn matches(&self, response: &FailedResponse) -> bool {
        (self.predicate)(response)
    }
}

impl std::fmt::Debug for ErrorSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorSignature")
            .field("name", &self.name)
            .finish()
    }
}

static SIGNATURES: &[ErrorSignature] = &[
    ErrorSignature {
        name: "not_authorized",
        predicate: |r| {
            r.status == StatusCode::UNAUTHORIZED
                || (r.is_forbidden() && r.message.is_none() && r.code.is_none())
        },
        constructor: |r| Error::NotAuthorized { message: r.message },
    },
    ErrorSignature {
        name: "duplicate_content",
        predicate: |r| {
            r.is_forbidden()
                && (r.code == Some(CODE_DUPLICATE_STATUS)
                    || r.message_contains("already said that")
                    || r.message_contains("duplicate"))
        },
        constructor: |r| Error::DuplicateContent {
            content: r.submitted_content,
        },
    },
    ErrorSignature {
        name: "content_too_long",
        predicate: |r| {
            r.is_forbidden()
                && (r.code == Some(CODE_STATUS_TOO_LONG)
                    || r.message.as_deref().is_some_and(mentions_length_limit))
        },
        constructor: |r| Error::ContentTooLong {
            message: r.message_or_status(),
        },
    },
    ErrorSignature {
        name: "sharing_not_allowed",
        predicate: |r| {
            r.is_forbidden()
                && (r.code == Some(CODE_SHARING_NOT_PERMITTED)
                    || r.message_contains("sharing is not permissible")
                    || r.message_contains("sharing not allowed"))
        },
        constructor: |r| Error::OperationNotPermitted {
            denial: PermissionDenial::SharingNotAllowed,
            message: r.message_or_status(),
        },
    },
    ErrorSignature {
        name: "forbidden",
        predicate: FailedResponse::is_forbidden,
        constructor: |r| Error::OperationNotPermitted {
            denial: PermissionDenial::Forbidden,
            message: r.message_or_status(),
        },
    },
];

/// The classification table, in evaluation order.
pub fn signatures() -> &'static [ErrorSignature] {
    SIGNATURES
}

/// Classifies a failed response. See the [module docs](self).
pub fn translate_response(response: FailedResponse) -> Error {
    match SIGNATURES.iter().find(|s| s.matches(&response)) {
        Some(signature) => {
            tracing::debug!(
                signature = signature.name,
                status = response.status.as_u16(),
                "Matched API error signature"
            );
            (signature.constructor)(response)
        }
        None => Error::ApiFailure {
            status: response.status,
            raw_response: response.body,
            headers: response.headers,
        },
    }
}

/// Classifies a status code and body with no further request context.
///
/// # Examples
///
/// ```
/// use twine::{translate, Error};
/// use http::StatusCode;
///
/// let err = translate(StatusCode::FORBIDDEN, r#"{"error":"You already said that"}"#);
/// assert!(matches!(err, Error::DuplicateContent { .. }));
/// ```
pub fn translate(status: StatusCode, body: &str) -> Error {
    translate_response(FailedResponse::new(status, HeaderMap::new(), body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_legacy_body() {
        let err = translate(StatusCode::FORBIDDEN, r#"{"error":"You already said that"}"#);
        assert!(matches!(err, Error::DuplicateContent { content: None }));
    }

    #[test]
    fn test_duplicate_carries_submitted_content() {
        let response = FailedResponse::new(
            StatusCode::FORBIDDEN,
            HeaderMap::new(),
            r#"{"errors":[{"code":187,"message":"Status is a duplicate."}]}"#,
        )
        .with_submitted_content(Some("Test Message".to_string()));

        match translate_response(response) {
            Error::DuplicateContent { content } => {
                assert_eq!(content.as_deref(), Some("Test Message"))
            }
            other => panic!("Expected DuplicateContent, got {:?}", other),
        }
    }

    #[test]
    fn test_content_too_long() {
        let err = translate(
            StatusCode::FORBIDDEN,
            r#"{"error":"Status is over 140 characters."}"#,
        );
        match err {
            Error::ContentTooLong { message } => {
                assert_eq!(message, "Status is over 140 characters.")
            }
            other => panic!("Expected ContentTooLong, got {:?}", other),
        }

        let err = translate(
            StatusCode::FORBIDDEN,
            r#"{"errors":[{"code":186,"message":"Tweet needs to be a bit shorter."}]}"#,
        );
        assert!(matches!(err, Error::ContentTooLong { .. }));
    }

    #[test]
    fn test_generic_forbidden() {
        let err = translate(StatusCode::FORBIDDEN, r#"{"error":"Forbidden"}"#);
        match err {
            Error::OperationNotPermitted { denial, message } => {
                assert_eq!(denial, PermissionDenial::Forbidden);
                assert_eq!(message, "Forbidden");
            }
            other => panic!("Expected OperationNotPermitted, got {:?}", other),
        }
    }

    #[test]
    fn test_sharing_not_allowed() {
        let body = r#"{"errors":[{"message":"sharing is not permissible for this status (Share validations failed)","code":37}]}"#;
        let err = translate(StatusCode::FORBIDDEN, body);
        assert!(matches!(
            err,
            Error::OperationNotPermitted {
                denial: PermissionDenial::SharingNotAllowed,
                ..
            }
        ));
    }

    #[test]
    fn test_unauthorized_statuses() {
        assert!(matches!(
            translate(StatusCode::UNAUTHORIZED, r#"{"errors":[{"code":89,"message":"Invalid or expired token."}]}"#),
            Error::NotAuthorized { message: Some(_) }
        ));
        assert!(matches!(
            translate(StatusCode::FORBIDDEN, ""),
            Error::NotAuthorized { message: None }
        ));
        assert!(matches!(
            translate(StatusCode::FORBIDDEN, "<html>nope</html>"),
            Error::NotAuthorized { message: None }
        ));
    }

    #[test]
    fn test_code_only_bodies() {
        let err = translate(StatusCode::FORBIDDEN, r#"{"errors":[{"code":187}]}"#);
        assert!(
            matches!(err, Error::DuplicateContent { content: None }),
            "Expected DuplicateContent, got {:?}",
            err
        );

        let err = translate(StatusCode::FORBIDDEN, r#"{"errors":[{"code":186}]}"#);
        assert!(
            matches!(err, Error::ContentTooLong { .. }),
            "Expected ContentTooLong, got {:?}",
            err
        );

        let err = translate(StatusCode::FORBIDDEN, r#"{"errors":[{"code":37}]}"#);
        assert!(
            matches!(
                err,
                Error::OperationNotPermitted {
                    denial: PermissionDenial::SharingNotAllowed,
                    ..
                }
            ),
            "Expected SharingNotAllowed, got {:?}",
            err
        );

        let err = translate(StatusCode::FORBIDDEN, r#"{"errors":[{"code":999}]}"#);
        assert!(
            matches!(
                err,
                Error::OperationNotPermitted {
                    denial: PermissionDenial::Forbidden,
                    ..
                }
            ),
            "Expected OperationNotPermitted, got {:?}",
            err
        );
    }

    #[test]
    fn test_other_statuses_fall_through() {
        let err = translate(StatusCode::INTERNAL_SERVER_ERROR, "Something broke");
        match err {
            Error::ApiFailure {
                status,
                raw_response,
                ..
            } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(raw_response, "Something broke");
            }
            other => panic!("Expected ApiFailure, got {:?}", other),
        }

        // Duplicate wording on a non-403 is not a duplicate.
        let err = translate(StatusCode::BAD_REQUEST, r#"{"error":"You already said that"}"#);
        assert!(matches!(err, Error::ApiFailure { .. }));
    }

    #[test]
    fn test_malformed_bodies_never_panic() {
        for body in ["{", "[]", "null", r#"{"errors":[]}"#, r#"{"errors":[42]}"#, r#"{"error":17}"#] {
            let _ = translate(StatusCode::FORBIDDEN, body);
            let _ = translate(StatusCode::BAD_GATEWAY, body);
        }
    }

    #[test]
    fn test_length_limit_matcher() {
        assert!(mentions_length_limit("Status is over 140 characters."));
        assert!(mentions_length_limit("Text is OVER 280 CHARACTERS"));
        assert!(!mentions_length_limit("over characters"));
        assert!(!mentions_length_limit("game over"));
    }

    #[test]
    fn test_signature_order() {
        let names: Vec<_> = signatures().iter().map(ErrorSignature::name).collect();
        assert_eq!(
            names,
            vec![
                "not_authorized",
                "duplicate_content",
                "content_too_long",
                "sharing_not_allowed",
                "forbidden"
            ]
        );
    }
}
