//! Request descriptions consumed by the dispatcher.

use crate::{options::MediaUpload, Parameters};
use http::{HeaderMap, HeaderName, HeaderValue, Method};

/// Name of the multipart part carrying an uploaded file.
pub const MEDIA_PART_NAME: &str = "media[]";

/// The body of a request.
///
/// The dispatcher consumes every variant the same way; operations only pick
/// which one to build.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body. Used by every GET.
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded` fields.
    Form(Parameters),
    /// `multipart/form-data` with one binary part plus text fields.
    Multipart {
        /// Text parts, in order.
        fields: Parameters,
        /// The binary part.
        media: MediaUpload,
    },
}

impl RequestBody {
    /// The text fields of a form or multipart body.
    pub fn fields(&self) -> Option<&Parameters> {
        match self {
            RequestBody::Empty => None,
            RequestBody::Form(fields) => Some(fields),
            RequestBody::Multipart { fields, .. } => Some(fields),
        }
    }

    /// The `status` field, if the body carries one.
    pub fn submitted_status(&self) -> Option<&str> {
        self.fields()?.get("status")
    }
}

/// Everything needed to issue one request.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// The HTTP method (GET or POST).
    pub method: Method,

    /// The resource path, relative to the API base.
    pub path: String,

    /// Query string parameters.
    pub query: Parameters,

    /// Additional headers for this request.
    pub headers: HeaderMap,

    /// The request body.
    pub body: RequestBody,
}

impl RequestMetadata {
    /// Creates a request with no parameters, headers or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Parameters::new(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    /// A GET with the given query parameters.
    pub fn get(path: impl Into<String>, query: Parameters) -> Self {
        Self::new(Method::GET, path).with_query(query)
    }

    /// A POST with a URL-encoded form body.
    pub fn post_form(path: impl Into<String>, form: Parameters) -> Self {
        Self::new(Method::POST, path).with_body(RequestBody::Form(form))
    }

    /// A POST with a multipart body.
    pub fn post_multipart(path: impl Into<String>, fields: Parameters, media: MediaUpload) -> Self {
        Self::new(Method::POST, path).with_body(RequestBody::Multipart { fields, media })
    }

    /// Replaces the query parameters.
    pub fn with_query(mut self, query: Parameters) -> Self {
        self.query = query;
        self
    }

    /// Replaces the body.
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Adds a header to the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, crate::Error> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| crate::Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| crate::Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submitted_status_from_form_and_multipart() {
        let form: Parameters = [("status", "Hello")].into_iter().collect();
        let request = RequestMetadata::post_form("statuses/update.json", form.clone());
        assert_eq!(request.body.submitted_status(), Some("Hello"));

        let request = RequestMetadata::post_multipart(
            "statuses/update_with_media.json",
            form,
            MediaUpload::new("photo.jpg", vec![1, 2, 3]),
        );
        assert_eq!(request.body.submitted_status(), Some("Hello"));

        let request = RequestMetadata::get("statuses/home_timeline.json", Parameters::new());
        assert_eq!(request.body.submitted_status(), None);
    }

    #[test]
    fn test_invalid_header_is_configuration_error() {
        let result = RequestMetadata::new(Method::GET, "x.json").with_header("bad header", "v");
        assert!(matches!(result, Err(crate::Error::ConfigurationError(_))));
    }
}
