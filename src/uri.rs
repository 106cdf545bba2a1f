//! Request URI assembly against the fixed API base.

use crate::{Error, Parameters, Result};
use std::fmt::Display;
use url::Url;

/// The production API base. Resource paths are resolved relative to it.
pub const DEFAULT_API_BASE: &str = "https://api.twitter.com/1.1/";

/// Builds the path of a resource addressed by id, e.g.
/// `resource_path("statuses/show", 12345)` is `statuses/show/12345.json`.
pub fn resource_path(prefix: &str, id: impl Display) -> String {
    format!("{}/{}.json", prefix.trim_end_matches('/'), id)
}

/// Joins resource paths and parameters onto a base URL.
///
/// # Examples
///
/// ```
/// use twine::{Parameters, UriBuilder};
///
/// let uris = UriBuilder::new("https://api.twitter.com/1.1").unwrap();
/// let mut params = Parameters::new();
/// params.add("count", 20);
/// params.add("include_entities", true);
///
/// let uri = uris.build_uri("statuses/home_timeline.json", &params).unwrap();
/// assert_eq!(
///     uri.as_str(),
///     "https://api.twitter.com/1.1/statuses/home_timeline.json?count=20&include_entities=true"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriBuilder {
    base: Url,
}

impl UriBuilder {
    /// Parses the base URL. A trailing slash is added when missing so the
    /// version segment survives joining.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or cannot carry a path.
    pub fn new(base: impl AsRef<str>) -> Result<Self> {
        let mut base = Url::parse(base.as_ref())?;
        if base.cannot_be_a_base() {
            return Err(Error::ConfigurationError(format!(
                "API base URL cannot carry a path: {}",
                base
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        Ok(Self { base })
    }

    /// The base URL every path is resolved against.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolves `path` with no query string.
    pub fn build(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    /// Resolves `path` and appends `params` as the query string when any are
    /// present.
    pub fn build_uri(&self, path: &str, params: &Parameters) -> Result<Url> {
        let mut url = self.build(path)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }
        Ok(url)
    }
}
