//! Option values accepted by the facade operations.
//!
//! Each type turns itself into a fresh [`Parameters`] through
//! `to_parameters`. Unset fields are omitted; `count` falls back to the
//! resource default passed in by the caller.

use crate::params::{flags, Parameters};
use chrono::NaiveDate;
use std::fmt;

/// Default `count` for timelines and favorites.
pub const DEFAULT_TIMELINE_COUNT: u32 = 20;

/// Default `count` for `search/tweets`.
pub const DEFAULT_SEARCH_COUNT: u32 = 50;

/// Default `count` for `statuses/retweets/{id}`.
pub const DEFAULT_RETWEETS_COUNT: u32 = 100;

/// Default `page` for `statuses/retweets_of_me`.
pub const DEFAULT_RETWEETS_OF_ME_PAGE: u32 = 1;

/// Paging cursors for timeline-style resources.
///
/// `page` and the `since_id`/`max_id` pair are independent and may be
/// combined.
///
/// # Examples
///
/// ```
/// use twine::PageParams;
///
/// let params = PageParams::new().count(100).since_id(1234567).max_id(7654321);
/// assert_eq!(
///     params.to_parameters(20).to_urlencoded(),
///     "count=100&since_id=1234567&max_id=7654321"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    /// 1-based page number, for resources that page by number.
    pub page: Option<u32>,
    /// Number of results per page.
    pub count: Option<u32>,
    /// Only return results with an id greater than this.
    pub since_id: Option<u64>,
    /// Only return results with an id less than or equal to this.
    pub max_id: Option<u64>,
}

impl PageParams {
    /// No cursors; every resource default applies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page number.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size.
    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets the lower id bound.
    pub fn since_id(mut self, since_id: u64) -> Self {
        self.since_id = Some(since_id);
        self
    }

    /// Sets the upper id bound.
    pub fn max_id(mut self, max_id: u64) -> Self {
        self.max_id = Some(max_id);
        self
    }

    /// Renders `page, count, since_id, max_id`, with `count` defaulted.
    pub fn to_parameters(&self, default_count: u32) -> Parameters {
        let mut params = Parameters::new();
        params.add_opt("page", self.page);
        params.add("count", self.count.unwrap_or(default_count));
        params.add_opt("since_id", self.since_id);
        params.add_opt("max_id", self.max_id);
        params
    }
}

/// Unit for a [`GeoCode`] radius.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DistanceUnit {
    /// Miles (`mi`).
    #[default]
    Miles,
    /// Kilometers (`km`).
    Kilometers,
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DistanceUnit::Miles => "mi",
            DistanceUnit::Kilometers => "km",
        })
    }
}

/// Restricts search results to a circle around a point.
///
/// Renders as `latitude,longitude,radius{unit}`, e.g. `33.75,-84.39,5mi`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCode {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: u32,
    pub unit: DistanceUnit,
}

impl GeoCode {
    pub fn new(latitude: f64, longitude: f64, radius: u32, unit: DistanceUnit) -> Self {
        Self {
            latitude,
            longitude,
            radius,
            unit,
        }
    }
}

impl fmt::Display for GeoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}{}",
            self.latitude, self.longitude, self.radius, self.unit
        )
    }
}

/// Which tweets a search favors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultType {
    Mixed,
    Recent,
    Popular,
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResultType::Mixed => "mixed",
            ResultType::Recent => "recent",
            ResultType::Popular => "popular",
        })
    }
}

/// Criteria for `search/tweets`.
///
/// Only the query is required. `include_entities` defaults to `true` and is
/// only written to the request when turned off.
///
/// # Examples
///
/// ```
/// use twine::{ResultType, SearchParameters};
/// use chrono::NaiveDate;
///
/// let params = SearchParameters::new("#spring")
///     .lang("en")
///     .result_type(ResultType::Popular)
///     .until(NaiveDate::from_ymd_opt(2010, 1, 15).unwrap());
///
/// let wire = params.to_parameters();
/// assert_eq!(wire.get("q"), Some("#spring"));
/// assert_eq!(wire.get("result_type"), Some("popular"));
/// assert_eq!(wire.get("until"), Some("2010-01-15"));
/// assert_eq!(wire.get("count"), Some("50"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParameters {
    pub query: String,
    pub geo_code: Option<GeoCode>,
    pub lang: Option<String>,
    pub locale: Option<String>,
    pub result_type: Option<ResultType>,
    pub count: Option<u32>,
    pub until: Option<NaiveDate>,
    pub since_id: Option<u64>,
    pub max_id: Option<u64>,
    pub include_entities: bool,
}

impl SearchParameters {
    /// Creates search criteria for `query` with every option unset.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            geo_code: None,
            lang: None,
            locale: None,
            result_type: None,
            count: None,
            until: None,
            since_id: None,
            max_id: None,
            include_entities: true,
        }
    }

    pub fn geo_code(mut self, geo_code: GeoCode) -> Self {
        self.geo_code = Some(geo_code);
        self
    }

    /// ISO 639-1 language of the returned tweets.
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Language of the query itself.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn result_type(mut self, result_type: ResultType) -> Self {
        self.result_type = Some(result_type);
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Only tweets created before this day.
    pub fn until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
        self
    }

    pub fn since_id(mut self, since_id: u64) -> Self {
        self.since_id = Some(since_id);
        self
    }

    pub fn max_id(mut self, max_id: u64) -> Self {
        self.max_id = Some(max_id);
        self
    }

    pub fn include_entities(mut self, include_entities: bool) -> Self {
        self.include_entities = include_entities;
        self
    }

    /// Renders the criteria for the query string.
    pub fn to_parameters(&self) -> Parameters {
        let mut params = Parameters::new();
        params.add("q", &self.query);
        params.add_opt("geocode", self.geo_code);
        params.add_opt("lang", self.lang.as_deref());
        params.add_opt("locale", self.locale.as_deref());
        params.add_opt("result_type", self.result_type);
        params.add("count", self.count.unwrap_or(DEFAULT_SEARCH_COUNT));
        params.add_opt("until", self.until.map(|d| d.format("%Y-%m-%d")));
        params.add_opt("since_id", self.since_id);
        params.add_opt("max_id", self.max_id);
        params.flag(flags::SEARCH_INCLUDE_ENTITIES, self.include_entities);
        params
    }
}

/// Optional details attached to a status update.
///
/// # Examples
///
/// ```
/// use twine::StatusDetails;
///
/// let details = StatusDetails::new()
///     .location(123.1, -111.2)
///     .display_coordinates(true);
/// assert_eq!(
///     details.to_parameters().to_urlencoded(),
///     "lat=123.1&long=-111.2&display_coordinates=true"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatusDetails {
    pub in_reply_to_status_id: Option<u64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub display_coordinates: bool,
    pub wrap_links: bool,
}

impl StatusDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_reply_to_status_id(mut self, id: u64) -> Self {
        self.in_reply_to_status_id = Some(id);
        self
    }

    /// Attaches a location to the tweet.
    pub fn location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn display_coordinates(mut self, display_coordinates: bool) -> Self {
        self.display_coordinates = display_coordinates;
        self
    }

    pub fn wrap_links(mut self, wrap_links: bool) -> Self {
        self.wrap_links = wrap_links;
        self
    }

    /// Renders the details as form fields, without the status text.
    pub fn to_parameters(&self) -> Parameters {
        let mut params = Parameters::new();
        params.add_opt("in_reply_to_status_id", self.in_reply_to_status_id);
        params.add_opt("lat", self.latitude);
        params.add_opt("long", self.longitude);
        params.flag(flags::DISPLAY_COORDINATES, self.display_coordinates);
        params.flag(flags::WRAP_LINKS, self.wrap_links);
        params
    }
}

/// A binary attachment sent as the multipart `media[]` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl MediaUpload {
    /// Wraps raw bytes with the file name reported to the server.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    /// Sets the part's MIME type, e.g. `image/png`.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}
