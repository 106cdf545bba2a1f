//! Response payloads.
//!
//! Fields mirror the 1.1 JSON. Anything the API may omit is optional or
//! defaulted; unknown fields are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tweet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: u64,
    #[serde(default)]
    pub id_str: Option<String>,
    pub text: String,
    #[serde(default, with = "timeline_date")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user: Option<TwitterProfile>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub in_reply_to_status_id: Option<u64>,
    #[serde(default)]
    pub in_reply_to_user_id: Option<u64>,
    #[serde(default)]
    pub in_reply_to_screen_name: Option<String>,
    #[serde(default)]
    pub retweet_count: Option<u64>,
    #[serde(default)]
    pub favorite_count: Option<u64>,
    #[serde(default)]
    pub favorited: bool,
    #[serde(default)]
    pub retweeted: bool,
    #[serde(default)]
    pub retweeted_status: Option<Box<Tweet>>,
    #[serde(default)]
    pub entities: Option<Entities>,
}

impl Tweet {
    /// Returns `true` if this tweet is a retweet of another.
    pub fn is_retweet(&self) -> bool {
        self.retweeted_status.is_some()
    }

    /// The author's screen name, when the user object was included.
    pub fn from_user(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.screen_name.as_str())
    }
}

/// A user profile as embedded in tweets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitterProfile {
    pub id: u64,
    pub screen_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub followers_count: Option<u64>,
    #[serde(default)]
    pub friends_count: Option<u64>,
    #[serde(default)]
    pub statuses_count: Option<u64>,
    #[serde(default)]
    pub protected: bool,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, with = "timeline_date")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Entities parsed out of a tweet's text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub hashtags: Vec<HashTagEntity>,
    #[serde(default)]
    pub urls: Vec<UrlEntity>,
    #[serde(default)]
    pub user_mentions: Vec<MentionEntity>,
    /// Cashtags such as `$VMW`.
    #[serde(default)]
    pub symbols: Vec<TickerSymbolEntity>,
    #[serde(default)]
    pub media: Vec<MediaEntity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashTagEntity {
    pub text: String,
    #[serde(default)]
    pub indices: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlEntity {
    pub url: String,
    #[serde(default)]
    pub expanded_url: Option<String>,
    #[serde(default)]
    pub display_url: Option<String>,
    #[serde(default)]
    pub indices: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionEntity {
    pub id: u64,
    pub screen_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub indices: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSymbolEntity {
    /// The symbol without the leading `$`.
    pub text: String,
    /// Search URL for the symbol. Not part of every payload.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub indices: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaEntity {
    pub id: u64,
    pub media_url: String,
    #[serde(default)]
    pub media_url_https: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub display_url: Option<String>,
    #[serde(default)]
    pub expanded_url: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub indices: Vec<u32>,
}

/// One page of `search/tweets` results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub statuses: Vec<Tweet>,
    pub search_metadata: SearchMetadata,
}

impl SearchResults {
    /// Returns `true` if the server offered no further page.
    pub fn is_last_page(&self) -> bool {
        self.search_metadata.next_results.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMetadata {
    #[serde(default)]
    pub max_id: u64,
    #[serde(default)]
    pub since_id: u64,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub query: Option<String>,
    /// Query string for the next page, as returned by the server.
    #[serde(default)]
    pub next_results: Option<String>,
    #[serde(default)]
    pub refresh_url: Option<String>,
}

/// A search saved by the authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSearch {
    pub id: u64,
    pub name: String,
    pub query: String,
    #[serde(default)]
    pub position: Option<i32>,
    #[serde(default, with = "timeline_date")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Trending topics for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trends {
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub trends: Vec<Trend>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub name: String,
    pub query: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Twitter's `created_at` format, e.g. `Thu Apr 04 22:10:41 +0000 2013`.
pub(crate) mod timeline_date {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| {
            DateTime::parse_from_str(&s, FORMAT)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(serde::de::Error::custom)
        })
        .transpose()
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_some(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const STATUS: &str = r#"{
        "created_at": "Thu Apr 04 22:10:41 +0000 2013",
        "id": 12345,
        "id_str": "12345",
        "text": "Tweeting with $VMW $FB $AAPL #spring",
        "source": "web",
        "in_reply_to_status_id": 123456,
        "in_reply_to_screen_name": "someone",
        "retweet_count": 12,
        "favorited": true,
        "user": {"id": 375124755, "screen_name": "habuma", "name": "Craig Walls", "protected": false},
        "entities": {
            "hashtags": [{"text": "spring", "indices": [35, 42]}],
            "symbols": [
                {"text": "VMW", "indices": [17, 21]},
                {"text": "FB", "indices": [23, 26]},
                {"text": "AAPL", "indices": [28, 33]}
            ],
            "urls": [],
            "user_mentions": []
        },
        "place": null,
        "unknown_field": [1, 2, 3]
    }"#;

    #[test]
    fn test_tweet_deserializes() {
        let tweet: Tweet = serde_json::from_str(STATUS).unwrap();
        assert_eq!(tweet.id, 12345);
        assert_eq!(tweet.from_user(), Some("habuma"));
        assert_eq!(tweet.in_reply_to_status_id, Some(123456));
        assert_eq!(tweet.retweet_count, Some(12));
        assert!(tweet.favorited);
        assert!(!tweet.is_retweet());
        assert_eq!(
            tweet.created_at,
            Some(Utc.with_ymd_and_hms(2013, 4, 4, 22, 10, 41).unwrap())
        );

        let entities = tweet.entities.unwrap();
        let symbols: Vec<_> = entities.symbols.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(symbols, vec!["VMW", "FB", "AAPL"]);
        assert_eq!(entities.symbols[2].indices, vec![28, 33]);
        assert_eq!(entities.hashtags[0].text, "spring");
    }

    #[test]
    fn test_created_at_serializes_in_twitter_format() {
        let tweet: Tweet = serde_json::from_str(STATUS).unwrap();
        let value = serde_json::to_value(&tweet).unwrap();
        assert_eq!(value["created_at"], "Thu Apr 04 22:10:41 +0000 2013");

        let again: Tweet = serde_json::from_value(value).unwrap();
        assert_eq!(again, tweet);
    }

    #[test]
    fn test_minimal_tweet() {
        let tweet: Tweet = serde_json::from_str(r#"{"id": 1, "text": "Test Message"}"#).unwrap();
        assert_eq!(tweet.text, "Test Message");
        assert_eq!(tweet.created_at, None);
        assert!(tweet.user.is_none());
    }

    #[test]
    fn test_bad_timestamp_is_an_error() {
        let result = serde_json::from_str::<Tweet>(
            r#"{"id": 1, "text": "x", "created_at": "yesterday"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_trends_deserialize() {
        let json = r##"{
            "as_of": "2012-07-08T15:50:06Z",
            "created_at": "2012-07-08T15:46:29Z",
            "trends": [
                {"name": "#SpringSocial", "query": "%23SpringSocial", "url": "http://twitter.com/search/?q=%23SpringSocial"},
                {"name": "Rust", "query": "Rust"}
            ]
        }"##;
        let trends: Trends = serde_json::from_str(json).unwrap();
        assert_eq!(trends.trends.len(), 2);
        assert_eq!(trends.trends[1].url, None);
        assert_eq!(
            trends.as_of,
            Some(Utc.with_ymd_and_hms(2012, 7, 8, 15, 50, 6).unwrap())
        );
    }

    #[test]
    fn test_search_results_last_page() {
        let json = r#"{"statuses": [], "search_metadata": {"max_id": 10, "since_id": 0, "count": 50}}"#;
        let results: SearchResults = serde_json::from_str(json).unwrap();
        assert!(results.is_last_page());
    }
}
