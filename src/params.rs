//! Ordered, multi-valued request parameters.
//!
//! [`Parameters`] is the single currency between the option types, the URI
//! assembler and the request dispatcher: query strings and URL-encoded form
//! bodies are both rendered from it.
//!
//! Boolean flags do not share one default. Each flag carries its own
//! [`FlagPolicy`] in the [`flags`] table, so the decision of whether a flag
//! reaches the wire lives in one place instead of in every operation.

use std::fmt::Display;
use url::form_urlencoded;

/// An ordered collection of name/value pairs where a name may repeat.
///
/// # Examples
///
/// ```
/// use twine::Parameters;
///
/// let mut params = Parameters::new();
/// params.add("count", 20);
/// params.add_opt("since_id", Some(1234567u64));
/// params.add_opt::<u64>("max_id", None);
///
/// assert_eq!(params.get("count"), Some("20"));
/// assert_eq!(params.to_urlencoded(), "count=20&since_id=1234567");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    pairs: Vec<(String, String)>,
}

impl Parameters {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Appends a value, keeping any values already present under `name`.
    pub fn add(&mut self, name: impl Into<String>, value: impl Display) {
        self.pairs.push((name.into(), value.to_string()));
    }

    /// Appends a value when one is present.
    pub fn add_opt<T: Display>(&mut self, name: impl Into<String>, value: Option<T>) {
        if let Some(value) = value {
            self.add(name, value);
        }
    }

    /// Replaces every value under `name` with a single value.
    ///
    /// The replacement takes the position of the first existing value, or is
    /// appended when `name` was absent.
    pub fn set(&mut self, name: impl Into<String>, value: impl Display) {
        let name = name.into();
        let value = value.to_string();
        match self.pairs.iter().position(|(n, _)| *n == name) {
            Some(index) => {
                self.pairs[index].1 = value;
                let mut seen = 0;
                self.pairs.retain(|(n, _)| {
                    if *n != name {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.pairs.push((name, value)),
        }
    }

    /// Applies a flag according to its policy. See [`FlagPolicy`].
    pub fn flag(&mut self, flag: Flag, value: bool) {
        if let Some(token) = flag.wire_value(value) {
            self.add(flag.name, token);
        }
    }

    /// Returns the first value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value stored under `name`, in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if at least one value is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(n, _)| n == name)
    }

    /// Iterates over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Iterates over parameter names in insertion order, repeats included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(n, _)| n.as_str())
    }

    /// The raw pairs, suitable for `reqwest::RequestBuilder::form`.
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no pairs are stored.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Renders the pairs as `application/x-www-form-urlencoded`.
    pub fn to_urlencoded(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        for (name, value) in iter {
            params.add(name, value);
        }
        params
    }
}

/// When a boolean flag is written to the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagPolicy {
    /// Always sent, as `true` or `false`.
    Always,
    /// Sent as `true` only when set; the API assumes `false` otherwise.
    WhenTrue,
    /// Sent as `false` only when cleared; the API assumes `true` otherwise.
    WhenFalse,
}

/// A named boolean parameter and its wire policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flag {
    /// The parameter name.
    pub name: &'static str,
    /// How the value reaches the wire.
    pub policy: FlagPolicy,
}

impl Flag {
    /// Creates a flag definition.
    pub const fn new(name: &'static str, policy: FlagPolicy) -> Self {
        Self { name, policy }
    }

    /// The token sent for `value`, or `None` when the flag is omitted.
    pub fn wire_value(&self, value: bool) -> Option<&'static str> {
        let token = if value { "true" } else { "false" };
        match self.policy {
            FlagPolicy::Always => Some(token),
            FlagPolicy::WhenTrue if value => Some(token),
            FlagPolicy::WhenFalse if !value => Some(token),
            _ => None,
        }
    }
}

/// Flag policies, one entry per field.
///
/// The same parameter name can carry different policies on different
/// resources: timelines always send `include_entities=true`, while search
/// relies on the server default and only ever sends `include_entities=false`.
pub mod flags {
    use super::{Flag, FlagPolicy};

    /// `include_entities` on timeline, status and favorites resources.
    pub const TIMELINE_INCLUDE_ENTITIES: Flag = Flag::new("include_entities", FlagPolicy::Always);

    /// `include_entities` on `search/tweets`.
    pub const SEARCH_INCLUDE_ENTITIES: Flag = Flag::new("include_entities", FlagPolicy::WhenFalse);

    /// `display_coordinates` on status updates.
    pub const DISPLAY_COORDINATES: Flag = Flag::new("display_coordinates", FlagPolicy::WhenTrue);

    /// `wrap_links` on status updates.
    pub const WRAP_LINKS: Flag = Flag::new("wrap_links", FlagPolicy::WhenTrue);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_repeated_names_in_order() {
        let mut params = Parameters::new();
        params.add("id", 1);
        params.add("count", 5);
        params.add("id", 2);

        assert_eq!(params.get_all("id").collect::<Vec<_>>(), vec!["1", "2"]);
        assert_eq!(params.names().collect::<Vec<_>>(), vec!["id", "count", "id"]);
        assert_eq!(params.get("id"), Some("1"));
    }

    #[test]
    fn test_set_replaces_all_values_at_first_position() {
        let mut params = Parameters::new();
        params.add("q", "a");
        params.add("count", 5);
        params.add("q", "b");
        params.set("q", "c");

        assert_eq!(params.to_urlencoded(), "q=c&count=5");

        params.set("lang", "en");
        assert_eq!(params.to_urlencoded(), "q=c&count=5&lang=en");
    }

    #[test]
    fn test_add_opt_skips_none() {
        let mut params = Parameters::new();
        params.add_opt::<u64>("since_id", None);
        assert!(params.is_empty());

        params.add_opt("since_id", Some(0u64));
        assert_eq!(params.get("since_id"), Some("0"));
    }

    #[test]
    fn test_flag_policies() {
        let always = Flag::new("a", FlagPolicy::Always);
        let when_true = Flag::new("t", FlagPolicy::WhenTrue);
        let when_false = Flag::new("f", FlagPolicy::WhenFalse);

        assert_eq!(always.wire_value(true), Some("true"));
        assert_eq!(always.wire_value(false), Some("false"));
        assert_eq!(when_true.wire_value(true), Some("true"));
        assert_eq!(when_true.wire_value(false), None);
        assert_eq!(when_false.wire_value(true), None);
        assert_eq!(when_false.wire_value(false), Some("false"));
    }

    #[test]
    fn test_include_entities_differs_by_resource() {
        let mut timeline = Parameters::new();
        timeline.flag(flags::TIMELINE_INCLUDE_ENTITIES, true);
        assert_eq!(timeline.get("include_entities"), Some("true"));

        let mut search = Parameters::new();
        search.flag(flags::SEARCH_INCLUDE_ENTITIES, true);
        assert!(!search.contains("include_entities"));
        search.flag(flags::SEARCH_INCLUDE_ENTITIES, false);
        assert_eq!(search.get("include_entities"), Some("false"));
    }

    #[test]
    fn test_urlencoding_uses_form_rules() {
        let params: Parameters = [("status", "Test Message in reply to @someone")]
            .into_iter()
            .collect();
        assert_eq!(
            params.to_urlencoded(),
            "status=Test+Message+in+reply+to+%40someone"
        );
    }
}
