//! Search, saved searches and trends.

use crate::{
    options::SearchParameters, uri::resource_path, Client, Error, Parameters, RequestMetadata,
    Response, Result, SavedSearch, SearchResults, Trends,
};
use serde::de::IgnoredAny;

impl Client {
    /// Searches recent tweets.
    ///
    /// Public data; works on clients built without credentials.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use twine::{Client, ResultType, SearchParameters};
    ///
    /// # async fn example() -> Result<(), twine::Error> {
    /// let client = Client::builder().build()?;
    /// let results = client
    ///     .search(&SearchParameters::new("#rustlang").result_type(ResultType::Recent))
    ///     .await?;
    /// for tweet in &results.statuses {
    ///     println!("{}", tweet.text);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(&self, criteria: &SearchParameters) -> Result<SearchResults> {
        self.get("search/tweets.json", criteria.to_parameters())
            .await
    }

    /// The authenticated user's saved searches.
    pub async fn saved_searches(&self) -> Result<Vec<SavedSearch>> {
        self.require_authorization()?;
        self.get("saved_searches/list.json", Parameters::new())
            .await
    }

    /// One saved search by id.
    pub async fn saved_search(&self, search_id: u64) -> Result<SavedSearch> {
        self.require_authorization()?;
        self.get(resource_path("saved_searches/show", search_id), Parameters::new())
            .await
    }

    /// Saves a search query for the authenticated user.
    pub async fn create_saved_search(&self, query: &str) -> Result<SavedSearch> {
        self.require_authorization()?;
        let mut form = Parameters::new();
        form.add("query", query);
        self.post_form("saved_searches/create.json", form).await
    }

    /// Deletes a saved search.
    pub async fn delete_saved_search(&self, search_id: u64) -> Result<()> {
        self.require_authorization()?;
        self.post_form::<IgnoredAny>(
            resource_path("saved_searches/destroy", search_id),
            Parameters::new(),
        )
        .await?;
        Ok(())
    }

    /// Trending topics for a location, by Yahoo! Where On Earth id
    /// (1 is worldwide).
    ///
    /// Public data; works on clients built without credentials.
    pub async fn local_trends(&self, where_on_earth_id: u64, exclude_hashtags: bool) -> Result<Trends> {
        let mut params = Parameters::new();
        params.add("id", where_on_earth_id);
        if exclude_hashtags {
            params.add("exclude", "hashtags");
        }
        let response = self
            .call::<Vec<Trends>>(RequestMetadata::get("trends/place.json", params))
            .await?;
        let Response {
            data,
            raw_body,
            status,
            ..
        } = response;
        data.into_iter()
            .next()
            .ok_or_else(|| Error::MalformedResponse {
                raw_response: raw_body,
                serde_error: "expected one trends object, got an empty array".to_string(),
                status,
            })
    }
}
