//! Timelines, statuses and favorites.

use crate::{
    options::{
        MediaUpload, PageParams, StatusDetails, DEFAULT_RETWEETS_COUNT,
        DEFAULT_RETWEETS_OF_ME_PAGE, DEFAULT_TIMELINE_COUNT,
    },
    params::flags,
    uri::resource_path,
    Client, Parameters, RequestMetadata, Result, Tweet,
};
use serde::de::IgnoredAny;

impl Client {
    /// Tweets from the authenticated user and the accounts they follow.
    pub async fn home_timeline(&self, page: PageParams) -> Result<Vec<Tweet>> {
        self.require_authorization()?;
        let params = timeline_parameters(page, None);
        self.get("statuses/home_timeline.json", params).await
    }

    /// The authenticated user's own tweets.
    pub async fn user_timeline(&self, page: PageParams) -> Result<Vec<Tweet>> {
        self.require_authorization()?;
        let params = timeline_parameters(page, None);
        self.get("statuses/user_timeline.json", params).await
    }

    /// Tweets posted by the user with the given id.
    pub async fn user_timeline_for_user_id(
        &self,
        user_id: u64,
        page: PageParams,
    ) -> Result<Vec<Tweet>> {
        self.require_authorization()?;
        let params = timeline_parameters(page, Some(("user_id", user_id.to_string())));
        self.get("statuses/user_timeline.json", params).await
    }

    /// Tweets posted by the user with the given screen name.
    pub async fn user_timeline_for_screen_name(
        &self,
        screen_name: &str,
        page: PageParams,
    ) -> Result<Vec<Tweet>> {
        self.require_authorization()?;
        let params = timeline_parameters(page, Some(("screen_name", screen_name.to_string())));
        self.get("statuses/user_timeline.json", params).await
    }

    /// Tweets mentioning the authenticated user.
    pub async fn mentions(&self, page: PageParams) -> Result<Vec<Tweet>> {
        self.require_authorization()?;
        let params = timeline_parameters(page, None);
        self.get("statuses/mentions_timeline.json", params).await
    }

    /// The authenticated user's tweets that others have retweeted.
    ///
    /// This resource pages by number; `page` defaults to 1.
    pub async fn retweets_of_me(&self, page: PageParams) -> Result<Vec<Tweet>> {
        self.require_authorization()?;
        let page = PageParams {
            page: Some(page.page.unwrap_or(DEFAULT_RETWEETS_OF_ME_PAGE)),
            ..page
        };
        let params = timeline_parameters(page, None);
        self.get("statuses/retweets_of_me.json", params).await
    }

    /// A single tweet.
    pub async fn status(&self, tweet_id: u64) -> Result<Tweet> {
        self.require_authorization()?;
        let mut params = Parameters::new();
        params.flag(flags::TIMELINE_INCLUDE_ENTITIES, true);
        self.get(resource_path("statuses/show", tweet_id), params)
            .await
    }

    /// Posts a tweet.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use twine::{Client, Error};
    ///
    /// # async fn example() -> Result<(), Error> {
    /// let client = Client::builder().bearer_token("token").build()?;
    /// let tweet = client.update_status("Test Message").await?;
    /// assert_eq!(tweet.text, "Test Message");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn update_status(&self, message: &str) -> Result<Tweet> {
        self.update_status_with_details(message, &StatusDetails::default())
            .await
    }

    /// Posts a tweet with a location, a reply target or link wrapping.
    pub async fn update_status_with_details(
        &self,
        message: &str,
        details: &StatusDetails,
    ) -> Result<Tweet> {
        self.require_authorization()?;
        let form = status_form(message, details);
        self.post_form("statuses/update.json", form).await
    }

    /// Posts a tweet with an attached image, sent as multipart form data.
    pub async fn update_status_with_media(
        &self,
        message: &str,
        media: MediaUpload,
        details: &StatusDetails,
    ) -> Result<Tweet> {
        self.require_authorization()?;
        let fields = status_form(message, details);
        let request =
            RequestMetadata::post_multipart("statuses/update_with_media.json", fields, media);
        Ok(self.call::<Tweet>(request).await?.into_data())
    }

    /// Deletes one of the authenticated user's tweets.
    pub async fn delete_status(&self, tweet_id: u64) -> Result<()> {
        self.require_authorization()?;
        self.post_form::<IgnoredAny>(resource_path("statuses/destroy", tweet_id), Parameters::new())
            .await?;
        Ok(())
    }

    /// Retweets a tweet.
    pub async fn retweet(&self, tweet_id: u64) -> Result<()> {
        self.require_authorization()?;
        self.post_form::<IgnoredAny>(resource_path("statuses/retweet", tweet_id), Parameters::new())
            .await?;
        Ok(())
    }

    /// Up to `count` retweets of a tweet (100 when `None`).
    pub async fn retweets(&self, tweet_id: u64, count: Option<u32>) -> Result<Vec<Tweet>> {
        self.require_authorization()?;
        let mut params = Parameters::new();
        params.add("count", count.unwrap_or(DEFAULT_RETWEETS_COUNT));
        params.flag(flags::TIMELINE_INCLUDE_ENTITIES, true);
        self.get(resource_path("statuses/retweets", tweet_id), params)
            .await
    }

    /// Tweets the authenticated user has favorited.
    pub async fn favorites(&self, page: PageParams) -> Result<Vec<Tweet>> {
        self.require_authorization()?;
        let params = timeline_parameters(page, None);
        self.get("favorites/list.json", params).await
    }

    /// Favorites a tweet.
    pub async fn add_to_favorites(&self, tweet_id: u64) -> Result<()> {
        self.require_authorization()?;
        self.post_form::<IgnoredAny>("favorites/create.json", id_form(tweet_id))
            .await?;
        Ok(())
    }

    /// Removes a tweet from the authenticated user's favorites.
    pub async fn remove_from_favorites(&self, tweet_id: u64) -> Result<()> {
        self.require_authorization()?;
        self.post_form::<IgnoredAny>("favorites/destroy.json", id_form(tweet_id))
            .await?;
        Ok(())
    }
}

/// Paging, then the optional user selector, then `include_entities`.
fn timeline_parameters(page: PageParams, user: Option<(&str, String)>) -> Parameters {
    let mut params = page.to_parameters(DEFAULT_TIMELINE_COUNT);
    if let Some((name, value)) = user {
        params.add(name, value);
    }
    params.flag(flags::TIMELINE_INCLUDE_ENTITIES, true);
    params
}

fn status_form(message: &str, details: &StatusDetails) -> Parameters {
    let mut form = Parameters::new();
    form.add("status", message);
    for (name, value) in details.to_parameters().iter() {
        form.add(name, value);
    }
    form
}

fn id_form(tweet_id: u64) -> Parameters {
    let mut form = Parameters::new();
    form.add("id", tweet_id);
    form
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_parameters_defaults() {
        let params = timeline_parameters(PageParams::new(), None);
        assert_eq!(params.to_urlencoded(), "count=20&include_entities=true");
    }

    #[test]
    fn test_timeline_parameters_with_user() {
        let page = PageParams::new().count(24).since_id(112233).max_id(332211);
        let params = timeline_parameters(page, Some(("screen_name", "habuma".to_string())));
        assert_eq!(
            params.to_urlencoded(),
            "count=24&since_id=112233&max_id=332211&screen_name=habuma&include_entities=true"
        );
    }

    #[test]
    fn test_status_form_order() {
        let details = StatusDetails::new()
            .location(123.1, -111.2)
            .display_coordinates(true);
        assert_eq!(
            status_form("Test Message", &details).to_urlencoded(),
            "status=Test+Message&lat=123.1&long=-111.2&display_coordinates=true"
        );
        assert_eq!(
            status_form("Test Message", &StatusDetails::default()).to_urlencoded(),
            "status=Test+Message"
        );
    }
}
