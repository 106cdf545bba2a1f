//! Basic example: reading timelines, searching and posting.
//!
//! This example shows how to:
//! - Create a client with a bearer token
//! - Read a user timeline and page through it
//! - Search without credentials
//! - Post a tweet and access response metadata
//!
//! Run with: `TWITTER_BEARER_TOKEN=... cargo run --example basic_call`

use twine::{Client, Error, PageParams, Parameters, RequestMetadata, SearchParameters, Tweet};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("twine=debug,basic_call=info")
        .init();

    println!("=== Anonymous Search ===");
    let anonymous = Client::builder().build()?;
    let results = anonymous
        .search(&SearchParameters::new("#rustlang").count(5))
        .await?;
    for tweet in &results.statuses {
        println!("{}: {}", tweet.from_user().unwrap_or("?"), tweet.text);
    }
    println!("Last page: {}", results.is_last_page());
    println!();

    let Ok(token) = std::env::var("TWITTER_BEARER_TOKEN") else {
        println!("Set TWITTER_BEARER_TOKEN to run the authorized calls.");
        return Ok(());
    };
    let client = Client::builder().bearer_token(token).build()?;

    println!("=== User Timeline ===");
    let first_page = client
        .user_timeline_for_screen_name("rustlang", PageParams::new().count(10))
        .await?;
    for tweet in &first_page {
        println!("[{}] {}", tweet.id, tweet.text);
    }

    // Older tweets: everything below the oldest id seen so far.
    if let Some(oldest) = first_page.iter().map(|tweet| tweet.id).min() {
        let older = client
            .user_timeline_for_screen_name(
                "rustlang",
                PageParams::new().count(10).max_id(oldest.saturating_sub(1)),
            )
            .await?;
        println!("Fetched {} older tweets", older.len());
    }
    println!();

    println!("=== Post a Tweet ===");
    let tweet = client.update_status("Hello from twine").await?;
    println!("Posted tweet {} at {:?}", tweet.id, tweet.created_at);
    println!();

    println!("=== Accessing Response Metadata ===");
    let request = RequestMetadata::get(
        twine::uri::resource_path("statuses/show", tweet.id),
        Parameters::new(),
    );
    let response = client.call::<Tweet>(request).await?;
    println!("Status code: {}", response.status);
    println!("Request latency: {:?}", response.latency);
    println!("Raw response length: {} bytes", response.raw_body.len());
    println!(
        "Rate limit remaining: {:?}",
        response.header("x-rate-limit-remaining")
    );

    client.delete_status(tweet.id).await?;
    println!("Deleted tweet {}", tweet.id);

    Ok(())
}
