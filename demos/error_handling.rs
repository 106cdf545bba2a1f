//! Example demonstrating error handling.
//!
//! This example shows how to:
//! - Recognize calls rejected before any request is sent
//! - Match the API's classified errors
//! - Access raw response data on errors
//! - Inspect errors through their helper methods
//!
//! Run with: `TWITTER_BEARER_TOKEN=... cargo run --example error_handling`

use http::StatusCode;
use twine::{translate, Client, Error, PageParams, PermissionDenial};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("twine=info")
        .init();

    println!("=== Example 1: Calls on a Client Without Credentials ===");
    let anonymous = Client::builder().build()?;
    match anonymous.home_timeline(PageParams::new()).await {
        Ok(_) => println!("Unexpected success"),
        Err(Error::NotAuthorized { message }) => {
            println!("Rejected before sending: {:?}", message);
        }
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 2: Classified API Errors ===");
    if let Ok(token) = std::env::var("TWITTER_BEARER_TOKEN") {
        let client = Client::builder().bearer_token(token).build()?;

        // Posting the same text twice is rejected as a duplicate.
        for _ in 0..2 {
            match client.update_status("twine error handling example").await {
                Ok(tweet) => println!("Posted {}", tweet.id),
                Err(Error::DuplicateContent { content }) => {
                    println!("Duplicate status: {:?}", content);
                }
                Err(Error::ContentTooLong { message }) => println!("Too long: {}", message),
                Err(Error::OperationNotPermitted { denial, message }) => {
                    println!("Not permitted ({}): {}", denial, message);
                }
                Err(Error::ApiFailure {
                    status,
                    raw_response,
                    headers,
                }) => {
                    println!("API failure!");
                    println!("  Status: {}", status);
                    println!("  Raw response: {}", raw_response);
                    println!("  Content-Type: {:?}", headers.get("content-type"));
                }
                Err(e) => println!("Other error: {}", e),
            }
        }
    } else {
        println!("Set TWITTER_BEARER_TOKEN to call the live API.");
    }
    println!();

    println!("=== Example 3: How Responses Are Classified ===");
    let samples = [
        (StatusCode::UNAUTHORIZED, r#"{"errors":[{"code":89,"message":"Invalid or expired token."}]}"#),
        (StatusCode::FORBIDDEN, r#"{"error":"You already said that"}"#),
        (StatusCode::FORBIDDEN, r#"{"error":"Status is over 140 characters."}"#),
        (StatusCode::FORBIDDEN, r#"{"errors":[{"code":37}]}"#),
        (StatusCode::FORBIDDEN, r#"{"error":"Forbidden"}"#),
        (StatusCode::SERVICE_UNAVAILABLE, "Over capacity"),
    ];

    for (status, body) in samples {
        let error = translate(status, body);
        println!("{} {}", status.as_u16(), body);
        println!("  Error: {}", error);
        println!("  Authorization error: {}", error.is_authorization_error());
        println!(
            "  Sharing denied: {}",
            matches!(
                error,
                Error::OperationNotPermitted {
                    denial: PermissionDenial::SharingNotAllowed,
                    ..
                }
            )
        );
        println!("  Status code: {:?}", error.status());
        println!("  Raw response: {:?}", error.raw_response());
        println!();
    }

    println!("=== Example 4: Handling Network Errors ===");
    let bad_client = Client::builder()
        .base_url("https://this-domain-does-not-exist-12345.com/1.1/")?
        .build()?;

    match bad_client.local_trends(1, false).await {
        Ok(_) => println!("Unexpected success"),
        Err(Error::Network(e)) => {
            println!("Network Error!");
            println!("  Error: {}", e);
            println!("  Is connect error: {}", e.is_connect());
        }
        Err(e) => println!("Other error: {}", e),
    }

    Ok(())
}
