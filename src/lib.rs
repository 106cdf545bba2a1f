//! # Twine - a typed client for the Twitter 1.1 REST API
//!
//! Twine turns method calls into requests against the fixed 1.1 resource
//! paths, decodes JSON payloads into typed values, and classifies error
//! responses into a small error taxonomy. It is built on `reqwest`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use twine::{Client, PageParams, SearchParameters, StatusDetails};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), twine::Error> {
//!     let client = Client::builder()
//!         .bearer_token("AAAA...")
//!         .build()?;
//!
//!     // Read a timeline
//!     let timeline = client
//!         .user_timeline_for_screen_name("rustlang", PageParams::new().count(10))
//!         .await?;
//!     println!("Fetched {} tweets", timeline.len());
//!
//!     // Post a reply
//!     let details = StatusDetails::new().in_reply_to_status_id(timeline[0].id);
//!     let reply = client
//!         .update_status_with_details("@rustlang nice!", &details)
//!         .await?;
//!     println!("Posted {}", reply.id);
//!
//!     // Search
//!     let results = client.search(&SearchParameters::new("#rustlang")).await?;
//!     println!("{} matches", results.statuses.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## How a call is made
//!
//! Every operation follows the same steps:
//!
//! 1. operations that act for a user call [`Client::require_authorization`],
//!    which fails before any I/O on a client built without credentials;
//! 2. the option value is rendered into a fresh [`Parameters`];
//! 3. [`UriBuilder`] joins the resource path and query onto the API base;
//! 4. [`Client::call`] sends the request with an empty, form or multipart
//!    [`RequestBody`] and decodes a 2xx body into the declared type;
//! 5. any other status goes through [`translate()`] exactly once.
//!
//! There are no retries, no caching and no rate-limit handling. A call
//! either returns its value or one [`Error`].
//!
//! ## Error Handling
//!
//! ```no_run
//! use twine::{Client, Error, PermissionDenial};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::builder().bearer_token("token").build()?;
//! match client.retweet(12345).await {
//!     Ok(()) => println!("Retweeted"),
//!     Err(Error::DuplicateContent { .. }) => println!("Already retweeted"),
//!     Err(Error::OperationNotPermitted { denial: PermissionDenial::SharingNotAllowed, .. }) => {
//!         println!("That tweet cannot be shared");
//!     }
//!     Err(Error::ApiFailure { status, raw_response, .. }) => {
//!         eprintln!("HTTP error {}: {}", status, raw_response);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! Requests and responses are logged with `tracing` under the `twine`
//! target. Install any subscriber to see them, e.g.
//! `tracing_subscriber::fmt().with_env_filter("twine=debug").init()`.

mod api;
mod client;
mod error;
pub mod options;
pub mod params;
pub mod request;
mod response;
pub mod translate;
pub mod types;
pub mod uri;

pub use client::{Client, ClientBuilder};
pub use error::{Error, PermissionDenial, Result};
pub use options::{
    DistanceUnit, GeoCode, MediaUpload, PageParams, ResultType, SearchParameters, StatusDetails,
};
pub use params::{Flag, FlagPolicy, Parameters};
pub use request::{RequestBody, RequestMetadata};
pub use response::Response;
pub use translate::translate;
pub use types::{
    Entities, SavedSearch, SearchMetadata, SearchResults, Trend, Trends, Tweet, TwitterProfile,
};
pub use uri::UriBuilder;
