//! Facade operations, grouped by resource family.
//!
//! Each operation is an `impl Client` method that runs the authorization
//! gate when the resource needs a user, builds its parameters, and hands one
//! [`crate::RequestMetadata`] to the dispatcher. None of them hold any logic
//! beyond that composition.

mod search;
mod timeline;
