//! Trait definition for the Parse REST API client.
//!
//! The `ParseRestApi` trait abstracts the four HTTP verbs so code written
//! against it can run with a mock implementation in tests, or behind a
//! decorator (logging, auditing) in production.
//!
//! # Example
//!
//! ```rust,ignore
//! use parse_rest_client::rest::{ParseClient, ParseRestApi};
//!
//! async fn count_scores<C: ParseRestApi>(client: &C) -> Result<u16, parse_rest_client::ParseError> {
//!     let response = client.get("classes/GameScore?count=1&limit=0").await?;
//!     Ok(response.status().as_u16())
//! }
//! ```

use std::future::Future;

use reqwest::Response;
use serde::Serialize;

use crate::error::ParseError;

/// Trait defining the Parse REST API verbs.
///
/// Each method sends at most one HTTP request and returns the raw response,
/// whatever its status code.
pub trait ParseRestApi: Send + Sync {
    /// Perform a GET request on a resource path.
    fn get(&self, resource_path: &str) -> impl Future<Output = Result<Response, ParseError>> + Send;

    /// Perform a POST request on a resource path with a JSON body.
    fn post<B>(
        &self,
        resource_path: &str,
        body: &B,
    ) -> impl Future<Output = Result<Response, ParseError>> + Send
    where
        B: Serialize + Sync + ?Sized;

    /// Perform a PUT request on a resource path with a JSON body.
    fn put<B>(
        &self,
        resource_path: &str,
        body: &B,
    ) -> impl Future<Output = Result<Response, ParseError>> + Send
    where
        B: Serialize + Sync + ?Sized;

    /// Perform a DELETE request on a resource path.
    fn delete(&self, resource_path: &str) -> impl Future<Output = Result<Response, ParseError>> + Send;
}
