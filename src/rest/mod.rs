//! Parse REST API client.
//!
//! # Trait-based API
//!
//! The [`ParseRestApi`] trait abstracts the HTTP verbs, enabling:
//! - Mock implementations for testing
//! - Decorators around a real client
//!
//! ```rust,ignore
//! use parse_rest_client::rest::{ParseClient, ParseRestApi};
//!
//! async fn use_client<C: ParseRestApi>(client: &C) -> Result<(), parse_rest_client::ParseError> {
//!     let response = client.get("health").await?;
//!     println!("Status: {}", response.status());
//!     Ok(())
//! }
//! ```

mod client;
pub mod headers;
mod traits;
pub mod transport;

pub use client::{ParseClient, ParseClientBuilder, SERVER_URL_VAR};
pub use traits::ParseRestApi;
pub use transport::{TransportKind, LEGACY_CIPHER_SUITES};
