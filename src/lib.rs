//! # Parse REST Client
//!
//! An async Rust client for the Parse Server REST API.
//!
//! The client builds authenticated JSON requests against a Parse server and
//! hands back the raw HTTP response. It does not interpret status codes or
//! decode response bodies.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use parse_rest_client::rest::ParseClient;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = ParseClient::new("http://localhost:1337/parse", "app_id", "rest_key")?;
//!     client.set_master_key("master_key");
//!
//!     let response = client
//!         .post("classes/GameScore", &json!({ "score": 1337, "playerName": "Sean Plott" }))
//!         .await?;
//!     println!("Created: {}", response.text().await?);
//!     Ok(())
//! }
//! ```
//!
//! ## Security
//!
//! Clients for `https` base URLs accept any server certificate by default.
//! Use [`rest::ParseClientBuilder::accept_invalid_certs`] to turn
//! certificate verification on.

pub mod auth;
pub mod error;
pub mod rest;

// Re-export commonly used types at crate root
pub use error::ParseError;
pub use rest::{ParseClient, ParseClientBuilder, ParseRestApi};

/// Result type alias using ParseError
pub type Result<T> = std::result::Result<T, ParseError>;
