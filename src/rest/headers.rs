//! Parse REST API header names.

use reqwest::header::HeaderName;

/// Application ID header, sent on every request.
pub const APPLICATION_ID: HeaderName = HeaderName::from_static("x-parse-application-id");
/// REST API key header, sent on every request.
pub const REST_API_KEY: HeaderName = HeaderName::from_static("x-parse-rest-api-key");
/// Master key header, sent only when a master key is configured.
pub const MASTER_KEY: HeaderName = HeaderName::from_static("x-parse-master-key");

/// Content type of every request.
pub const JSON_CONTENT_TYPE: &str = "application/json";
