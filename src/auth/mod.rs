//! Authentication module for the Parse REST API.
//!
//! Parse authenticates every request with static keys sent as headers:
//! - an application ID identifying the app
//! - a REST API key
//! - optionally, a master key that bypasses class-level permissions

mod credentials;

pub use credentials::{
    Credentials, CredentialsProvider, EnvCredentials, StaticCredentials, APPLICATION_ID_VAR,
    MASTER_KEY_VAR, REST_API_KEY_VAR,
};
