//! Credential management for Parse API authentication.

use secrecy::{ExposeSecret, SecretString};

/// Default environment variable holding the application ID.
pub const APPLICATION_ID_VAR: &str = "PARSE_APPLICATION_ID";
/// Default environment variable holding the REST API key.
pub const REST_API_KEY_VAR: &str = "PARSE_REST_API_KEY";
/// Default environment variable holding the optional master key.
pub const MASTER_KEY_VAR: &str = "PARSE_MASTER_KEY";

/// API credentials: application ID, REST API key and an optional master key.
#[derive(Clone)]
pub struct Credentials {
    /// The application ID (public identifier)
    pub application_id: String,
    rest_api_key: SecretString,
    master_key: Option<SecretString>,
}

impl Credentials {
    /// Create new credentials from an application ID and REST API key.
    pub fn new(application_id: impl Into<String>, rest_api_key: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            rest_api_key: SecretString::from(rest_api_key.into()),
            master_key: None,
        }
    }

    /// Attach a master key.
    pub fn with_master_key(mut self, master_key: impl Into<String>) -> Self {
        self.master_key = Some(SecretString::from(master_key.into()));
        self
    }

    /// Get the REST API key.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_rest_api_key(&self) -> &str {
        self.rest_api_key.expose_secret()
    }

    /// Get the master key, if one is configured.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_master_key(&self) -> Option<&str> {
        self.master_key.as_ref().map(|k| k.expose_secret())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("application_id", &self.application_id)
            .field("rest_api_key", &"[REDACTED]")
            .field(
                "master_key",
                &self.master_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone, Debug)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(application_id: impl Into<String>, rest_api_key: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(application_id, rest_api_key),
        }
    }
}

impl From<Credentials> for StaticCredentials {
    fn from(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads `PARSE_APPLICATION_ID`, `PARSE_REST_API_KEY` and the
/// optional `PARSE_MASTER_KEY`.
#[derive(Debug)]
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Try to create credentials from the default environment variables.
    ///
    /// Returns `None` if the application ID or REST API key is not set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_vars(APPLICATION_ID_VAR, REST_API_KEY_VAR, MASTER_KEY_VAR)
    }

    /// Try to create credentials from custom environment variable names.
    ///
    /// An unset or empty master key variable leaves the master key unset.
    pub fn try_from_env_vars(app_id_var: &str, api_key_var: &str, master_key_var: &str) -> Option<Self> {
        let application_id = std::env::var(app_id_var).ok()?;
        let rest_api_key = std::env::var(api_key_var).ok()?;

        let mut credentials = Credentials::new(application_id, rest_api_key);
        if let Some(master_key) = std::env::var(master_key_var).ok().filter(|k| !k.is_empty()) {
            credentials = credentials.with_master_key(master_key);
        }

        Some(Self { credentials })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}
