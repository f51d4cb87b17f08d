//! Parse REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use reqwest::{Method, Request, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use url::Url;

use crate::auth::{CredentialsProvider, EnvCredentials, StaticCredentials};
use crate::error::ParseError;
use crate::rest::headers::{APPLICATION_ID, JSON_CONTENT_TYPE, MASTER_KEY, REST_API_KEY};
use crate::rest::traits::ParseRestApi;
use crate::rest::transport::{Transport, TransportKind, TransportOptions};

/// Environment variable read by [`ParseClientBuilder::from_env`] for the base URL.
pub const SERVER_URL_VAR: &str = "PARSE_SERVER_URL";

/// The Parse REST API client.
///
/// Every request carries `Content-Type: application/json`, the application
/// ID and the REST API key, plus the master key when one is configured.
/// Responses are returned raw: the status code is not checked and the body
/// is not read.
///
/// # Example
///
/// ```rust,no_run
/// use parse_rest_client::rest::ParseClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ParseClient::new("https://parse.example.com/parse", "app_id", "rest_key")?;
///
///     let response = client.get("classes/GameScore").await?;
///     println!("Status: {}", response.status());
///
///     Ok(())
/// }
/// ```
///
/// # Security
///
/// For `https` base URLs the client accepts any server certificate unless
/// built with `accept_invalid_certs(false)`.
#[derive(Clone)]
pub struct ParseClient {
    base_url: String,
    credentials: Arc<dyn CredentialsProvider>,
    master_key: Option<SecretString>,
    transport: Transport,
}

impl ParseClient {
    /// Create a client for `base_url` with an application ID and REST API key.
    ///
    /// A single trailing slash is stripped from `base_url`, which must then
    /// be an absolute URL.
    pub fn new(
        base_url: &str,
        application_id: impl Into<String>,
        rest_api_key: impl Into<String>,
    ) -> Result<Self, ParseError> {
        Self::builder()
            .base_url(base_url)
            .credentials(Arc::new(StaticCredentials::new(application_id, rest_api_key)))
            .build()
    }

    /// Create a new client builder.
    pub fn builder() -> ParseClientBuilder {
        ParseClientBuilder::new()
    }

    /// Set the master key sent with every subsequent request.
    ///
    /// Replaces any master key set before, including one carried by the
    /// credentials provider. An empty key disables the header.
    pub fn set_master_key(&mut self, master_key: impl Into<String>) {
        self.master_key = Some(SecretString::from(master_key.into()));
    }

    /// The normalized base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The kind of transport selected for the base URL.
    pub fn transport_kind(&self) -> TransportKind {
        self.transport.kind()
    }

    /// Check if requests will carry the master key header.
    pub fn has_master_key(&self) -> bool {
        self.master_key().is_some()
    }

    /// Compose the target URL for a resource path.
    ///
    /// A single leading slash is stripped from `resource_path`. The result is
    /// parsed as a URL, which resolves `.` and `..` segments: `classes/../x`
    /// targets `{base}/x`. Nothing else is normalized.
    pub fn resource_url(&self, resource_path: &str) -> Result<Url, ParseError> {
        let path = resource_path.strip_prefix('/').unwrap_or(resource_path);
        let raw = format!("{}/{}", self.base_url, path);
        Url::parse(&raw)
            .map_err(|e| ParseError::RequestConstruction(format!("invalid URL {raw:?}: {e}")))
    }

    /// Build a fully formed request without sending it.
    pub fn build_request<B>(
        &self,
        method: Method,
        resource_path: &str,
        body: Option<&B>,
    ) -> Result<Request, ParseError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.resource_url(resource_path)?;
        let mut request = Request::new(method, url);

        let mut body_len = 0;
        if let Some(body) = body {
            let json = serde_json::to_vec(body)?;
            body_len = json.len();
            *request.body_mut() = Some(json.into());
        }

        let creds = self.credentials.get_credentials();
        let master_key = self.master_key();

        let headers = request.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(APPLICATION_ID, header_value(&APPLICATION_ID, &creds.application_id, false)?);
        headers.insert(REST_API_KEY, header_value(&REST_API_KEY, creds.expose_rest_api_key(), true)?);
        if let Some(master_key) = master_key {
            headers.insert(MASTER_KEY, header_value(&MASTER_KEY, master_key, true)?);
        }

        tracing::debug!(
            method = %request.method(),
            url = %request.url(),
            body_len,
            master_key = master_key.is_some(),
            "Built Parse request"
        );

        Ok(request)
    }

    /// Send an already built request.
    pub async fn execute(&self, request: Request) -> Result<Response, ParseError> {
        self.transport.execute(request).await
    }

    /// Build and send a request, with an optional deadline for this call.
    ///
    /// The deadline overrides the client-wide timeout. Dropping the returned
    /// future cancels the request.
    pub async fn request<B>(
        &self,
        method: Method,
        resource_path: &str,
        body: Option<&B>,
        timeout: Option<Duration>,
    ) -> Result<Response, ParseError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.build_request(method, resource_path, body)?;
        if timeout.is_some() {
            *request.timeout_mut() = timeout;
        }
        self.execute(request).await
    }

    /// Perform a GET request on a resource path.
    pub async fn get(&self, resource_path: &str) -> Result<Response, ParseError> {
        self.request(Method::GET, resource_path, None::<&()>, None).await
    }

    /// Perform a POST request on a resource path with a JSON body.
    pub async fn post<B>(&self, resource_path: &str, body: &B) -> Result<Response, ParseError>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, resource_path, Some(body), None).await
    }

    /// Perform a PUT request on a resource path with a JSON body.
    pub async fn put<B>(&self, resource_path: &str, body: &B) -> Result<Response, ParseError>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, resource_path, Some(body), None).await
    }

    /// Perform a DELETE request on a resource path.
    pub async fn delete(&self, resource_path: &str) -> Result<Response, ParseError> {
        self.request(Method::DELETE, resource_path, None::<&()>, None).await
    }

    fn master_key(&self) -> Option<&str> {
        self.master_key
            .as_ref()
            .map(|k| k.expose_secret())
            .or_else(|| self.credentials.get_credentials().expose_master_key())
            .filter(|k| !k.is_empty())
    }
}

fn header_value(name: &HeaderName, value: &str, sensitive: bool) -> Result<HeaderValue, ParseError> {
    let mut value = HeaderValue::from_str(value)
        .map_err(|e| ParseError::RequestConstruction(format!("invalid value for header {name}: {e}")))?;
    value.set_sensitive(sensitive);
    Ok(value)
}

impl std::fmt::Debug for ParseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseClient")
            .field("base_url", &self.base_url)
            .field("has_master_key", &self.has_master_key())
            .field("transport", &self.transport)
            .finish()
    }
}

/// Builder for [`ParseClient`].
pub struct ParseClientBuilder {
    base_url: Option<String>,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    master_key: Option<SecretString>,
    options: TransportOptions,
}

impl ParseClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: None,
            credentials: None,
            master_key: None,
            options: TransportOptions::default(),
        }
    }

    /// Create a builder from `PARSE_SERVER_URL`, `PARSE_APPLICATION_ID`,
    /// `PARSE_REST_API_KEY` and the optional `PARSE_MASTER_KEY`.
    pub fn from_env() -> Result<Self, ParseError> {
        let base_url = std::env::var(SERVER_URL_VAR)
            .map_err(|_| ParseError::Config(format!("environment variable {SERVER_URL_VAR} not set")))?;
        let credentials = EnvCredentials::try_from_env().ok_or_else(|| {
            ParseError::Config("Parse application ID or REST API key not set in environment".to_string())
        })?;
        Ok(Self::new().base_url(base_url).credentials(Arc::new(credentials)))
    }

    /// Set the base URL of the Parse server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the credentials provider.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the master key.
    pub fn master_key(mut self, master_key: impl Into<String>) -> Self {
        self.master_key = Some(SecretString::from(master_key.into()));
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.options.user_agent = user_agent.into();
        self
    }

    /// Set a default deadline for every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Accept any server certificate on `https` base URLs.
    ///
    /// Defaults to `true`, which is insecure. Pass `false` to verify
    /// server certificates against the built-in roots.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.options.accept_invalid_certs = accept;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ParseClient, ParseError> {
        let raw = self
            .base_url
            .ok_or_else(|| ParseError::Config("base URL not set".to_string()))?;
        let credentials = self
            .credentials
            .ok_or_else(|| ParseError::Config("credentials not set".to_string()))?;

        let (base_url, parsed) = parse_base_url(&raw)?;
        let transport = Transport::select(&parsed, &self.options)?;

        Ok(ParseClient {
            base_url,
            credentials,
            master_key: self.master_key,
            transport,
        })
    }
}

impl Default for ParseClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip a single trailing slash and check the rest is an absolute URL.
fn parse_base_url(raw: &str) -> Result<(String, Url), ParseError> {
    let trimmed = raw.strip_suffix('/').unwrap_or(raw);
    let parsed = Url::parse(trimmed).map_err(|e| ParseError::invalid_base_url(raw, e))?;
    if parsed.cannot_be_a_base() || !parsed.has_host() {
        return Err(ParseError::invalid_base_url(raw, "not an absolute URL with a host"));
    }
    Ok((trimmed.to_string(), parsed))
}

impl ParseRestApi for ParseClient {
    async fn get(&self, resource_path: &str) -> Result<Response, ParseError> {
        ParseClient::get(self, resource_path).await
    }

    async fn post<B>(&self, resource_path: &str, body: &B) -> Result<Response, ParseError>
    where
        B: Serialize + Sync + ?Sized,
    {
        ParseClient::post(self, resource_path, body).await
    }

    async fn put<B>(&self, resource_path: &str, body: &B) -> Result<Response, ParseError>
    where
        B: Serialize + Sync + ?Sized,
    {
        ParseClient::put(self, resource_path, body).await
    }

    async fn delete(&self, resource_path: &str) -> Result<Response, ParseError> {
        ParseClient::delete(self, resource_path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;

    fn client() -> ParseClient {
        ParseClient::new("http://fake.parse.host", "mockApplicationID", "mockApplicationKey").unwrap()
    }

    fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
        request.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_relative_base_url_is_rejected() {
        let err = ParseClient::new("invalid/url", "app", "key").unwrap_err();
        assert!(matches!(err, ParseError::Config(_)));
    }

    #[test]
    fn test_non_base_url_is_rejected() {
        let err = ParseClient::new("mailto:someone@example.com", "app", "key").unwrap_err();
        assert!(matches!(err, ParseError::Config(_)));
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let client = ParseClient::new("http://fake.parse.host/", "app", "key").unwrap();
        assert_eq!(client.base_url(), "http://fake.parse.host");
        assert!(!client.has_master_key());
    }

    #[test]
    fn test_builder_requires_base_url_and_credentials() {
        let err = ParseClient::builder().build().unwrap_err();
        assert!(matches!(err, ParseError::Config(_)));

        let err = ParseClient::builder().base_url("http://localhost").build().unwrap_err();
        assert!(matches!(err, ParseError::Config(_)));
    }

    #[test]
    fn test_leading_slash_is_stripped_from_resource_path() {
        let client = client();
        assert_eq!(
            client.resource_url("fakeResource").unwrap().as_str(),
            "http://fake.parse.host/fakeResource"
        );
        assert_eq!(
            client.resource_url("/fakeResource").unwrap().as_str(),
            "http://fake.parse.host/fakeResource"
        );
    }

    #[test]
    fn test_resource_path_keeps_query_string() {
        let client = ParseClient::new("http://localhost:1337/parse/", "app", "key").unwrap();
        let url = client.resource_url("classes/GameScore?limit=10").unwrap();
        assert_eq!(url.path(), "/parse/classes/GameScore");
        assert_eq!(url.query(), Some("limit=10"));
    }

    #[test]
    fn test_resource_path_dot_segments_are_resolved() {
        let client = ParseClient::new("http://fake.parse.host/parse", "app", "key").unwrap();
        let request = client
            .build_request(Method::GET, "classes/../x", None::<&()>)
            .unwrap();
        assert_eq!(request.url().as_str(), "http://fake.parse.host/parse/x");
    }

    #[test]
    fn test_invalid_user_agent_fails_to_build() {
        let err = ParseClient::builder()
            .base_url("http://localhost:1337")
            .credentials(Arc::new(StaticCredentials::new("app", "key")))
            .user_agent("bad\nua")
            .build()
            .unwrap_err();
        assert!(matches!(err, ParseError::Config(_)));
    }

    #[test]
    fn test_get_request_has_no_body_and_mandatory_headers() {
        let request = client()
            .build_request(Method::GET, "fakeResource", None::<&()>)
            .unwrap();
        assert_eq!(request.method(), Method::GET);
        assert!(request.body().is_none());
        assert_eq!(header(&request, "content-type"), Some("application/json"));
        assert_eq!(header(&request, "x-parse-application-id"), Some("mockApplicationID"));
        assert_eq!(header(&request, "x-parse-rest-api-key"), Some("mockApplicationKey"));
        assert!(request.headers().get("x-parse-master-key").is_none());
    }

    #[test]
    fn test_post_body_is_json_encoded() {
        #[derive(Serialize)]
        struct Player {
            name: String,
        }

        let body = Player {
            name: "Gianfranco".to_string(),
        };
        let request = client()
            .build_request(Method::POST, "fakeResource", Some(&body))
            .unwrap();
        assert_eq!(request.method(), Method::POST);
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(bytes, br#"{"name":"Gianfranco"}"#);
    }

    #[test]
    fn test_unserializable_body_fails() {
        use std::collections::HashMap;

        // JSON object keys must be strings.
        let mut body = HashMap::new();
        body.insert(vec![1u8], "value");
        let err = client()
            .build_request(Method::PUT, "fakeResource", Some(&body))
            .unwrap_err();
        assert!(matches!(err, ParseError::Serialization(_)));
    }

    #[test]
    fn test_set_master_key_adds_header() {
        let mut client = client();
        client.set_master_key("mockMasterKey");
        assert!(client.has_master_key());

        let request = client
            .build_request(Method::DELETE, "fakeResource", None::<&()>)
            .unwrap();
        assert_eq!(header(&request, "x-parse-master-key"), Some("mockMasterKey"));
        assert!(request.headers().get("x-parse-master-key").unwrap().is_sensitive());
    }

    #[test]
    fn test_empty_master_key_is_not_sent() {
        let mut client = client();
        client.set_master_key("");
        assert!(!client.has_master_key());
    }

    #[test]
    fn test_set_master_key_overrides_provider_key() {
        let credentials = Credentials::new("app", "key").with_master_key("from_provider");
        let mut client = ParseClient::builder()
            .base_url("http://localhost:1337")
            .credentials(Arc::new(StaticCredentials::from(credentials)))
            .build()
            .unwrap();

        let request = client.build_request(Method::GET, "x", None::<&()>).unwrap();
        assert_eq!(header(&request, "x-parse-master-key"), Some("from_provider"));

        client.set_master_key("override");
        let request = client.build_request(Method::GET, "x", None::<&()>).unwrap();
        assert_eq!(header(&request, "x-parse-master-key"), Some("override"));
    }

    #[test]
    fn test_invalid_header_value_fails() {
        let client = ParseClient::new("http://localhost", "bad\napp", "key").unwrap();
        let err = client
            .build_request(Method::GET, "x", None::<&()>)
            .unwrap_err();
        assert!(matches!(err, ParseError::RequestConstruction(_)));
    }

    #[test]
    fn test_https_base_url_selects_insecure_tls() {
        let client = ParseClient::new("https://parse.example.com/", "app", "key").unwrap();
        assert!(client.transport_kind().is_insecure());

        let client = ParseClient::builder()
            .base_url("https://parse.example.com")
            .credentials(Arc::new(StaticCredentials::new("app", "key")))
            .accept_invalid_certs(false)
            .build()
            .unwrap();
        assert_eq!(
            client.transport_kind(),
            TransportKind::Tls {
                accept_invalid_certs: false
            }
        );
    }

    #[test]
    fn test_debug_does_not_leak_keys() {
        let mut client = client();
        client.set_master_key("topSecretMaster");
        let debug_str = format!("{:?}", client);
        assert!(debug_str.contains("fake.parse.host"));
        assert!(!debug_str.contains("mockApplicationKey"));
        assert!(!debug_str.contains("topSecretMaster"));
    }
}
