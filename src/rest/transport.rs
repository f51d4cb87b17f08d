//! HTTP transport selection.
//!
//! A client gets exactly one transport, chosen from the scheme of its base
//! URL when the client is built:
//! - `https`: a TLS transport that, by default, **accepts any server
//!   certificate**. Nothing protects callers from a spoofed or
//!   man-in-the-middle server unless they turn verification back on with
//!   [`ParseClientBuilder::accept_invalid_certs`](super::ParseClientBuilder::accept_invalid_certs).
//! - anything else: a default transport with no TLS configuration.
//!
//! The transport is reused for every request the client sends.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Request, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use url::Url;

use crate::error::ParseError;

/// Cipher suites of the legacy TLS policy.
///
/// rustls only implements AEAD suites, so these CBC suites cannot be
/// negotiated by this transport. The list is kept so callers can audit what
/// the policy asked for; the backend's own suite list is used on the wire.
pub const LEGACY_CIPHER_SUITES: [&str; 3] = [
    "TLS_RSA_WITH_AES_256_CBC_SHA",
    "TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA",
    "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA",
];

/// Which kind of transport was selected for a base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Plain transport without TLS configuration.
    Plain,
    /// TLS transport for `https` base URLs.
    Tls {
        /// Whether server certificates are accepted without validation.
        accept_invalid_certs: bool,
    },
}

impl TransportKind {
    /// Pick the transport kind for a base URL.
    pub fn for_url(base_url: &Url, accept_invalid_certs: bool) -> Self {
        if base_url.scheme() == "https" {
            Self::Tls {
                accept_invalid_certs,
            }
        } else {
            Self::Plain
        }
    }

    /// Check if this transport skips certificate verification.
    pub fn is_insecure(&self) -> bool {
        matches!(
            self,
            Self::Tls {
                accept_invalid_certs: true
            }
        )
    }
}

/// Settings applied to the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Default deadline for a whole request, if any.
    pub timeout: Option<Duration>,
    /// Accept any server certificate on `https` base URLs.
    pub accept_invalid_certs: bool,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            user_agent: format!("parse-rest-client/{}", env!("CARGO_PKG_VERSION")),
            timeout: None,
            accept_invalid_certs: true,
        }
    }
}

/// A configured HTTP transport.
#[derive(Clone)]
pub struct Transport {
    kind: TransportKind,
    client: ClientWithMiddleware,
}

impl Transport {
    /// Build the transport for a base URL.
    pub fn select(base_url: &Url, options: &TransportOptions) -> Result<Self, ParseError> {
        let kind = TransportKind::for_url(base_url, options.accept_invalid_certs);

        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&options.user_agent).map_err(|e| {
            ParseError::Config(format!("invalid user agent {:?}: {e}", options.user_agent))
        })?;
        headers.insert(USER_AGENT, user_agent);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        if let TransportKind::Tls {
            accept_invalid_certs,
        } = kind
        {
            if accept_invalid_certs {
                tracing::warn!(
                    base_url = %base_url,
                    "TLS certificate verification is disabled, any server certificate will be accepted"
                );
            }
            tracing::debug!(
                requested_suites = ?LEGACY_CIPHER_SUITES,
                "CBC cipher suites are not supported by the TLS backend, using its defaults"
            );
            builder = builder.danger_accept_invalid_certs(accept_invalid_certs);
        }

        let client = ClientBuilder::new(builder.build()?)
            .with(TracingMiddleware::default())
            .build();

        Ok(Self { kind, client })
    }

    /// The kind of transport that was selected.
    pub fn kind(&self) -> TransportKind {
        self.kind
    }

    /// Send a request and return the raw response.
    ///
    /// The body is not read. Every completed exchange is returned as `Ok`,
    /// whatever its status code. Send failures raised by reqwest come back
    /// as [`ParseError::Transport`].
    pub async fn execute(&self, request: Request) -> Result<Response, ParseError> {
        match self.client.execute(request).await {
            Ok(response) => Ok(response),
            Err(reqwest_middleware::Error::Reqwest(e)) => Err(ParseError::Transport(e)),
            Err(e) => Err(ParseError::TransportMiddleware(e)),
        }
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport").field("kind", &self.kind).finish()
    }
}
