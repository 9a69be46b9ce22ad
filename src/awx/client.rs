//! AWX HTTP client for API interactions

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use log::debug;
use reqwest::Client;
use serde_json::Value;

use crate::awx::locator::Locator;
use crate::awx::transport::{Method, Transport, TransportResponse};
use crate::config::env;
use crate::error::{AwxError, Result};

/// Credentials presented on every request
#[derive(Clone)]
pub enum Auth {
    /// Personal access token, sent as a bearer header
    Token(String),
    /// Username and password, sent as basic auth
    Basic { username: String, password: String },
}

impl Auth {
    fn header_value(&self) -> String {
        match self {
            Auth::Token(token) => format!("Bearer {}", token),
            Auth::Basic { username, password } => {
                let credentials = format!("{}:{}", username, password);
                format!("Basic {}", BASE64.encode(credentials.as_bytes()))
            }
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::Token(_) => write!(f, "Auth::Token(***)"),
            Auth::Basic { username, .. } => {
                write!(f, "Auth::Basic {{ username: {:?}, password: *** }}", username)
            }
        }
    }
}

/// Transport backed by a real HTTP connection pool
pub struct HttpTransport {
    client: Client,
    base_url: String,
    auth_header: String,
}

impl HttpTransport {
    /// Create a transport with optimized connection settings
    pub fn new(base_url: &str, auth: &Auth) -> Self {
        let client = Client::builder()
            // Connection pool settings - reuse connections
            .pool_max_idle_per_host(20)
            .pool_idle_timeout(Duration::from_secs(90))
            // TCP keepalive to maintain connections
            .tcp_keepalive(Duration::from_secs(60))
            // Timeouts
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: auth.header_value(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        locator: &Locator,
        body: Option<&Value>,
    ) -> Result<TransportResponse> {
        let url = format!("{}{}", self.base_url, locator.path_and_query());
        debug!("{} {}", method, url);

        let builder = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Patch => self.client.patch(&url),
            Method::Delete => self.client.delete(&url),
        };
        let mut builder = builder
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json");
        if let Some(payload) = body {
            builder = builder.json(payload);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("{} {} -> {}", method, url, status);

        Ok(TransportResponse { status, body })
    }
}

/// AWX API client
///
/// Holds the transport used for every request. Resource managers are
/// obtained from accessor methods defined alongside each resource module,
/// e.g. [`hosts`](AwxClient::hosts) or [`organizations`](AwxClient::organizations).
pub struct AwxClient {
    transport: Box<dyn Transport>,
}

impl AwxClient {
    /// Create a client for a host, e.g. `awx.example.com`
    ///
    /// A scheme may be included; without one, `https` is assumed.
    pub fn new(host: &str, auth: Auth) -> Self {
        let base_url = if host.contains("://") {
            host.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", host.trim_end_matches('/'))
        };
        Self::with_base_url(&base_url, auth)
    }

    /// Create a client against an explicit base URL (useful for mock servers)
    pub fn with_base_url(base_url: &str, auth: Auth) -> Self {
        Self {
            transport: Box::new(HttpTransport::new(base_url, &auth)),
        }
    }

    /// Create a client over a custom transport
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a client from the process environment.
    ///
    /// Reads the host from `AWX_HOST` and credentials from `AWX_TOKEN`,
    /// falling back to `AWX_USERNAME` and `AWX_PASSWORD`.
    pub fn from_env() -> Result<Self> {
        let host = std::env::var(env::HOST)
            .map_err(|_| AwxError::Validation(format!("{} is not set", env::HOST)))?;
        let auth = if let Ok(token) = std::env::var(env::TOKEN) {
            Auth::Token(token)
        } else {
            match (std::env::var(env::USERNAME), std::env::var(env::PASSWORD)) {
                (Ok(username), Ok(password)) => Auth::Basic { username, password },
                _ => {
                    return Err(AwxError::Validation(format!(
                        "set {} or both {} and {}",
                        env::TOKEN,
                        env::USERNAME,
                        env::PASSWORD
                    )))
                }
            }
        };
        Ok(Self::new(&host, auth))
    }

    /// Issue a request and hand back the raw response
    pub(crate) async fn send(
        &self,
        method: Method,
        locator: &Locator,
        body: Option<&Value>,
    ) -> Result<TransportResponse> {
        self.transport.send(method, locator, body).await
    }

    /// Issue a request and parse the response body as JSON.
    ///
    /// Non-success statuses become [`AwxError::UnexpectedStatus`]; an empty
    /// success body (e.g. a 204) parses as `Value::Null`.
    pub(crate) async fn request_json(
        &self,
        method: Method,
        locator: &Locator,
        body: Option<&Value>,
    ) -> Result<Value> {
        let response = self.send(method, locator, body).await?;
        if !response.is_success() {
            return Err(AwxError::UnexpectedStatus {
                status: response.status,
                body: response.body,
            });
        }
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}

impl fmt::Debug for AwxClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwxClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_auth_header() {
        let auth = Auth::Token("t0ken".to_string());
        assert_eq!(auth.header_value(), "Bearer t0ken");
    }

    #[test]
    fn test_basic_auth_header_is_encoded() {
        let auth = Auth::Basic {
            username: "user".to_string(),
            password: "pass".to_string(),
        };
        assert_eq!(auth.header_value(), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_auth_debug_hides_secrets() {
        let token = format!("{:?}", Auth::Token("s3cret".to_string()));
        assert!(!token.contains("s3cret"));
        let basic = format!(
            "{:?}",
            Auth::Basic {
                username: "admin".to_string(),
                password: "s3cret".to_string(),
            }
        );
        assert!(basic.contains("admin"));
        assert!(!basic.contains("s3cret"));
    }

    #[test]
    fn test_base_url_normalization() {
        let auth = Auth::Token("t".to_string());
        let transport = HttpTransport::new("http://127.0.0.1:8052/", &auth);
        assert_eq!(transport.base_url, "http://127.0.0.1:8052");
    }

    #[test]
    fn test_from_env_requires_host_and_credentials() {
        // Single test body so the env mutations cannot race each other
        std::env::remove_var(env::HOST);
        std::env::remove_var(env::TOKEN);
        std::env::remove_var(env::USERNAME);
        std::env::remove_var(env::PASSWORD);

        assert!(matches!(
            AwxClient::from_env(),
            Err(AwxError::Validation(_))
        ));

        std::env::set_var(env::HOST, "awx.example.com");
        assert!(matches!(
            AwxClient::from_env(),
            Err(AwxError::Validation(_))
        ));

        std::env::set_var(env::TOKEN, "t0ken");
        assert!(AwxClient::from_env().is_ok());

        std::env::remove_var(env::HOST);
        std::env::remove_var(env::TOKEN);
    }
}
