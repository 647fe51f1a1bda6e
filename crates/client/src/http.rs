//! HTTP transport for the booking API.
//!
//! A thin layer over `reqwest` that knows the API base URL, attaches bearer
//! credentials, keeps a cookie store for the API's session cookies, and turns
//! non-2xx responses into an [`ApiFailure`] carrying the server's `message`.
//! Callers map failures onto their own fallback messages.

use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::ClientConfig;

/// Why an API call did not produce a usable response.
#[derive(Debug, Error)]
pub enum ApiFailure {
    /// The request never got a response (connection, timeout, TLS...).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: StatusCode,
        /// The `message` field of the error body, if any.
        message: Option<String>,
    },

    /// A success response whose body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiFailure {
    /// Message supplied by the server, to be shown verbatim.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// HTTP status, when the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// The server message, or `fallback` when there is none.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

/// Error body emitted by the API.
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Booking API client.
///
/// Cheap to clone; clones share the connection pool and cookie store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    /// Create a client for the configured API base.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http,
            base: config.api_base.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL of an API path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns `ApiFailure` on transport errors, non-2xx statuses or bodies
    /// that do not decode as `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&SecretString>,
    ) -> Result<T, ApiFailure> {
        let request = self.request(Method::GET, path, token);
        self.execute(Method::GET, path, request).await
    }

    /// `POST` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `ApiFailure` on transport errors, non-2xx statuses or bodies
    /// that do not decode as `T`.
    pub async fn post<B, T>(
        &self,
        path: &str,
        token: Option<&SecretString>,
        body: &B,
    ) -> Result<T, ApiFailure>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path, token).json(body);
        self.execute(Method::POST, path, request).await
    }

    /// `PUT` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `ApiFailure` on transport errors, non-2xx statuses or bodies
    /// that do not decode as `T`.
    pub async fn put<B, T>(
        &self,
        path: &str,
        token: Option<&SecretString>,
        body: &B,
    ) -> Result<T, ApiFailure>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path, token).json(body);
        self.execute(Method::PUT, path, request).await
    }

    /// `DELETE` a resource, ignoring any response body.
    ///
    /// # Errors
    ///
    /// Returns `ApiFailure` on transport errors or non-2xx statuses.
    pub async fn delete(&self, path: &str, token: Option<&SecretString>) -> Result<(), ApiFailure> {
        let request = self.request(Method::DELETE, path, token);
        self.dispatch(&Method::DELETE, path, request).await.map(|_| ())
    }

    fn request(&self, method: Method, path: &str, token: Option<&SecretString>) -> RequestBuilder {
        let request = self
            .http
            .request(method, self.endpoint(path))
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        match token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiFailure> {
        let body = self.dispatch(&method, path, request).await?;

        // An empty success body decodes like JSON `null`.
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_slice(b"null")?);
        }
        Ok(serde_json::from_slice(&body)?)
    }

    #[instrument(name = "api_request", skip(self, method, request), fields(method = %method))]
    async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Vec<u8>, ApiFailure> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!(status = status.as_u16(), bytes = body.len(), "API response");

        if status.is_success() {
            return Ok(body.to_vec());
        }

        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty());

        Err(ApiFailure::Status { status, message })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> ApiClient {
        let base = Url::parse(&format!("{}/api/", server.uri())).unwrap();
        ApiClient::new(&ClientConfig::new(base)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let config = ClientConfig::new(Url::parse("http://localhost:8000/api").unwrap());
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.endpoint("/services/3"), "http://localhost:8000/api/services/3");
        assert_eq!(client.endpoint("login"), "http://localhost:8000/api/login");
    }

    #[tokio::test]
    async fn test_bearer_token_and_accept_header_are_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/bookings"))
            .and(header("authorization", "Bearer tok-1"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let token = SecretString::from("tok-1");
        let items: Vec<serde_json::Value> =
            client_for(&server).get("/bookings", Some(&token)).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_error_message_is_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/services"))
            .and(body_json(serde_json::json!({ "name": "x" })))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(serde_json::json!({ "message": "This action is unauthorized." })),
            )
            .mount(&server)
            .await;

        let failure = client_for(&server)
            .post::<_, serde_json::Value>("/services", None, &serde_json::json!({ "name": "x" }))
            .await
            .unwrap_err();

        assert_eq!(failure.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(failure.server_message(), Some("This action is unauthorized."));
    }

    #[tokio::test]
    async fn test_error_without_message_uses_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/services/9"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let failure = client_for(&server).delete("/services/9", None).await.unwrap_err();
        assert_eq!(failure.server_message(), None);
        assert_eq!(failure.message_or("Failed to delete service"), "Failed to delete service");
    }

    #[tokio::test]
    async fn test_empty_success_body_decodes_as_null() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/services/1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let echoed: Option<serde_json::Value> = client_for(&server)
            .put("/services/1", None, &serde_json::json!({ "name": "y" }))
            .await
            .unwrap();
        assert!(echoed.is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_has_no_server_message() {
        // Nothing listens on this port once the listener is dropped.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let config = ClientConfig::new(Url::parse(&format!("http://127.0.0.1:{port}/api")).unwrap());
        let failure = ApiClient::new(&config)
            .unwrap()
            .get::<serde_json::Value>("/services", None)
            .await
            .unwrap_err();

        assert!(matches!(failure, ApiFailure::Transport(_)));
        assert_eq!(failure.message_or("Failed to fetch services"), "Failed to fetch services");
    }
}
