//! HTTP client for network-based API calls
//!
//! Every request carries `Authorization: Bearer <token>` taken from the
//! injected [`Session`](crate::Session). A `401` expires that session and
//! surfaces as [`ClientError::Unauthorized`].

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::SharedSession;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::client::{LoginRequest, LoginResponse};
use tracing::{debug, info, instrument, warn};

/// HTTP client for making network requests to the stock API
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    session: SharedSession,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig, session: SharedSession) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session this client authenticates with
    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Get the current token
    pub async fn token(&self) -> Option<String> {
        self.session.read().await.token().map(str::to_string)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build authorization header value
    async fn auth_header(&self) -> Option<String> {
        self.session
            .read()
            .await
            .token()
            .map(|t| format!("Bearer {}", t))
    }

    /// Attach the bearer token and send
    async fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        let request = match self.auth_header().await {
            Some(auth) => request.header(reqwest::header::AUTHORIZATION, auth),
            None => request,
        };
        let response = request.send().await?;
        self.check_status(response).await
    }

    /// Map non-success statuses to errors
    async fn check_status(&self, response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let text = response.text().await.unwrap_or_default();
        warn!(%status, %url, body = %text, "Request failed");

        match status {
            StatusCode::UNAUTHORIZED => {
                let mut session = self.session.write().await;
                if session.is_active() {
                    session.expire();
                }
                Err(ClientError::Unauthorized)
            }
            StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(if text.is_empty() {
                url
            } else {
                text
            })),
            s if s.is_client_error() => Err(ClientError::Rejected {
                status: s.as_u16(),
                message: text,
            }),
            s => Err(ClientError::Server {
                status: s.as_u16(),
                message: text,
            }),
        }
    }

    /// Decode a JSON body
    async fn json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    // ========== Verbs ==========

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        debug!(path, "GET");
        let response = self.send(self.client.get(self.url(path))).await?;
        Self::json(response).await
    }

    /// Make a POST request with JSON body; the response body is ignored
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<()> {
        debug!(path, "POST");
        self.send(self.client.post(self.url(path)).json(body))
            .await?;
        Ok(())
    }

    /// Make a PUT request with JSON body
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<()> {
        debug!(path, "PUT");
        self.send(self.client.put(self.url(path)).json(body))
            .await?;
        Ok(())
    }

    /// Make a PUT request without body
    pub async fn put_empty(&self, path: &str) -> ClientResult<()> {
        debug!(path, "PUT");
        self.send(self.client.put(self.url(path))).await?;
        Ok(())
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        debug!(path, "DELETE");
        self.send(self.client.delete(self.url(path))).await?;
        Ok(())
    }

    /// Make a DELETE request with JSON body
    pub async fn delete_with_body<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<()> {
        debug!(path, "DELETE");
        self.send(self.client.delete(self.url(path)).json(body))
            .await?;
        Ok(())
    }

    // ========== Auth API ==========

    /// Login with username and password, activating the session
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<()> {
        request.validate()?;

        let response = self
            .send(self.client.post(self.url("login")).json(request))
            .await?;
        let login: LoginResponse = Self::json(response).await?;
        if login.access_token.is_empty() {
            return Err(ClientError::InvalidResponse(
                "Missing access token".to_string(),
            ));
        }

        self.session.write().await.activate(login.access_token)?;
        info!("Login successful");
        Ok(())
    }

    /// Logout (local only, the API keeps no server-side session)
    pub async fn logout(&self) -> ClientResult<()> {
        self.session.write().await.logout()?;
        Ok(())
    }
}
