//! HTTP client for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::response::ApiResponse;

/// HTTP client for making network requests to the ABSENTA backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    refresh_delay_ms: u64,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
            refresh_delay_ms: config.refresh_delay_ms,
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The configured post-success refresh delay
    pub fn refresh_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.refresh_delay_ms)
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth_header() {
            Some(auth) => request.header(reqwest::header::AUTHORIZATION, auth),
            None => request,
        }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(path, "GET");
        let request = self.authorized(self.client.get(self.url(path)));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a GET request returning the raw body bytes
    pub async fn get_bytes(&self, path: &str) -> ClientResult<Vec<u8>> {
        let request = self.authorized(self.client.get(self.url(path)));
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from(status, response.text().await.unwrap_or_default()));
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!(path, "POST");
        let request = self.authorized(self.client.post(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorized(self.client.post(self.url(path)));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with a multipart form
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ClientResult<T> {
        let request = self.authorized(self.client.post(self.url(path)).multipart(form));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorized(self.client.put(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorized(self.client.delete(self.url(path)));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response, surfacing the server's envelope message
    /// verbatim on failure when one is present.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Self::error_from(status, text));
        }

        response.json().await.map_err(Into::into)
    }

    fn error_from(status: StatusCode, body: String) -> ClientError {
        // Prefer the decoded envelope so the server's message reaches the
        // user untouched; fall back to a generic status-code message.
        match serde_json::from_str::<ApiResponse<serde_json::Value>>(&body) {
            Ok(envelope) => match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
                StatusCode::FORBIDDEN => ClientError::Forbidden(envelope.message),
                StatusCode::NOT_FOUND => ClientError::NotFound(envelope.message),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    ClientError::Validation(envelope.message)
                }
                _ => ClientError::Server {
                    code: envelope.code,
                    message: envelope.message,
                },
            },
            Err(_) => match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
                StatusCode::FORBIDDEN => ClientError::Forbidden(body),
                StatusCode::NOT_FOUND => ClientError::NotFound(body),
                StatusCode::BAD_REQUEST => ClientError::Validation(body),
                _ => ClientError::Server {
                    code: format!("HTTP_{}", status.as_u16()),
                    message: format!("Request failed with status {}", status),
                },
            },
        }
    }
}
