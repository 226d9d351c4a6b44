//! Backend REST API Client
//!
//! HTTP client for the equipment analytics backend. Every request carries a
//! single static Basic-auth credential computed once at construction, and all
//! non-success responses are normalized into [`ApiError`] so callers can
//! distinguish "server said no" from "could not reach server".

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use thiserror::Error;

use crate::config::ApiConfig;

use super::types::{
    HistoryEnvelope, HistoryResponse, Summary, SummaryResponse, UploadFile, UploadResult,
};
use super::Backend;

/// Authenticated client for the backend REST API
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth_header: String,
}

impl ApiClient {
    /// Create a new client from configuration.
    ///
    /// The credential is fixed for the lifetime of the client; a credential
    /// change requires constructing a new client.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_header: basic_auth_header(&config.username, &config.password),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Download the backend's PDF report for the latest dataset.
    pub async fn download_report(&self) -> Result<Vec<u8>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/report/pdf/"))
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(request_error(response).await);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl Backend for ApiClient {
    async fn fetch_summary(&self) -> Result<Option<Summary>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/summary/"))
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(request_error(response).await);
        }

        let summary: SummaryResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        match summary {
            SummaryResponse::Data(summary) => Ok(Some(*summary)),
            SummaryResponse::Empty { message } => {
                tracing::info!("Backend has no dataset yet: {}", message);
                Ok(None)
            }
        }
    }

    async fn fetch_history(&self) -> Result<HistoryEnvelope, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/history/"))
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(request_error(response).await);
        }

        let history: HistoryResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(history.into())
    }

    async fn upload_file(&self, file: &UploadFile) -> Result<UploadResult, ApiError> {
        let part = Part::bytes(file.bytes.clone()).file_name(file.filename.clone());
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("/upload/"))
            .header(AUTHORIZATION, &self.auth_header)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(request_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Compute the static `Authorization: Basic` header value
fn basic_auth_header(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        BASE64.encode(format!("{}:{}", username, password))
    )
}

/// Map a transport failure (DNS, connection refused, timeout) to [`ApiError`]
fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Network(format!("request timed out: {}", e))
    } else {
        ApiError::Network(e.to_string())
    }
}

/// Convert a non-success response into an error carrying the raw body text
async fn request_error(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ApiError::Request { status, body }
}

/// Errors that can occur when talking to the backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be completed at all
    #[error("backend unreachable: {0}")]
    Network(String),

    /// The backend responded with a non-success status; the body text is the
    /// human-readable message
    #[error("request failed ({status}): {body}")]
    Request { status: u16, body: String },

    /// A success response could not be interpreted as the expected shape
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Server-provided message when one exists, generic fallback otherwise.
    /// Used for inline status lines.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Request { body, .. } if !body.is_empty() => body.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_header() {
        // base64("user:pass")
        assert_eq!(basic_auth_header("user", "pass"), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_endpoint_normalizes_trailing_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:8000/api/".to_string(),
            ..ApiConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint("/summary/"),
            "http://localhost:8000/api/summary/"
        );
    }

    #[test]
    fn test_display_message_prefers_server_body() {
        let err = ApiError::Request {
            status: 400,
            body: "bad header".to_string(),
        };
        assert_eq!(err.display_message("Upload failed"), "bad header");
    }

    #[test]
    fn test_display_message_falls_back() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.display_message("Upload failed"), "Upload failed");

        let empty_body = ApiError::Request {
            status: 500,
            body: String::new(),
        };
        assert_eq!(empty_body.display_message("Upload failed"), "Upload failed");
    }
}
