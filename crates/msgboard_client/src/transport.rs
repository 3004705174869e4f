use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use thiserror::Error;

use msgboard_core::{ApiError, ApiFailure, HelloResponse, Message};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Origin of the backend, without the `/api` prefix.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("invalid base url {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Per-request knobs for [`ReqwestApi::request`].
///
/// Caller headers are merged over the default `Content-Type:
/// application/json`; the caller value wins on conflict.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// The typed operations the stores need from the backend.
///
/// A trait seam so stores can be exercised against stubs in tests.
#[async_trait::async_trait]
pub trait MessageApi: Send + Sync {
    async fn list_messages(&self) -> Result<Vec<Message>, ApiError>;
    async fn create_message(&self, content: &str) -> Result<Message, ApiError>;
    async fn delete_message(&self, id: u64) -> Result<(), ApiError>;
    async fn hello(&self) -> Result<HelloResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    client: reqwest::Client,
    // Normalized origin plus the fixed `/api` prefix.
    base: String,
}

impl ReqwestApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientBuildError> {
        let base = format!("{}/api", settings.base_url.trim_end_matches('/'));
        reqwest::Url::parse(&base).map_err(|err| ClientBuildError::InvalidBaseUrl {
            url: settings.base_url.clone(),
            message: err.to_string(),
        })?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()?;

        Ok(Self { client, base })
    }

    /// Issues a request against `/api{endpoint}` and parses the JSON body.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let response = self.exchange(endpoint, options).await?;
        let body = response.bytes().await.map_err(map_transport_error)?;
        serde_json::from_slice(&body)
            .map_err(|err| ApiError::new(ApiFailure::InvalidBody, err.to_string()))
    }

    /// Issues a request and discards the body, for endpoints replying 204.
    pub async fn request_empty(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<(), ApiError> {
        self.exchange(endpoint, options).await?;
        Ok(())
    }

    async fn exchange(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{endpoint}", self.base);
        let headers = merge_headers(&options.headers)?;

        let mut request = self.client.request(options.method, url.as_str()).headers(headers);
        if let Some(body) = options.body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("");
            return Err(ApiError::new(
                ApiFailure::HttpStatus(status.as_u16()),
                format!("HTTP {}: {}", status.as_u16(), reason),
            ));
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl MessageApi for ReqwestApi {
    async fn list_messages(&self) -> Result<Vec<Message>, ApiError> {
        self.request("/messages", RequestOptions::default()).await
    }

    async fn create_message(&self, content: &str) -> Result<Message, ApiError> {
        let body = serde_json::json!({ "content": content }).to_string();
        self.request(
            "/messages",
            RequestOptions {
                method: Method::POST,
                body: Some(body),
                ..RequestOptions::default()
            },
        )
        .await
    }

    async fn delete_message(&self, id: u64) -> Result<(), ApiError> {
        self.request_empty(
            &format!("/messages/{id}"),
            RequestOptions {
                method: Method::DELETE,
                ..RequestOptions::default()
            },
        )
        .await
    }

    async fn hello(&self) -> Result<HelloResponse, ApiError> {
        self.request("/hello", RequestOptions::default()).await
    }
}

fn merge_headers(caller: &[(String, String)]) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in caller {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
            ApiError::new(ApiFailure::Unknown, format!("invalid header name {name:?}: {err}"))
        })?;
        let value = HeaderValue::from_str(value).map_err(|err| {
            ApiError::new(ApiFailure::Unknown, format!("invalid header value: {err}"))
        })?;
        // `insert` replaces the default on conflict, so the caller wins.
        headers.insert(name, value);
    }
    Ok(headers)
}

fn map_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_decode() {
        return ApiError::new(ApiFailure::InvalidBody, err.to_string());
    }
    ApiError::new(ApiFailure::Transport, err.to_string())
}
