//! HTTP Transport Client
//!
//! Thin wrapper over `reqwest` that knows the backend's conventions: JSON in
//! and out, multipart for uploads, and `{detail}` error payloads.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiResult, UNKNOWN_API_ERROR};
use crate::config::ApiConfig;

/// Default backend base URL
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api";

/// Form field the backend reads the uploaded file from
pub const UPLOAD_FIELD: &str = "file";

/// A file ready to be sent as multipart form data
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    fn into_form(self) -> ApiResult<Form> {
        let part = Part::bytes(self.bytes)
            .file_name(self.filename)
            .mime_str(&self.mime)
            .map_err(|e| ApiError::Request(e.to_string()))?;
        Ok(Form::new().part(UPLOAD_FIELD, part))
    }
}

/// Request payload
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(UploadFile),
}

/// Per-request options
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: RequestBody,
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: RequestBody::Empty,
            headers: Vec::new(),
        }
    }
}

impl RequestOptions {
    /// POST with a JSON body
    pub fn post_json(body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            body: RequestBody::Json(body),
            headers: Vec::new(),
        }
    }

    /// POST with a multipart file body
    pub fn post_file(file: UploadFile) -> Self {
        Self {
            method: Method::POST,
            body: RequestBody::Multipart(file),
            headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Backend HTTP client
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL (e.g. `http://127.0.0.1:8000/api`)
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(settings: &ApiConfig) -> Self {
        Self::new(&settings.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Send a request and decode the JSON response.
    ///
    /// JSON bodies get `Content-Type: application/json`. Multipart bodies get
    /// no explicit content type so the boundary is set by the transport.
    /// No retries and no timeout: failures surface immediately.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let url = self.url(endpoint);
        let mut headers = build_headers(&options.headers)?;

        let mut builder = self.client.request(options.method.clone(), &url);
        builder = match options.body {
            RequestBody::Multipart(file) => {
                headers.remove(CONTENT_TYPE);
                builder.headers(headers).multipart(file.into_form()?)
            }
            RequestBody::Json(value) => {
                let bytes = serde_json::to_vec(&value)
                    .map_err(|e| ApiError::Request(e.to_string()))?;
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                builder.headers(headers).body(bytes)
            }
            RequestBody::Empty => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                builder.headers(headers)
            }
        };

        tracing::debug!(method = %options.method, url = %url, "Sending API request");

        let response = builder.send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "API request failed");
            ApiError::from_reqwest(e)
        })?;

        if !response.status().is_success() {
            let err = error_from_response(response).await;
            tracing::error!(url = %url, status = ?err.status(), error = %err, "API returned an error");
            return Err(err);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn build_headers(pairs: &[(String, String)]) -> ApiResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ApiError::Request(format!("invalid header name {}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ApiError::Request(format!("invalid header value: {}", e)))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Turn a non-2xx response into an [`ApiError::Status`].
///
/// A JSON body yields its `detail` (or the generic message when absent); a
/// body that is not JSON yields the status reason phrase.
async fn error_from_response(response: Response) -> ApiError {
    let status = response.status();
    let reason = status.canonical_reason().unwrap_or_default().to_string();

    let parsed = match response.bytes().await {
        Ok(bytes) => serde_json::from_slice::<serde_json::Value>(&bytes).ok(),
        Err(_) => None,
    };

    let message = match parsed {
        Some(body) => detail_message(&body),
        None => Some(reason),
    }
    .filter(|m| !m.is_empty())
    .unwrap_or_else(|| UNKNOWN_API_ERROR.to_string());

    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}

fn detail_message(body: &serde_json::Value) -> Option<String> {
    match body.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
