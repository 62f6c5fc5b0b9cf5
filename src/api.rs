//! REST client for the pet care backend
//!
//! Every call is a single round trip. Successful responses wrap their payload
//! in a `{"data": ...}` envelope; failures carry `{"error": "..."}`.
//! Nothing here retries: recovery is always a fresh call from the caller.

use crate::config::ClientConfig;
use crate::models::chat::ChatRequest;
use crate::models::{
  Activity, ActivityId, ActivityList, ChatExchange, ChatMessage, DailySummary, NewActivity,
  ReminderState,
};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ApiError {
  /// Transport failure, timeout, or a non-success status the server did not
  /// explain as a rejected payload
  #[error("{message}")]
  Network { status: Option<u16>, message: String },

  /// The server rejected the request payload; message is shown verbatim
  #[error("{message}")]
  Validation { status: u16, message: String },
}

impl ApiError {
  pub fn status(&self) -> Option<u16> {
    match self {
      ApiError::Network { status, .. } => *status,
      ApiError::Validation { status, .. } => Some(*status),
    }
  }

  fn network(message: impl Into<String>) -> Self {
    ApiError::Network {
      status: None,
      message: message.into(),
    }
  }
}

impl From<reqwest::Error> for ApiError {
  fn from(e: reqwest::Error) -> Self {
    ApiError::Network {
      status: e.status().map(|s| s.as_u16()),
      message: format!("Network request failed: {}", e),
    }
  }
}

impl Serialize for ApiError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Wire Envelopes
/// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Envelope<T> {
  data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
  #[serde(default)]
  error: Option<String>,
}

/// ---------------------------------------------------------------------------
/// API Client
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ApiClient {
  client: Client,
  base_url: String,
  base: Url,
}

impl ApiClient {
  pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
    let client = Client::builder()
      .timeout(config.http_timeout)
      .build()
      .map_err(|e| ApiError::network(format!("Failed to build HTTP client: {}", e)))?;
    let base = Url::parse(&config.api_base_url)
      .map_err(|e| ApiError::network(format!("Invalid API base URL: {}", e)))?;

    Ok(Self {
      client,
      base_url: config.api_base_url.clone(),
      base,
    })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub async fn list_activities(&self) -> Result<ActivityList, ApiError> {
    self.send::<(), _>(Method::GET, &["api", "activities"], None).await
  }

  pub async fn create_activity(&self, activity: &NewActivity) -> Result<Activity, ApiError> {
    self.send(Method::POST, &["api", "activities"], Some(activity)).await
  }

  /// Returns the backend's confirmation payload untouched
  pub async fn delete_activity(&self, id: &ActivityId) -> Result<serde_json::Value, ApiError> {
    self
      .send::<(), _>(Method::DELETE, &["api", "activities", id.as_str()], None)
      .await
  }

  pub async fn get_summary(&self) -> Result<DailySummary, ApiError> {
    self.send::<(), _>(Method::GET, &["api", "summary"], None).await
  }

  pub async fn get_reminder(&self) -> Result<ReminderState, ApiError> {
    self.send::<(), _>(Method::GET, &["api", "reminder"], None).await
  }

  pub async fn send_chat_message(&self, text: &str) -> Result<ChatExchange, ApiError> {
    self
      .send(Method::POST, &["api", "chat"], Some(&ChatRequest { message: text }))
      .await
  }

  pub async fn get_chat_history(&self) -> Result<Vec<ChatMessage>, ApiError> {
    self.send::<(), _>(Method::GET, &["api", "chat"], None).await
  }

  /// Base URL extended by `segments`, each percent-encoded as one path segment
  fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = self.base.clone();
    url
      .path_segments_mut()
      .map_err(|_| ApiError::network(format!("API base URL cannot carry a path: {}", self.base)))?
      .pop_if_empty()
      .extend(segments);
    Ok(url)
  }

  async fn send<B, T>(
    &self,
    method: Method,
    segments: &[&str],
    body: Option<&B>,
  ) -> Result<T, ApiError>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    let url = self.endpoint(segments)?;
    let path = url.path().to_string();
    tracing::debug!(%method, %url, "sending request");

    let mut request = self.client.request(method, url);
    if let Some(body) = body {
      request = request.json(body);
    }

    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
      return Err(error_from_response(status, &body));
    }

    let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| ApiError::Network {
      status: Some(status.as_u16()),
      message: format!("Unexpected response from {}: {}", path, e),
    })?;

    Ok(envelope.data)
  }
}

/// Classify a non-success response.
///
/// 400/422 with an `error` text is a payload rejection; any other status keeps
/// the server's text when present and falls back to a generic message.
fn error_from_response(status: StatusCode, body: &str) -> ApiError {
  let server_message = serde_json::from_str::<ErrorBody>(body)
    .ok()
    .and_then(|b| b.error)
    .filter(|m| !m.trim().is_empty());

  match server_message {
    Some(message)
      if status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY =>
    {
      ApiError::Validation {
        status: status.as_u16(),
        message,
      }
    }
    Some(message) => ApiError::Network {
      status: Some(status.as_u16()),
      message,
    },
    None => ApiError::Network {
      status: Some(status.as_u16()),
      message: format!("Request failed with status {}", status),
    },
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
