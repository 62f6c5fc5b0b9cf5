//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Clients and stores pointed at a mock server
//! - Mock data factories
//! - Response body builders matching the backend's envelopes
//! - Helper assertions

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::models::{
  Activity, ActivityId, ActivityType, ChatExchange, ChatMessage, ChatRole, NewActivity, RecordId,
};
use crate::store::Store;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

/// ---------------------------------------------------------------------------
/// Client Test Utilities
/// ---------------------------------------------------------------------------

/// API client for a mock server URL such as `mockito::Server::url()`
pub fn test_client(base_url: &str) -> ApiClient {
  let config = ClientConfig::new(base_url).expect("Invalid test base URL");
  ApiClient::new(&config).expect("Failed to build test client")
}

pub fn test_store(base_url: &str) -> Store {
  Store::with_client(test_client(base_url))
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn fixed_time() -> DateTime<Utc> {
  DateTime::parse_from_rfc3339("2024-05-01T08:30:00Z")
    .expect("Invalid fixture timestamp")
    .with_timezone(&Utc)
}

pub fn mock_activity(id: &str, pet_name: &str, activity_type: ActivityType, duration: f64) -> Activity {
  Activity {
    id: ActivityId::new(id),
    pet_name: pet_name.to_string(),
    activity_type,
    duration,
    date_time: fixed_time(),
  }
}

pub fn mock_new_activity(pet_name: &str, activity_type: ActivityType, duration: f64) -> NewActivity {
  NewActivity {
    pet_name: pet_name.to_string(),
    activity_type,
    duration,
    date_time: fixed_time(),
  }
}

pub fn mock_chat_exchange(question: &str, answer: &str) -> ChatExchange {
  ChatExchange {
    user_message: ChatMessage {
      id: RecordId::new("u1"),
      role: ChatRole::User,
      text: question.to_string(),
    },
    ai_message: ChatMessage {
      id: RecordId::new("a1"),
      role: ChatRole::Assistant,
      text: answer.to_string(),
    },
  }
}

/// ---------------------------------------------------------------------------
/// Response Bodies
/// ---------------------------------------------------------------------------

pub fn mock_activity_json(id: &str, pet_name: &str, activity_type: &str, duration: f64) -> Value {
  json!({
    "id": id,
    "petName": pet_name,
    "activityType": activity_type,
    "duration": duration,
    "dateTime": "2024-05-01T08:30:00Z"
  })
}

/// `{"data": value}` as a string body
pub fn data_body(value: Value) -> String {
  json!({ "data": value }).to_string()
}

pub fn activities_body(activities: &[Value], current_pet: Option<&str>) -> String {
  data_body(json!({
    "activities": activities,
    "currentPet": current_pet
  }))
}

pub fn summary_body(walk_minutes: f64, meals: u32, medications: u32) -> String {
  data_body(json!({
    "totalWalkMinutes": walk_minutes,
    "mealCount": meals,
    "medicationCount": medications
  }))
}

pub fn reminder_body(show: bool, message: &str) -> String {
  data_body(json!({ "showReminder": show, "message": message }))
}

pub fn chat_exchange_body(question: &str, answer: &str) -> String {
  data_body(json!({
    "userMessage": { "id": 100, "type": "user", "text": question },
    "aiMessage": { "id": 101, "type": "assistant", "text": answer }
  }))
}

/// History body from `(type, text)` pairs
pub fn chat_history_body(messages: &[(&str, &str)]) -> String {
  let messages: Vec<Value> = messages
    .iter()
    .enumerate()
    .map(|(i, (role, text))| json!({ "id": i, "type": role, "text": text }))
    .collect();
  data_body(Value::Array(messages))
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff: f64 = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{ActivityList, DailySummary};

  #[derive(serde::Deserialize)]
  struct Envelope<T> {
    data: T,
  }

  #[test]
  fn test_bodies_parse_into_models() {
    let list: Envelope<ActivityList> = serde_json::from_str(&activities_body(
      &[mock_activity_json("1", "Rex", "walk", 20.0)],
      Some("Rex"),
    ))
    .unwrap();
    assert_eq!(list.data.activities[0], mock_activity("1", "Rex", ActivityType::Walk, 20.0));

    let summary: Envelope<DailySummary> = serde_json::from_str(&summary_body(20.0, 1, 2)).unwrap();
    assert_eq!(summary.data.medication_count, 2);

    let history: Envelope<Vec<ChatMessage>> =
      serde_json::from_str(&chat_history_body(&[("user", "a"), ("ai", "b")])).unwrap();
    assert_eq!(history.data[1].role, ChatRole::Assistant);
  }

  #[test]
  fn test_test_client_uses_given_url() {
    let client = test_client("http://127.0.0.1:4000/");
    assert_eq!(client.base_url(), "http://127.0.0.1:4000");
  }
}
