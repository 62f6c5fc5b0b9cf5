use super::RecordId;
use serde::{Deserialize, Serialize};

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
  User,
  #[serde(alias = "ai")]
  Assistant,
}

/// One entry of the care-advice transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
  pub id: RecordId,
  #[serde(rename = "type")]
  pub role: ChatRole,
  pub text: String,
}

/// Response of `POST /api/chat`: the echoed user message and the reply
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatExchange {
  pub user_message: ChatMessage,
  pub ai_message: ChatMessage,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
  pub message: &'a str,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_exchange_parses_both_messages() {
    let exchange: ChatExchange = serde_json::from_str(
      r#"{
        "userMessage": {"id": 1, "type": "user", "text": "Can Rex eat grapes?"},
        "aiMessage": {"id": 2, "type": "ai", "text": "No, grapes are toxic to dogs."}
      }"#,
    )
    .unwrap();

    assert_eq!(exchange.user_message.role, ChatRole::User);
    assert_eq!(exchange.ai_message.role, ChatRole::Assistant);
    assert_eq!(exchange.ai_message.id.as_str(), "2");
  }

  #[test]
  fn test_request_body_shape() {
    let body = serde_json::to_value(ChatRequest { message: "hi" }).unwrap();
    assert_eq!(body, serde_json::json!({"message": "hi"}));
  }
}
