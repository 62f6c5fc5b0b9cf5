use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned identifier, opaque to the client.
///
/// The backend may send ids as strings or numbers; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RecordId(pub String);

pub type ActivityId = RecordId;

impl RecordId {
  pub fn new(id: impl Into<String>) -> Self {
    Self(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for RecordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl<'de> Deserialize<'de> for RecordId {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
      Text(String),
      Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
      RawId::Text(s) => RecordId(s),
      RawId::Number(n) => RecordId(n.to_string()),
    })
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
  #[default]
  Walk,
  Meal,
  Medication,
}

impl ActivityType {
  pub const ALL: [ActivityType; 3] = [ActivityType::Walk, ActivityType::Meal, ActivityType::Medication];

  /// Unit label shown next to the duration field
  pub fn duration_label(self) -> &'static str {
    match self {
      ActivityType::Walk => "Duration (minutes)",
      ActivityType::Meal => "Quantity (portions)",
      ActivityType::Medication => "Dosage (doses)",
    }
  }

  pub fn duration_placeholder(self) -> &'static str {
    match self {
      ActivityType::Walk => "e.g. 30",
      ActivityType::Meal => "e.g. 1",
      ActivityType::Medication => "e.g. 1",
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      ActivityType::Walk => "walk",
      ActivityType::Meal => "meal",
      ActivityType::Medication => "medication",
    }
  }
}

impl fmt::Display for ActivityType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A logged pet-care event as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
  pub id: ActivityId,
  pub pet_name: String,
  pub activity_type: ActivityType,
  /// Minutes for walks, portions for meals, doses for medication
  pub duration: f64,
  pub date_time: DateTime<Utc>,
}

/// Payload for `POST /api/activities`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
  pub pet_name: String,
  pub activity_type: ActivityType,
  pub duration: f64,
  pub date_time: DateTime<Utc>,
}

/// Response of `GET /api/activities`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityList {
  #[serde(default)]
  pub activities: Vec<Activity>,
  #[serde(default)]
  pub current_pet: Option<String>,
}
