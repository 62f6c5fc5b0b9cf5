//! Activity form state and client-side validation
//!
//! Validation here only checks presence and positivity. The backend still
//! performs the authoritative checks when the activity is created.

use crate::models::{ActivityType, NewActivity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
  PetName,
  ActivityType,
  Duration,
  DateTime,
}

impl fmt::Display for FormField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      FormField::PetName => "petName",
      FormField::ActivityType => "activityType",
      FormField::Duration => "duration",
      FormField::DateTime => "dateTime",
    };
    f.write_str(name)
  }
}

/// Field-keyed validation messages; empty means the form may be submitted
pub type FormErrors = BTreeMap<FormField, String>;

/// A single user edit to the form
#[derive(Debug, Clone, PartialEq)]
pub enum FormEdit {
  PetName(String),
  ActivityType(ActivityType),
  Duration(String),
  DateTime(DateTime<Utc>),
}

impl FormEdit {
  pub fn field(&self) -> FormField {
    match self {
      FormEdit::PetName(_) => FormField::PetName,
      FormEdit::ActivityType(_) => FormField::ActivityType,
      FormEdit::Duration(_) => FormField::Duration,
      FormEdit::DateTime(_) => FormField::DateTime,
    }
  }
}

/// Not-yet-submitted activity plus its validation errors
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
  pub pet_name: String,
  pub activity_type: ActivityType,
  /// Raw text as typed; parsed on submit
  pub duration: String,
  pub date_time: DateTime<Utc>,
  pub errors: FormErrors,
}

impl Default for FormState {
  fn default() -> Self {
    Self {
      pet_name: String::new(),
      activity_type: ActivityType::default(),
      duration: String::new(),
      date_time: Utc::now(),
      errors: FormErrors::new(),
    }
  }
}

impl FormState {
  /// Apply an edit and clear the stale error for that field
  pub fn edit(&mut self, edit: FormEdit) {
    self.errors.remove(&edit.field());
    match edit {
      FormEdit::PetName(name) => self.pet_name = name,
      FormEdit::ActivityType(activity_type) => self.activity_type = activity_type,
      FormEdit::Duration(duration) => self.duration = duration,
      FormEdit::DateTime(date_time) => self.date_time = date_time,
    }
  }

  pub fn duration_label(&self) -> &'static str {
    self.activity_type.duration_label()
  }

  pub fn duration_placeholder(&self) -> &'static str {
    self.activity_type.duration_placeholder()
  }

  /// Check the current fields without touching `self.errors`
  pub fn validate(&self) -> FormErrors {
    let mut errors = FormErrors::new();

    if self.pet_name.trim().is_empty() {
      errors.insert(FormField::PetName, "Pet name is required".to_string());
    }

    if parse_duration(&self.duration).is_none() {
      errors.insert(
        FormField::Duration,
        format!("{} must be a number greater than 0", self.duration_label()),
      );
    }

    errors
  }

  /// Build the create payload, or the errors that block submission
  pub fn to_new_activity(&self) -> Result<NewActivity, FormErrors> {
    let errors = self.validate();
    let duration = match parse_duration(&self.duration) {
      Some(duration) if errors.is_empty() => duration,
      _ => return Err(errors),
    };

    Ok(NewActivity {
      pet_name: self.pet_name.trim().to_string(),
      activity_type: self.activity_type,
      duration,
      date_time: self.date_time,
    })
  }

  /// Defaults for the next entry, keeping the pet name
  pub fn reset(&mut self) {
    *self = FormState {
      pet_name: std::mem::take(&mut self.pet_name),
      ..FormState::default()
    };
  }
}

fn parse_duration(raw: &str) -> Option<f64> {
  raw
    .trim()
    .parse::<f64>()
    .ok()
    .filter(|d| d.is_finite() && *d > 0.0)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
