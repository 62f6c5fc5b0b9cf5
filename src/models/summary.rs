use serde::{Deserialize, Serialize};

/// Walk minutes that fill the daily progress bar
pub const WALK_GOAL_MINUTES: f64 = 60.0;

/// Backend-computed aggregate for the current day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
  #[serde(default)]
  pub total_walk_minutes: f64,
  #[serde(default)]
  pub meal_count: u32,
  #[serde(default)]
  pub medication_count: u32,
}

impl DailySummary {
  /// Fraction of the daily walk goal reached, clamped to `[0, 1]`
  pub fn walk_progress(&self) -> f64 {
    if !self.total_walk_minutes.is_finite() || self.total_walk_minutes <= 0.0 {
      return 0.0;
    }
    (self.total_walk_minutes / WALK_GOAL_MINUTES).min(1.0)
  }
}

/// Advisory reminder; never authoritative over other state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderState {
  #[serde(default)]
  pub show_reminder: bool,
  #[serde(default)]
  pub message: String,
}
