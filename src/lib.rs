pub mod api;
pub mod config;
pub mod form;
pub mod models;
pub mod poller;
pub mod state;
pub mod store;

#[cfg(test)]
mod test_utils;

pub use api::{ApiClient, ApiError};
pub use config::{ClientConfig, ConfigError};
pub use store::{Store, SubmitOutcome};

use models::ReminderState;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Api(#[from] ApiError),

  #[error("Failed to listen for shutdown signal: {0}")]
  Signal(#[from] std::io::Error),
}

/// Install the fmt subscriber, filtered by `RUST_LOG` (default `info`)
pub fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Headless client: load once, then keep polling the reminder until Ctrl-C
pub async fn run() -> Result<(), RunError> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();
  init_tracing();

  let config = ClientConfig::from_env()?;
  tracing::info!(api = %config.api_base_url, "starting pet care client");

  let store = Store::new(&config)?;
  store.load().await;

  store
    .with_state(|state| {
      if let Some(error) = &state.error {
        tracing::error!("{}", error);
        return;
      }
      for activity in &state.activities {
        tracing::info!(
          pet = %activity.pet_name,
          kind = %activity.activity_type,
          amount = activity.duration,
          at = %activity.date_time,
          "activity"
        );
      }
      tracing::info!(
        walk_minutes = state.summary.total_walk_minutes,
        walk_progress = state.walk_progress(),
        meals = state.summary.meal_count,
        medications = state.summary.medication_count,
        chat_messages = state.chat.len(),
        "today"
      );
    })
    .await;

  let watcher = tokio::spawn(watch_reminder(store.subscribe_reminder()));
  let mut poller = store.start_reminder_polling(config.reminder_interval);

  tokio::signal::ctrl_c().await?;
  poller.stop();
  watcher.abort();
  tracing::info!("shutting down");

  Ok(())
}

/// Log whenever the reminder shown to the user changes
async fn watch_reminder(mut reminders: watch::Receiver<ReminderState>) {
  while reminders.changed().await.is_ok() {
    let reminder = reminders.borrow_and_update().clone();
    if reminder.show_reminder {
      tracing::info!(message = %reminder.message, "reminder");
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::*;

  #[tokio::test]
  async fn test_reminder_watcher_ends_with_store() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("GET", "/api/reminder")
      .with_status(200)
      .with_body(reminder_body(true, "Walk time"))
      .create_async()
      .await;

    let store = test_store(&server.url());
    let watcher = tokio::spawn(watch_reminder(store.subscribe_reminder()));
    store.check_reminder().await;
    drop(store);

    tokio::time::timeout(std::time::Duration::from_secs(5), watcher)
      .await
      .expect("watcher kept running after the store was dropped")
      .unwrap();
  }
}
