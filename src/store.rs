//! Application store: the single owner of client state
//!
//! The store mediates between user intents and the API client. Network calls
//! happen outside the state lock; their outcomes are applied as `Action`s so
//! every mutation lands atomically between suspension points.

use crate::api::{ApiClient, ApiError};
use crate::config::ClientConfig;
use crate::form::FormEdit;
use crate::models::{ActivityId, ReminderState};
use crate::poller::{spawn_poller, PollerHandle};
use crate::state::{Action, AppState};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};

/// Outcome of a submit intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
  /// Local validation failed; nothing was sent
  Invalid,
  Created,
  Failed,
}

#[derive(Clone)]
pub struct Store {
  api: ApiClient,
  state: Arc<RwLock<AppState>>,
  reminder_tx: Arc<watch::Sender<ReminderState>>,
}

impl Store {
  pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
    Ok(Self::with_client(ApiClient::new(config)?))
  }

  pub fn with_client(api: ApiClient) -> Self {
    let (reminder_tx, _) = watch::channel(ReminderState::default());
    Self {
      api,
      state: Arc::new(RwLock::new(AppState::new())),
      reminder_tx: Arc::new(reminder_tx),
    }
  }

  // ---------------------------------------------------------------------------
  // State Access
  // ---------------------------------------------------------------------------

  pub async fn snapshot(&self) -> AppState {
    self.state.read().await.clone()
  }

  /// Lend the current state to a renderer without cloning it
  pub async fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
    let state = self.state.read().await;
    f(&state)
  }

  /// Receiver notified whenever a fetched reminder differs from the last one
  pub fn subscribe_reminder(&self) -> watch::Receiver<ReminderState> {
    self.reminder_tx.subscribe()
  }

  async fn dispatch(&self, action: Action) {
    if let Action::ReminderLoaded(reminder) = &action {
      self.reminder_tx.send_if_modified(|current| {
        if current == reminder {
          return false;
        }
        *current = reminder.clone();
        true
      });
    }
    self.state.write().await.apply(action);
  }

  /// Message shown whenever the load cycle fails, whatever the cause
  pub fn load_error_message(&self) -> String {
    format!(
      "Unable to reach the pet care service at {}. Make sure the backend is running.",
      self.api.base_url()
    )
  }

  // ---------------------------------------------------------------------------
  // Load Cycle
  // ---------------------------------------------------------------------------

  /// Fetch activities and summary together, then the chat history.
  ///
  /// Any failure is reported with the same generic message and clears every
  /// loading flag, even when part of the data already arrived.
  pub async fn load(&self) {
    self.dispatch(Action::LoadStarted).await;

    match self.load_inner().await {
      Ok(()) => tracing::info!("initial load complete"),
      Err(e) => {
        tracing::error!(error = %e, "initial load failed");
        self.dispatch(Action::LoadFailed(self.load_error_message())).await;
      }
    }
  }

  async fn load_inner(&self) -> Result<(), ApiError> {
    self.reload_lists().await?;
    let history = self.api.get_chat_history().await?;
    self.dispatch(Action::ChatHistoryLoaded(history)).await;
    Ok(())
  }

  /// Clear the banner and run the load cycle again
  pub async fn retry(&self) {
    self.dispatch(Action::DismissError).await;
    self.load().await;
  }

  pub async fn dismiss_error(&self) {
    self.dispatch(Action::DismissError).await;
  }

  /// Re-fetch activities and summary concurrently and apply both together
  async fn reload_lists(&self) -> Result<(), ApiError> {
    let seq = self.state.write().await.begin_list_reload();

    let (list, summary) = tokio::join!(self.api.list_activities(), self.api.get_summary());
    let (list, summary) = (list?, summary?);

    tracing::debug!(seq, activities = list.activities.len(), "lists reloaded");
    self
      .dispatch(Action::ListsLoaded {
        seq,
        activities: list.activities,
        current_pet: list.current_pet,
        summary,
      })
      .await;
    Ok(())
  }

  /// Refresh everything an activity mutation invalidates.
  ///
  /// Only the list reload decides the outcome; a failed reminder fetch is
  /// logged like any other reminder check.
  async fn reload_after_mutation(&self) -> Result<(), ApiError> {
    let (lists, reminder) = tokio::join!(self.reload_lists(), self.api.get_reminder());
    match reminder {
      Ok(reminder) => self.dispatch(Action::ReminderLoaded(reminder)).await,
      Err(e) => tracing::warn!(error = %e, "reminder refresh after mutation failed"),
    }
    lists
  }

  // ---------------------------------------------------------------------------
  // Form and Submit Cycle
  // ---------------------------------------------------------------------------

  pub async fn edit_form(&self, edit: FormEdit) {
    self.dispatch(Action::EditForm(edit)).await;
  }

  /// Validate, create, then reload from the server.
  ///
  /// The new activity is never inserted locally; the displayed list only
  /// changes once the reload returns.
  pub async fn submit(&self) -> SubmitOutcome {
    let payload = {
      let mut state = self.state.write().await;
      match state.form.to_new_activity() {
        Ok(payload) => {
          state.apply(Action::SubmitStarted);
          payload
        }
        Err(errors) => {
          tracing::debug!(fields = errors.len(), "form rejected locally");
          state.apply(Action::FormRejected(errors));
          return SubmitOutcome::Invalid;
        }
      }
    };

    let result = match self.api.create_activity(&payload).await {
      Ok(created) => {
        tracing::info!(id = %created.id, kind = %created.activity_type, "activity created");
        self.reload_after_mutation().await
      }
      Err(e) => Err(e),
    };

    match result {
      Ok(()) => {
        self.dispatch(Action::SubmitSucceeded).await;
        SubmitOutcome::Created
      }
      Err(e) => {
        tracing::error!(error = %e, "activity submission failed");
        self.dispatch(Action::SubmitFailed(e.to_string())).await;
        SubmitOutcome::Failed
      }
    }
  }

  // ---------------------------------------------------------------------------
  // Delete Cycle
  // ---------------------------------------------------------------------------

  pub async fn delete_activity(&self, id: ActivityId) -> Result<(), ApiError> {
    self.dispatch(Action::DeleteStarted(id.clone())).await;

    let result = match self.api.delete_activity(&id).await {
      Ok(_) => self.reload_after_mutation().await,
      Err(e) => Err(e),
    };

    match result {
      Ok(()) => {
        tracing::info!(%id, "activity deleted");
        self.dispatch(Action::DeleteFinished(id)).await;
        Ok(())
      }
      Err(e) => {
        tracing::error!(%id, error = %e, "activity delete failed");
        self.dispatch(Action::DeleteFailed(id, e.to_string())).await;
        Err(e)
      }
    }
  }

  // ---------------------------------------------------------------------------
  // Chat Cycle
  // ---------------------------------------------------------------------------

  /// Send a message; the transcript only grows once the server answers.
  ///
  /// Returns `false` for blank input or a failed round trip.
  pub async fn send_chat(&self, text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
      return false;
    }

    self.dispatch(Action::ChatStarted).await;
    match self.api.send_chat_message(text).await {
      Ok(exchange) => {
        self.dispatch(Action::ChatSucceeded(exchange)).await;
        true
      }
      Err(e) => {
        tracing::error!(error = %e, "chat message failed");
        self.dispatch(Action::ChatFailed(e.to_string())).await;
        false
      }
    }
  }

  // ---------------------------------------------------------------------------
  // Reminder
  // ---------------------------------------------------------------------------

  /// Fetch the reminder once. Failures are logged and never reach the banner.
  pub async fn check_reminder(&self) {
    match self.api.get_reminder().await {
      Ok(reminder) => self.dispatch(Action::ReminderLoaded(reminder)).await,
      Err(e) => tracing::warn!(error = %e, "reminder check failed"),
    }
  }

  /// Check now and then every `period` until the returned handle is dropped
  pub fn start_reminder_polling(&self, period: Duration) -> PollerHandle {
    let store = self.clone();
    spawn_poller(period, move || {
      let store = store.clone();
      async move { store.check_reminder().await }
    })
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
