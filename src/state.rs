//! Client state and its transitions
//!
//! `AppState` is plain data. Every mutation goes through `AppState::apply`,
//! which is synchronous and free of I/O; the store performs network calls and
//! feeds their outcomes back in as `Action`s.

use crate::form::{FormEdit, FormErrors, FormState};
use crate::models::{Activity, ActivityId, ChatExchange, ChatMessage, DailySummary, ReminderState};
use serde::Serialize;
use std::collections::BTreeSet;

/// Independent in-flight markers so unrelated operations don't block each other
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingFlags {
  pub activities: bool,
  pub submitting: bool,
  pub chat: bool,
}

impl LoadingFlags {
  pub fn any(&self) -> bool {
    self.activities || self.submitting || self.chat
  }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
  pub activities: Vec<Activity>,
  pub current_pet: Option<String>,
  pub summary: DailySummary,
  pub reminder: ReminderState,
  pub form: FormState,
  pub chat: Vec<ChatMessage>,
  pub loading: LoadingFlags,
  pub pending_deletes: BTreeSet<ActivityId>,
  /// Single banner shown with a retry action
  pub error: Option<String>,

  #[serde(skip)]
  next_list_seq: u64,
  #[serde(skip)]
  applied_list_seq: u64,
}

/// Everything that can change `AppState`
#[derive(Debug, Clone)]
pub enum Action {
  LoadStarted,
  /// Activities and summary from the same reload, tagged with its sequence
  ListsLoaded {
    seq: u64,
    activities: Vec<Activity>,
    current_pet: Option<String>,
    summary: DailySummary,
  },
  ChatHistoryLoaded(Vec<ChatMessage>),
  LoadFailed(String),

  EditForm(FormEdit),
  FormRejected(FormErrors),
  SubmitStarted,
  SubmitSucceeded,
  SubmitFailed(String),

  DeleteStarted(ActivityId),
  DeleteFinished(ActivityId),
  DeleteFailed(ActivityId, String),

  ChatStarted,
  ChatSucceeded(ChatExchange),
  ChatFailed(String),

  ReminderLoaded(ReminderState),
  DismissError,
}

impl AppState {
  pub fn new() -> Self {
    Self::default()
  }

  /// Reserve the sequence number for a list reload about to be issued
  pub fn begin_list_reload(&mut self) -> u64 {
    self.next_list_seq += 1;
    self.next_list_seq
  }

  pub fn walk_progress(&self) -> f64 {
    self.summary.walk_progress()
  }

  pub fn is_delete_pending(&self, id: &ActivityId) -> bool {
    self.pending_deletes.contains(id)
  }

  pub fn apply(&mut self, action: Action) {
    match action {
      Action::LoadStarted => {
        self.loading.activities = true;
        self.error = None;
      }
      Action::ListsLoaded {
        seq,
        activities,
        current_pet,
        summary,
      } => {
        // An older reload finishing late must not overwrite newer data
        if seq < self.applied_list_seq {
          tracing::debug!(seq, applied = self.applied_list_seq, "dropping stale list response");
          return;
        }
        self.applied_list_seq = seq;
        self.activities = activities;
        self.summary = summary;
        if self.form.pet_name.trim().is_empty() {
          if let Some(pet) = &current_pet {
            self.form.pet_name = pet.clone();
          }
        }
        self.current_pet = current_pet;
      }
      Action::ChatHistoryLoaded(messages) => {
        self.chat = messages;
        self.loading.activities = false;
      }
      Action::LoadFailed(message) => {
        self.loading = LoadingFlags::default();
        self.error = Some(message);
      }

      Action::EditForm(edit) => self.form.edit(edit),
      Action::FormRejected(errors) => self.form.errors = errors,
      Action::SubmitStarted => {
        self.form.errors.clear();
        self.loading.submitting = true;
        self.error = None;
      }
      Action::SubmitSucceeded => {
        self.loading.submitting = false;
        self.form.reset();
      }
      Action::SubmitFailed(message) => {
        self.loading.submitting = false;
        self.error = Some(message);
      }

      Action::DeleteStarted(id) => {
        self.pending_deletes.insert(id);
      }
      Action::DeleteFinished(id) => {
        self.pending_deletes.remove(&id);
      }
      Action::DeleteFailed(id, message) => {
        self.pending_deletes.remove(&id);
        self.error = Some(message);
      }

      Action::ChatStarted => self.loading.chat = true,
      Action::ChatSucceeded(exchange) => {
        self.loading.chat = false;
        self.chat.push(exchange.user_message);
        self.chat.push(exchange.ai_message);
      }
      Action::ChatFailed(message) => {
        self.loading.chat = false;
        self.error = Some(message);
      }

      Action::ReminderLoaded(reminder) => self.reminder = reminder,
      Action::DismissError => self.error = None,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
