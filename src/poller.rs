//! Recurring reminder checks
//!
//! A poller runs one check immediately and then one per interval until its
//! handle is stopped or dropped.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
  Idle,
  Polling,
}

/// Owns the spawned polling task; the task is aborted on `stop` or drop
#[derive(Debug)]
pub struct PollerHandle {
  task: Option<JoinHandle<()>>,
}

impl PollerHandle {
  pub fn state(&self) -> PollerState {
    match &self.task {
      Some(task) if !task.is_finished() => PollerState::Polling,
      _ => PollerState::Idle,
    }
  }

  pub fn stop(&mut self) {
    if let Some(task) = self.task.take() {
      task.abort();
      tracing::debug!("reminder poller stopped");
    }
  }
}

impl Drop for PollerHandle {
  fn drop(&mut self) {
    self.stop();
  }
}

/// Spawn a task that awaits `check` now and then every `period`.
///
/// `check` is responsible for its own error handling; the poller never stops
/// on its own.
pub fn spawn_poller<F, Fut>(period: Duration, mut check: F) -> PollerHandle
where
  F: FnMut() -> Fut + Send + 'static,
  Fut: Future<Output = ()> + Send + 'static,
{
  let task = tokio::spawn(async move {
    let mut ticker = interval(period);
    // A slow check delays the schedule instead of firing a burst afterwards
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
      // First tick completes immediately
      ticker.tick().await;
      check().await;
    }
  });

  tracing::debug!(?period, "reminder poller started");
  PollerHandle { task: Some(task) }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
