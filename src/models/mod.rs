pub mod activity;
pub mod chat;
pub mod summary;

pub use activity::{Activity, ActivityId, ActivityList, ActivityType, NewActivity, RecordId};
pub use chat::{ChatExchange, ChatMessage, ChatRole};
pub use summary::{DailySummary, ReminderState};
