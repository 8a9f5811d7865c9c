//! Shared types for the payment schedule engine
//!
//! Types exchanged between the engine and its host: schedule entries, the
//! invoice projection, commands and responses, error codes and
//! notification payloads.

pub mod error;
pub mod message;
pub mod schedule;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ErrorCategory, ErrorCode};
pub use message::{NotificationCategory, NotificationLevel, NotificationPayload};
pub use schedule::{
    CommandError, CommandResponse, EntryChange, InvoiceSchedule, PaymentScheduleEntry,
    PaymentStatus, ScheduleCommand, ScheduleCommandPayload, ScheduleSummary,
};
