//! Payment schedule types
//!
//! - Entries: partial payments attached to an invoice
//! - Commands: user intents (amount change, entry edit/add/remove)
//! - Responses: command outcomes with stable error codes

pub mod command;
pub mod entry;
pub mod invoice;
pub mod types;

// Re-exports
pub use command::{EntryChange, ScheduleCommand, ScheduleCommandPayload};
pub use entry::{PaymentScheduleEntry, PaymentStatus};
pub use invoice::InvoiceSchedule;
pub use types::*;
