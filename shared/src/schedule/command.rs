//! Schedule commands - user intents sent by the host

use super::entry::PaymentStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single field edit on one entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum EntryChange {
    Amount(f64),
    Percentage(f64),
    Status(PaymentStatus),
    DueDate(NaiveDate),
    Description(String),
}

impl EntryChange {
    pub fn field_name(&self) -> &'static str {
        match self {
            EntryChange::Amount(_) => "amount",
            EntryChange::Percentage(_) => "percentage",
            EntryChange::Status(_) => "status",
            EntryChange::DueDate(_) => "dueDate",
            EntryChange::Description(_) => "description",
        }
    }

    /// Whether this change touches the frozen money fields of a paid entry
    pub fn touches_money(&self) -> bool {
        matches!(self, EntryChange::Amount(_) | EntryChange::Percentage(_))
    }
}

/// Command payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleCommandPayload {
    /// Synthesize the default entry if the schedule is empty
    EnsureDefault,
    /// The invoice total changed
    ChangeInvoiceAmount { amount: f64 },
    /// Edit one field of one entry
    UpdateEntry { entry_id: String, change: EntryChange },
    /// Remove one entry
    RemoveEntry { entry_id: String },
    /// Append a new entry ("add payment")
    AddEntry {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        due_date: Option<NaiveDate>,
    },
}

impl ScheduleCommandPayload {
    pub fn name(&self) -> &'static str {
        match self {
            ScheduleCommandPayload::EnsureDefault => "ensure_default",
            ScheduleCommandPayload::ChangeInvoiceAmount { .. } => "change_invoice_amount",
            ScheduleCommandPayload::UpdateEntry { .. } => "update_entry",
            ScheduleCommandPayload::RemoveEntry { .. } => "remove_entry",
            ScheduleCommandPayload::AddEntry { .. } => "add_entry",
        }
    }
}

/// Schedule command with its idempotency key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleCommand {
    /// Idempotency key, generated by the host
    pub command_id: String,
    /// Unix milliseconds at creation
    pub timestamp: i64,
    pub payload: ScheduleCommandPayload,
}

impl ScheduleCommand {
    pub fn new(payload: ScheduleCommandPayload) -> Self {
        Self {
            command_id: crate::util::new_command_id(),
            timestamp: crate::util::now_millis(),
            payload,
        }
    }
}
