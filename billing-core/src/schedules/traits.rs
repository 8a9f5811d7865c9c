//! Command handling contract for payment schedule actions

use crate::schedule_money::{MONEY_TOLERANCE, to_decimal, to_f64};
use crate::schedules::ordinal::DEFAULT_LABEL_NOUN;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::message::NotificationPayload;
use shared::schedule::{CommandError, PaymentScheduleEntry};
use thiserror::Error;

/// What a rejected paid-entry operation tried to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaidEntryAction {
    Edit,
    Remove,
}

impl PaidEntryAction {
    fn as_str(&self) -> &'static str {
        match self {
            PaidEntryAction::Edit => "edited",
            PaidEntryAction::Remove => "removed",
        }
    }
}

/// Schedule errors
///
/// All of them are local validation rejections: the operation aborts and
/// the schedule list is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("Invoice total {invoice_amount:.2} is less than already paid amounts {total_paid:.2}")]
    NegativeRemainder { invoice_amount: f64, total_paid: f64 },

    #[error("Paid entry {entry_id} cannot be {}", .action.as_str())]
    PaidEntryImmutable {
        entry_id: String,
        action: PaidEntryAction,
    },

    #[error("Schedule entry not found: {0}")]
    EntryNotFound(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid percentage: {0}")]
    InvalidPercentage(String),
}

impl ScheduleError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ScheduleError::NegativeRemainder { .. } => ErrorCode::NegativeRemainder,
            ScheduleError::PaidEntryImmutable { .. } => ErrorCode::PaidEntryImmutable,
            ScheduleError::EntryNotFound(_) => ErrorCode::ScheduleEntryNotFound,
            ScheduleError::InvalidAmount(_) => ErrorCode::InvalidAmount,
            ScheduleError::InvalidPercentage(_) => ErrorCode::InvalidPercentage,
        }
    }

    /// Message shown to the person editing the invoice
    pub fn user_message(&self) -> String {
        match self {
            ScheduleError::NegativeRemainder { .. } => {
                "Invoice total is less than already paid amounts; adjust manually".to_string()
            }
            ScheduleError::PaidEntryImmutable {
                action: PaidEntryAction::Edit,
                ..
            } => "Cannot change the amount or percentage of a paid payment".to_string(),
            ScheduleError::PaidEntryImmutable {
                action: PaidEntryAction::Remove,
                ..
            } => "Cannot remove a paid payment".to_string(),
            ScheduleError::EntryNotFound(_) => "This payment no longer exists".to_string(),
            ScheduleError::InvalidAmount(_) => "Please enter a valid amount".to_string(),
            ScheduleError::InvalidPercentage(_) => {
                "Percentage must be between 0 and 100".to_string()
            }
        }
    }

    /// Rejection notification for the notification sink
    pub fn to_notification(&self) -> NotificationPayload {
        let data = match self {
            ScheduleError::NegativeRemainder {
                invoice_amount,
                total_paid,
            } => serde_json::json!({
                "code": self.code(),
                "invoice_amount": invoice_amount,
                "total_paid": total_paid,
            }),
            ScheduleError::PaidEntryImmutable { entry_id, .. }
            | ScheduleError::EntryNotFound(entry_id) => serde_json::json!({
                "code": self.code(),
                "entry_id": entry_id,
            }),
            _ => serde_json::json!({ "code": self.code() }),
        };
        NotificationPayload::error("Payment schedule", self.user_message()).with_data(data)
    }
}

impl From<ScheduleError> for CommandError {
    fn from(err: ScheduleError) -> Self {
        CommandError::new(err.code(), err.to_string())
    }
}

/// Tunables threaded through every command
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRules {
    /// Changes at or below this are treated as no-ops during reconciliation
    pub change_tolerance: Decimal,
    /// Noun used in ordinal labels ("1st payment")
    pub label_noun: String,
}

impl Default for ScheduleRules {
    fn default() -> Self {
        Self {
            change_tolerance: MONEY_TOLERANCE,
            label_noun: DEFAULT_LABEL_NOUN.to_string(),
        }
    }
}

/// Read-only view of the session state a command executes against
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    pub schedules: &'a [PaymentScheduleEntry],
    pub invoice_amount: f64,
    pub today: NaiveDate,
    pub rules: &'a ScheduleRules,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        schedules: &'a [PaymentScheduleEntry],
        invoice_amount: f64,
        today: NaiveDate,
        rules: &'a ScheduleRules,
    ) -> Self {
        Self {
            schedules,
            invoice_amount,
            today,
            rules,
        }
    }

    /// Find an entry by id
    pub fn entry(&self, entry_id: &str) -> Result<&'a PaymentScheduleEntry, ScheduleError> {
        self.schedules
            .iter()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| ScheduleError::EntryNotFound(entry_id.to_string()))
    }
}

/// Result of a successful command
///
/// `schedules == None` means the list is unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOutcome {
    pub schedules: Option<Vec<PaymentScheduleEntry>>,
    pub invoice_amount: Option<f64>,
    pub notification: Option<NotificationPayload>,
}

impl CommandOutcome {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn changed(schedules: Vec<PaymentScheduleEntry>) -> Self {
        Self {
            schedules: Some(schedules),
            ..Self::default()
        }
    }

    pub fn with_invoice_amount(mut self, amount: f64) -> Self {
        self.invoice_amount = Some(to_f64(to_decimal(amount)));
        self
    }

    pub fn with_notification(mut self, notification: NotificationPayload) -> Self {
        self.notification = Some(notification);
        self
    }

    pub fn is_changed(&self) -> bool {
        self.schedules.is_some()
    }
}

/// One schedule command
pub trait CommandHandler {
    fn execute(&self, ctx: &CommandContext<'_>) -> Result<CommandOutcome, ScheduleError>;
}
