//! UpdateEntry command handler
//!
//! Edits one field of one entry. Amount and percentage stay in sync against
//! the current invoice total; paid entries reject money edits. Marking an
//! entry paid freezes its amount and does not touch the other entries.

use shared::schedule::{EntryChange, PaymentScheduleEntry, PaymentStatus};

use crate::schedule_money::{
    amount_for_percentage, percentage_of, percentage_to_f64, to_decimal, to_f64, validate_amount,
    validate_percentage,
};
use crate::schedules::traits::{
    CommandContext, CommandHandler, CommandOutcome, PaidEntryAction, ScheduleError,
};

/// Apply `change` to the entry `entry_id`; other entries are untouched
pub fn update_entry(
    schedules: &[PaymentScheduleEntry],
    invoice_amount: f64,
    entry_id: &str,
    change: &EntryChange,
) -> Result<Vec<PaymentScheduleEntry>, ScheduleError> {
    let index = schedules
        .iter()
        .position(|e| e.id == entry_id)
        .ok_or_else(|| ScheduleError::EntryNotFound(entry_id.to_string()))?;

    if schedules[index].is_paid() && change.touches_money() {
        tracing::warn!(entry_id = %entry_id, field = change.field_name(), "Rejected edit of paid entry");
        return Err(ScheduleError::PaidEntryImmutable {
            entry_id: entry_id.to_string(),
            action: PaidEntryAction::Edit,
        });
    }

    let invoice = to_decimal(invoice_amount);
    let mut next = schedules.to_vec();
    let entry = &mut next[index];

    match change {
        EntryChange::Amount(value) => {
            validate_amount(*value, "amount")?;
            let amount = to_decimal(*value);
            entry.amount = to_f64(amount);
            entry.percentage = percentage_to_f64(percentage_of(amount, invoice));
        }
        EntryChange::Percentage(value) => {
            validate_percentage(*value)?;
            let percentage = to_decimal(*value);
            entry.percentage = *value;
            entry.amount = to_f64(amount_for_percentage(invoice, percentage));
        }
        EntryChange::Status(PaymentStatus::Paid) if !entry.is_paid() => {
            entry.percentage = percentage_to_f64(percentage_of(to_decimal(entry.amount), invoice));
            entry.status = PaymentStatus::Paid;
            tracing::info!(entry_id = %entry_id, amount = entry.amount, "Payment marked paid");
        }
        EntryChange::Status(status) => {
            entry.status = *status;
        }
        EntryChange::DueDate(date) => {
            entry.due_date = *date;
        }
        EntryChange::Description(description) => {
            entry.description = description.clone();
        }
    }

    Ok(next)
}

/// UpdateEntry action
#[derive(Debug, Clone)]
pub struct UpdateEntryAction {
    pub entry_id: String,
    pub change: EntryChange,
}

impl CommandHandler for UpdateEntryAction {
    fn execute(&self, ctx: &CommandContext<'_>) -> Result<CommandOutcome, ScheduleError> {
        let schedules = update_entry(ctx.schedules, ctx.invoice_amount, &self.entry_id, &self.change)?;
        if schedules.as_slice() == ctx.schedules {
            return Ok(CommandOutcome::unchanged());
        }
        Ok(CommandOutcome::changed(schedules))
    }
}
