//! AddEntry command handler
//!
//! Appends an unpaid entry labeled by its position. The new entry takes the
//! part of the invoice total not yet covered by the schedule (zero when the
//! schedule already covers it).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::message::NotificationPayload;
use shared::schedule::PaymentScheduleEntry;

use crate::schedule_money::{percentage_of, percentage_to_f64, sum_amounts, to_decimal, to_f64};
use crate::schedules::ordinal::ordinal_description;
use crate::schedules::traits::{
    CommandContext, CommandHandler, CommandOutcome, ScheduleError, ScheduleRules,
};

/// Append a new entry with default rules
pub fn add_entry(
    schedules: &[PaymentScheduleEntry],
    invoice_amount: f64,
    due_date: NaiveDate,
) -> Vec<PaymentScheduleEntry> {
    add_entry_with(&ScheduleRules::default(), schedules, invoice_amount, due_date)
}

/// Append a new unpaid entry covering the unallocated remainder
pub fn add_entry_with(
    rules: &ScheduleRules,
    schedules: &[PaymentScheduleEntry],
    invoice_amount: f64,
    due_date: NaiveDate,
) -> Vec<PaymentScheduleEntry> {
    let invoice = to_decimal(invoice_amount);
    let scheduled = sum_amounts(schedules.iter().map(|e| &e.amount));
    let unallocated = (invoice - scheduled).max(Decimal::ZERO);

    let entry = PaymentScheduleEntry::new(
        ordinal_description(schedules.len() + 1, &rules.label_noun),
        due_date,
        to_f64(unallocated),
        percentage_to_f64(percentage_of(unallocated, invoice)),
    );

    let mut next = schedules.to_vec();
    next.push(entry);
    next
}

/// AddEntry action
#[derive(Debug, Clone, Default)]
pub struct AddEntryAction {
    /// Defaults to today
    pub due_date: Option<NaiveDate>,
}

impl CommandHandler for AddEntryAction {
    fn execute(&self, ctx: &CommandContext<'_>) -> Result<CommandOutcome, ScheduleError> {
        let due_date = self.due_date.unwrap_or(ctx.today);
        let schedules = add_entry_with(ctx.rules, ctx.schedules, ctx.invoice_amount, due_date);

        let added = schedules.last().map(|e| e.description.clone()).unwrap_or_default();
        tracing::info!(count = schedules.len(), due_date = %due_date, "Payment added");

        Ok(CommandOutcome::changed(schedules).with_notification(NotificationPayload::success(
            "Payment added",
            format!("\"{}\" was added", added),
        )))
    }
}
