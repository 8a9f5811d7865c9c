//! EnsureDefault command handler
//!
//! An invoice loaded without any payment schedule gets exactly one entry
//! covering 100% of the invoice total, due today.

use chrono::NaiveDate;
use shared::schedule::PaymentScheduleEntry;

use crate::schedule_money::{to_decimal, to_f64};
use crate::schedules::ordinal::ordinal_description;
use crate::schedules::traits::{
    CommandContext, CommandHandler, CommandOutcome, ScheduleError, ScheduleRules,
};

/// Return `schedules` unchanged, or the single default entry when empty
pub fn ensure_default_schedule(
    schedules: &[PaymentScheduleEntry],
    invoice_amount: f64,
    today: NaiveDate,
) -> Vec<PaymentScheduleEntry> {
    ensure_default_schedule_with(&ScheduleRules::default(), schedules, invoice_amount, today)
        .unwrap_or_else(|| schedules.to_vec())
}

/// Build the default entry if `schedules` is empty; `None` when nothing to do
pub fn ensure_default_schedule_with(
    rules: &ScheduleRules,
    schedules: &[PaymentScheduleEntry],
    invoice_amount: f64,
    today: NaiveDate,
) -> Option<Vec<PaymentScheduleEntry>> {
    if !schedules.is_empty() {
        return None;
    }

    let entry = PaymentScheduleEntry::new(
        ordinal_description(1, &rules.label_noun),
        today,
        to_f64(to_decimal(invoice_amount)),
        100.0,
    );
    Some(vec![entry])
}

/// EnsureDefault action
#[derive(Debug, Clone, Default)]
pub struct EnsureDefaultAction;

impl CommandHandler for EnsureDefaultAction {
    fn execute(&self, ctx: &CommandContext<'_>) -> Result<CommandOutcome, ScheduleError> {
        match ensure_default_schedule_with(ctx.rules, ctx.schedules, ctx.invoice_amount, ctx.today)
        {
            Some(schedules) => {
                tracing::debug!(
                    invoice_amount = ctx.invoice_amount,
                    "Synthesized default payment schedule"
                );
                Ok(CommandOutcome::changed(schedules))
            }
            None => Ok(CommandOutcome::unchanged()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::schedule::PaymentStatus;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_empty_schedule_gets_default_entry() {
        let schedules = ensure_default_schedule(&[], 1000.0, today());

        assert_eq!(schedules.len(), 1);
        let entry = &schedules[0];
        assert_eq!(entry.amount, 1000.0);
        assert_eq!(entry.percentage, 100.0);
        assert_eq!(entry.status, PaymentStatus::Unpaid);
        assert_eq!(entry.description, "1st payment");
        assert_eq!(entry.due_date, today());
    }

    #[test]
    fn test_non_empty_schedule_is_returned_unchanged() {
        let existing = vec![PaymentScheduleEntry::new("Deposit", today(), 200.0, 20.0)];
        let schedules = ensure_default_schedule(&existing, 1000.0, today());
        assert_eq!(schedules, existing);
    }

    #[test]
    fn test_zero_invoice_still_gets_full_percentage() {
        let schedules = ensure_default_schedule(&[], 0.0, today());
        assert_eq!(schedules[0].amount, 0.0);
        assert_eq!(schedules[0].percentage, 100.0);
    }

    #[test]
    fn test_action_uses_configured_noun() {
        let rules = ScheduleRules {
            label_noun: "installment".to_string(),
            ..ScheduleRules::default()
        };
        let ctx = CommandContext::new(&[], 450.0, today(), &rules);
        let outcome = EnsureDefaultAction.execute(&ctx).unwrap();

        let schedules = outcome.schedules.unwrap();
        assert_eq!(schedules[0].description, "1st installment");
        assert!(outcome.notification.is_none());
    }

    #[test]
    fn test_action_is_noop_when_present() {
        let rules = ScheduleRules::default();
        let existing = vec![PaymentScheduleEntry::new("1st payment", today(), 450.0, 100.0)];
        let ctx = CommandContext::new(&existing, 450.0, today(), &rules);
        let outcome = EnsureDefaultAction.execute(&ctx).unwrap();
        assert!(!outcome.is_changed());
    }
}
