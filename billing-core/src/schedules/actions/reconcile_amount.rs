//! ChangeInvoiceAmount command handler
//!
//! Keeps the schedule consistent with a new invoice total:
//! - paid entries keep their frozen amounts, only their percentage moves
//! - the remainder (new total - paid) is spread over unpaid entries in
//!   proportion to their previous amounts, or equally if those were all zero
//! - a total below the paid sum is rejected and nothing changes
//!
//! Amounts are rounded to cents; the unpaid entry with the largest previous
//! share absorbs the rounding residue so the entries sum to the total.

use rust_decimal::Decimal;
use shared::message::NotificationPayload;
use shared::schedule::PaymentScheduleEntry;

use crate::schedule_money::{
    differs, percentage_of, percentage_to_f64, round_money, sum_amounts, to_decimal, to_f64,
    validate_amount,
};
use crate::schedules::traits::{
    CommandContext, CommandHandler, CommandOutcome, ScheduleError, ScheduleRules,
};

/// Result of reconciling a schedule against a new invoice total
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub schedules: Vec<PaymentScheduleEntry>,
    /// Some entry moved by more than the change tolerance
    pub changed: bool,
    pub paid_count: usize,
    pub unpaid_count: usize,
}

impl Reconciliation {
    /// Informational notice, only when paid entries were kept while unpaid
    /// ones were redistributed
    pub fn notification(&self) -> Option<NotificationPayload> {
        if !self.changed || self.paid_count == 0 || self.unpaid_count == 0 {
            return None;
        }
        let message = format!(
            "{} left unchanged, {} redistributed to match the new invoice total",
            count_label(self.paid_count, "paid payment"),
            count_label(self.unpaid_count, "unpaid payment"),
        );
        Some(
            NotificationPayload::info("Payment schedule updated", message).with_data(
                serde_json::json!({
                    "paid_unchanged": self.paid_count,
                    "unpaid_redistributed": self.unpaid_count,
                }),
            ),
        )
    }
}

fn count_label(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Reconcile `schedules` against `new_invoice_amount` with default rules
pub fn reconcile_on_amount_change(
    schedules: &[PaymentScheduleEntry],
    new_invoice_amount: f64,
) -> Result<Reconciliation, ScheduleError> {
    reconcile_on_amount_change_with(&ScheduleRules::default(), schedules, new_invoice_amount)
}

/// Reconcile `schedules` against `new_invoice_amount`
pub fn reconcile_on_amount_change_with(
    rules: &ScheduleRules,
    schedules: &[PaymentScheduleEntry],
    new_invoice_amount: f64,
) -> Result<Reconciliation, ScheduleError> {
    validate_amount(new_invoice_amount, "invoice amount")?;
    let invoice = to_decimal(new_invoice_amount);

    let (paid, unpaid): (Vec<usize>, Vec<usize>) =
        (0..schedules.len()).partition(|&i| schedules[i].is_paid());

    let total_paid = sum_amounts(paid.iter().map(|&i| &schedules[i].amount));
    let remaining = invoice - total_paid;
    if remaining < Decimal::ZERO {
        tracing::warn!(
            invoice_amount = new_invoice_amount,
            total_paid = %total_paid,
            "Invoice total below paid amounts, schedule left unchanged"
        );
        return Err(ScheduleError::NegativeRemainder {
            invoice_amount: new_invoice_amount,
            total_paid: to_f64(total_paid),
        });
    }

    let mut next = schedules.to_vec();

    for &i in &paid {
        let amount = to_decimal(next[i].amount);
        next[i].percentage = percentage_to_f64(percentage_of(amount, invoice));
    }

    if !unpaid.is_empty() {
        let previous: Vec<Decimal> = unpaid
            .iter()
            .map(|&i| to_decimal(schedules[i].amount))
            .collect();
        let amounts = redistribute(remaining, &previous);
        for (&i, amount) in unpaid.iter().zip(amounts) {
            next[i].amount = to_f64(amount);
            next[i].percentage = percentage_to_f64(percentage_of(amount, invoice));
        }
    }

    // Per-entry moves can each stay under the tolerance while the total
    // drifts past it, so the total is checked as well.
    let drift = (sum_amounts(schedules.iter().map(|e| &e.amount)) - invoice).abs();
    let changed = (!unpaid.is_empty() && drift > rules.change_tolerance)
        || schedules.iter().zip(&next).any(|(old, new)| {
            differs(old.amount, new.amount, rules.change_tolerance)
                || differs(old.percentage, new.percentage, rules.change_tolerance)
        });

    if changed {
        tracing::info!(
            invoice_amount = new_invoice_amount,
            paid = paid.len(),
            unpaid = unpaid.len(),
            remaining = %remaining,
            "Payment schedule redistributed"
        );
    }

    Ok(Reconciliation {
        schedules: if changed { next } else { schedules.to_vec() },
        changed,
        paid_count: paid.len(),
        unpaid_count: unpaid.len(),
    })
}

/// Split `remaining` over entries proportionally to `previous`
///
/// Equal split when every previous amount is zero. With a non-zero total a
/// zero-amount entry gets a zero share.
fn redistribute(remaining: Decimal, previous: &[Decimal]) -> Vec<Decimal> {
    let total_previous: Decimal = previous.iter().copied().sum();
    let count = Decimal::from(previous.len());

    let shares: Vec<Decimal> = previous
        .iter()
        .map(|amount| {
            if total_previous > Decimal::ZERO {
                *amount / total_previous
            } else {
                Decimal::ONE / count
            }
        })
        .collect();

    let mut amounts: Vec<Decimal> = shares
        .iter()
        .map(|share| round_money(remaining * *share))
        .collect();

    // largest share, last one on ties
    let absorber = shares
        .iter()
        .enumerate()
        .fold(0, |best, (i, share)| if *share >= shares[best] { i } else { best });
    let others: Decimal = amounts
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != absorber)
        .map(|(_, amount)| *amount)
        .sum();
    amounts[absorber] = (remaining - others).max(Decimal::ZERO);

    amounts
}

/// ChangeInvoiceAmount action
#[derive(Debug, Clone)]
pub struct ReconcileAmountAction {
    pub new_amount: f64,
}

impl CommandHandler for ReconcileAmountAction {
    fn execute(&self, ctx: &CommandContext<'_>) -> Result<CommandOutcome, ScheduleError> {
        let reconciliation =
            reconcile_on_amount_change_with(ctx.rules, ctx.schedules, self.new_amount)?;

        let notification = reconciliation.notification();
        let mut outcome = if reconciliation.changed {
            CommandOutcome::changed(reconciliation.schedules)
        } else {
            CommandOutcome::unchanged()
        }
        .with_invoice_amount(self.new_amount);

        if let Some(notification) = notification {
            outcome = outcome.with_notification(notification);
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::message::NotificationLevel;
    use shared::schedule::PaymentStatus;

    fn entry(id: &str, amount: f64, percentage: f64, status: PaymentStatus) -> PaymentScheduleEntry {
        let mut e = PaymentScheduleEntry::new(
            format!("{} payment", id),
            NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            amount,
            percentage,
        );
        e.id = id.to_string();
        e.status = status;
        e
    }

    fn total(schedules: &[PaymentScheduleEntry]) -> f64 {
        to_f64(sum_amounts(schedules.iter().map(|e| &e.amount)))
    }

    #[test]
    fn test_two_unpaid_entries_scale_down() {
        let schedules = vec![
            entry("a", 500.0, 50.0, PaymentStatus::Unpaid),
            entry("b", 500.0, 50.0, PaymentStatus::Unpaid),
        ];

        let result = reconcile_on_amount_change(&schedules, 800.0).unwrap();

        assert!(result.changed);
        assert_eq!(result.schedules[0].amount, 400.0);
        assert_eq!(result.schedules[0].percentage, 50.0);
        assert_eq!(result.schedules[1].amount, 400.0);
        assert_eq!(result.schedules[1].percentage, 50.0);
        // no paid entries -> no notice
        assert!(result.notification().is_none());
    }

    #[test]
    fn test_paid_entry_frozen_unpaid_takes_remainder() {
        let schedules = vec![
            entry("a", 300.0, 30.0, PaymentStatus::Paid),
            entry("b", 700.0, 70.0, PaymentStatus::Unpaid),
        ];

        let result = reconcile_on_amount_change(&schedules, 1200.0).unwrap();

        assert_eq!(result.schedules[0].amount, 300.0);
        assert_eq!(result.schedules[0].percentage, 25.0);
        assert_eq!(result.schedules[1].amount, 900.0);
        assert_eq!(result.schedules[1].percentage, 75.0);

        let notice = result.notification().unwrap();
        assert_eq!(notice.level, NotificationLevel::Info);
        assert!(notice.message.contains("1 paid payment left unchanged"));
        assert!(notice.message.contains("1 unpaid payment redistributed"));
    }

    #[test]
    fn test_total_below_paid_is_rejected() {
        let schedules = vec![
            entry("a", 300.0, 60.0, PaymentStatus::Paid),
            entry("b", 200.0, 40.0, PaymentStatus::Unpaid),
        ];

        let err = reconcile_on_amount_change(&schedules, 200.0).unwrap_err();

        assert_eq!(
            err,
            ScheduleError::NegativeRemainder {
                invoice_amount: 200.0,
                total_paid: 300.0,
            }
        );
    }

    #[test]
    fn test_total_equal_to_paid_zeroes_unpaid() {
        let schedules = vec![
            entry("a", 300.0, 60.0, PaymentStatus::Paid),
            entry("b", 200.0, 40.0, PaymentStatus::Unpaid),
        ];

        let result = reconcile_on_amount_change(&schedules, 300.0).unwrap();
        assert_eq!(result.schedules[0].percentage, 100.0);
        assert_eq!(result.schedules[1].amount, 0.0);
        assert_eq!(result.schedules[1].percentage, 0.0);
    }

    #[test]
    fn test_all_paid_only_percentages_move() {
        let schedules = vec![
            entry("a", 400.0, 40.0, PaymentStatus::Paid),
            entry("b", 600.0, 60.0, PaymentStatus::Paid),
        ];

        let result = reconcile_on_amount_change(&schedules, 2000.0).unwrap();

        assert!(result.changed);
        assert_eq!(result.schedules[0].amount, 400.0);
        assert_eq!(result.schedules[0].percentage, 20.0);
        assert_eq!(result.schedules[1].amount, 600.0);
        assert_eq!(result.schedules[1].percentage, 30.0);
        assert!(result.notification().is_none());
    }

    #[test]
    fn test_all_zero_unpaid_split_equally() {
        let schedules = vec![
            entry("a", 0.0, 0.0, PaymentStatus::Unpaid),
            entry("b", 0.0, 0.0, PaymentStatus::Unpaid),
            entry("c", 0.0, 0.0, PaymentStatus::Unpaid),
        ];

        let result = reconcile_on_amount_change(&schedules, 100.0).unwrap();

        let amounts: Vec<f64> = result.schedules.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![33.33, 33.33, 33.34]);
        assert_eq!(total(&result.schedules), 100.0);
    }

    #[test]
    fn test_zero_amount_entry_stays_zero_among_non_zero() {
        let schedules = vec![
            entry("a", 0.0, 0.0, PaymentStatus::Unpaid),
            entry("b", 500.0, 100.0, PaymentStatus::Unpaid),
        ];

        let result = reconcile_on_amount_change(&schedules, 800.0).unwrap();
        assert_eq!(result.schedules[0].amount, 0.0);
        assert_eq!(result.schedules[1].amount, 800.0);
    }

    #[test]
    fn test_rounding_residue_goes_to_largest_share() {
        let schedules = vec![
            entry("a", 100.0, 10.0, PaymentStatus::Unpaid),
            entry("b", 600.0, 60.0, PaymentStatus::Unpaid),
            entry("c", 300.0, 30.0, PaymentStatus::Unpaid),
        ];

        let result = reconcile_on_amount_change(&schedules, 999.99).unwrap();

        // 99.999 -> 100.00, 299.997 -> 300.00, b absorbs the rest
        assert_eq!(result.schedules[0].amount, 100.0);
        assert_eq!(result.schedules[2].amount, 300.0);
        assert_eq!(result.schedules[1].amount, 599.99);
        assert_eq!(total(&result.schedules), 999.99);
    }

    #[test]
    fn test_same_amount_is_noop() {
        let schedules = vec![
            entry("a", 300.0, 30.0, PaymentStatus::Paid),
            entry("b", 700.0, 70.0, PaymentStatus::Unpaid),
        ];

        let result = reconcile_on_amount_change(&schedules, 1000.0).unwrap();

        assert!(!result.changed);
        assert_eq!(result.schedules, schedules);
        assert!(result.notification().is_none());
    }

    #[test]
    fn test_change_within_tolerance_is_noop() {
        let schedules = vec![entry("a", 1000.0, 100.0, PaymentStatus::Unpaid)];
        let result = reconcile_on_amount_change(&schedules, 1000.01).unwrap();
        assert!(!result.changed);
        assert_eq!(result.schedules[0].amount, 1000.0);
    }

    #[test]
    fn test_small_moves_adding_up_are_applied() {
        let schedules = vec![
            entry("a", 100.0, 33.33, PaymentStatus::Unpaid),
            entry("b", 100.0, 33.33, PaymentStatus::Unpaid),
            entry("c", 100.0, 33.34, PaymentStatus::Unpaid),
        ];

        let result = reconcile_on_amount_change(&schedules, 300.03).unwrap();

        assert!(result.changed);
        assert_eq!(total(&result.schedules), 300.03);
    }

    #[test]
    fn test_percentages_match_amounts_on_large_invoice() {
        let schedules = vec![
            entry("a", 0.0, 0.0, PaymentStatus::Unpaid),
            entry("b", 0.0, 0.0, PaymentStatus::Unpaid),
            entry("c", 0.0, 0.0, PaymentStatus::Unpaid),
        ];
        let invoice = 1_000_000.0;

        let result = reconcile_on_amount_change(&schedules, invoice).unwrap();

        for e in &result.schedules {
            let implied = invoice * e.percentage / 100.0;
            assert!(
                (e.amount - implied).abs() <= 0.01,
                "amount {} vs implied {}",
                e.amount,
                implied
            );
        }
        assert_eq!(total(&result.schedules), invoice);
    }

    #[test]
    fn test_zero_invoice_amount() {
        let schedules = vec![
            entry("a", 500.0, 50.0, PaymentStatus::Unpaid),
            entry("b", 500.0, 50.0, PaymentStatus::Unpaid),
        ];

        let result = reconcile_on_amount_change(&schedules, 0.0).unwrap();
        for e in &result.schedules {
            assert_eq!(e.amount, 0.0);
            assert_eq!(e.percentage, 0.0);
        }
    }

    #[test]
    fn test_empty_schedule_is_noop() {
        let result = reconcile_on_amount_change(&[], 500.0).unwrap();
        assert!(!result.changed);
        assert!(result.schedules.is_empty());
    }

    #[test]
    fn test_invalid_invoice_amount() {
        let schedules = vec![entry("a", 100.0, 100.0, PaymentStatus::Unpaid)];
        assert!(matches!(
            reconcile_on_amount_change(&schedules, -5.0),
            Err(ScheduleError::InvalidAmount(_))
        ));
        assert!(matches!(
            reconcile_on_amount_change(&schedules, f64::NAN),
            Err(ScheduleError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_order_is_preserved() {
        let schedules = vec![
            entry("a", 200.0, 20.0, PaymentStatus::Unpaid),
            entry("b", 300.0, 30.0, PaymentStatus::Paid),
            entry("c", 500.0, 50.0, PaymentStatus::Unpaid),
        ];

        let result = reconcile_on_amount_change(&schedules, 1300.0).unwrap();
        let ids: Vec<&str> = result.schedules.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(result.schedules[0].amount, 285.71);
        assert_eq!(result.schedules[1].amount, 300.0);
        assert_eq!(result.schedules[2].amount, 714.29);
    }

    #[test]
    fn test_action_sets_invoice_amount_and_notice() {
        let rules = ScheduleRules::default();
        let schedules = vec![
            entry("a", 300.0, 30.0, PaymentStatus::Paid),
            entry("b", 700.0, 70.0, PaymentStatus::Unpaid),
        ];
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let ctx = CommandContext::new(&schedules, 1000.0, today, &rules);

        let outcome = ReconcileAmountAction { new_amount: 1200.0 }
            .execute(&ctx)
            .unwrap();

        assert_eq!(outcome.invoice_amount, Some(1200.0));
        assert!(outcome.is_changed());
        assert!(outcome.notification.is_some());
    }

    #[test]
    fn test_action_noop_still_records_amount() {
        let rules = ScheduleRules::default();
        let schedules = vec![entry("a", 1000.0, 100.0, PaymentStatus::Unpaid)];
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let ctx = CommandContext::new(&schedules, 1000.0, today, &rules);

        let outcome = ReconcileAmountAction { new_amount: 1000.0 }
            .execute(&ctx)
            .unwrap();

        assert_eq!(outcome.invoice_amount, Some(1000.0));
        assert!(!outcome.is_changed());
        assert!(outcome.notification.is_none());
    }
}
