//! Schedule totals

use rust_decimal::Decimal;
use shared::schedule::{PaymentScheduleEntry, ScheduleSummary};

use crate::schedule_money::{MONEY_TOLERANCE, sum_amounts, to_decimal, to_f64};

/// Summarize `schedules` against `invoice_amount` with the default tolerance
pub fn summarize(schedules: &[PaymentScheduleEntry], invoice_amount: f64) -> ScheduleSummary {
    summarize_with_tolerance(schedules, invoice_amount, MONEY_TOLERANCE)
}

pub fn summarize_with_tolerance(
    schedules: &[PaymentScheduleEntry],
    invoice_amount: f64,
    tolerance: Decimal,
) -> ScheduleSummary {
    let (paid, unpaid): (Vec<&PaymentScheduleEntry>, Vec<&PaymentScheduleEntry>) =
        schedules.iter().partition(|e| e.is_paid());

    let total_paid = sum_amounts(paid.iter().map(|e| &e.amount));
    let total_unpaid = sum_amounts(unpaid.iter().map(|e| &e.amount));
    let total_scheduled = total_paid + total_unpaid;
    let unallocated = to_decimal(invoice_amount) - total_scheduled;

    ScheduleSummary {
        invoice_amount: to_f64(to_decimal(invoice_amount)),
        total_scheduled: to_f64(total_scheduled),
        total_paid: to_f64(total_paid),
        total_unpaid: to_f64(total_unpaid),
        unallocated: to_f64(unallocated),
        paid_count: paid.len(),
        unpaid_count: unpaid.len(),
        balanced: unallocated.abs() <= tolerance,
    }
}
