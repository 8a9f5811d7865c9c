use super::*;
use crate::notify::MemorySink;
use shared::message::NotificationLevel;
use shared::schedule::PaymentStatus;

fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn create_test_manager(invoice_amount: f64) -> (ScheduleManager, Arc<MemorySink>) {
    create_manager_with(invoice_amount, vec![])
}

fn create_manager_with(
    invoice_amount: f64,
    entries: Vec<PaymentScheduleEntry>,
) -> (ScheduleManager, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let invoice = InvoiceSchedule::new("inv-test", invoice_amount).with_schedules(entries);
    let manager = ScheduleManager::with_rules(
        invoice,
        sink.clone(),
        ScheduleRules::default(),
        Some(test_today()),
    )
    .unwrap();
    (manager, sink)
}

/// Entry with a stable id ("e1", "e2", ...) for assertions
fn entry(id: &str, amount: f64, percentage: f64, status: PaymentStatus) -> PaymentScheduleEntry {
    let mut e = PaymentScheduleEntry::new(format!("{} entry", id), test_today(), amount, percentage);
    e.id = id.to_string();
    e.status = status;
    e
}

fn unpaid(id: &str, amount: f64, percentage: f64) -> PaymentScheduleEntry {
    entry(id, amount, percentage, PaymentStatus::Unpaid)
}

fn paid(id: &str, amount: f64, percentage: f64) -> PaymentScheduleEntry {
    entry(id, amount, percentage, PaymentStatus::Paid)
}

fn amount_of(manager: &ScheduleManager, id: &str) -> f64 {
    manager
        .schedules()
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.amount)
        .unwrap()
}

fn total(manager: &ScheduleManager) -> f64 {
    manager.schedules().iter().map(|e| e.amount).sum()
}
