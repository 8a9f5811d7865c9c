//! Invoice projection read from / written back to the invoice store

use super::entry::PaymentScheduleEntry;
use serde::{Deserialize, Serialize};

/// The part of an invoice record the schedule engine works on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSchedule {
    pub invoice_id: String,
    /// Authoritative invoice total
    pub amount: f64,
    /// Entries in creation/display order
    #[serde(default)]
    pub payment_schedules: Vec<PaymentScheduleEntry>,
}

impl InvoiceSchedule {
    pub fn new(invoice_id: impl Into<String>, amount: f64) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            amount,
            payment_schedules: Vec::new(),
        }
    }

    pub fn with_schedules(mut self, schedules: Vec<PaymentScheduleEntry>) -> Self {
        self.payment_schedules = schedules;
        self
    }
}
