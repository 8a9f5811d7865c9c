//! Payment schedule entry - one partial payment due on an invoice

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment status of a schedule entry
///
/// Once an entry is `Paid` its amount is frozen; only its percentage is
/// recomputed when the invoice total moves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment schedule entry as stored in the invoice's `paymentSchedules` list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentScheduleEntry {
    /// Opaque unique id, generated at creation
    pub id: String,
    /// Human label, "1st payment" by default
    pub description: String,
    /// Date the payment is expected
    pub due_date: NaiveDate,
    /// Amount in the invoice currency (2 decimal places)
    pub amount: f64,
    /// Share of the invoice total at last synchronization, 0-100
    pub percentage: f64,
    /// Paid / unpaid
    #[serde(default)]
    pub status: PaymentStatus,
}

impl PaymentScheduleEntry {
    /// Create a new unpaid entry with a fresh id
    pub fn new(
        description: impl Into<String>,
        due_date: NaiveDate,
        amount: f64,
        percentage: f64,
    ) -> Self {
        Self {
            id: crate::util::new_entry_id(),
            description: description.into(),
            due_date,
            amount,
            percentage,
            status: PaymentStatus::Unpaid,
        }
    }

    #[inline]
    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }
}
