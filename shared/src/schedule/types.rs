//! Responses and read models for schedule commands

use crate::error::ErrorCode;
use serde::{Deserialize, Serialize};

/// Command response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandResponse {
    /// The command ID this responds to
    pub command_id: String,
    /// Whether the command succeeded
    pub success: bool,
    /// Whether the schedule list changed (host should persist)
    #[serde(default)]
    pub changed: bool,
    /// Error details if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CommandError>,
}

impl CommandResponse {
    pub fn success(command_id: String, changed: bool) -> Self {
        Self {
            command_id,
            success: true,
            changed,
            error: None,
        }
    }

    /// Response for a command id that was already processed
    pub fn duplicate(command_id: String) -> Self {
        Self {
            command_id,
            success: true,
            changed: false,
            error: None,
        }
    }

    pub fn error(command_id: String, error: CommandError) -> Self {
        Self {
            command_id,
            success: false,
            changed: false,
            error: Some(error),
        }
    }
}

/// Command error
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandError {
    pub code: ErrorCode,
    pub message: String,
}

impl CommandError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Totals over a schedule, for display next to the entry list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    pub invoice_amount: f64,
    pub total_scheduled: f64,
    pub total_paid: f64,
    pub total_unpaid: f64,
    /// invoice_amount - total_scheduled (negative when over-scheduled)
    pub unallocated: f64,
    pub paid_count: usize,
    pub unpaid_count: usize,
    /// Scheduled total matches the invoice within tolerance
    pub balanced: bool,
}
