//! ScheduleManager - per-invoice editing session
//!
//! Holds the invoice total and its payment schedule while a user edits the
//! invoice, and applies schedule commands to them.
//!
//! # Command Flow
//!
//! ```text
//! execute_command(cmd)
//!     ├─ 1. Idempotency check (command_id)
//!     ├─ 2. Create CommandContext over the current state
//!     ├─ 3. Convert command to action and execute
//!     ├─ 4. On success: replace schedules / invoice amount, mark processed
//!     │     On error:   leave everything as it was
//!     ├─ 5. Emit the outcome (or rejection) notification
//!     └─ 6. Return response
//! ```
//!
//! Construction applies the default schedule, so a loaded invoice is never
//! edited with an empty schedule.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use shared::message::NotificationPayload;
use shared::schedule::{
    CommandResponse, EntryChange, InvoiceSchedule, PaymentScheduleEntry, ScheduleCommand,
    ScheduleCommandPayload, ScheduleSummary,
};

use super::actions::{CommandAction, EnsureDefaultAction};
use super::summary::summarize_with_tolerance;
use super::traits::{CommandContext, CommandHandler, CommandOutcome, ScheduleError, ScheduleRules};
use crate::core::Config;
use crate::notify::NotificationSink;
use crate::schedule_money::{to_decimal, to_f64, validate_amount};

/// Applied command ids remembered per session; older ids are forgotten
const PROCESSED_COMMAND_LIMIT: usize = 1024;

#[derive(Debug)]
struct ScheduleState {
    invoice_amount: f64,
    schedules: Vec<PaymentScheduleEntry>,
    /// Command ids already applied, at most `PROCESSED_COMMAND_LIMIT`
    processed: HashSet<String>,
    /// Same ids, oldest first
    processed_order: VecDeque<String>,
}

impl ScheduleState {
    fn mark_processed(&mut self, command_id: String) {
        if !self.processed.insert(command_id.clone()) {
            return;
        }
        self.processed_order.push_back(command_id);
        if self.processed_order.len() > PROCESSED_COMMAND_LIMIT
            && let Some(oldest) = self.processed_order.pop_front()
        {
            self.processed.remove(&oldest);
        }
    }
}

/// One editing session for one invoice
///
/// The lock makes the session shareable; the host still sends one mutation
/// at a time per invoice.
#[derive(Debug)]
pub struct ScheduleManager {
    invoice_id: String,
    state: RwLock<ScheduleState>,
    sink: Arc<dyn NotificationSink>,
    rules: ScheduleRules,
    /// Fixed "today" for default due dates
    today: Option<NaiveDate>,
}

impl ScheduleManager {
    /// Open a session on `invoice`, synthesizing the default entry if its
    /// schedule is empty
    pub fn new(
        invoice: InvoiceSchedule,
        sink: Arc<dyn NotificationSink>,
        config: &Config,
    ) -> Result<Self, ScheduleError> {
        Self::with_rules(invoice, sink, config.rules(), None)
    }

    /// Same as [`ScheduleManager::new`] with explicit rules and a fixed date
    pub fn with_rules(
        invoice: InvoiceSchedule,
        sink: Arc<dyn NotificationSink>,
        rules: ScheduleRules,
        today: Option<NaiveDate>,
    ) -> Result<Self, ScheduleError> {
        validate_amount(invoice.amount, "invoice amount")?;

        let manager = Self {
            invoice_id: invoice.invoice_id,
            state: RwLock::new(ScheduleState {
                invoice_amount: to_f64(to_decimal(invoice.amount)),
                schedules: invoice.payment_schedules,
                processed: HashSet::new(),
                processed_order: VecDeque::new(),
            }),
            sink,
            rules,
            today,
        };

        let defaulted = manager.run(&CommandAction::EnsureDefault(EnsureDefaultAction))?;
        tracing::info!(
            invoice_id = %manager.invoice_id,
            invoice_amount = manager.invoice_amount(),
            entries = manager.len(),
            defaulted,
            "Schedule session opened"
        );
        Ok(manager)
    }

    /// Execute a command and return the response
    pub fn execute_command(&self, cmd: ScheduleCommand) -> CommandResponse {
        tracing::debug!(
            invoice_id = %self.invoice_id,
            command_id = %cmd.command_id,
            command = cmd.payload.name(),
            "Processing command"
        );

        let mut state = self.state.write();

        // 1. Idempotency check
        if state.processed.contains(&cmd.command_id) {
            tracing::warn!(command_id = %cmd.command_id, "Duplicate command");
            return CommandResponse::duplicate(cmd.command_id);
        }

        // 2-3. Execute against the current state
        let action = CommandAction::from(&cmd);
        let result = {
            let ctx = CommandContext::new(
                &state.schedules,
                state.invoice_amount,
                self.today(),
                &self.rules,
            );
            action.execute(&ctx)
        };

        match result {
            Ok(outcome) => {
                // 4. Commit
                let changed = outcome.is_changed();
                let notification = Self::commit(&mut state, outcome);
                state.mark_processed(cmd.command_id.clone());
                drop(state);

                if changed {
                    tracing::info!(
                        invoice_id = %self.invoice_id,
                        command_id = %cmd.command_id,
                        command = cmd.payload.name(),
                        "Payment schedule changed"
                    );
                }

                // 5. Notify
                if let Some(notification) = notification {
                    self.sink.notify(notification);
                }
                CommandResponse::success(cmd.command_id, changed)
            }
            Err(err) => {
                drop(state);
                tracing::warn!(
                    invoice_id = %self.invoice_id,
                    command_id = %cmd.command_id,
                    command = cmd.payload.name(),
                    code = %err.code(),
                    error = %err,
                    "Command rejected"
                );
                self.sink.notify(err.to_notification());
                CommandResponse::error(cmd.command_id, err.into())
            }
        }
    }

    /// Apply an action outside the command flow (no idempotency, no notification)
    fn run(&self, action: &CommandAction) -> Result<bool, ScheduleError> {
        let mut state = self.state.write();
        let outcome = {
            let ctx = CommandContext::new(
                &state.schedules,
                state.invoice_amount,
                self.today(),
                &self.rules,
            );
            action.execute(&ctx)?
        };
        let changed = outcome.is_changed();
        Self::commit(&mut state, outcome);
        Ok(changed)
    }

    /// Replace state with the outcome, returning its notification
    fn commit(
        state: &mut ScheduleState,
        outcome: CommandOutcome,
    ) -> Option<NotificationPayload> {
        if let Some(schedules) = outcome.schedules {
            state.schedules = schedules;
        }
        if let Some(invoice_amount) = outcome.invoice_amount {
            state.invoice_amount = invoice_amount;
        }
        outcome.notification
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(shared::util::today)
    }

    // ========== Convenience wrappers ==========

    pub fn ensure_default(&self) -> CommandResponse {
        self.execute_command(ScheduleCommand::new(ScheduleCommandPayload::EnsureDefault))
    }

    /// The invoice total was edited
    pub fn change_invoice_amount(&self, amount: f64) -> CommandResponse {
        self.execute_command(ScheduleCommand::new(
            ScheduleCommandPayload::ChangeInvoiceAmount { amount },
        ))
    }

    pub fn update_entry(&self, entry_id: impl Into<String>, change: EntryChange) -> CommandResponse {
        self.execute_command(ScheduleCommand::new(ScheduleCommandPayload::UpdateEntry {
            entry_id: entry_id.into(),
            change,
        }))
    }

    pub fn remove_entry(&self, entry_id: impl Into<String>) -> CommandResponse {
        self.execute_command(ScheduleCommand::new(ScheduleCommandPayload::RemoveEntry {
            entry_id: entry_id.into(),
        }))
    }

    /// Append a payment due on `due_date` (today if `None`)
    pub fn add_entry(&self, due_date: Option<NaiveDate>) -> CommandResponse {
        self.execute_command(ScheduleCommand::new(ScheduleCommandPayload::AddEntry {
            due_date,
        }))
    }

    // ========== Read access ==========

    pub fn invoice_id(&self) -> &str {
        &self.invoice_id
    }

    pub fn invoice_amount(&self) -> f64 {
        self.state.read().invoice_amount
    }

    pub fn schedules(&self) -> Vec<PaymentScheduleEntry> {
        self.state.read().schedules.clone()
    }

    pub fn len(&self) -> usize {
        self.state.read().schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().schedules.is_empty()
    }

    /// The projection to write back to the invoice store
    pub fn snapshot(&self) -> InvoiceSchedule {
        let state = self.state.read();
        InvoiceSchedule::new(self.invoice_id.clone(), state.invoice_amount)
            .with_schedules(state.schedules.clone())
    }

    pub fn summary(&self) -> ScheduleSummary {
        let state = self.state.read();
        summarize_with_tolerance(
            &state.schedules,
            state.invoice_amount,
            self.rules.change_tolerance,
        )
    }

    pub fn rules(&self) -> &ScheduleRules {
        &self.rules
    }
}

#[cfg(test)]
mod tests;
