//! Command action implementations
//!
//! Each action implements the `CommandHandler` trait and handles
//! one specific command type. The pure functions behind them are also
//! exported for hosts that keep their own state.

use crate::schedules::traits::{CommandContext, CommandHandler, CommandOutcome, ScheduleError};
use shared::schedule::{ScheduleCommand, ScheduleCommandPayload};

mod add_entry;
mod ensure_default;
mod reconcile_amount;
mod remove_entry;
mod update_entry;

pub use add_entry::{AddEntryAction, add_entry, add_entry_with};
pub use ensure_default::{EnsureDefaultAction, ensure_default_schedule, ensure_default_schedule_with};
pub use reconcile_amount::{
    ReconcileAmountAction, Reconciliation, reconcile_on_amount_change,
    reconcile_on_amount_change_with,
};
pub use remove_entry::{RemoveEntryAction, remove_entry, remove_entry_with};
pub use update_entry::{UpdateEntryAction, update_entry};

/// CommandAction enum - dispatches to concrete action implementations
#[derive(Debug, Clone)]
pub enum CommandAction {
    EnsureDefault(EnsureDefaultAction),
    ReconcileAmount(ReconcileAmountAction),
    UpdateEntry(UpdateEntryAction),
    RemoveEntry(RemoveEntryAction),
    AddEntry(AddEntryAction),
}

/// Manual implementation of CommandHandler for CommandAction
impl CommandHandler for CommandAction {
    fn execute(&self, ctx: &CommandContext<'_>) -> Result<CommandOutcome, ScheduleError> {
        match self {
            CommandAction::EnsureDefault(action) => action.execute(ctx),
            CommandAction::ReconcileAmount(action) => action.execute(ctx),
            CommandAction::UpdateEntry(action) => action.execute(ctx),
            CommandAction::RemoveEntry(action) => action.execute(ctx),
            CommandAction::AddEntry(action) => action.execute(ctx),
        }
    }
}

/// Convert ScheduleCommand to CommandAction
///
/// This is the ONLY place with a match on ScheduleCommandPayload.
impl From<&ScheduleCommand> for CommandAction {
    fn from(cmd: &ScheduleCommand) -> Self {
        match &cmd.payload {
            ScheduleCommandPayload::EnsureDefault => {
                CommandAction::EnsureDefault(EnsureDefaultAction)
            }
            ScheduleCommandPayload::ChangeInvoiceAmount { amount } => {
                CommandAction::ReconcileAmount(ReconcileAmountAction {
                    new_amount: *amount,
                })
            }
            ScheduleCommandPayload::UpdateEntry { entry_id, change } => {
                CommandAction::UpdateEntry(UpdateEntryAction {
                    entry_id: entry_id.clone(),
                    change: change.clone(),
                })
            }
            ScheduleCommandPayload::RemoveEntry { entry_id } => {
                CommandAction::RemoveEntry(RemoveEntryAction {
                    entry_id: entry_id.clone(),
                })
            }
            ScheduleCommandPayload::AddEntry { due_date } => {
                CommandAction::AddEntry(AddEntryAction {
                    due_date: *due_date,
                })
            }
        }
    }
}
