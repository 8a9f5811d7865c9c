//! Payment schedule reconciliation
//!
//! - **actions**: one `CommandHandler` per schedule command, plus the pure
//!   functions behind them
//! - **manager**: `ScheduleManager`, the per-invoice editing session
//! - **ordinal**: positional labels ("1st payment")
//! - **summary**: totals for display
//!
//! # Data Flow
//!
//! ```text
//! ScheduleCommand → ScheduleManager → CommandAction → CommandOutcome
//!                         ↓                                ↓
//!                 NotificationSink                  state replaced
//! ```

pub mod actions;
pub mod manager;
pub mod ordinal;
pub mod summary;
pub mod traits;

pub use actions::{
    CommandAction, Reconciliation, add_entry, ensure_default_schedule, reconcile_on_amount_change,
    remove_entry, update_entry,
};
pub use manager::ScheduleManager;
pub use ordinal::{next_ordinal_description, ordinal, ordinal_description};
pub use summary::summarize;
pub use traits::{
    CommandContext, CommandHandler, CommandOutcome, PaidEntryAction, ScheduleError, ScheduleRules,
};
