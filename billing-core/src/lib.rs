//! Billing Core - payment schedule reconciliation
//!
//! # Overview
//!
//! An invoice can be paid in several partial payments ("1st payment",
//! "2nd payment", ...). This crate keeps that schedule consistent with the
//! invoice total while the user edits either one:
//!
//! - **Reconciliation** (`schedules::actions`): redistributes unpaid amounts
//!   when the total changes; paid amounts never move
//! - **Entry edits**: amount and percentage kept in sync, ordinal relabeling
//!   on removal, default entry for empty schedules
//! - **Session** (`schedules::manager`): `ScheduleManager` applies
//!   `ScheduleCommand`s with idempotency and all-or-nothing updates
//! - **Notifications** (`notify`): user-facing notices handed to a sink
//!
//! # Module Layout
//!
//! ```text
//! billing-core/src/
//! ├── core/            # configuration
//! ├── notify/          # notification sinks
//! ├── schedule_money/  # decimal money helpers
//! ├── schedules/       # actions, manager, ordinal labels, summary
//! └── utils/           # logger
//! ```

pub mod core;
pub mod notify;
pub mod schedule_money;
pub mod schedules;
pub mod utils;

pub use core::Config;
pub use notify::{MemorySink, NotificationSink, NullSink, TracingSink};
pub use schedules::{
    ScheduleError, ScheduleManager, ScheduleRules, add_entry, ensure_default_schedule,
    next_ordinal_description, reconcile_on_amount_change, remove_entry, summarize, update_entry,
};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Install the logger described by `config`
///
/// Returns `false` when the host already installed a subscriber.
pub fn setup_logging(config: &Config) -> bool {
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.log_dir.as_deref(),
    )
}
