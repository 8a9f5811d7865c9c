//! RemoveEntry command handler
//!
//! Removes one unpaid entry and relabels the remaining entries by position.
//! Paid entries cannot be removed.

use shared::message::NotificationPayload;
use shared::schedule::PaymentScheduleEntry;

use crate::schedules::ordinal::relabel;
use crate::schedules::traits::{
    CommandContext, CommandHandler, CommandOutcome, PaidEntryAction, ScheduleError, ScheduleRules,
};

/// Remove `entry_id` with default rules
pub fn remove_entry(
    schedules: &[PaymentScheduleEntry],
    entry_id: &str,
) -> Result<Vec<PaymentScheduleEntry>, ScheduleError> {
    remove_entry_with(&ScheduleRules::default(), schedules, entry_id)
}

/// Remove `entry_id`, then regenerate every remaining description
pub fn remove_entry_with(
    rules: &ScheduleRules,
    schedules: &[PaymentScheduleEntry],
    entry_id: &str,
) -> Result<Vec<PaymentScheduleEntry>, ScheduleError> {
    let index = schedules
        .iter()
        .position(|e| e.id == entry_id)
        .ok_or_else(|| ScheduleError::EntryNotFound(entry_id.to_string()))?;

    if schedules[index].is_paid() {
        tracing::warn!(entry_id = %entry_id, "Rejected removal of paid entry");
        return Err(ScheduleError::PaidEntryImmutable {
            entry_id: entry_id.to_string(),
            action: PaidEntryAction::Remove,
        });
    }

    let mut next = schedules.to_vec();
    next.remove(index);
    relabel(&mut next, &rules.label_noun);
    Ok(next)
}

/// RemoveEntry action
#[derive(Debug, Clone)]
pub struct RemoveEntryAction {
    pub entry_id: String,
}

impl CommandHandler for RemoveEntryAction {
    fn execute(&self, ctx: &CommandContext<'_>) -> Result<CommandOutcome, ScheduleError> {
        let removed = ctx.entry(&self.entry_id)?.description.clone();
        let schedules = remove_entry_with(ctx.rules, ctx.schedules, &self.entry_id)?;

        tracing::info!(entry_id = %self.entry_id, remaining = schedules.len(), "Payment removed");

        Ok(CommandOutcome::changed(schedules).with_notification(
            NotificationPayload::success("Payment removed", format!("\"{}\" was removed", removed))
                .with_data(serde_json::json!({ "entry_id": self.entry_id })),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::message::NotificationLevel;
    use shared::schedule::PaymentStatus;

    fn create_three_payments() -> Vec<PaymentScheduleEntry> {
        let date = NaiveDate::from_ymd_opt(2026, 12, 1).unwrap();
        ["1st payment", "2nd payment", "3rd payment"]
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let mut e = PaymentScheduleEntry::new(*label, date, 100.0, 33.33);
                e.id = format!("p{}", i + 1);
                e
            })
            .collect()
    }

    #[test]
    fn test_remove_middle_relabels() {
        let schedules = create_three_payments();
        let next = remove_entry(&schedules, "p2").unwrap();

        assert_eq!(next.len(), 2);
        assert_eq!(next[0].id, "p1");
        assert_eq!(next[0].description, "1st payment");
        assert_eq!(next[1].id, "p3");
        assert_eq!(next[1].description, "2nd payment");
    }

    #[test]
    fn test_custom_labels_are_overwritten() {
        let mut schedules = create_three_payments();
        schedules[0].description = "Deposit".to_string();

        let next = remove_entry(&schedules, "p3").unwrap();
        assert_eq!(next[0].description, "1st payment");
        assert_eq!(next[1].description, "2nd payment");
    }

    #[test]
    fn test_remove_last_remaining_entry() {
        let schedules = create_three_payments();
        let next = remove_entry(&schedules[..1], "p1").unwrap();
        assert!(next.is_empty());
    }

    #[test]
    fn test_paid_entry_cannot_be_removed() {
        let mut schedules = create_three_payments();
        schedules[1].status = PaymentStatus::Paid;

        let err = remove_entry(&schedules, "p2").unwrap_err();
        assert_eq!(
            err,
            ScheduleError::PaidEntryImmutable {
                entry_id: "p2".to_string(),
                action: PaidEntryAction::Remove,
            }
        );
        assert_eq!(err.user_message(), "Cannot remove a paid payment");
    }

    #[test]
    fn test_unknown_entry() {
        let schedules = create_three_payments();
        assert_eq!(
            remove_entry(&schedules, "nope").unwrap_err(),
            ScheduleError::EntryNotFound("nope".to_string())
        );
    }

    #[test]
    fn test_action_emits_success_notice() {
        let rules = ScheduleRules::default();
        let schedules = create_three_payments();
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let ctx = CommandContext::new(&schedules, 300.0, today, &rules);

        let outcome = RemoveEntryAction {
            entry_id: "p1".to_string(),
        }
        .execute(&ctx)
        .unwrap();

        let notice = outcome.notification.unwrap();
        assert_eq!(notice.level, NotificationLevel::Success);
        assert!(notice.message.contains("1st payment"));
        assert_eq!(outcome.schedules.unwrap().len(), 2);
    }
}
