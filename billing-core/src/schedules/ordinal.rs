//! Ordinal labels for schedule entries ("1st payment", "2nd payment", ...)

use shared::schedule::PaymentScheduleEntry;

/// Noun used when none is configured
pub const DEFAULT_LABEL_NOUN: &str = "payment";

/// English ordinal for `n` ("1st", "2nd", "3rd", "4th", ..., "11th", "21st", "112th")
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Label for the entry at 1-based `position`
pub fn ordinal_description(position: usize, noun: &str) -> String {
    format!("{} {}", ordinal(position), noun)
}

/// Label for a new entry appended after `count` existing entries, using the
/// default noun
///
/// Sessions configured with another noun label through
/// [`ordinal_description`] with `ScheduleRules::label_noun`; use that when
/// the label must match the engine's.
pub fn next_ordinal_description(count: usize) -> String {
    ordinal_description(count + 1, DEFAULT_LABEL_NOUN)
}

/// Rewrite every description to its positional label, in list order
pub fn relabel(entries: &mut [PaymentScheduleEntry], noun: &str) {
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.description = ordinal_description(index + 1, noun);
    }
}
