use chrono::NaiveDate;

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Today's date in the local timezone (what "due today" means to the user)
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Opaque id for a new payment schedule entry
pub fn new_entry_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Idempotency key for a new schedule command
pub fn new_command_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
