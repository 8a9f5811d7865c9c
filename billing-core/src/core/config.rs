use rust_decimal::Decimal;

use crate::schedule_money::to_decimal;
use crate::schedules::ordinal::DEFAULT_LABEL_NOUN;
use crate::schedules::traits::ScheduleRules;

/// Engine configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ENVIRONMENT | development | runtime environment |
/// | LOG_LEVEL | info | logger level |
/// | LOG_JSON | false | JSON log lines |
/// | LOG_DIR | (unset) | daily rolling log directory |
/// | SCHEDULE_CHANGE_TOLERANCE | 0.01 | reconciliation no-op threshold |
/// | SCHEDULE_LABEL_NOUN | payment | noun in ordinal labels |
///
/// # Example
///
/// ```ignore
/// SCHEDULE_LABEL_NOUN=installment LOG_LEVEL=debug cargo test
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// Entries moving by this much or less are left alone on an amount change
    pub change_tolerance: f64,
    pub label_noun: String,
}

impl Config {
    /// Load from the environment (and `.env` if present)
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a variable lookup; `from_env` passes the process environment
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: lookup("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: lookup("LOG_DIR").filter(|d| !d.is_empty()),
            change_tolerance: lookup("SCHEDULE_CHANGE_TOLERANCE")
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(0.01),
            label_noun: lookup("SCHEDULE_LABEL_NOUN")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_LABEL_NOUN.into()),
        }
    }

    /// Built-in defaults, ignoring the environment
    pub fn defaults() -> Self {
        Self::from_lookup(|_| None)
    }

    /// Defaults with the schedule settings overridden
    ///
    /// Mostly for tests; the environment is not read.
    pub fn with_overrides(change_tolerance: f64, label_noun: impl Into<String>) -> Self {
        let mut config = Self::defaults();
        config.change_tolerance = change_tolerance;
        config.label_noun = label_noun.into();
        config
    }

    /// Rules threaded into every schedule command
    pub fn rules(&self) -> ScheduleRules {
        let tolerance = to_decimal(self.change_tolerance).max(Decimal::ZERO);
        let label_noun = match self.label_noun.trim() {
            "" => ScheduleRules::default().label_noun,
            noun => noun.to_string(),
        };
        ScheduleRules {
            change_tolerance: tolerance,
            label_noun,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
