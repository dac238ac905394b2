//! Localized duration resolver.

use std::sync::Arc;
use std::time::Duration;

use herald_config::{Config, DurationUnits};
use herald_core::{ContextMap, RecordKey, ResultMap};

use super::Resolver;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Format a duration from its coarsest non-zero unit down to seconds.
///
/// Zero units are skipped and each unit is pluralized on its own count.
/// Durations under one second render the locale's "less than a second" phrase.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use herald_config::DurationUnits;
/// use herald_macro::format_duration;
///
/// let units = DurationUnits::default();
/// assert_eq!(format_duration(Duration::from_millis(12_300), &units), "12 seconds");
/// assert_eq!(format_duration(Duration::from_secs(3_723), &units), "1 hour 2 minutes 3 seconds");
/// assert_eq!(format_duration(Duration::from_millis(999), &units), "less than one second");
/// ```
#[must_use]
pub fn format_duration(duration: Duration, units: &DurationUnits) -> String {
    let mut remaining = duration.as_secs();
    if remaining == 0 {
        return units.less_than_second.clone();
    }

    let scale = [
        (DAY, &units.day, &units.days),
        (HOUR, &units.hour, &units.hours),
        (MINUTE, &units.minute, &units.minutes),
        (1, &units.second, &units.seconds),
    ];

    let mut parts = Vec::with_capacity(scale.len());
    for (size, singular, plural) in scale {
        let count = remaining / size;
        remaining %= size;
        if count > 0 {
            let unit = if count == 1 { singular } else { plural };
            parts.push(format!("{count} {unit}"));
        }
    }
    parts.join(" ")
}

/// Resolves a duration using the recipient's locale, or the default locale
/// when the recipient has none or it has no vocabulary.
pub struct DurationResolver {
    config: Arc<Config>,
}

impl DurationResolver {
    #[must_use]
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl Resolver<Duration> for DurationResolver {
    fn resolve(&self, key: &RecordKey, value: &Duration, context: &ContextMap) -> ResultMap {
        let locale = context.recipient().locale();
        let units = self.config.duration_units(locale.as_deref());
        ResultMap::single(key.clone(), format_duration(*value, units))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::resolver::tests::{Player, context, key};

    #[test]
    fn test_seconds_granularity() {
        let units = DurationUnits::default();
        assert_eq!(format_duration(Duration::from_millis(12_300), &units), "12 seconds");
        assert_eq!(format_duration(Duration::from_secs(1), &units), "1 second");
        assert_eq!(format_duration(Duration::from_millis(999), &units), "less than one second");
        assert_eq!(format_duration(Duration::ZERO, &units), "less than one second");
    }

    #[test]
    fn test_skips_zero_units() {
        let units = DurationUnits::default();
        assert_eq!(format_duration(Duration::from_secs(DAY + 5), &units), "1 day 5 seconds");
        assert_eq!(format_duration(Duration::from_secs(2 * HOUR), &units), "2 hours");
        assert_eq!(
            format_duration(Duration::from_secs(3 * DAY + MINUTE), &units),
            "3 days 1 minute"
        );
    }

    #[test]
    fn test_recipient_locale() {
        let config = Config::from_toml_str(
            "[locales.de]\nsecond = \"Sekunde\"\nseconds = \"Sekunden\"\n",
        )
        .unwrap();
        let resolver = DurationResolver::new(Arc::new(config));
        let german = ContextMap::new(
            Arc::new(Player {
                name: "Kai",
                locale: Some("de_DE"),
            }),
            key("MSG"),
        );

        let out = resolver.resolve(&key("D"), &Duration::from_secs(30), &german);
        assert_eq!(out.get("D"), Some("30 Sekunden"));

        // Recipient without locale uses the default
        let out = resolver.resolve(&key("D"), &Duration::from_secs(30), &context());
        assert_eq!(out.get("D"), Some("30 seconds"));
    }
}
