use chrono::{DateTime, TimeZone, Utc};

use crate::axis::{Axis, AxisCore, AxisPosition};

/// Axis over absolute timestamps.
///
/// Data space is unix seconds as `f64`, so the affine transform and all
/// pan/zoom operations work unchanged; only tick labels know about time.
#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeAxis {
    core: AxisCore,
}

impl DateTimeAxis {
    #[must_use]
    pub fn new(position: AxisPosition) -> Self {
        Self {
            core: AxisCore::new(position),
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.core.set_key(key);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.core.set_title(title);
        self
    }

    /// Converts a timestamp into this axis's data space.
    #[must_use]
    pub fn value(time: DateTime<Utc>) -> f64 {
        time.timestamp_millis() as f64 / 1000.0
    }

    /// Converts a data value back into a timestamp, when representable.
    #[must_use]
    pub fn datetime_from_value(value: f64) -> Option<DateTime<Utc>> {
        if !value.is_finite() {
            return None;
        }
        Utc.timestamp_millis_opt((value * 1000.0).round() as i64)
            .single()
    }
}

impl Axis for DateTimeAxis {
    fn core(&self) -> &AxisCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AxisCore {
        &mut self.core
    }

    /// Label granularity follows the visible span: dates for multi-day
    /// ranges, minutes inside a day, seconds below that.
    fn format_value(&self, value: f64) -> String {
        let Some(time) = Self::datetime_from_value(value) else {
            return String::new();
        };

        let span_seconds = self.core.actual_maximum() - self.core.actual_minimum();
        let pattern = if span_seconds >= 2.0 * 86_400.0 {
            "%Y-%m-%d"
        } else if span_seconds >= 2.0 * 3_600.0 {
            "%H:%M"
        } else {
            "%H:%M:%S"
        };
        time.format(pattern).to_string()
    }
}
