use crate::axis::{Axis, AxisCore, AxisPosition};

/// Axis over labeled category slots.
///
/// Category `i` sits at data value `i`; the default range `-0.5..n-0.5`
/// centers each slot in an equal share of the plot edge.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAxis {
    core: AxisCore,
    labels: Vec<String>,
}

impl CategoryAxis {
    #[must_use]
    pub fn new(position: AxisPosition, labels: Vec<String>) -> Self {
        let mut core = AxisCore::new(position);
        if !labels.is_empty() {
            core.set_initial_range(-0.5, labels.len() as f64 - 0.5);
        }
        Self { core, labels }
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

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn label_at(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }
}

impl Axis for CategoryAxis {
    fn core(&self) -> &AxisCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AxisCore {
        &mut self.core
    }

    /// Scanned category values keep the half-slot margin on both sides.
    fn include(&mut self, value: f64) {
        if value.is_finite() {
            self.core.include(value - 0.5);
            self.core.include(value + 0.5);
        }
    }

    /// One tick per category slot inside the visible range.
    fn ticks(&self, _target_count: usize) -> Vec<f64> {
        let minimum = self.core.actual_minimum();
        let maximum = self.core.actual_maximum();
        (0..self.labels.len())
            .map(|index| index as f64)
            .filter(|slot| *slot >= minimum && *slot <= maximum)
            .collect()
    }

    fn format_value(&self, value: f64) -> String {
        let slot = value.round();
        if slot < 0.0 || (slot - value).abs() > 0.25 {
            return String::new();
        }
        self.label_at(slot as usize).unwrap_or_default().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::CategoryAxis;
    use crate::axis::{Axis, AxisPosition};

    fn fruit_axis() -> CategoryAxis {
        CategoryAxis::new(
            AxisPosition::Bottom,
            vec!["apple".to_owned(), "pear".to_owned(), "plum".to_owned()],
        )
    }

    #[test]
    fn default_range_brackets_all_slots() {
        let axis = fruit_axis();
        assert_eq!(axis.core().actual_minimum(), -0.5);
        assert_eq!(axis.core().actual_maximum(), 2.5);
        assert_eq!(axis.ticks(10), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn slot_values_format_to_labels() {
        let axis = fruit_axis();
        assert_eq!(axis.format_value(1.0), "pear");
        assert_eq!(axis.format_value(1.1), "pear");
        assert_eq!(axis.format_value(1.6), "");
        assert_eq!(axis.format_value(7.0), "");
    }
}
