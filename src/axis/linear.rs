use crate::axis::{Axis, AxisCore, AxisPosition};

/// Plain linear axis.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearAxis {
    core: AxisCore,
}

impl LinearAxis {
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

    /// Pins the lower bound regardless of scanned data.
    #[must_use]
    pub fn with_minimum(mut self, minimum: f64) -> Self {
        self.core.set_minimum(minimum);
        self
    }

    /// Pins the upper bound regardless of scanned data.
    #[must_use]
    pub fn with_maximum(mut self, maximum: f64) -> Self {
        self.core.set_maximum(maximum);
        self
    }

    #[must_use]
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.core.set_reversed(reversed);
        self
    }
}

impl Axis for LinearAxis {
    fn core(&self) -> &AxisCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AxisCore {
        &mut self.core
    }
}
