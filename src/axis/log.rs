use crate::axis::{Axis, AxisCore, AxisPosition, nice_tick_values};

/// Logarithmic axis over strictly positive data.
///
/// The affine transform runs in natural-log space, so equal pixel distances
/// correspond to equal ratios. Non-positive values never enter the tracked
/// bounds and transform to the undefined sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct LogarithmicAxis {
    core: AxisCore,
}

impl LogarithmicAxis {
    #[must_use]
    pub fn new(position: AxisPosition) -> Self {
        let mut core = AxisCore::new(position);
        core.set_initial_range(1.0, 100.0);
        Self { core }
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
    pub fn with_minimum(mut self, minimum: f64) -> Self {
        if minimum > 0.0 {
            self.core.set_minimum(minimum);
        }
        self
    }

    #[must_use]
    pub fn with_maximum(mut self, maximum: f64) -> Self {
        if maximum > 0.0 {
            self.core.set_maximum(maximum);
        }
        self
    }
}

impl Axis for LogarithmicAxis {
    fn core(&self) -> &AxisCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AxisCore {
        &mut self.core
    }

    fn to_internal(&self, value: f64) -> f64 {
        if value > 0.0 { value.ln() } else { f64::NAN }
    }

    fn from_internal(&self, value: f64) -> f64 {
        value.exp()
    }

    fn include(&mut self, value: f64) {
        if value > 0.0 {
            self.core.include(value);
        }
    }

    /// Decade ladder (1/2/5 per decade); falls back to linear steps when the
    /// visible range spans less than a decade.
    fn ticks(&self, target_count: usize) -> Vec<f64> {
        let minimum = self.core.actual_minimum();
        let maximum = self.core.actual_maximum();
        if target_count == 0 || minimum <= 0.0 || maximum <= minimum {
            return Vec::new();
        }

        let min_exp = minimum.log10().floor() as i32;
        let max_exp = maximum.log10().ceil() as i32;

        let mut ticks = Vec::new();
        for exp in min_exp..=max_exp {
            let decade = 10_f64.powi(exp);
            for multiplier in [1.0, 2.0, 5.0] {
                let candidate = decade * multiplier;
                if candidate >= minimum && candidate <= maximum {
                    ticks.push(candidate);
                }
            }
        }

        if ticks.len() < 2 {
            return nice_tick_values(minimum, maximum, target_count);
        }
        if ticks.len() > target_count {
            ticks = evenly_sample(ticks, target_count);
        }
        ticks
    }
}

fn evenly_sample(ticks: Vec<f64>, target: usize) -> Vec<f64> {
    if ticks.len() <= target || target == 0 {
        return ticks;
    }
    let last_index = ticks.len() - 1;
    let mut sampled = Vec::with_capacity(target);
    for step in 0..target {
        let ratio = step as f64 / (target.max(2) - 1) as f64;
        let index = ((ratio * last_index as f64).round() as usize).min(last_index);
        if sampled.last() != Some(&ticks[index]) {
            sampled.push(ticks[index]);
        }
    }
    sampled
}
