use crate::axis::{Axis, AxisCore, AxisPosition};
use crate::render::Color;

/// Gradient stop at a normalized offset along the axis range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Color,
}

impl ColorStop {
    #[must_use]
    pub const fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Axis mapping data values to palette colors for color-mapped series.
///
/// It shares bounds tracking with the positional axes so `include`/`reset`
/// behave uniformly, but it never contributes a screen transform; lookups
/// out of range clamp to the configured low/high colors instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorAxis {
    core: AxisCore,
    stops: Vec<ColorStop>,
    low_color: Color,
    high_color: Color,
}

impl ColorAxis {
    #[must_use]
    pub fn new(position: AxisPosition) -> Self {
        // Blue-to-red default ramp.
        let stops = vec![
            ColorStop::new(0.0, Color::rgb(0.19, 0.51, 0.74)),
            ColorStop::new(0.5, Color::rgb(0.97, 0.97, 0.96)),
            ColorStop::new(1.0, Color::rgb(0.84, 0.10, 0.11)),
        ];
        let low_color = stops[0].color;
        let high_color = stops[stops.len() - 1].color;
        Self {
            core: AxisCore::new(position),
            stops,
            low_color,
            high_color,
        }
    }

    /// Replaces the gradient; stops are sorted by offset and clamped to
    /// `0..=1`. An empty list keeps the current gradient.
    #[must_use]
    pub fn with_gradient(mut self, mut stops: Vec<ColorStop>) -> Self {
        if stops.is_empty() {
            return self;
        }
        for stop in &mut stops {
            stop.offset = if stop.offset.is_finite() {
                stop.offset.clamp(0.0, 1.0)
            } else {
                0.0
            };
        }
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        self.low_color = stops[0].color;
        self.high_color = stops[stops.len() - 1].color;
        self.stops = stops;
        self
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.core.set_key(key);
        self
    }

    /// Colors used for values below/above the axis range.
    #[must_use]
    pub fn with_out_of_range_colors(mut self, low: Color, high: Color) -> Self {
        self.low_color = low;
        self.high_color = high;
        self
    }

    /// Palette color for a data value.
    ///
    /// Undefined values map to the low color; values outside the actual
    /// bounds clamp to the low/high colors.
    #[must_use]
    pub fn color_for(&self, value: f64) -> Color {
        let minimum = self.core.actual_minimum();
        let maximum = self.core.actual_maximum();
        let span = maximum - minimum;
        if !value.is_finite() || !span.is_finite() || span <= 0.0 {
            return self.low_color;
        }

        let t = (value - minimum) / span;
        if t < 0.0 {
            return self.low_color;
        }
        if t > 1.0 {
            return self.high_color;
        }

        match self.stops.windows(2).find(|pair| t <= pair[1].offset) {
            Some(pair) => {
                let segment_span = pair[1].offset - pair[0].offset;
                let local = if segment_span > 0.0 {
                    (t - pair[0].offset) / segment_span
                } else {
                    0.0
                };
                pair[0].color.lerp(pair[1].color, local)
            }
            None => self
                .stops
                .last()
                .map(|stop| stop.color)
                .unwrap_or(self.high_color),
        }
    }
}

impl Axis for ColorAxis {
    fn core(&self) -> &AxisCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AxisCore {
        &mut self.core
    }

    fn is_positional(&self) -> bool {
        false
    }

    fn as_color_axis(&self) -> Option<&ColorAxis> {
        Some(self)
    }
}
