/// Affine data-to-screen mapping along one axis.
///
/// The invariant is `screen = offset + value * scale`; `invert` is the exact
/// algebraic inverse. A reversed axis carries a negative `scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTransform {
    scale: f64,
    offset: f64,
}

impl AxisTransform {
    /// Placeholder mapping used before the first layout pass.
    pub const DEGENERATE: Self = Self {
        scale: 0.0,
        offset: 0.0,
    };

    #[must_use]
    pub const fn new(scale: f64, offset: f64) -> Self {
        Self { scale, offset }
    }

    /// Derives the mapping that sends `value_range` onto `screen_range`.
    ///
    /// A zero or non-finite value span yields the degenerate transform so a
    /// collapsed axis never divides by zero.
    #[must_use]
    pub fn fitting(value_range: (f64, f64), screen_range: (f64, f64)) -> Self {
        let value_span = value_range.1 - value_range.0;
        if !value_span.is_finite() || value_span == 0.0 {
            return Self::DEGENERATE;
        }
        let scale = (screen_range.1 - screen_range.0) / value_span;
        if !scale.is_finite() {
            return Self::DEGENERATE;
        }
        Self {
            scale,
            offset: screen_range.0 - value_range.0 * scale,
        }
    }

    #[must_use]
    pub fn scale(self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn offset(self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !self.scale.is_finite() || self.scale == 0.0
    }

    /// Maps a value into screen units; NaN for a degenerate mapping.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        if self.is_degenerate() || !value.is_finite() {
            return f64::NAN;
        }
        self.offset + value * self.scale
    }

    /// Maps screen units back into the value domain; NaN for a degenerate
    /// mapping.
    #[must_use]
    pub fn invert(self, screen: f64) -> f64 {
        if self.is_degenerate() || !screen.is_finite() {
            return f64::NAN;
        }
        (screen - self.offset) / self.scale
    }
}
