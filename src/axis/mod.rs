//! Axis models mapping data space onto screen space.
//!
//! Every axis owns an [`AxisCore`] carrying bounds and the affine
//! [`AxisTransform`]; concrete axes layer value-domain behavior on top
//! (log mapping, category slots, date-time labels, polar roles).

pub mod category;
pub mod color;
pub mod datetime;
pub mod linear;
pub mod log;
pub mod polar;
pub mod transform;

pub use category::CategoryAxis;
pub use color::{ColorAxis, ColorStop};
pub use datetime::DateTimeAxis;
pub use linear::LinearAxis;
pub use log::LogarithmicAxis;
pub use polar::{AngleAxis, MagnitudeAxis, polar_to_screen};
pub use transform::AxisTransform;

use crate::error::{PlotError, PlotResult};
use crate::geometry::{PlotRect, ScreenPoint};

/// Plot-area edge an axis is rendered against.
///
/// Left/right axes are vertical, top/bottom axes horizontal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPosition {
    Left,
    Right,
    Top,
    Bottom,
}

impl AxisPosition {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Handle to an axis registered in a plot model.
///
/// Series resolve their axis keys into ids once per update pass, so render
/// and hit-test paths never do string lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisId(pub(crate) usize);

impl AxisId {
    #[must_use]
    pub const fn raw(self) -> usize {
        self.0
    }
}

/// Shared axis state: bounds, direction, and the affine screen mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisCore {
    key: String,
    position: AxisPosition,
    title: Option<String>,
    actual_minimum: f64,
    actual_maximum: f64,
    data_minimum: f64,
    data_maximum: f64,
    reset_minimum: f64,
    reset_maximum: f64,
    user_minimum: Option<f64>,
    user_maximum: Option<f64>,
    reversed: bool,
    transform: AxisTransform,
}

impl AxisCore {
    #[must_use]
    pub fn new(position: AxisPosition) -> Self {
        Self {
            key: String::new(),
            position,
            title: None,
            actual_minimum: 0.0,
            actual_maximum: 1.0,
            data_minimum: f64::INFINITY,
            data_maximum: f64::NEG_INFINITY,
            reset_minimum: 0.0,
            reset_maximum: 1.0,
            user_minimum: None,
            user_maximum: None,
            reversed: false,
            transform: AxisTransform::DEGENERATE,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    #[must_use]
    pub fn position(&self) -> AxisPosition {
        self.position
    }

    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        self.position.is_horizontal()
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }

    /// Pins the lower bound regardless of scanned data.
    pub fn set_minimum(&mut self, minimum: f64) {
        self.user_minimum = minimum.is_finite().then_some(minimum);
    }

    /// Pins the upper bound regardless of scanned data.
    pub fn set_maximum(&mut self, maximum: f64) {
        self.user_maximum = maximum.is_finite().then_some(maximum);
    }

    #[must_use]
    pub fn actual_minimum(&self) -> f64 {
        self.actual_minimum
    }

    #[must_use]
    pub fn actual_maximum(&self) -> f64 {
        self.actual_maximum
    }

    #[must_use]
    pub fn data_bounds(&self) -> Option<(f64, f64)> {
        (self.data_minimum <= self.data_maximum).then_some((self.data_minimum, self.data_maximum))
    }

    #[must_use]
    pub fn transform(&self) -> AxisTransform {
        self.transform
    }

    pub(crate) fn set_transform(&mut self, transform: AxisTransform) {
        self.transform = transform;
    }

    /// Clears the include-tracked data bounds ahead of a data scan.
    pub fn begin_data_update(&mut self) {
        self.data_minimum = f64::INFINITY;
        self.data_maximum = f64::NEG_INFINITY;
    }

    /// Widens the tracked data bounds; non-finite values are skipped.
    ///
    /// Repeated calls only ever widen, never narrow.
    pub fn include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.data_minimum = self.data_minimum.min(value);
        self.data_maximum = self.data_maximum.max(value);
    }

    /// Commits scanned data bounds into the actual range.
    ///
    /// User-pinned bounds win over scanned data; an axis that saw no data
    /// keeps its current range. A collapsed range is widened symmetrically
    /// so the transform stays invertible. The committed range becomes the
    /// baseline that [`AxisCore::reset`] restores.
    pub fn commit_data_bounds(&mut self) {
        let (mut minimum, mut maximum) = match self.data_bounds() {
            Some(bounds) => bounds,
            None => (self.actual_minimum, self.actual_maximum),
        };

        if let Some(user) = self.user_minimum {
            minimum = user;
        }
        if let Some(user) = self.user_maximum {
            maximum = user;
        }
        if minimum > maximum {
            (minimum, maximum) = (maximum, minimum);
        }
        if minimum == maximum {
            let half = if minimum == 0.0 {
                0.5
            } else {
                minimum.abs() * 0.5
            };
            minimum -= half;
            maximum += half;
        }

        self.actual_minimum = minimum;
        self.actual_maximum = maximum;
        self.reset_minimum = minimum;
        self.reset_maximum = maximum;
    }

    /// Seeds both the actual range and the reset baseline.
    ///
    /// Used by axes whose natural default differs from `0..1` (log decades,
    /// category slots) before any data is scanned.
    pub fn set_initial_range(&mut self, minimum: f64, maximum: f64) {
        if minimum.is_finite() && maximum.is_finite() && minimum < maximum {
            self.actual_minimum = minimum;
            self.actual_maximum = maximum;
            self.reset_minimum = minimum;
            self.reset_maximum = maximum;
        }
    }

    /// Restores the bounds captured at the most recent data update.
    pub fn reset(&mut self) {
        self.actual_minimum = self.reset_minimum;
        self.actual_maximum = self.reset_maximum;
    }

    /// Sets the visible bounds directly.
    ///
    /// Equal or inverted bounds are rejected rather than swapped.
    pub fn zoom(&mut self, new_minimum: f64, new_maximum: f64) -> PlotResult<()> {
        if !new_minimum.is_finite() || !new_maximum.is_finite() || new_minimum >= new_maximum {
            return Err(PlotError::InvalidData(
                "zoom bounds must be finite with minimum < maximum".to_owned(),
            ));
        }
        self.actual_minimum = new_minimum;
        self.actual_maximum = new_maximum;
        Ok(())
    }

    /// Rescales the visible span around `center`.
    ///
    /// `factor > 1` zooms in, `0 < factor < 1` zooms out.
    pub fn zoom_at(&mut self, factor: f64, center: f64) -> PlotResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PlotError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        if !center.is_finite() {
            return Err(PlotError::InvalidData(
                "zoom center must be finite".to_owned(),
            ));
        }

        let new_minimum = center - (center - self.actual_minimum) / factor;
        let new_maximum = center + (self.actual_maximum - center) / factor;
        self.zoom(new_minimum, new_maximum)
    }

    /// Screen coordinate of the pan-relevant component for this orientation.
    #[must_use]
    pub fn screen_component(&self, point: ScreenPoint) -> f64 {
        if self.is_horizontal() { point.x } else { point.y }
    }

    /// Screen interval the actual bounds map onto inside `plot_area`.
    ///
    /// Vertical axes map larger values to smaller pixel `y`; reversing the
    /// axis flips the interval (and thereby the sign of the scale).
    #[must_use]
    pub fn screen_range(&self, plot_area: PlotRect) -> (f64, f64) {
        let range = if self.is_horizontal() {
            (plot_area.left(), plot_area.right())
        } else {
            (plot_area.bottom(), plot_area.top())
        };
        if self.reversed {
            (range.1, range.0)
        } else {
            range
        }
    }
}

/// Contract every axis satisfies.
///
/// The provided methods implement the affine mapping law
/// `transform(v) = offset + v * scale` through [`AxisCore`]; axes with a
/// warped value domain (log) only override the internal-space hooks so the
/// law keeps holding in internal space.
///
/// `Send + Sync` so parallel projection can read axes across threads.
pub trait Axis: Send + Sync {
    fn core(&self) -> &AxisCore;

    fn core_mut(&mut self) -> &mut AxisCore;

    /// Maps a data value into the internal space the affine transform runs
    /// in. Identity for plain axes.
    fn to_internal(&self, value: f64) -> f64 {
        value
    }

    /// Inverse of [`Axis::to_internal`].
    fn from_internal(&self, value: f64) -> f64 {
        value
    }

    /// Widens tracked data bounds with a scanned value.
    fn include(&mut self, value: f64) {
        self.core_mut().include(value);
    }

    /// Recomputes scale/offset for the current bounds and plot area.
    fn update_transform(&mut self, plot_area: PlotRect) {
        let internal_range = (
            self.to_internal(self.core().actual_minimum()),
            self.to_internal(self.core().actual_maximum()),
        );
        let screen_range = self.core().screen_range(plot_area);
        self.core_mut()
            .set_transform(AxisTransform::fitting(internal_range, screen_range));
    }

    /// Data value to screen coordinate along this axis; NaN when degenerate.
    fn transform(&self, value: f64) -> f64 {
        self.core().transform().apply(self.to_internal(value))
    }

    /// Screen coordinate back to data value; NaN when degenerate.
    fn inverse_transform(&self, screen: f64) -> f64 {
        self.from_internal(self.core().transform().invert(screen))
    }

    /// Shifts the visible bounds by the data delta implied by a screen-space
    /// pointer move. The scale is left untouched; a degenerate axis ignores
    /// the pan instead of producing non-finite bounds.
    fn pan(&mut self, previous: ScreenPoint, current: ScreenPoint) {
        let delta =
            self.core().screen_component(current) - self.core().screen_component(previous);
        let minimum =
            self.inverse_transform(self.transform(self.core().actual_minimum()) - delta);
        let maximum =
            self.inverse_transform(self.transform(self.core().actual_maximum()) - delta);
        if minimum.is_finite() && maximum.is_finite() && minimum < maximum {
            let core = self.core_mut();
            core.actual_minimum = minimum;
            core.actual_maximum = maximum;
        }
    }

    /// Tick values across the actual bounds, at most roughly `target_count`.
    fn ticks(&self, target_count: usize) -> Vec<f64> {
        nice_tick_values(
            self.core().actual_minimum(),
            self.core().actual_maximum(),
            target_count,
        )
    }

    /// Axis-appropriate label for a tick value.
    fn format_value(&self, value: f64) -> String {
        format_decimal(value)
    }

    /// Whether the axis renders guides along a plot-area edge.
    ///
    /// Color and polar axes participate in bounds tracking but draw no
    /// edge guides.
    fn is_positional(&self) -> bool {
        true
    }

    /// Concrete-type access for series that need palette lookups.
    fn as_color_axis(&self) -> Option<&color::ColorAxis> {
        None
    }
}

/// Tick values with a 1/2/5 decimal step ladder.
///
/// Returns multiples of the chosen step inside `[minimum, maximum]`; empty
/// for degenerate or non-finite ranges.
#[must_use]
pub fn nice_tick_values(minimum: f64, maximum: f64, target_count: usize) -> Vec<f64> {
    if target_count == 0
        || !minimum.is_finite()
        || !maximum.is_finite()
        || minimum >= maximum
    {
        return Vec::new();
    }

    let step = nice_step((maximum - minimum) / target_count.max(1) as f64);
    if !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }

    let first = (minimum / step).ceil();
    let last = (maximum / step).floor();
    if first > last {
        return Vec::new();
    }

    let mut ticks = Vec::with_capacity((last - first) as usize + 1);
    let mut index = first;
    while index <= last {
        // Multiply instead of accumulating so long ranges do not drift.
        ticks.push(index * step);
        index += 1.0;
    }
    ticks
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10_f64.powf(raw.abs().log10().floor());
    let residual = raw / magnitude;
    let factor = if residual > 5.0 {
        10.0
    } else if residual > 2.0 {
        5.0
    } else if residual > 1.0 {
        2.0
    } else {
        1.0
    };
    magnitude * factor
}

/// Compact decimal formatting for tick labels.
pub(crate) fn format_decimal(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    // Snap values that are a hair off an integer so tick labels stay clean.
    let rounded = (value * 1e9).round() / 1e9;
    if rounded == rounded.trunc() && rounded.abs() < 1e15 {
        format!("{}", rounded.trunc() as i64)
    } else {
        format!("{rounded}")
    }
}
