//! Axis pair for polar plots.
//!
//! An [`AngleAxis`] maps data onto an angular range in degrees and a
//! [`MagnitudeAxis`] maps data onto a radius in pixels; [`polar_to_screen`]
//! combines the two around the plot-area center.

use crate::axis::{Axis, AxisCore, AxisPosition, AxisTransform};
use crate::geometry::{PlotRect, ScreenPoint};

/// Angular axis for polar plots; transformed values are degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleAxis {
    core: AxisCore,
    start_angle: f64,
    end_angle: f64,
}

impl AngleAxis {
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: AxisCore::new(AxisPosition::Bottom),
            start_angle: 0.0,
            end_angle: 360.0,
        }
    }

    /// Restricts the angular sweep the data range maps onto.
    #[must_use]
    pub fn with_angle_range(mut self, start_angle: f64, end_angle: f64) -> Self {
        if start_angle.is_finite() && end_angle.is_finite() && start_angle != end_angle {
            self.start_angle = start_angle;
            self.end_angle = end_angle;
        }
        self
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.core.set_key(key);
        self
    }
}

impl Default for AngleAxis {
    fn default() -> Self {
        Self::new()
    }
}

impl Axis for AngleAxis {
    fn core(&self) -> &AxisCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AxisCore {
        &mut self.core
    }

    fn is_positional(&self) -> bool {
        false
    }

    /// Angular axes ignore the plot-area edges and map onto their sweep.
    fn update_transform(&mut self, _plot_area: PlotRect) {
        let value_range = (self.core.actual_minimum(), self.core.actual_maximum());
        let angle_range = (self.start_angle, self.end_angle);
        self.core
            .set_transform(AxisTransform::fitting(value_range, angle_range));
    }
}

/// Radial axis for polar plots; transformed values are pixel radii.
#[derive(Debug, Clone, PartialEq)]
pub struct MagnitudeAxis {
    core: AxisCore,
}

impl MagnitudeAxis {
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: AxisCore::new(AxisPosition::Left),
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.core.set_key(key);
        self
    }
}

impl Default for MagnitudeAxis {
    fn default() -> Self {
        Self::new()
    }
}

impl Axis for MagnitudeAxis {
    fn core(&self) -> &AxisCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AxisCore {
        &mut self.core
    }

    fn is_positional(&self) -> bool {
        false
    }

    /// The radius spans from the center to the nearest plot-area edge.
    fn update_transform(&mut self, plot_area: PlotRect) {
        let value_range = (self.core.actual_minimum(), self.core.actual_maximum());
        let max_radius = plot_area.width().min(plot_area.height()) / 2.0;
        self.core
            .set_transform(AxisTransform::fitting(value_range, (0.0, max_radius)));
    }
}

/// Composes angle (degrees, counterclockwise from the positive x axis) and
/// radius (pixels) into a screen point around the plot-area center.
///
/// Undefined inputs propagate to the undefined screen point.
#[must_use]
pub fn polar_to_screen(plot_area: PlotRect, angle_degrees: f64, radius: f64) -> ScreenPoint {
    if !angle_degrees.is_finite() || !radius.is_finite() {
        return ScreenPoint::UNDEFINED;
    }
    let center = plot_area.center();
    let theta = angle_degrees.to_radians();
    ScreenPoint::new(
        center.x + radius * theta.cos(),
        center.y - radius * theta.sin(),
    )
}
