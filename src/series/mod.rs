//! Series: data-owning entities rendered against a pair of axes.
//!
//! Each series runs the same pipeline per pass: axis keys resolve to
//! handles, raw data widens axis bounds, then data projects through the
//! resolved transforms into cached screen geometry that rendering and
//! hit-testing share.

mod area;
mod line;
mod scatter;

pub use area::AreaSeries;
pub use line::LineSeries;
pub use scatter::ScatterSeries;

use crate::axis::Axis;
use crate::error::PlotResult;
use crate::geometry::{DataPoint, PlotRect, ScreenPoint, clip_line};
use crate::model::AxisRegistry;
use crate::render::RenderContext;

/// Result of a nearest-point query against one series.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerHit {
    /// Screen position of the matched point.
    pub position: ScreenPoint,
    /// Data-space value of the matched point.
    pub data: DataPoint,
    /// Index of the sample, or of the segment start when interpolated.
    pub sample_index: usize,
    /// Whether the hit lies between two samples.
    pub interpolated: bool,
}

/// Contract every series satisfies.
///
/// A flat capability surface: concrete series share helpers, not state.
pub trait Series {
    fn title(&self) -> Option<&str>;

    /// Resolves axis keys into handles against the owning model's registry.
    ///
    /// Fails with the missing-axis error when a non-default key does not
    /// resolve; must run before bounds or geometry updates.
    fn ensure_axes(&mut self, axes: &AxisRegistry) -> PlotResult<()>;

    /// Widens the resolved axes with every finite data value.
    fn update_max_min(&self, axes: &mut AxisRegistry);

    /// Recomputes cached screen geometry when marked dirty.
    fn update_geometry(&mut self, axes: &AxisRegistry, plot_area: PlotRect);

    /// Flags cached geometry stale after axis or data mutation.
    fn invalidate_geometry(&mut self);

    /// Issues draw calls for the current cached geometry.
    ///
    /// Empty data renders nothing and is not an error.
    fn render(
        &mut self,
        context: &mut dyn RenderContext,
        axes: &AxisRegistry,
        plot_area: PlotRect,
    ) -> PlotResult<()>;

    /// Nearest plotted value to `point`.
    ///
    /// With `interpolate` the result may lie on a segment between samples;
    /// without it only actual samples qualify. Returns `None` when the
    /// series has no defined geometry.
    fn nearest_point(
        &self,
        point: ScreenPoint,
        interpolate: bool,
        axes: &AxisRegistry,
    ) -> Option<TrackerHit>;
}

/// Projects data points through an axis pair into screen space.
///
/// Undefined data points and degenerate transforms map to the undefined
/// screen point, preserving indices so callers can correlate samples.
#[must_use]
pub fn project_points(
    points: &[DataPoint],
    x_axis: &dyn Axis,
    y_axis: &dyn Axis,
) -> Vec<ScreenPoint> {
    let project = |point: &DataPoint| {
        if !point.is_defined() {
            return ScreenPoint::UNDEFINED;
        }
        let screen = ScreenPoint::new(x_axis.transform(point.x), y_axis.transform(point.y));
        if screen.is_defined() {
            screen
        } else {
            ScreenPoint::UNDEFINED
        }
    };

    #[cfg(feature = "parallel-projection")]
    {
        use rayon::prelude::*;
        if points.len() >= 4096 {
            return points.par_iter().map(project).collect();
        }
    }

    points.iter().map(project).collect()
}

/// Splits a projected polyline into drawable runs clipped to `bounds`.
///
/// Undefined points and fully-outside segments break the polyline; adjacent
/// clipped segments that share an endpoint merge back into one run.
#[must_use]
pub fn clipped_polyline_runs(points: &[ScreenPoint], bounds: PlotRect) -> Vec<Vec<ScreenPoint>> {
    let mut runs: Vec<Vec<ScreenPoint>> = Vec::new();
    let mut current: Vec<ScreenPoint> = Vec::new();

    for pair in points.windows(2) {
        let clipped = if pair[0].is_defined() && pair[1].is_defined() {
            clip_line(bounds, pair[0], pair[1])
        } else {
            None
        };

        match clipped {
            Some((start, end)) => {
                let continues = current
                    .last()
                    .map(|last| last.distance_squared_to(start) <= 1e-12)
                    .unwrap_or(false);
                if !continues {
                    if current.len() >= 2 {
                        runs.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                    current.push(start);
                }
                current.push(end);
            }
            None => {
                if current.len() >= 2 {
                    runs.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
        }
    }

    if current.len() >= 2 {
        runs.push(current);
    }
    runs
}

/// Nearest actual sample among the cached screen points.
pub(crate) fn nearest_sample(
    target: ScreenPoint,
    screen_points: &[ScreenPoint],
    data_points: &[DataPoint],
) -> Option<TrackerHit> {
    let mut best: Option<(f64, TrackerHit)> = None;
    for (index, screen) in screen_points.iter().enumerate() {
        if !screen.is_defined() {
            continue;
        }
        let distance = target.distance_squared_to(*screen);
        if best.as_ref().map(|(min, _)| distance < *min).unwrap_or(true) {
            best = Some((
                distance,
                TrackerHit {
                    position: *screen,
                    data: data_points[index],
                    sample_index: index,
                    interpolated: false,
                },
            ));
        }
    }
    best.map(|(_, hit)| hit)
}

/// Nearest point on the cached polyline, interpolating between samples.
///
/// The interpolated data value comes from the axes' inverse transforms, so
/// it is exact for the warped value domains too.
pub(crate) fn nearest_interpolated(
    target: ScreenPoint,
    screen_points: &[ScreenPoint],
    x_axis: &dyn Axis,
    y_axis: &dyn Axis,
) -> Option<TrackerHit> {
    let mut best: Option<(f64, TrackerHit)> = None;
    for (index, pair) in screen_points.windows(2).enumerate() {
        if !pair[0].is_defined() || !pair[1].is_defined() {
            continue;
        }
        let candidate = crate::geometry::point_on_line(target, pair[0], pair[1]);
        let candidate = if candidate.is_defined() {
            candidate
        } else {
            pair[0]
        };
        let distance = target.distance_squared_to(candidate);
        if best.as_ref().map(|(min, _)| distance < *min).unwrap_or(true) {
            let data = DataPoint::new(
                x_axis.inverse_transform(candidate.x),
                y_axis.inverse_transform(candidate.y),
            );
            best = Some((
                distance,
                TrackerHit {
                    position: candidate,
                    data,
                    sample_index: index,
                    interpolated: true,
                },
            ));
        }
    }
    best.map(|(_, hit)| hit)
}
