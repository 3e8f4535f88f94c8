use crate::axis::{Axis, AxisId};
use crate::error::PlotResult;
use crate::geometry::{DataPoint, PlotRect, ScreenPoint};
use crate::model::AxisRegistry;
use crate::render::{Color, EdgeRenderingMode, LineJoin, RenderContext};
use crate::series::{
    Series, TrackerHit, clipped_polyline_runs, nearest_interpolated, nearest_sample,
    project_points,
};

/// Filled series between the data polyline and a constant baseline.
///
/// The fill polygon is explicitly closed against the baseline; the boundary
/// polyline is drawn on top and drives hit-testing.
#[derive(Debug, Clone)]
pub struct AreaSeries {
    title: Option<String>,
    x_axis_key: String,
    y_axis_key: String,
    points: Vec<DataPoint>,
    baseline: f64,
    fill: Color,
    stroke: Color,
    thickness: f64,
    resolved: Option<(AxisId, AxisId)>,
    screen_points: Vec<ScreenPoint>,
    fill_polygon: Vec<ScreenPoint>,
    geometry_dirty: bool,
}

impl AreaSeries {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            x_axis_key: String::new(),
            y_axis_key: String::new(),
            points: Vec::new(),
            baseline: 0.0,
            fill: Color::rgba(0.12, 0.47, 0.71, 0.25),
            stroke: Color::rgb(0.12, 0.47, 0.71),
            thickness: 1.5,
            resolved: None,
            screen_points: Vec::new(),
            fill_polygon: Vec::new(),
            geometry_dirty: true,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_axis_keys(mut self, x_key: impl Into<String>, y_key: impl Into<String>) -> Self {
        self.x_axis_key = x_key.into();
        self.y_axis_key = y_key.into();
        self.resolved = None;
        self
    }

    /// Data-space value the fill extends down (or up) to.
    #[must_use]
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        if baseline.is_finite() {
            self.baseline = baseline;
        }
        self.geometry_dirty = true;
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Color, thickness: f64) -> Self {
        self.stroke = stroke;
        self.thickness = thickness;
        self
    }

    #[must_use]
    pub fn with_points(mut self, points: Vec<DataPoint>) -> Self {
        self.points = points;
        self.geometry_dirty = true;
        self
    }

    pub fn set_points(&mut self, points: Vec<DataPoint>) {
        self.points = points;
        self.geometry_dirty = true;
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    fn rebuild_fill_polygon(&mut self, y_axis: &dyn Axis) {
        self.fill_polygon.clear();
        let defined: Vec<ScreenPoint> = self
            .screen_points
            .iter()
            .copied()
            .filter(|point| point.is_defined())
            .collect();
        if defined.len() < 2 {
            return;
        }

        let baseline_y = y_axis.transform(self.baseline);
        if !baseline_y.is_finite() {
            return;
        }
        let first = defined[0];
        let last = defined[defined.len() - 1];
        // Close against the baseline under the first and last samples.
        self.fill_polygon.reserve(defined.len() + 2);
        self.fill_polygon.push(ScreenPoint::new(first.x, baseline_y));
        self.fill_polygon.extend(defined);
        self.fill_polygon.push(ScreenPoint::new(last.x, baseline_y));
    }
}

impl Default for AreaSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl Series for AreaSeries {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn ensure_axes(&mut self, axes: &AxisRegistry) -> PlotResult<()> {
        self.resolved = Some((
            axes.resolve(&self.x_axis_key, true)?,
            axes.resolve(&self.y_axis_key, false)?,
        ));
        Ok(())
    }

    fn update_max_min(&self, axes: &mut AxisRegistry) {
        let Some((x_id, y_id)) = self.resolved else {
            return;
        };
        for point in &self.points {
            if !point.is_defined() {
                continue;
            }
            axes.axis_mut(x_id).include(point.x);
            axes.axis_mut(y_id).include(point.y);
        }
        if !self.points.is_empty() {
            axes.axis_mut(y_id).include(self.baseline);
        }
    }

    fn update_geometry(&mut self, axes: &AxisRegistry, _plot_area: PlotRect) {
        if !self.geometry_dirty {
            return;
        }
        let Some((x_id, y_id)) = self.resolved else {
            return;
        };
        self.screen_points = project_points(&self.points, axes.axis(x_id), axes.axis(y_id));
        self.rebuild_fill_polygon(axes.axis(y_id));
        self.geometry_dirty = false;
    }

    fn invalidate_geometry(&mut self) {
        self.geometry_dirty = true;
    }

    fn render(
        &mut self,
        context: &mut dyn RenderContext,
        axes: &AxisRegistry,
        plot_area: PlotRect,
    ) -> PlotResult<()> {
        if self.points.is_empty() {
            return Ok(());
        }
        self.update_geometry(axes, plot_area);

        context.draw_polygon(
            &self.fill_polygon,
            self.fill,
            Color::TRANSPARENT,
            0.0,
            &[],
            LineJoin::Miter,
            EdgeRenderingMode::Automatic,
        )?;

        for run in clipped_polyline_runs(&self.screen_points, plot_area) {
            context.draw_line(
                &run,
                self.stroke,
                self.thickness,
                &[],
                LineJoin::Miter,
                EdgeRenderingMode::Automatic,
            )?;
        }
        Ok(())
    }

    fn nearest_point(
        &self,
        point: ScreenPoint,
        interpolate: bool,
        axes: &AxisRegistry,
    ) -> Option<TrackerHit> {
        let (x_id, y_id) = self.resolved?;
        if interpolate {
            nearest_interpolated(point, &self.screen_points, axes.axis(x_id), axes.axis(y_id))
        } else {
            nearest_sample(point, &self.screen_points, &self.points)
        }
    }
}
