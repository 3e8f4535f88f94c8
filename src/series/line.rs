use crate::axis::{Axis, AxisId};
use crate::error::PlotResult;
use crate::geometry::{DataPoint, PlotRect, ScreenPoint, is_inside};
use crate::model::AxisRegistry;
use crate::render::{Color, EdgeRenderingMode, LineJoin, RenderContext};
use crate::series::{
    Series, TrackerHit, clipped_polyline_runs, nearest_interpolated, nearest_sample,
    project_points,
};

/// Circular marker drawn on each visible sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub size: f64,
    pub fill: Color,
}

/// Polyline series over XY samples.
///
/// Undefined samples break the line into separate runs instead of being
/// bridged, and every segment is clipped to the plot area before drawing.
#[derive(Debug, Clone)]
pub struct LineSeries {
    title: Option<String>,
    x_axis_key: String,
    y_axis_key: String,
    points: Vec<DataPoint>,
    color: Color,
    thickness: f64,
    dash: Vec<f64>,
    join: LineJoin,
    marker: Option<MarkerStyle>,
    resolved: Option<(AxisId, AxisId)>,
    screen_points: Vec<ScreenPoint>,
    geometry_dirty: bool,
}

impl LineSeries {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            x_axis_key: String::new(),
            y_axis_key: String::new(),
            points: Vec::new(),
            color: Color::rgb(0.12, 0.47, 0.71),
            thickness: 1.5,
            dash: Vec::new(),
            join: LineJoin::Miter,
            marker: None,
            resolved: None,
            screen_points: Vec::new(),
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

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    #[must_use]
    pub fn with_dash(mut self, dash: Vec<f64>) -> Self {
        self.dash = dash;
        self
    }

    #[must_use]
    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    #[must_use]
    pub fn with_marker(mut self, marker: MarkerStyle) -> Self {
        self.marker = Some(marker);
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

    pub fn push_point(&mut self, point: DataPoint) {
        self.points.push(point);
        self.geometry_dirty = true;
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    #[must_use]
    pub fn screen_points(&self) -> &[ScreenPoint] {
        &self.screen_points
    }
}

impl Default for LineSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl Series for LineSeries {
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
    }

    fn update_geometry(&mut self, axes: &AxisRegistry, _plot_area: PlotRect) {
        if !self.geometry_dirty {
            return;
        }
        let Some((x_id, y_id)) = self.resolved else {
            return;
        };
        self.screen_points = project_points(&self.points, axes.axis(x_id), axes.axis(y_id));
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

        for run in clipped_polyline_runs(&self.screen_points, plot_area) {
            context.draw_line(
                &run,
                self.color,
                self.thickness,
                &self.dash,
                self.join,
                EdgeRenderingMode::Automatic,
            )?;
        }

        if let Some(marker) = self.marker {
            let half = marker.size / 2.0;
            for screen in &self.screen_points {
                if !is_inside(plot_area, *screen) {
                    continue;
                }
                let rect = PlotRect::from_corners(
                    ScreenPoint::new(screen.x - half, screen.y - half),
                    ScreenPoint::new(screen.x + half, screen.y + half),
                );
                context.draw_ellipse(rect, marker.fill, Color::TRANSPARENT, 0.0)?;
            }
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
