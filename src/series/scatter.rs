use crate::axis::{Axis, AxisId};
use crate::error::PlotResult;
use crate::geometry::{DataPoint, PlotRect, ScreenPoint, is_inside};
use crate::model::AxisRegistry;
use crate::render::{Color, RenderContext};
use crate::series::{Series, TrackerHit, nearest_sample, project_points};

/// Marker-per-sample series, optionally color-mapped through a color axis.
///
/// Interpolated hit-testing makes no sense between unconnected markers, so
/// `nearest_point` always snaps to actual samples.
#[derive(Debug, Clone)]
pub struct ScatterSeries {
    title: Option<String>,
    x_axis_key: String,
    y_axis_key: String,
    color_axis_key: Option<String>,
    points: Vec<DataPoint>,
    /// Optional per-sample value fed through the color axis.
    values: Vec<f64>,
    marker_size: f64,
    fill: Color,
    resolved: Option<(AxisId, AxisId)>,
    resolved_color_axis: Option<AxisId>,
    screen_points: Vec<ScreenPoint>,
    geometry_dirty: bool,
}

impl ScatterSeries {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            x_axis_key: String::new(),
            y_axis_key: String::new(),
            color_axis_key: None,
            points: Vec::new(),
            values: Vec::new(),
            marker_size: 5.0,
            fill: Color::rgb(0.85, 0.37, 0.01),
            resolved: None,
            resolved_color_axis: None,
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

    /// Routes per-sample values through the color axis registered under
    /// `key`.
    #[must_use]
    pub fn with_color_axis_key(mut self, key: impl Into<String>) -> Self {
        self.color_axis_key = Some(key.into());
        self.resolved_color_axis = None;
        self
    }

    #[must_use]
    pub fn with_marker_size(mut self, marker_size: f64) -> Self {
        self.marker_size = marker_size;
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    #[must_use]
    pub fn with_points(mut self, points: Vec<DataPoint>) -> Self {
        self.points = points;
        self.geometry_dirty = true;
        self
    }

    /// Sets samples together with the values driving the color axis.
    ///
    /// Missing values fall back to the flat fill color.
    #[must_use]
    pub fn with_points_and_values(mut self, points: Vec<DataPoint>, values: Vec<f64>) -> Self {
        self.points = points;
        self.values = values;
        self.geometry_dirty = true;
        self
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    fn marker_color(&self, index: usize, axes: &AxisRegistry) -> Color {
        match (self.resolved_color_axis, self.values.get(index)) {
            (Some(axis_id), Some(value)) => axes
                .color_axis(axis_id)
                .map(|axis| axis.color_for(*value))
                .unwrap_or(self.fill),
            _ => self.fill,
        }
    }
}

impl Default for ScatterSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl Series for ScatterSeries {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn ensure_axes(&mut self, axes: &AxisRegistry) -> PlotResult<()> {
        self.resolved = Some((
            axes.resolve(&self.x_axis_key, true)?,
            axes.resolve(&self.y_axis_key, false)?,
        ));
        self.resolved_color_axis = match &self.color_axis_key {
            Some(key) => Some(axes.resolve_key(key)?),
            None => None,
        };
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
        if let Some(color_id) = self.resolved_color_axis {
            for value in &self.values {
                axes.axis_mut(color_id).include(*value);
            }
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

        let half = self.marker_size / 2.0;
        for (index, screen) in self.screen_points.iter().enumerate() {
            if !is_inside(plot_area, *screen) {
                continue;
            }
            let rect = PlotRect::from_corners(
                ScreenPoint::new(screen.x - half, screen.y - half),
                ScreenPoint::new(screen.x + half, screen.y + half),
            );
            context.draw_ellipse(
                rect,
                self.marker_color(index, axes),
                Color::TRANSPARENT,
                0.0,
            )?;
        }
        Ok(())
    }

    fn nearest_point(
        &self,
        point: ScreenPoint,
        _interpolate: bool,
        _axes: &AxisRegistry,
    ) -> Option<TrackerHit> {
        nearest_sample(point, &self.screen_points, &self.points)
    }
}
