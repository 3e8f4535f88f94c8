use crate::annotation::Annotation;
use crate::axis::{Axis, AxisId};
use crate::error::PlotResult;
use crate::geometry::{DataPoint, PlotRect, ScreenPoint, clip_line, point_on_line};
use crate::model::AxisRegistry;
use crate::render::{
    Color, EdgeRenderingMode, FontSpec, HorizontalAlignment, LineJoin, RenderContext,
    VerticalAlignment,
};

const HIT_TOLERANCE_PX: f64 = 4.0;

/// Geometry of a line annotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineAnnotationKind {
    /// Horizontal guide at a y data value, spanning the plot area.
    Horizontal(f64),
    /// Vertical guide at an x data value, spanning the plot area.
    Vertical(f64),
    /// Segment between two data points.
    Segment(DataPoint, DataPoint),
}

/// Guide line anchored in data space, clipped to the plot area.
#[derive(Debug, Clone)]
pub struct LineAnnotation {
    kind: LineAnnotationKind,
    x_axis_key: String,
    y_axis_key: String,
    color: Color,
    thickness: f64,
    dash: Vec<f64>,
    label: Option<String>,
    font: FontSpec,
    resolved: Option<(AxisId, AxisId)>,
    screen_segment: Option<(ScreenPoint, ScreenPoint)>,
}

impl LineAnnotation {
    #[must_use]
    pub fn new(kind: LineAnnotationKind) -> Self {
        Self {
            kind,
            x_axis_key: String::new(),
            y_axis_key: String::new(),
            color: Color::rgb(0.4, 0.4, 0.4),
            thickness: 1.0,
            dash: vec![4.0, 4.0],
            label: None,
            font: FontSpec::default(),
            resolved: None,
            screen_segment: None,
        }
    }

    #[must_use]
    pub fn horizontal(y: f64) -> Self {
        Self::new(LineAnnotationKind::Horizontal(y))
    }

    #[must_use]
    pub fn vertical(x: f64) -> Self {
        Self::new(LineAnnotationKind::Vertical(x))
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
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn compute_screen_segment(
        &self,
        x_axis: &dyn Axis,
        y_axis: &dyn Axis,
        plot_area: PlotRect,
    ) -> Option<(ScreenPoint, ScreenPoint)> {
        let (p0, p1) = match self.kind {
            LineAnnotationKind::Horizontal(y) => {
                let screen_y = y_axis.transform(y);
                if !screen_y.is_finite() {
                    return None;
                }
                (
                    ScreenPoint::new(plot_area.left(), screen_y),
                    ScreenPoint::new(plot_area.right(), screen_y),
                )
            }
            LineAnnotationKind::Vertical(x) => {
                let screen_x = x_axis.transform(x);
                if !screen_x.is_finite() {
                    return None;
                }
                (
                    ScreenPoint::new(screen_x, plot_area.top()),
                    ScreenPoint::new(screen_x, plot_area.bottom()),
                )
            }
            LineAnnotationKind::Segment(a, b) => {
                if !a.is_defined() || !b.is_defined() {
                    return None;
                }
                (
                    ScreenPoint::new(x_axis.transform(a.x), y_axis.transform(a.y)),
                    ScreenPoint::new(x_axis.transform(b.x), y_axis.transform(b.y)),
                )
            }
        };
        clip_line(plot_area, p0, p1)
    }
}

impl Annotation for LineAnnotation {
    fn ensure_axes(&mut self, axes: &AxisRegistry) -> PlotResult<()> {
        self.resolved = Some((
            axes.resolve(&self.x_axis_key, true)?,
            axes.resolve(&self.y_axis_key, false)?,
        ));
        Ok(())
    }

    fn invalidate_geometry(&mut self) {
        self.screen_segment = None;
    }

    fn render(
        &mut self,
        context: &mut dyn RenderContext,
        axes: &AxisRegistry,
        plot_area: PlotRect,
    ) -> PlotResult<()> {
        let Some((x_id, y_id)) = self.resolved else {
            return Ok(());
        };
        let segment = self.compute_screen_segment(axes.axis(x_id), axes.axis(y_id), plot_area);
        self.screen_segment = segment;
        let Some((start, end)) = segment else {
            return Ok(());
        };

        context.draw_line(
            &[start, end],
            self.color,
            self.thickness,
            &self.dash,
            LineJoin::Miter,
            EdgeRenderingMode::PreferSharpness,
        )?;

        if let Some(label) = &self.label {
            // Label sits just above the segment start.
            let position = ScreenPoint::new(start.x + 4.0, start.y - 4.0);
            context.draw_text(
                position,
                label,
                self.color,
                &self.font,
                0.0,
                HorizontalAlignment::Left,
                VerticalAlignment::Bottom,
            )?;
        }
        Ok(())
    }

    fn hit_test(&self, point: ScreenPoint) -> bool {
        let Some((start, end)) = self.screen_segment else {
            return false;
        };
        let nearest = point_on_line(point, start, end);
        let nearest = if nearest.is_defined() { nearest } else { start };
        point.distance_to(nearest) <= HIT_TOLERANCE_PX
    }
}
