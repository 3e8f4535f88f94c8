use crate::annotation::Annotation;
use crate::axis::AxisId;
use crate::error::PlotResult;
use crate::geometry::{DataPoint, PlotRect, ScreenPoint, centroid, point_in_polygon};
use crate::model::AxisRegistry;
use crate::render::{
    Color, EdgeRenderingMode, FontSpec, HorizontalAlignment, LineJoin, RenderContext,
    VerticalAlignment,
};
use crate::series::project_points;

/// Closed filled region anchored in data space.
///
/// The optional label is placed at the vertex-average centroid; membership
/// tests use the cached screen outline with even-odd semantics.
#[derive(Debug, Clone)]
pub struct PolygonAnnotation {
    vertices: Vec<DataPoint>,
    fill: Color,
    stroke: Color,
    thickness: f64,
    label: Option<String>,
    font: FontSpec,
    x_axis_key: String,
    y_axis_key: String,
    resolved: Option<(AxisId, AxisId)>,
    screen_polygon: Vec<ScreenPoint>,
}

impl PolygonAnnotation {
    #[must_use]
    pub fn new(vertices: Vec<DataPoint>) -> Self {
        Self {
            vertices,
            fill: Color::rgba(0.65, 0.81, 0.89, 0.5),
            stroke: Color::rgb(0.12, 0.47, 0.71),
            thickness: 1.0,
            label: None,
            font: FontSpec::default(),
            x_axis_key: String::new(),
            y_axis_key: String::new(),
            resolved: None,
            screen_polygon: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_axis_keys(mut self, x_key: impl Into<String>, y_key: impl Into<String>) -> Self {
        self.x_axis_key = x_key.into();
        self.y_axis_key = y_key.into();
        self.resolved = None;
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
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn vertices(&self) -> &[DataPoint] {
        &self.vertices
    }
}

impl Annotation for PolygonAnnotation {
    fn ensure_axes(&mut self, axes: &AxisRegistry) -> PlotResult<()> {
        self.resolved = Some((
            axes.resolve(&self.x_axis_key, true)?,
            axes.resolve(&self.y_axis_key, false)?,
        ));
        Ok(())
    }

    fn invalidate_geometry(&mut self) {
        self.screen_polygon.clear();
    }

    fn render(
        &mut self,
        context: &mut dyn RenderContext,
        axes: &AxisRegistry,
        _plot_area: PlotRect,
    ) -> PlotResult<()> {
        self.screen_polygon.clear();
        let Some((x_id, y_id)) = self.resolved else {
            return Ok(());
        };
        if self.vertices.len() < 3 {
            return Ok(());
        }

        let projected = project_points(&self.vertices, axes.axis(x_id), axes.axis(y_id));
        if projected.iter().any(|point| !point.is_defined()) {
            return Ok(());
        }
        self.screen_polygon = projected;

        context.draw_polygon(
            &self.screen_polygon,
            self.fill,
            self.stroke,
            self.thickness,
            &[],
            LineJoin::Miter,
            EdgeRenderingMode::Automatic,
        )?;

        if let Some(label) = &self.label {
            let center = centroid(&self.screen_polygon);
            context.draw_text(
                center,
                label,
                Color::BLACK,
                &self.font,
                0.0,
                HorizontalAlignment::Center,
                VerticalAlignment::Middle,
            )?;
        }
        Ok(())
    }

    fn hit_test(&self, point: ScreenPoint) -> bool {
        point_in_polygon(point, &self.screen_polygon)
    }
}
