use crate::annotation::Annotation;
use crate::axis::{Axis, AxisId};
use crate::error::PlotResult;
use crate::geometry::{DataPoint, PlotRect, ScreenPoint};
use crate::model::AxisRegistry;
use crate::render::{
    Color, FontSpec, HorizontalAlignment, RenderContext, VerticalAlignment,
};

/// Free-standing label anchored at a data point.
#[derive(Debug, Clone)]
pub struct TextAnnotation {
    position: DataPoint,
    text: String,
    color: Color,
    font: FontSpec,
    rotation_degrees: f64,
    h_align: HorizontalAlignment,
    v_align: VerticalAlignment,
    x_axis_key: String,
    y_axis_key: String,
    resolved: Option<(AxisId, AxisId)>,
    screen_bounds: Option<PlotRect>,
}

impl TextAnnotation {
    #[must_use]
    pub fn new(position: DataPoint, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
            color: Color::BLACK,
            font: FontSpec::default(),
            rotation_degrees: 0.0,
            h_align: HorizontalAlignment::Center,
            v_align: VerticalAlignment::Middle,
            x_axis_key: String::new(),
            y_axis_key: String::new(),
            resolved: None,
            screen_bounds: None,
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
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation_degrees: f64) -> Self {
        self.rotation_degrees = rotation_degrees;
        self
    }

    #[must_use]
    pub fn with_alignment(
        mut self,
        h_align: HorizontalAlignment,
        v_align: VerticalAlignment,
    ) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Annotation for TextAnnotation {
    fn ensure_axes(&mut self, axes: &AxisRegistry) -> PlotResult<()> {
        self.resolved = Some((
            axes.resolve(&self.x_axis_key, true)?,
            axes.resolve(&self.y_axis_key, false)?,
        ));
        Ok(())
    }

    fn invalidate_geometry(&mut self) {
        self.screen_bounds = None;
    }

    fn render(
        &mut self,
        context: &mut dyn RenderContext,
        axes: &AxisRegistry,
        _plot_area: PlotRect,
    ) -> PlotResult<()> {
        self.screen_bounds = None;
        let Some((x_id, y_id)) = self.resolved else {
            return Ok(());
        };
        if !self.position.is_defined() || self.text.is_empty() {
            return Ok(());
        }

        let anchor = ScreenPoint::new(
            axes.axis(x_id).transform(self.position.x),
            axes.axis(y_id).transform(self.position.y),
        );
        if !anchor.is_defined() {
            return Ok(());
        }

        // Hit bounds use the backend's own metrics; rotation is ignored for
        // hit-testing, which keeps the test conservative for small angles.
        let size = context.measure_text(&self.text, &self.font);
        let left = match self.h_align {
            HorizontalAlignment::Left => anchor.x,
            HorizontalAlignment::Center => anchor.x - size.width / 2.0,
            HorizontalAlignment::Right => anchor.x - size.width,
        };
        let top = match self.v_align {
            VerticalAlignment::Top => anchor.y,
            VerticalAlignment::Middle => anchor.y - size.height / 2.0,
            VerticalAlignment::Bottom => anchor.y - size.height,
        };
        self.screen_bounds = PlotRect::new(left, top, size.width, size.height).ok();

        context.draw_text(
            anchor,
            &self.text,
            self.color,
            &self.font,
            self.rotation_degrees,
            self.h_align,
            self.v_align,
        )
    }

    fn hit_test(&self, point: ScreenPoint) -> bool {
        self.screen_bounds
            .map(|bounds| bounds.contains(point))
            .unwrap_or(false)
    }
}
