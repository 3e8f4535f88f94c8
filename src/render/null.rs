use std::sync::Arc;

use crate::error::{PlotError, PlotResult};
use crate::geometry::{PlotRect, ScreenPoint, ScreenSize};
use crate::render::{
    Color, EdgeRenderingMode, FontSpec, HorizontalAlignment, LineJoin, PlotImage, RenderContext,
    VerticalAlignment, defined_points, stroke_visible,
};

/// No-op render context used by tests and headless pipelines.
///
/// It applies the same visibility filtering as real backends and counts the
/// calls that would have put ink on a surface, so tests can assert draw
/// behavior without a graphics stack.
#[derive(Debug, Default)]
pub struct NullRenderContext {
    pub lines_drawn: usize,
    pub polygons_drawn: usize,
    pub ellipses_drawn: usize,
    pub rectangles_drawn: usize,
    pub texts_drawn: usize,
    pub images_drawn: usize,
    clip_depth: usize,
}

impl NullRenderContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn clip_depth(&self) -> usize {
        self.clip_depth
    }
}

impl RenderContext for NullRenderContext {
    fn draw_line(
        &mut self,
        points: &[ScreenPoint],
        stroke: Color,
        thickness: f64,
        _dash: &[f64],
        _join: LineJoin,
        _edge_mode: EdgeRenderingMode,
    ) -> PlotResult<()> {
        if defined_points(points).len() >= 2 && stroke_visible(stroke, thickness) {
            self.lines_drawn += 1;
        }
        Ok(())
    }

    fn draw_polygon(
        &mut self,
        points: &[ScreenPoint],
        fill: Color,
        stroke: Color,
        thickness: f64,
        _dash: &[f64],
        _join: LineJoin,
        _edge_mode: EdgeRenderingMode,
    ) -> PlotResult<()> {
        let defined = defined_points(points).len();
        if (defined >= 3 && !fill.is_invisible())
            || (defined >= 2 && stroke_visible(stroke, thickness))
        {
            self.polygons_drawn += 1;
        }
        Ok(())
    }

    fn draw_ellipse(
        &mut self,
        rect: PlotRect,
        fill: Color,
        stroke: Color,
        thickness: f64,
    ) -> PlotResult<()> {
        if !rect.is_empty() && (!fill.is_invisible() || stroke_visible(stroke, thickness)) {
            self.ellipses_drawn += 1;
        }
        Ok(())
    }

    fn draw_rectangle(
        &mut self,
        rect: PlotRect,
        fill: Color,
        stroke: Color,
        thickness: f64,
    ) -> PlotResult<()> {
        if !rect.is_empty() && (!fill.is_invisible() || stroke_visible(stroke, thickness)) {
            self.rectangles_drawn += 1;
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        position: ScreenPoint,
        text: &str,
        color: Color,
        _font: &FontSpec,
        _rotation_degrees: f64,
        _h_align: HorizontalAlignment,
        _v_align: VerticalAlignment,
    ) -> PlotResult<()> {
        if !text.is_empty() && !color.is_invisible() && position.is_defined() {
            self.texts_drawn += 1;
        }
        Ok(())
    }

    fn measure_text(&self, text: &str, font: &FontSpec) -> ScreenSize {
        font.estimate_size(text)
    }

    fn draw_image(
        &mut self,
        _image: &Arc<PlotImage>,
        source: PlotRect,
        destination: PlotRect,
        opacity: f64,
        _interpolate: bool,
    ) -> PlotResult<()> {
        if !source.is_empty() && !destination.is_empty() && opacity > 0.0 {
            self.images_drawn += 1;
        }
        Ok(())
    }

    fn push_clip(&mut self, _rect: PlotRect) -> PlotResult<()> {
        self.clip_depth += 1;
        Ok(())
    }

    fn pop_clip(&mut self) -> PlotResult<()> {
        self.clip_depth = self
            .clip_depth
            .checked_sub(1)
            .ok_or_else(|| PlotError::InvalidData("pop_clip without matching push_clip".to_owned()))?;
        Ok(())
    }
}
