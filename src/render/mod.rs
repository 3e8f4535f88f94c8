mod frame;
mod null;
mod primitives;
mod svg;

pub use frame::{DrawCommand, FrameRenderContext, RenderFrame};
pub use null::NullRenderContext;
pub use primitives::{
    Color, EdgeRenderingMode, FontSpec, FontWeight, HorizontalAlignment, LineJoin, PlotImage,
    VerticalAlignment,
};
pub use svg::SvgRenderContext;

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::CairoRenderContext;

use std::sync::Arc;

use crate::error::PlotResult;
use crate::geometry::{PlotRect, ScreenPoint, ScreenSize};

/// Contract implemented by every output target.
///
/// Series and annotations draw exclusively through this trait, so a plot
/// renders identically into a recorded frame, an SVG document, or a Cairo
/// surface. Implementations confine side effects to their own surface; a
/// context must not be shared between concurrent render passes.
///
/// Invisible or degenerate input (zero-alpha colors, non-positive
/// thickness, empty point lists or text) is a no-op, never an error.
pub trait RenderContext {
    fn draw_line(
        &mut self,
        points: &[ScreenPoint],
        stroke: Color,
        thickness: f64,
        dash: &[f64],
        join: LineJoin,
        edge_mode: EdgeRenderingMode,
    ) -> PlotResult<()>;

    fn draw_polygon(
        &mut self,
        points: &[ScreenPoint],
        fill: Color,
        stroke: Color,
        thickness: f64,
        dash: &[f64],
        join: LineJoin,
        edge_mode: EdgeRenderingMode,
    ) -> PlotResult<()>;

    fn draw_ellipse(
        &mut self,
        rect: PlotRect,
        fill: Color,
        stroke: Color,
        thickness: f64,
    ) -> PlotResult<()>;

    fn draw_rectangle(
        &mut self,
        rect: PlotRect,
        fill: Color,
        stroke: Color,
        thickness: f64,
    ) -> PlotResult<()>;

    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        position: ScreenPoint,
        text: &str,
        color: Color,
        font: &FontSpec,
        rotation_degrees: f64,
        h_align: HorizontalAlignment,
        v_align: VerticalAlignment,
    ) -> PlotResult<()>;

    /// Measures `text` with the same metrics `draw_text` lays out with, so
    /// alignment computed from the result is pixel-correct on this backend.
    fn measure_text(&self, text: &str, font: &FontSpec) -> ScreenSize;

    fn draw_image(
        &mut self,
        image: &Arc<PlotImage>,
        source: PlotRect,
        destination: PlotRect,
        opacity: f64,
        interpolate: bool,
    ) -> PlotResult<()>;

    /// Pushes a rectangular clip region.
    ///
    /// Regions form a stack: a nested push clips to the intersection with
    /// the enclosing region, and `pop_clip` restores the previous one.
    fn push_clip(&mut self, rect: PlotRect) -> PlotResult<()>;

    fn pop_clip(&mut self) -> PlotResult<()>;
}

/// True when a stroke with this color and thickness would put ink on the
/// surface.
#[must_use]
pub(crate) fn stroke_visible(color: Color, thickness: f64) -> bool {
    !color.is_invisible() && thickness.is_finite() && thickness > 0.0
}

/// Drops undefined points; a polyline with fewer than two defined points is
/// not drawable.
#[must_use]
pub(crate) fn defined_points(points: &[ScreenPoint]) -> Vec<ScreenPoint> {
    points
        .iter()
        .copied()
        .filter(|point| point.is_defined())
        .collect()
}
