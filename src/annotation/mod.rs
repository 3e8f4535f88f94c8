//! Annotations: axis-anchored overlays drawn above series.

mod line;
mod polygon;
mod text;

pub use line::{LineAnnotation, LineAnnotationKind};
pub use polygon::PolygonAnnotation;
pub use text::TextAnnotation;

use crate::error::PlotResult;
use crate::geometry::{PlotRect, ScreenPoint};
use crate::model::AxisRegistry;
use crate::render::RenderContext;

/// Contract every annotation satisfies.
///
/// Mirrors the series pipeline without bounds participation: annotations
/// anchor to axes but never widen them.
pub trait Annotation {
    /// Resolves axis keys into handles against the owning model's registry.
    fn ensure_axes(&mut self, axes: &AxisRegistry) -> PlotResult<()>;

    /// Flags cached screen geometry stale after axis mutation.
    fn invalidate_geometry(&mut self);

    /// Draws the annotation, caching the screen geometry hit-testing uses.
    fn render(
        &mut self,
        context: &mut dyn RenderContext,
        axes: &AxisRegistry,
        plot_area: PlotRect,
    ) -> PlotResult<()>;

    /// Whether `point` hits the annotation's cached geometry.
    ///
    /// Out-of-date or never-rendered geometry reports no hit rather than
    /// failing.
    fn hit_test(&self, point: ScreenPoint) -> bool;
}
