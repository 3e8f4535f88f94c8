//! Plot model: the entity graph one chart is built from.
//!
//! A model owns its axes, series and annotations and drives the two-phase
//! pass: `update` resolves axis handles and data bounds, `render` issues
//! draw calls through a [`RenderContext`]. Rendering is single-threaded per
//! model; concurrent passes against one model need external locking.

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use tracing::debug;

use crate::annotation::Annotation;
use crate::axis::{Axis, AxisId, AxisPosition, ColorAxis};
use crate::error::{PlotError, PlotResult};
use crate::geometry::{PlotRect, ScreenPoint, Viewport};
use crate::render::{
    Color, EdgeRenderingMode, FontSpec, HorizontalAlignment, LineJoin, RenderContext,
    VerticalAlignment,
};
use crate::series::{Series, TrackerHit};

const TICK_MARK_LENGTH_PX: f64 = 4.0;
const TICK_LABEL_GAP_PX: f64 = 6.0;
const TARGET_TICK_SPACING_PX: f64 = 80.0;

/// Axis store with key-indexed resolution.
///
/// Axes live in registration order; non-empty keys index into the order via
/// an [`IndexMap`] so resolution is a handle lookup, not a scan.
#[derive(Default)]
pub struct AxisRegistry {
    axes: Vec<Box<dyn Axis>>,
    key_index: IndexMap<String, AxisId>,
}

impl AxisRegistry {
    /// Registers an axis, rejecting duplicate non-empty keys.
    pub fn add(&mut self, axis: Box<dyn Axis>) -> PlotResult<AxisId> {
        let id = AxisId(self.axes.len());
        let key = axis.core().key().to_owned();
        if !key.is_empty() {
            if self.key_index.contains_key(&key) {
                return Err(PlotError::InvalidData(format!(
                    "duplicate axis key `{key}`"
                )));
            }
            self.key_index.insert(key, id);
        }
        self.axes.push(axis);
        Ok(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Axis behind a handle issued by this registry.
    #[must_use]
    pub fn axis(&self, id: AxisId) -> &dyn Axis {
        self.axes[id.0].as_ref()
    }

    #[must_use]
    pub fn axis_mut(&mut self, id: AxisId) -> &mut dyn Axis {
        self.axes[id.0].as_mut()
    }

    /// Concrete color-axis access for palette lookups.
    #[must_use]
    pub fn color_axis(&self, id: AxisId) -> Option<&ColorAxis> {
        self.axis(id).as_color_axis()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AxisId, &dyn Axis)> {
        self.axes
            .iter()
            .enumerate()
            .map(|(index, axis)| (AxisId(index), axis.as_ref()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (AxisId, &mut Box<dyn Axis>)> {
        self.axes
            .iter_mut()
            .enumerate()
            .map(|(index, axis)| (AxisId(index), axis))
    }

    /// Resolves an exact non-empty key.
    pub fn resolve_key(&self, key: &str) -> PlotResult<AxisId> {
        self.key_index
            .get(key)
            .copied()
            .ok_or_else(|| PlotError::MissingAxis {
                key: key.to_owned(),
            })
    }

    /// Resolves a series axis reference.
    ///
    /// An empty key falls back to the first positional axis with the wanted
    /// orientation; a named key must resolve exactly. Either way a failed
    /// resolution is a terminal configuration error.
    pub fn resolve(&self, key: &str, want_horizontal: bool) -> PlotResult<AxisId> {
        if !key.is_empty() {
            return self.resolve_key(key);
        }

        self.iter()
            .find(|(_, axis)| {
                axis.is_positional() && axis.core().is_horizontal() == want_horizontal
            })
            .map(|(id, _)| id)
            .ok_or_else(|| PlotError::MissingAxis {
                key: if want_horizontal {
                    "(default horizontal)".to_owned()
                } else {
                    "(default vertical)".to_owned()
                },
            })
    }
}

/// Pixel margins reserved around the plot area for axis guides and titles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotMargins {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for PlotMargins {
    fn default() -> Self {
        Self {
            left: 50.0,
            top: 24.0,
            right: 20.0,
            bottom: 40.0,
        }
    }
}

/// Nearest-point hit across a whole model.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotHit {
    pub series_index: usize,
    pub hit: TrackerHit,
}

/// Root chart entity owning axes, series and annotations.
pub struct PlotModel {
    title: Option<String>,
    background: Color,
    margins: PlotMargins,
    label_font: FontSpec,
    axes: AxisRegistry,
    series: Vec<Box<dyn Series>>,
    annotations: Vec<Box<dyn Annotation>>,
    plot_area: PlotRect,
    needs_update: bool,
}

impl PlotModel {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            background: Color::WHITE,
            margins: PlotMargins::default(),
            label_font: FontSpec::default(),
            axes: AxisRegistry::default(),
            series: Vec::new(),
            annotations: Vec::new(),
            plot_area: PlotRect::from_corners(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(0.0, 0.0)),
            needs_update: true,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: PlotMargins) -> Self {
        self.margins = margins;
        self
    }

    pub fn add_axis(&mut self, axis: impl Axis + 'static) -> PlotResult<AxisId> {
        self.needs_update = true;
        self.axes.add(Box::new(axis))
    }

    pub fn add_series(&mut self, series: impl Series + 'static) -> usize {
        self.needs_update = true;
        self.series.push(Box::new(series));
        self.series.len() - 1
    }

    pub fn add_annotation(&mut self, annotation: impl Annotation + 'static) -> usize {
        self.needs_update = true;
        self.annotations.push(Box::new(annotation));
        self.annotations.len() - 1
    }

    #[must_use]
    pub fn axes(&self) -> &AxisRegistry {
        &self.axes
    }

    #[must_use]
    pub fn axis(&self, id: AxisId) -> &dyn Axis {
        self.axes.axis(id)
    }

    #[must_use]
    pub fn axis_mut(&mut self, id: AxisId) -> &mut dyn Axis {
        self.axes.axis_mut(id)
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn series_title(&self, index: usize) -> Option<&str> {
        self.series.get(index).and_then(|series| series.title())
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotRect {
        self.plot_area
    }

    /// Flags data as changed: the next render re-resolves axes and rescans
    /// bounds.
    pub fn invalidate(&mut self) {
        self.needs_update = true;
    }

    /// Flags cached screen geometry stale after an axis moved (pan/zoom)
    /// without rescanning data bounds.
    pub fn invalidate_geometry(&mut self) {
        for series in &mut self.series {
            series.invalidate_geometry();
        }
        for annotation in &mut self.annotations {
            annotation.invalidate_geometry();
        }
    }

    /// Restores every axis to its last committed bounds.
    pub fn reset_axes(&mut self) {
        for (_, axis) in self.axes.iter_mut() {
            axis.core_mut().reset();
        }
        self.invalidate_geometry();
    }

    fn compute_plot_area(&self, viewport: Viewport) -> PlotResult<PlotRect> {
        if !viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let width = f64::from(viewport.width) - self.margins.left - self.margins.right;
        let height = f64::from(viewport.height) - self.margins.top - self.margins.bottom;
        if width <= 0.0 || height <= 0.0 {
            return Err(PlotError::InvalidData(
                "viewport too small for configured margins".to_owned(),
            ));
        }
        PlotRect::new(self.margins.left, self.margins.top, width, height)
    }

    /// Runs the update pass: resolve axis handles, rescan data bounds,
    /// recompute transforms.
    pub fn update(&mut self, viewport: Viewport) -> PlotResult<()> {
        self.plot_area = self.compute_plot_area(viewport)?;

        for series in &mut self.series {
            series.ensure_axes(&self.axes)?;
        }
        for annotation in &mut self.annotations {
            annotation.ensure_axes(&self.axes)?;
        }

        for (_, axis) in self.axes.iter_mut() {
            axis.core_mut().begin_data_update();
        }
        for series in &self.series {
            series.update_max_min(&mut self.axes);
        }
        for (_, axis) in self.axes.iter_mut() {
            axis.core_mut().commit_data_bounds();
            axis.update_transform(self.plot_area);
        }

        self.invalidate_geometry();
        self.needs_update = false;
        debug!(
            axes = self.axes.len(),
            series = self.series.len(),
            annotations = self.annotations.len(),
            "plot model updated"
        );
        Ok(())
    }

    /// Runs one render pass into `context`.
    ///
    /// Follows an update pass when data changed; otherwise only the affine
    /// transforms are refreshed for the (possibly panned/zoomed) bounds.
    pub fn render(
        &mut self,
        context: &mut dyn RenderContext,
        viewport: Viewport,
    ) -> PlotResult<()> {
        let plot_area = self.compute_plot_area(viewport)?;
        if plot_area != self.plot_area {
            self.plot_area = plot_area;
            self.invalidate_geometry();
        }

        if self.needs_update {
            self.update(viewport)?;
        } else {
            for (_, axis) in self.axes.iter_mut() {
                axis.update_transform(plot_area);
            }
        }

        context.draw_rectangle(
            PlotRect::from_viewport(viewport),
            self.background,
            Color::TRANSPARENT,
            0.0,
        )?;

        self.render_axis_guides(context)?;

        context.push_clip(self.plot_area)?;
        for series in &mut self.series {
            series.render(context, &self.axes, plot_area)?;
        }
        for annotation in &mut self.annotations {
            annotation.render(context, &self.axes, plot_area)?;
        }
        context.pop_clip()?;

        if let Some(title) = &self.title {
            let font = FontSpec::new(self.label_font.family.clone(), self.label_font.size + 2.0)
                .bold();
            context.draw_text(
                ScreenPoint::new(plot_area.center().x, plot_area.top() - 6.0),
                title,
                Color::BLACK,
                &font,
                0.0,
                HorizontalAlignment::Center,
                VerticalAlignment::Bottom,
            )?;
        }
        Ok(())
    }

    fn render_axis_guides(&self, context: &mut dyn RenderContext) -> PlotResult<()> {
        let plot_area = self.plot_area;
        let grid_color = Color::rgba(0.0, 0.0, 0.0, 0.12);
        let line_color = Color::rgb(0.25, 0.25, 0.25);

        for (_, axis) in self.axes.iter() {
            if !axis.is_positional() {
                continue;
            }

            let span_px = if axis.core().is_horizontal() {
                plot_area.width()
            } else {
                plot_area.height()
            };
            let target = ((span_px / TARGET_TICK_SPACING_PX).round() as usize).clamp(2, 10);

            for tick in axis.ticks(target) {
                let screen = axis.transform(tick);
                if !screen.is_finite() {
                    continue;
                }
                self.render_tick(context, axis, tick, screen, grid_color)?;
            }

            // Axis line along its own edge.
            let (start, end) = match axis.core().position() {
                AxisPosition::Bottom => (plot_area.bottom_left(), plot_area.bottom_right()),
                AxisPosition::Top => (plot_area.top_left(), plot_area.top_right()),
                AxisPosition::Left => (plot_area.top_left(), plot_area.bottom_left()),
                AxisPosition::Right => (plot_area.top_right(), plot_area.bottom_right()),
            };
            context.draw_line(
                &[start, end],
                line_color,
                1.0,
                &[],
                LineJoin::Miter,
                EdgeRenderingMode::PreferSharpness,
            )?;

            if let Some(title) = axis.core().title() {
                self.render_axis_title(context, axis, title)?;
            }
        }
        Ok(())
    }

    fn render_tick(
        &self,
        context: &mut dyn RenderContext,
        axis: &dyn Axis,
        tick: f64,
        screen: f64,
        grid_color: Color,
    ) -> PlotResult<()> {
        let plot_area = self.plot_area;
        let label = axis.format_value(tick);

        if axis.core().is_horizontal() {
            if screen < plot_area.left() || screen > plot_area.right() {
                return Ok(());
            }
            context.draw_line(
                &[
                    ScreenPoint::new(screen, plot_area.top()),
                    ScreenPoint::new(screen, plot_area.bottom()),
                ],
                grid_color,
                1.0,
                &[],
                LineJoin::Miter,
                EdgeRenderingMode::PreferSharpness,
            )?;

            let at_bottom = axis.core().position() == AxisPosition::Bottom;
            let edge_y = if at_bottom {
                plot_area.bottom()
            } else {
                plot_area.top()
            };
            let mark_y = if at_bottom {
                edge_y + TICK_MARK_LENGTH_PX
            } else {
                edge_y - TICK_MARK_LENGTH_PX
            };
            context.draw_line(
                &[ScreenPoint::new(screen, edge_y), ScreenPoint::new(screen, mark_y)],
                Color::rgb(0.25, 0.25, 0.25),
                1.0,
                &[],
                LineJoin::Miter,
                EdgeRenderingMode::PreferSharpness,
            )?;
            if !label.is_empty() {
                let label_y = if at_bottom {
                    edge_y + TICK_LABEL_GAP_PX
                } else {
                    edge_y - TICK_LABEL_GAP_PX
                };
                context.draw_text(
                    ScreenPoint::new(screen, label_y),
                    &label,
                    Color::BLACK,
                    &self.label_font,
                    0.0,
                    HorizontalAlignment::Center,
                    if at_bottom {
                        VerticalAlignment::Top
                    } else {
                        VerticalAlignment::Bottom
                    },
                )?;
            }
        } else {
            if screen < plot_area.top() || screen > plot_area.bottom() {
                return Ok(());
            }
            context.draw_line(
                &[
                    ScreenPoint::new(plot_area.left(), screen),
                    ScreenPoint::new(plot_area.right(), screen),
                ],
                grid_color,
                1.0,
                &[],
                LineJoin::Miter,
                EdgeRenderingMode::PreferSharpness,
            )?;

            let at_left = axis.core().position() != AxisPosition::Right;
            let edge_x = if at_left {
                plot_area.left()
            } else {
                plot_area.right()
            };
            let mark_x = if at_left {
                edge_x - TICK_MARK_LENGTH_PX
            } else {
                edge_x + TICK_MARK_LENGTH_PX
            };
            context.draw_line(
                &[ScreenPoint::new(edge_x, screen), ScreenPoint::new(mark_x, screen)],
                Color::rgb(0.25, 0.25, 0.25),
                1.0,
                &[],
                LineJoin::Miter,
                EdgeRenderingMode::PreferSharpness,
            )?;
            if !label.is_empty() {
                let label_x = if at_left {
                    edge_x - TICK_LABEL_GAP_PX
                } else {
                    edge_x + TICK_LABEL_GAP_PX
                };
                context.draw_text(
                    ScreenPoint::new(label_x, screen),
                    &label,
                    Color::BLACK,
                    &self.label_font,
                    0.0,
                    if at_left {
                        HorizontalAlignment::Right
                    } else {
                        HorizontalAlignment::Left
                    },
                    VerticalAlignment::Middle,
                )?;
            }
        }
        Ok(())
    }

    fn render_axis_title(
        &self,
        context: &mut dyn RenderContext,
        axis: &dyn Axis,
        title: &str,
    ) -> PlotResult<()> {
        let plot_area = self.plot_area;
        match axis.core().position() {
            AxisPosition::Bottom => context.draw_text(
                ScreenPoint::new(plot_area.center().x, plot_area.bottom() + self.margins.bottom - 4.0),
                title,
                Color::BLACK,
                &self.label_font,
                0.0,
                HorizontalAlignment::Center,
                VerticalAlignment::Bottom,
            ),
            AxisPosition::Top => context.draw_text(
                ScreenPoint::new(plot_area.center().x, plot_area.top() - self.margins.top + 4.0),
                title,
                Color::BLACK,
                &self.label_font,
                0.0,
                HorizontalAlignment::Center,
                VerticalAlignment::Top,
            ),
            AxisPosition::Left => context.draw_text(
                ScreenPoint::new(plot_area.left() - self.margins.left + 12.0, plot_area.center().y),
                title,
                Color::BLACK,
                &self.label_font,
                -90.0,
                HorizontalAlignment::Center,
                VerticalAlignment::Middle,
            ),
            AxisPosition::Right => context.draw_text(
                ScreenPoint::new(plot_area.right() + self.margins.right - 12.0, plot_area.center().y),
                title,
                Color::BLACK,
                &self.label_font,
                90.0,
                HorizontalAlignment::Center,
                VerticalAlignment::Middle,
            ),
        }
    }

    /// Nearest plotted value across all series within `tolerance_px`.
    ///
    /// Series geometry is refreshed first so hits stay consistent after
    /// pan/zoom without an intervening render.
    pub fn hit_test(
        &mut self,
        point: ScreenPoint,
        interpolate: bool,
        tolerance_px: f64,
    ) -> Option<PlotHit> {
        if !point.is_defined() {
            return None;
        }
        for (_, axis) in self.axes.iter_mut() {
            axis.update_transform(self.plot_area);
        }
        for series in &mut self.series {
            series.update_geometry(&self.axes, self.plot_area);
        }

        let mut candidates: SmallVec<[(OrderedFloat<f64>, PlotHit); 4]> = SmallVec::new();
        for (index, series) in self.series.iter().enumerate() {
            if let Some(hit) = series.nearest_point(point, interpolate, &self.axes) {
                let distance = point.distance_to(hit.position);
                if distance <= tolerance_px {
                    candidates.push((
                        OrderedFloat(distance),
                        PlotHit {
                            series_index: index,
                            hit,
                        },
                    ));
                }
            }
        }
        candidates
            .into_iter()
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, hit)| hit)
    }

    /// Topmost annotation containing `point`, if any.
    #[must_use]
    pub fn annotation_hit_test(&self, point: ScreenPoint) -> Option<usize> {
        self.annotations
            .iter()
            .enumerate()
            .rev()
            .find(|(_, annotation)| annotation.hit_test(point))
            .map(|(index, _)| index)
    }
}

impl Default for PlotModel {
    fn default() -> Self {
        Self::new()
    }
}
