use std::sync::Arc;

use cairo::{Context, Filter, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::PI;

use crate::error::{PlotError, PlotResult};
use crate::geometry::{PlotRect, ScreenPoint, ScreenSize, Viewport};
use crate::render::{
    Color, EdgeRenderingMode, FontSpec, FontWeight, HorizontalAlignment, LineJoin, PlotImage,
    RenderContext, VerticalAlignment, defined_points, stroke_visible,
};

/// Cairo + Pango render-context backend over an offscreen image surface.
///
/// Text measurement goes through the same Pango layout used for drawing, so
/// alignment computed from `measure_text` is pixel-correct on this backend.
pub struct CairoRenderContext {
    surface: ImageSurface,
    context: Context,
    clip_depth: usize,
}

impl CairoRenderContext {
    pub fn new(viewport: Viewport) -> PlotResult<Self> {
        if !viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let surface = ImageSurface::create(
            Format::ARgb32,
            viewport.width as i32,
            viewport.height as i32,
        )
        .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self {
            surface,
            context,
            clip_depth: 0,
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    /// Fills the whole surface with `color`, under the current clip.
    pub fn clear(&mut self, color: Color) -> PlotResult<()> {
        color.validate()?;
        apply_color(&self.context, color);
        self.context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))
    }

    fn apply_stroke_style(&self, thickness: f64, dash: &[f64], join: LineJoin) {
        self.context.set_line_width(thickness);
        self.context.set_dash(dash, 0.0);
        self.context.set_line_join(match join {
            LineJoin::Miter => cairo::LineJoin::Miter,
            LineJoin::Round => cairo::LineJoin::Round,
            LineJoin::Bevel => cairo::LineJoin::Bevel,
        });
    }

    fn build_path(&self, points: &[ScreenPoint], close: bool) {
        self.context.new_path();
        for (index, point) in points.iter().enumerate() {
            if index == 0 {
                self.context.move_to(point.x, point.y);
            } else {
                self.context.line_to(point.x, point.y);
            }
        }
        if close {
            self.context.close_path();
        }
    }

    fn fill_and_stroke(
        &self,
        fill: Color,
        stroke: Color,
        thickness: f64,
    ) -> PlotResult<()> {
        let paints_stroke = stroke_visible(stroke, thickness);
        if !fill.is_invisible() {
            apply_color(&self.context, fill);
            if paints_stroke {
                self.context
                    .fill_preserve()
                    .map_err(|err| map_backend_error("failed to fill path", err))?;
            } else {
                self.context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill path", err))?;
            }
        }
        if paints_stroke {
            apply_color(&self.context, stroke);
            self.context.set_line_width(thickness);
            self.context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke path", err))?;
        }
        Ok(())
    }

    fn pango_layout(&self, text: &str, font: &FontSpec) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(&self.context);
        let weight = match font.weight {
            FontWeight::Normal => "",
            FontWeight::Bold => "Bold ",
        };
        let description =
            FontDescription::from_string(&format!("{} {weight}{}", font.family, font.size));
        layout.set_font_description(Some(&description));
        layout.set_text(text);
        layout
    }
}

impl RenderContext for CairoRenderContext {
    fn draw_line(
        &mut self,
        points: &[ScreenPoint],
        stroke: Color,
        thickness: f64,
        dash: &[f64],
        join: LineJoin,
        edge_mode: EdgeRenderingMode,
    ) -> PlotResult<()> {
        let points = snap_points(&defined_points(points), thickness, edge_mode);
        if points.len() < 2 || !stroke_visible(stroke, thickness) {
            return Ok(());
        }
        self.apply_stroke_style(thickness, dash, join);
        self.build_path(&points, false);
        apply_color(&self.context, stroke);
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))
    }

    fn draw_polygon(
        &mut self,
        points: &[ScreenPoint],
        fill: Color,
        stroke: Color,
        thickness: f64,
        dash: &[f64],
        join: LineJoin,
        _edge_mode: EdgeRenderingMode,
    ) -> PlotResult<()> {
        let points = defined_points(points);
        let paints_fill = points.len() >= 3 && !fill.is_invisible();
        let paints_stroke = points.len() >= 2 && stroke_visible(stroke, thickness);
        if !paints_fill && !paints_stroke {
            return Ok(());
        }
        self.apply_stroke_style(thickness, dash, join);
        self.build_path(&points, true);
        self.fill_and_stroke(
            if paints_fill { fill } else { Color::TRANSPARENT },
            stroke,
            thickness,
        )
    }

    fn draw_ellipse(
        &mut self,
        rect: PlotRect,
        fill: Color,
        stroke: Color,
        thickness: f64,
    ) -> PlotResult<()> {
        if rect.is_empty() || (fill.is_invisible() && !stroke_visible(stroke, thickness)) {
            return Ok(());
        }
        let center = rect.center();
        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save cairo state", err))?;
        self.context.translate(center.x, center.y);
        self.context.scale(rect.width() / 2.0, rect.height() / 2.0);
        self.context.new_path();
        self.context.arc(0.0, 0.0, 1.0, 0.0, 2.0 * PI);
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore cairo state", err))?;
        self.fill_and_stroke(fill, stroke, thickness)
    }

    fn draw_rectangle(
        &mut self,
        rect: PlotRect,
        fill: Color,
        stroke: Color,
        thickness: f64,
    ) -> PlotResult<()> {
        if rect.is_empty() || (fill.is_invisible() && !stroke_visible(stroke, thickness)) {
            return Ok(());
        }
        self.context.new_path();
        self.context
            .rectangle(rect.left(), rect.top(), rect.width(), rect.height());
        self.fill_and_stroke(fill, stroke, thickness)
    }

    fn draw_text(
        &mut self,
        position: ScreenPoint,
        text: &str,
        color: Color,
        font: &FontSpec,
        rotation_degrees: f64,
        h_align: HorizontalAlignment,
        v_align: VerticalAlignment,
    ) -> PlotResult<()> {
        if text.is_empty() || color.is_invisible() || !position.is_defined() {
            return Ok(());
        }

        let layout = self.pango_layout(text, font);
        let (width, height) = layout.pixel_size();
        let offset_x = match h_align {
            HorizontalAlignment::Left => 0.0,
            HorizontalAlignment::Center => -f64::from(width) / 2.0,
            HorizontalAlignment::Right => -f64::from(width),
        };
        let offset_y = match v_align {
            VerticalAlignment::Top => 0.0,
            VerticalAlignment::Middle => -f64::from(height) / 2.0,
            VerticalAlignment::Bottom => -f64::from(height),
        };

        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save cairo state", err))?;
        self.context.translate(position.x, position.y);
        if rotation_degrees != 0.0 {
            self.context.rotate(rotation_degrees.to_radians());
        }
        apply_color(&self.context, color);
        self.context.move_to(offset_x, offset_y);
        pangocairo::functions::show_layout(&self.context, &layout);
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore cairo state", err))
    }

    fn measure_text(&self, text: &str, font: &FontSpec) -> ScreenSize {
        if text.is_empty() {
            return ScreenSize::default();
        }
        let layout = self.pango_layout(text, font);
        let (width, height) = layout.pixel_size();
        ScreenSize::new(f64::from(width), f64::from(height))
    }

    fn draw_image(
        &mut self,
        image: &Arc<PlotImage>,
        source: PlotRect,
        destination: PlotRect,
        opacity: f64,
        interpolate: bool,
    ) -> PlotResult<()> {
        if source.is_empty() || destination.is_empty() || opacity <= 0.0 {
            return Ok(());
        }

        let image_surface = premultiplied_surface(image)?;
        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save cairo state", err))?;
        self.context.rectangle(
            destination.left(),
            destination.top(),
            destination.width(),
            destination.height(),
        );
        self.context.clip();
        self.context.translate(destination.left(), destination.top());
        self.context.scale(
            destination.width() / source.width(),
            destination.height() / source.height(),
        );
        self.context
            .set_source_surface(&image_surface, -source.left(), -source.top())
            .map_err(|err| map_backend_error("failed to set image source", err))?;
        self.context.source().set_filter(if interpolate {
            Filter::Good
        } else {
            Filter::Nearest
        });
        self.context
            .paint_with_alpha(opacity.min(1.0))
            .map_err(|err| map_backend_error("failed to paint image", err))?;
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore cairo state", err))
    }

    fn push_clip(&mut self, rect: PlotRect) -> PlotResult<()> {
        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save cairo state", err))?;
        self.context
            .rectangle(rect.left(), rect.top(), rect.width(), rect.height());
        self.context.clip();
        self.clip_depth += 1;
        Ok(())
    }

    fn pop_clip(&mut self) -> PlotResult<()> {
        if self.clip_depth == 0 {
            return Err(PlotError::InvalidData(
                "pop_clip without matching push_clip".to_owned(),
            ));
        }
        self.clip_depth -= 1;
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore cairo state", err))
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

/// Odd stroke widths land on pixel centers so hairlines stay one pixel wide.
fn snap_points(points: &[ScreenPoint], thickness: f64, edge_mode: EdgeRenderingMode) -> Vec<ScreenPoint> {
    if edge_mode != EdgeRenderingMode::PreferSharpness {
        return points.to_vec();
    }
    let offset = if (thickness.round() as i64) % 2 == 1 {
        0.5
    } else {
        0.0
    };
    points
        .iter()
        .map(|point| ScreenPoint::new(point.x.round() + offset, point.y.round() + offset))
        .collect()
}

/// Converts row-major RGBA8 into cairo's premultiplied native-endian ARGB.
fn premultiplied_surface(image: &PlotImage) -> PlotResult<ImageSurface> {
    let width = image.width() as i32;
    let height = image.height() as i32;
    let stride = Format::ARgb32
        .stride_for_width(image.width())
        .map_err(|err| map_backend_error("failed to compute image stride", err))?;

    let mut data = vec![0u8; stride as usize * image.height() as usize];
    let pixels = image.pixels();
    for row in 0..image.height() as usize {
        for column in 0..image.width() as usize {
            let src = (row * image.width() as usize + column) * 4;
            let dst = row * stride as usize + column * 4;
            let alpha = u32::from(pixels[src + 3]);
            let premultiplied = |channel: u8| (u32::from(channel) * alpha) / 255;
            let argb = (alpha << 24)
                | (premultiplied(pixels[src]) << 16)
                | (premultiplied(pixels[src + 1]) << 8)
                | premultiplied(pixels[src + 2]);
            data[dst..dst + 4].copy_from_slice(&argb.to_ne_bytes());
        }
    }

    ImageSurface::create_for_data(data, Format::ARgb32, width, height, stride)
        .map_err(|err| map_backend_error("failed to create image surface", err))
}

fn map_backend_error(prefix: &str, err: impl std::fmt::Display) -> PlotError {
    PlotError::Backend(format!("{prefix}: {err}"))
}
