use std::fmt::Write as _;
use std::sync::Arc;

use tracing::warn;

use crate::error::{PlotError, PlotResult};
use crate::geometry::{PlotRect, ScreenPoint, ScreenSize, Viewport};
use crate::render::{
    Color, EdgeRenderingMode, FontSpec, FontWeight, HorizontalAlignment, LineJoin, PlotImage,
    RenderContext, VerticalAlignment, defined_points, stroke_visible,
};

/// Render context that writes an SVG document.
///
/// Text metrics come from [`FontSpec::estimate_size`], the same estimate the
/// drawing code aligns with, so anchored labels stay self-consistent even
/// though a viewer's font may differ. Raster image embedding is left to the
/// raster-capable backends; image draws are skipped with a warning.
#[derive(Debug)]
pub struct SvgRenderContext {
    viewport: Viewport,
    body: String,
    clip_counter: usize,
    open_groups: usize,
    warned_about_images: bool,
}

impl SvgRenderContext {
    pub fn new(viewport: Viewport) -> PlotResult<Self> {
        if !viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(Self {
            viewport,
            body: String::new(),
            clip_counter: 0,
            open_groups: 0,
            warned_about_images: false,
        })
    }

    /// Finishes the document, closing any clip groups left open.
    #[must_use]
    pub fn into_svg(mut self) -> String {
        for _ in 0..self.open_groups {
            self.body.push_str("</g>\n");
        }
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.viewport.width,
            h = self.viewport.height,
            body = self.body,
        )
    }

    fn write_stroke_attrs(&mut self, stroke: Color, thickness: f64, dash: &[f64], join: LineJoin) {
        let _ = write!(
            self.body,
            " stroke=\"{}\" stroke-opacity=\"{}\" stroke-width=\"{}\"",
            rgb_attr(stroke),
            fmt(stroke.alpha),
            fmt(thickness),
        );
        if !dash.is_empty() {
            let pattern = dash.iter().map(|d| fmt(*d)).collect::<Vec<_>>().join(" ");
            let _ = write!(self.body, " stroke-dasharray=\"{pattern}\"");
        }
        let join_name = match join {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        };
        let _ = write!(self.body, " stroke-linejoin=\"{join_name}\"");
    }

    fn write_fill_attrs(&mut self, fill: Color) {
        if fill.is_invisible() {
            self.body.push_str(" fill=\"none\"");
        } else {
            let _ = write!(
                self.body,
                " fill=\"{}\" fill-opacity=\"{}\"",
                rgb_attr(fill),
                fmt(fill.alpha),
            );
        }
    }

    fn write_points_attr(&mut self, points: &[ScreenPoint]) {
        self.body.push_str(" points=\"");
        for (index, point) in points.iter().enumerate() {
            if index > 0 {
                self.body.push(' ');
            }
            let _ = write!(self.body, "{},{}", fmt(point.x), fmt(point.y));
        }
        self.body.push('"');
    }
}

impl RenderContext for SvgRenderContext {
    fn draw_line(
        &mut self,
        points: &[ScreenPoint],
        stroke: Color,
        thickness: f64,
        dash: &[f64],
        join: LineJoin,
        _edge_mode: EdgeRenderingMode,
    ) -> PlotResult<()> {
        let points = defined_points(points);
        if points.len() < 2 || !stroke_visible(stroke, thickness) {
            return Ok(());
        }
        self.body.push_str("<polyline fill=\"none\"");
        self.write_stroke_attrs(stroke, thickness, dash, join);
        self.write_points_attr(&points);
        self.body.push_str("/>\n");
        Ok(())
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
        self.body.push_str("<polygon");
        self.write_fill_attrs(fill);
        if paints_stroke {
            self.write_stroke_attrs(stroke, thickness, dash, join);
        } else {
            self.body.push_str(" stroke=\"none\"");
        }
        self.write_points_attr(&points);
        self.body.push_str("/>\n");
        Ok(())
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
        let _ = write!(
            self.body,
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"",
            fmt(center.x),
            fmt(center.y),
            fmt(rect.width() / 2.0),
            fmt(rect.height() / 2.0),
        );
        self.write_fill_attrs(fill);
        if stroke_visible(stroke, thickness) {
            self.write_stroke_attrs(stroke, thickness, &[], LineJoin::Miter);
        }
        self.body.push_str("/>\n");
        Ok(())
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
        let _ = write!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
            fmt(rect.left()),
            fmt(rect.top()),
            fmt(rect.width()),
            fmt(rect.height()),
        );
        self.write_fill_attrs(fill);
        if stroke_visible(stroke, thickness) {
            self.write_stroke_attrs(stroke, thickness, &[], LineJoin::Miter);
        }
        self.body.push_str("/>\n");
        Ok(())
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

        let anchor = match h_align {
            HorizontalAlignment::Left => "start",
            HorizontalAlignment::Center => "middle",
            HorizontalAlignment::Right => "end",
        };
        // Baseline offsets match `FontSpec::estimate_size` (0.8 em ascent,
        // 1.2 em line height).
        let size = font.estimate_size(text);
        let baseline_y = match v_align {
            VerticalAlignment::Top => position.y + font.size * 0.8,
            VerticalAlignment::Middle => position.y - size.height / 2.0 + font.size * 0.8,
            VerticalAlignment::Bottom => position.y - size.height + font.size * 0.8,
        };

        let _ = write!(
            self.body,
            "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" text-anchor=\"{anchor}\"",
            fmt(position.x),
            fmt(baseline_y),
            escape(&font.family),
            fmt(font.size),
        );
        if font.weight == FontWeight::Bold {
            self.body.push_str(" font-weight=\"bold\"");
        }
        let _ = write!(
            self.body,
            " fill=\"{}\" fill-opacity=\"{}\"",
            rgb_attr(color),
            fmt(color.alpha),
        );
        if rotation_degrees != 0.0 {
            let _ = write!(
                self.body,
                " transform=\"rotate({} {} {})\"",
                fmt(rotation_degrees),
                fmt(position.x),
                fmt(position.y),
            );
        }
        let _ = write!(self.body, ">{}</text>\n", escape(text));
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
        if source.is_empty() || destination.is_empty() || opacity <= 0.0 {
            return Ok(());
        }
        if !self.warned_about_images {
            warn!("svg context skips raster images; use a raster-capable backend");
            self.warned_about_images = true;
        }
        Ok(())
    }

    fn push_clip(&mut self, rect: PlotRect) -> PlotResult<()> {
        self.clip_counter += 1;
        let id = self.clip_counter;
        let _ = write!(
            self.body,
            "<clipPath id=\"clip{id}\"><rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/></clipPath>\n<g clip-path=\"url(#clip{id})\">\n",
            fmt(rect.left()),
            fmt(rect.top()),
            fmt(rect.width()),
            fmt(rect.height()),
        );
        self.open_groups += 1;
        Ok(())
    }

    fn pop_clip(&mut self) -> PlotResult<()> {
        if self.open_groups == 0 {
            return Err(PlotError::InvalidData(
                "pop_clip without matching push_clip".to_owned(),
            ));
        }
        self.open_groups -= 1;
        self.body.push_str("</g>\n");
        Ok(())
    }
}

fn rgb_attr(color: Color) -> String {
    format!(
        "rgb({},{},{})",
        channel_byte(color.red),
        channel_byte(color.green),
        channel_byte(color.blue),
    )
}

fn channel_byte(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn fmt(value: f64) -> String {
    let text = format!("{value:.2}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
