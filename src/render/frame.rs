use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};
use crate::geometry::{PlotRect, ScreenPoint, ScreenSize, Viewport};
use crate::render::{
    Color, EdgeRenderingMode, FontSpec, HorizontalAlignment, LineJoin, PlotImage, RenderContext,
    VerticalAlignment, defined_points, stroke_visible,
};

/// One recorded draw call in pixel space.
///
/// Commands keep their submission order because clip regions scope the
/// commands between a push and its matching pop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Line {
        points: Vec<(f64, f64)>,
        stroke: Color,
        thickness: f64,
        dash: Vec<f64>,
        join: LineJoin,
        edge_mode: EdgeRenderingMode,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        fill: Color,
        stroke: Color,
        thickness: f64,
        dash: Vec<f64>,
        join: LineJoin,
        edge_mode: EdgeRenderingMode,
    },
    Ellipse {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        fill: Color,
        stroke: Color,
        thickness: f64,
    },
    Rectangle {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        fill: Color,
        stroke: Color,
        thickness: f64,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        color: Color,
        font: FontSpec,
        rotation_degrees: f64,
        h_align: HorizontalAlignment,
        v_align: VerticalAlignment,
    },
    Image {
        image: Arc<PlotImage>,
        source: (f64, f64, f64, f64),
        destination: (f64, f64, f64, f64),
        opacity: f64,
        interpolate: bool,
    },
    PushClip {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },
    PopClip,
}

/// Backend-agnostic scene for one plot draw pass.
///
/// A frame is a fully materialized, deterministic recording: replaying it
/// into any backend reproduces the pass without touching chart state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn count_lines(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Line { .. }))
            .count()
    }

    #[must_use]
    pub fn count_texts(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Text { .. }))
            .count()
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        let mut clip_depth = 0usize;
        for command in &self.commands {
            match command {
                DrawCommand::Line {
                    points,
                    stroke,
                    thickness,
                    ..
                } => {
                    validate_points(points)?;
                    validate_stroke(*stroke, *thickness)?;
                }
                DrawCommand::Polygon {
                    points,
                    fill,
                    stroke,
                    thickness,
                    ..
                } => {
                    validate_points(points)?;
                    fill.validate()?;
                    validate_stroke(*stroke, *thickness)?;
                }
                DrawCommand::Ellipse {
                    fill,
                    stroke,
                    thickness,
                    ..
                }
                | DrawCommand::Rectangle {
                    fill,
                    stroke,
                    thickness,
                    ..
                } => {
                    fill.validate()?;
                    validate_stroke(*stroke, *thickness)?;
                }
                DrawCommand::Text { text, color, .. } => {
                    if text.is_empty() {
                        return Err(PlotError::InvalidData(
                            "text command must not be empty".to_owned(),
                        ));
                    }
                    color.validate()?;
                }
                DrawCommand::Image { opacity, .. } => {
                    if !opacity.is_finite() || !(0.0..=1.0).contains(opacity) {
                        return Err(PlotError::InvalidData(
                            "image opacity must be finite and in [0, 1]".to_owned(),
                        ));
                    }
                }
                DrawCommand::PushClip { .. } => clip_depth += 1,
                DrawCommand::PopClip => {
                    clip_depth = clip_depth.checked_sub(1).ok_or_else(|| {
                        PlotError::InvalidData("unbalanced clip pop".to_owned())
                    })?;
                }
            }
        }

        if clip_depth != 0 {
            return Err(PlotError::InvalidData(
                "clip stack not drained at end of frame".to_owned(),
            ));
        }
        Ok(())
    }
}

fn validate_points(points: &[(f64, f64)]) -> PlotResult<()> {
    for (x, y) in points {
        if !x.is_finite() || !y.is_finite() {
            return Err(PlotError::InvalidData(
                "command coordinates must be finite".to_owned(),
            ));
        }
    }
    Ok(())
}

fn validate_stroke(stroke: Color, thickness: f64) -> PlotResult<()> {
    stroke.validate()?;
    if !thickness.is_finite() || thickness < 0.0 {
        return Err(PlotError::InvalidData(
            "stroke thickness must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}

/// Render context that records draw calls into a [`RenderFrame`].
#[derive(Debug)]
pub struct FrameRenderContext {
    frame: RenderFrame,
    clip_stack: Vec<PlotRect>,
}

impl FrameRenderContext {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            frame: RenderFrame::new(viewport),
            clip_stack: Vec::new(),
        }
    }

    /// Finishes recording, closing any clip regions left open.
    #[must_use]
    pub fn into_frame(mut self) -> RenderFrame {
        for _ in 0..self.clip_stack.len() {
            self.frame.commands.push(DrawCommand::PopClip);
        }
        self.frame
    }

    #[must_use]
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }
}

fn pack_points(points: &[ScreenPoint]) -> Vec<(f64, f64)> {
    points.iter().map(|point| (point.x, point.y)).collect()
}

impl RenderContext for FrameRenderContext {
    fn draw_line(
        &mut self,
        points: &[ScreenPoint],
        stroke: Color,
        thickness: f64,
        dash: &[f64],
        join: LineJoin,
        edge_mode: EdgeRenderingMode,
    ) -> PlotResult<()> {
        let points = defined_points(points);
        if points.len() < 2 || !stroke_visible(stroke, thickness) {
            return Ok(());
        }
        self.frame.commands.push(DrawCommand::Line {
            points: pack_points(&points),
            stroke,
            thickness,
            dash: dash.to_vec(),
            join,
            edge_mode,
        });
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
        edge_mode: EdgeRenderingMode,
    ) -> PlotResult<()> {
        let points = defined_points(points);
        let paints_fill = points.len() >= 3 && !fill.is_invisible();
        let paints_stroke = points.len() >= 2 && stroke_visible(stroke, thickness);
        if !paints_fill && !paints_stroke {
            return Ok(());
        }
        self.frame.commands.push(DrawCommand::Polygon {
            points: pack_points(&points),
            fill,
            stroke,
            thickness,
            dash: dash.to_vec(),
            join,
            edge_mode,
        });
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
        self.frame.commands.push(DrawCommand::Ellipse {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
            fill,
            stroke,
            thickness,
        });
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
        self.frame.commands.push(DrawCommand::Rectangle {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
            fill,
            stroke,
            thickness,
        });
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
        self.frame.commands.push(DrawCommand::Text {
            x: position.x,
            y: position.y,
            text: text.to_owned(),
            color,
            font: font.clone(),
            rotation_degrees,
            h_align,
            v_align,
        });
        Ok(())
    }

    fn measure_text(&self, text: &str, font: &FontSpec) -> ScreenSize {
        font.estimate_size(text)
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
        self.frame.commands.push(DrawCommand::Image {
            image: Arc::clone(image),
            source: (source.left(), source.top(), source.width(), source.height()),
            destination: (
                destination.left(),
                destination.top(),
                destination.width(),
                destination.height(),
            ),
            opacity: opacity.min(1.0),
            interpolate,
        });
        Ok(())
    }

    fn push_clip(&mut self, rect: PlotRect) -> PlotResult<()> {
        // Nested regions clip to the running intersection.
        let effective = match self.clip_stack.last() {
            Some(current) => rect
                .clip_to(*current)
                .unwrap_or_else(|| PlotRect::from_corners(current.top_left(), current.top_left())),
            None => rect,
        };
        self.clip_stack.push(effective);
        self.frame.commands.push(DrawCommand::PushClip {
            left: effective.left(),
            top: effective.top(),
            width: effective.width(),
            height: effective.height(),
        });
        Ok(())
    }

    fn pop_clip(&mut self) -> PlotResult<()> {
        if self.clip_stack.pop().is_none() {
            return Err(PlotError::InvalidData(
                "pop_clip without matching push_clip".to_owned(),
            ));
        }
        self.frame.commands.push(DrawCommand::PopClip);
        Ok(())
    }
}
