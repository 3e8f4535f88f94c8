//! Pointer-driven interaction: pan, anchored zoom, and the tracker.
//!
//! The controller is deterministic and toolkit-agnostic: hosts feed it raw
//! pointer events in pixel coordinates and it mutates the model's axes
//! through the same operations scripted callers use.

use crate::axis::Axis;
use crate::error::PlotResult;
use crate::geometry::ScreenPoint;
use crate::model::{PlotHit, PlotModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerMode {
    #[default]
    Idle,
    Panning,
}

/// Nearest-value readout state exposed to host applications.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackerState {
    visible: bool,
    hit: Option<PlotHit>,
}

impl TrackerState {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn hit(&self) -> Option<&PlotHit> {
        self.hit.as_ref()
    }
}

/// Maps pointer gestures onto axis pan/zoom and tracker updates.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotController {
    mode: ControllerMode,
    last_pointer: Option<ScreenPoint>,
    tracker: TrackerState,
    /// Whether tracker hits may interpolate between samples.
    interpolate: bool,
    tracker_tolerance_px: f64,
    /// Zoom factor applied per wheel notch.
    zoom_step: f64,
}

impl Default for PlotController {
    fn default() -> Self {
        Self {
            mode: ControllerMode::Idle,
            last_pointer: None,
            tracker: TrackerState::default(),
            interpolate: true,
            tracker_tolerance_px: 20.0,
            zoom_step: 1.2,
        }
    }
}

impl PlotController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_interpolation(mut self, interpolate: bool) -> Self {
        self.interpolate = interpolate;
        self
    }

    #[must_use]
    pub fn with_tracker_tolerance(mut self, tolerance_px: f64) -> Self {
        if tolerance_px.is_finite() && tolerance_px > 0.0 {
            self.tracker_tolerance_px = tolerance_px;
        }
        self
    }

    #[must_use]
    pub fn mode(&self) -> ControllerMode {
        self.mode
    }

    #[must_use]
    pub fn tracker(&self) -> &TrackerState {
        &self.tracker
    }

    /// Begins a pan gesture.
    pub fn pointer_down(&mut self, point: ScreenPoint) {
        if point.is_defined() {
            self.mode = ControllerMode::Panning;
            self.last_pointer = Some(point);
        }
    }

    /// Advances the active gesture or, when idle, the tracker.
    pub fn pointer_move(&mut self, model: &mut PlotModel, point: ScreenPoint) {
        if !point.is_defined() {
            return;
        }

        match self.mode {
            ControllerMode::Panning => {
                if let Some(previous) = self.last_pointer {
                    pan_axes(model, previous, point);
                    model.invalidate_geometry();
                }
                self.last_pointer = Some(point);
            }
            ControllerMode::Idle => {
                self.tracker.hit =
                    model.hit_test(point, self.interpolate, self.tracker_tolerance_px);
                self.tracker.visible = self.tracker.hit.is_some();
            }
        }
    }

    /// Ends the pan gesture.
    pub fn pointer_up(&mut self) {
        self.mode = ControllerMode::Idle;
        self.last_pointer = None;
    }

    pub fn pointer_leave(&mut self) {
        self.tracker.visible = false;
        self.tracker.hit = None;
        self.pointer_up();
    }

    /// Zooms every positional axis around the data value under the pointer.
    ///
    /// Positive `notches` zoom in, negative zoom out.
    pub fn wheel_zoom(
        &mut self,
        model: &mut PlotModel,
        point: ScreenPoint,
        notches: f64,
    ) -> PlotResult<()> {
        if !point.is_defined() || !notches.is_finite() || notches == 0.0 {
            return Ok(());
        }
        let factor = self.zoom_step.powf(notches);

        let ids: Vec<_> = model
            .axes()
            .iter()
            .filter(|(_, axis)| axis.is_positional())
            .map(|(id, _)| id)
            .collect();
        for id in ids {
            let axis = model.axis_mut(id);
            let component = axis.core().screen_component(point);
            let center = axis.inverse_transform(component);
            if center.is_finite() {
                axis.core_mut().zoom_at(factor, center)?;
            }
        }
        model.invalidate_geometry();
        Ok(())
    }

    /// Restores every axis to its committed bounds (double-click reset).
    pub fn reset(&mut self, model: &mut PlotModel) {
        model.reset_axes();
        self.tracker = TrackerState::default();
    }
}

fn pan_axes(model: &mut PlotModel, previous: ScreenPoint, current: ScreenPoint) {
    let ids: Vec<_> = model
        .axes()
        .iter()
        .filter(|(_, axis)| axis.is_positional())
        .map(|(id, _)| id)
        .collect();
    for id in ids {
        model.axis_mut(id).pan(previous, current);
    }
}
