//! plotkit: a 2D charting core.
//!
//! This crate provides the geometry/transform layer of a charting stack:
//! data-to-screen axis transforms, Cohen-Sutherland clipping, polyline
//! queries for interactive tracking, and a backend-agnostic render-context
//! contract shared by the recorded-frame, SVG and Cairo output targets.

pub mod annotation;
pub mod axis;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod model;
pub mod render;
pub mod series;
pub mod telemetry;

pub use error::{PlotError, PlotResult};
pub use model::{PlotHit, PlotModel};
