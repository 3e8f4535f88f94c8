pub mod clip;
pub mod point;
pub mod polyline;
pub mod rect;

pub use clip::{clip_line, is_inside};
pub use point::{DataPoint, ScreenPoint, ScreenSize, ScreenVector, Viewport};
pub use polyline::{centroid, nearest_point_on_polyline, point_in_polygon, point_on_line};
pub use rect::PlotRect;
