//! Vector overlays produced by the grid and meridian renderers

mod element;
mod group;
mod svg_writer;

pub use self::element::{LabelKind, LineStyle, OverlayElement, OverlayLabel, OverlayLine, OverlayMarker};
pub use self::group::{OverlayGroup, GRID_GROUP, MERIDIAN_GROUP};
pub use self::svg_writer::SvgWriter;
