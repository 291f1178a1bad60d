//! Grid and prime meridian overlays
//!
//! Both renderers rebuild their overlay group from scratch on every call;
//! the viewer triggers them on zoom-end and move-end only.

mod labels;
mod meridian;
mod renderer;
mod spacing;

pub use self::labels::{LabeledPositions, MIN_LABEL_SEPARATION};
pub use self::meridian::{MeridianRenderReport, PrimeMeridianRenderer, PRIME_MERIDIAN_LABEL};
pub use self::renderer::{GridRenderReport, GridRenderer, CULL_BUFFER};
pub use self::spacing::{grid_spacing, is_major, latitude_values, longitude_offsets, GridLine, GridLineKind};
