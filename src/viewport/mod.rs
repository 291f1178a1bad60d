//! Viewport state and the wraparound panning policy

mod viewport;
mod wrap_policy;

pub use self::viewport::Viewport;
pub use self::wrap_policy::{PanAction, WrapPolicy};
