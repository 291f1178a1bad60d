//! Utility modules for common functionality
//!
//! Logging, progress reporting, text parsing, readout formatting and
//! user notices shared by the viewer and the CLI.

pub mod logger;
pub mod progress;
pub mod parse_utils;
pub mod format_utils;
pub mod notifier;
