//! Custom error types for the coordinate engine

use std::fmt;
use std::io;

/// Map engine error types
#[derive(Debug)]
pub enum MapError {
    /// I/O error
    IoError(io::Error),
    /// Malformed or inconsistent configuration
    ConfigError(String),
    /// Raw or display dimensions that cannot describe a map
    InvalidDimensions { width: f64, height: f64 },
    /// Visible latitude window that is empty or outside [-90, 90]
    InvalidBounds { north: f64, south: f64 },
    /// A screen-space query arrived before the viewport was attached
    ViewportDetached,
    /// Textual input (coordinates, point lists, sizes) could not be parsed
    ParseError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::IoError(e) => write!(f, "I/O error: {}", e),
            MapError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            MapError::InvalidDimensions { width, height } => {
                write!(f, "Invalid map dimensions: {}x{}", width, height)
            },
            MapError::InvalidBounds { north, south } => {
                write!(f, "Invalid visible bounds: north={} south={}", north, south)
            },
            MapError::ViewportDetached => write!(f, "Viewport is not attached"),
            MapError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            MapError::GenericError(msg) => write!(f, "Map error: {}", msg),
        }
    }
}

impl std::error::Error for MapError {}

impl From<io::Error> for MapError {
    fn from(error: io::Error) -> Self {
        MapError::IoError(error)
    }
}

impl From<String> for MapError {
    fn from(msg: String) -> Self {
        MapError::GenericError(msg)
    }
}

impl From<toml::de::Error> for MapError {
    fn from(error: toml::de::Error) -> Self {
        MapError::ConfigError(error.to_string())
    }
}

impl From<quick_xml::Error> for MapError {
    fn from(error: quick_xml::Error) -> Self {
        MapError::GenericError(format!("SVG write failed: {}", error))
    }
}

/// Result type for map engine operations
pub type MapResult<T> = Result<T, MapError>;
