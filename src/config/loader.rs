//! TOML configuration loading
//!
//! Configuration files are read section by section; any key that is missing
//! keeps its default. The bundled `ixmaps.toml` is parsed once at first use.

use std::fs;
use lazy_static::lazy_static;
use log::{debug, warn};

use super::map_config::{HemisphereConvention, LongitudeMode, MapConfig};
use crate::coordinate::{DisplaySize, PrimeMeridianRef, VisibleBounds};
use crate::errors::{MapError, MapResult};

lazy_static! {
    // Parse the bundled configuration at first use
    pub static ref DEFAULT_CONFIG: MapConfig = {
        let content = include_str!("../../ixmaps.toml");
        ConfigLoader::from_str(content).unwrap_or_else(|e| {
            warn!("Failed to parse bundled configuration: {}", e);
            MapConfig::default()
        })
    };
}

/// Reads `MapConfig` values from TOML documents
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse a configuration from a TOML string
    ///
    /// # Arguments
    /// * `content` - TOML document with optional `[raw]`, `[display]`,
    ///   `[bounds]`, `[prime_meridian]`, `[calibration]` and `[distance]` tables
    ///
    /// # Returns
    /// The configuration, or an error when the document is not valid TOML or
    /// a value has the wrong type
    pub fn from_str(content: &str) -> MapResult<MapConfig> {
        let root: toml::Value = content.parse::<toml::Table>().map(toml::Value::Table)?;

        let raw_width = Self::get_f64(&root, "raw", "width")?.unwrap_or(super::FALLBACK_RAW_WIDTH);
        let raw_height = Self::get_f64(&root, "raw", "height")?.unwrap_or(super::FALLBACK_RAW_HEIGHT);

        let defaults = VisibleBounds::default();
        let bounds = VisibleBounds {
            north: Self::get_f64(&root, "bounds", "north")?.unwrap_or(defaults.north),
            south: Self::get_f64(&root, "bounds", "south")?.unwrap_or(defaults.south),
        };

        // Invalid windows are kept as-is here and repaired by `sanitized`
        let mut config = if bounds.is_valid() {
            MapConfig::calibrated(raw_width, raw_height, bounds)
        } else {
            let mut config = MapConfig::calibrated(raw_width, raw_height, defaults);
            config.visible_bounds = bounds;
            config
        };

        if let (Some(width), Some(height)) = (
            Self::get_f64(&root, "display", "width")?,
            Self::get_f64(&root, "display", "height")?,
        ) {
            config.display = Some(DisplaySize::new(width, height));
        }

        let ref_lat = Self::get_f64(&root, "prime_meridian", "lat")?;
        let ref_lng = Self::get_f64(&root, "prime_meridian", "lng")?;
        if let (Some(lat), Some(lng)) = (ref_lat, ref_lng) {
            config = config.with_prime_meridian(PrimeMeridianRef::new(lat, lng));
            match Self::get_f64(&root, "prime_meridian", "x")? {
                Some(x) => config.prime_meridian_x = x,
                None => config.derive_prime_meridian_x = true,
            }
        } else if let Some(x) = Self::get_f64(&root, "prime_meridian", "x")? {
            config.prime_meridian_x = x;
        }

        if let Some(mode) = Self::get_str(&root, "prime_meridian", "mode")? {
            config.longitude_mode = LongitudeMode::from_name(&mode)
                .ok_or_else(|| MapError::ConfigError(format!("Unknown longitude mode: {}", mode)))?;
        }

        if let Some(name) = Self::get_str(&root, "calibration", "hemisphere")? {
            config.hemisphere = HemisphereConvention::from_name(&name)
                .ok_or_else(|| MapError::ConfigError(format!("Unknown hemisphere convention: {}", name)))?;
            config.recalibrate();
        }
        if let Some(value) = Self::get_f64(&root, "calibration", "pixels_per_longitude_degree")? {
            config.pixels_per_longitude_degree = value;
        }
        if let Some(value) = Self::get_f64(&root, "calibration", "pixels_per_latitude_degree")? {
            config.pixels_per_latitude_degree = value;
        }
        if let Some(value) = Self::get_f64(&root, "calibration", "equator_y")? {
            config.equator_y = value;
        }

        if let Some(value) = Self::get_f64(&root, "distance", "miles_per_pixel")? {
            config.miles_per_pixel = value;
        }
        if let Some(value) = Self::get_f64(&root, "distance", "km_per_pixel")? {
            config.km_per_pixel = value;
        }

        debug!("Loaded configuration: raw {}x{}, bounds {}..{}, mode {:?}",
               config.raw_width, config.raw_height,
               config.visible_bounds.south, config.visible_bounds.north,
               config.longitude_mode);

        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &str) -> MapResult<MapConfig> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Helper to read a number that may be written as an integer or a float
    fn get_f64(root: &toml::Value, table: &str, key: &str) -> MapResult<Option<f64>> {
        match root.get(table).and_then(|t| t.get(key)) {
            None => Ok(None),
            Some(toml::Value::Float(v)) => Ok(Some(*v)),
            Some(toml::Value::Integer(v)) => Ok(Some(*v as f64)),
            Some(other) => Err(MapError::ConfigError(format!(
                "{}.{} must be a number, found {}", table, key, other.type_str()))),
        }
    }

    /// Helper to read a string value
    fn get_str(root: &toml::Value, table: &str, key: &str) -> MapResult<Option<String>> {
        match root.get(table).and_then(|t| t.get(key)) {
            None => Ok(None),
            Some(toml::Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(MapError::ConfigError(format!(
                "{}.{} must be a string, found {}", table, key, other.type_str()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_config_matches_defaults() {
        let config = &*DEFAULT_CONFIG;
        assert_eq!(config.raw_width, 8202.0);
        assert_eq!(config.raw_height, 4900.0);
        assert_eq!(config.prime_meridian_x, 4101.0);
        assert_eq!(config.longitude_mode, LongitudeMode::MeridianRelative);
        assert_eq!(config.prime_meridian_ref, Some(PrimeMeridianRef::new(-14.08, 26.22)));
        assert_eq!(config.miles_per_pixel, 3.2);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ConfigLoader::from_str("").unwrap();
        assert_eq!(config.raw_width, 8202.0);
        assert_eq!(config.longitude_mode, LongitudeMode::Standard);
        assert!(config.display.is_none());
    }

    #[test]
    fn test_missing_meridian_x_is_derived() {
        let config = ConfigLoader::from_str("[prime_meridian]\nlat = 0\nlng = 90\n").unwrap();
        assert!(config.derive_prime_meridian_x);
        assert_eq!(config.longitude_mode, LongitudeMode::MeridianRelative);
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let result = ConfigLoader::from_str("[raw]\nwidth = \"wide\"\n");
        assert!(matches!(result, Err(MapError::ConfigError(_))));
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let result = ConfigLoader::from_str("[prime_meridian]\nmode = \"sideways\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_equator_override_is_reported() {
        let config = ConfigLoader::from_str("[calibration]\nequator_y = 1000\n").unwrap();
        assert_eq!(config.equator_y, 1000.0);
        assert!(config.validate().iter().any(|w| w.contains("equator_y")));
    }

    #[test]
    fn test_display_section() {
        let config = ConfigLoader::from_str("[display]\nwidth = 1200\nheight = 700\n").unwrap();
        assert_eq!(config.display, Some(DisplaySize::new(1200.0, 700.0)));
    }
}
