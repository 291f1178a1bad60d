//! Human-readable formatting of coordinates
//!
//! Latitudes and longitudes are shown with hemisphere letters instead of
//! signs, which is how the map's readout and grid labels present them.

use crate::coordinate::{GeoPoint, RawPoint};

/// Format a latitude as e.g. `14.08°S`
pub fn format_latitude(lat: f64) -> String {
    let hemisphere = if lat < 0.0 { 'S' } else { 'N' };
    format!("{:.2}°{}", lat.abs(), hemisphere)
}

/// Format a longitude as e.g. `26.22°E`
pub fn format_longitude(lng: f64) -> String {
    let hemisphere = if lng < 0.0 { 'W' } else { 'E' };
    format!("{:.2}°{}", lng.abs(), hemisphere)
}

/// Format a geographic point as `lat, lng`
pub fn format_geo(point: &GeoPoint) -> String {
    format!("{}, {}", format_latitude(point.lat), format_longitude(point.lng))
}

/// Pointer-move readout combining raw pixel and geographic position
pub fn format_readout(raw: &RawPoint, geo: &GeoPoint) -> String {
    format!("{} (x: {:.0}, y: {:.0})", format_geo(geo), raw.x, raw.y)
}

/// Grid label for a longitude line measured from the prime meridian
pub fn format_longitude_label(offset: f64) -> String {
    let rounded = offset.round();
    if rounded == 0.0 {
        "0°".to_string()
    } else if rounded.abs() == 180.0 {
        "180°".to_string()
    } else if rounded > 0.0 {
        format!("{}°E", rounded)
    } else {
        format!("{}°W", -rounded)
    }
}

/// Grid label for a latitude line
pub fn format_latitude_label(lat: f64) -> String {
    let rounded = lat.round();
    if rounded == 0.0 {
        "Equator".to_string()
    } else if rounded > 0.0 {
        format!("{}°N", rounded)
    } else {
        format!("{}°S", -rounded)
    }
}
