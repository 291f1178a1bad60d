//! Grid spacing and line descriptors

/// Degrees between grid lines at a zoom level
///
/// Denser grids are only readable once a degree covers enough pixels.
pub fn grid_spacing(zoom: f64) -> f64 {
    if !zoom.is_finite() || zoom < 3.0 {
        30.0
    } else if zoom < 4.0 {
        15.0
    } else if zoom < 5.0 {
        10.0
    } else {
        5.0
    }
}

/// Whether a grid value falls on a multiple of 30 degrees
pub fn is_major(value: f64) -> bool {
    (value.round() as i64) % 30 == 0
}

/// Orientation of a grid line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLineKind {
    Longitude,
    Latitude,
}

/// One grid line drawn during a render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub kind: GridLineKind,
    /// Degrees; longitudes are measured from the prime meridian
    pub value: f64,
    pub is_major: bool,
    /// Raw X for longitude lines, raw Y for latitude lines
    pub raw_position: f64,
}

/// Longitude offsets from the prime meridian, each listed once
///
/// Offsets cover `(-180, 180]`, with 0 first and the rest ordered by growing
/// distance from the meridian (east before west).
pub fn longitude_offsets(spacing: f64) -> Vec<f64> {
    let steps = (360.0 / spacing).ceil() as i64;
    let mut values = vec![0.0];
    for i in 1..=steps / 2 {
        let east = i as f64 * spacing;
        if east > 180.0 {
            break;
        }
        values.push(east);
        if east < 180.0 {
            values.push(-east);
        }
    }
    values
}

/// Latitudes at multiples of `spacing` within `[south, north]`, north first
pub fn latitude_values(spacing: f64, south: f64, north: f64) -> Vec<f64> {
    let first = (north / spacing).floor() as i64;
    let last = (south / spacing).ceil() as i64;
    (last..=first).rev().map(|i| i as f64 * spacing).collect()
}
