//! Parsing of textual coordinate input
//!
//! Accepts the forms typed on the command line or stored in point files:
//! `"x,y"` pairs, `;`-separated point lists, `"1200x700"` sizes and
//! geographic pairs such as `"-14.08,26.22"` or `"14.08S, 26.22E"`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::coordinate::{DisplaySize, GeoPoint, RawPoint};
use crate::errors::{MapError, MapResult};

lazy_static! {
    static ref NUMBER_PAIR: Regex =
        Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+))\s*,\s*([+-]?(?:\d+\.?\d*|\.\d+))\s*$").unwrap();
    static ref SIZE: Regex =
        Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*[xX]\s*(\d+(?:\.\d+)?)\s*$").unwrap();
    static ref GEO_COMPONENT: Regex =
        Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+))\s*°?\s*([NnSsEeWw])?\s*$").unwrap();
}

/// Parse an `"x,y"` pair
///
/// # Arguments
/// * `text` - Two comma-separated numbers
///
/// # Returns
/// The two values, or a `ParseError` naming the input
pub fn parse_pair(text: &str) -> MapResult<(f64, f64)> {
    let captures = NUMBER_PAIR
        .captures(text)
        .ok_or_else(|| MapError::ParseError(format!("Invalid pair '{}'. Expected 'x,y'", text)))?;
    Ok((parse_number(&captures[1])?, parse_number(&captures[2])?))
}

/// Parse an `"x,y"` pair as a raw point
pub fn parse_raw_point(text: &str) -> MapResult<RawPoint> {
    let (x, y) = parse_pair(text)?;
    Ok(RawPoint::new(x, y))
}

/// Parse a `;`-separated list of `"x,y"` pairs
///
/// Empty segments (a trailing `;`) are skipped.
pub fn parse_point_list(text: &str) -> MapResult<Vec<(f64, f64)>> {
    text.split(';')
        .filter(|segment| !segment.trim().is_empty())
        .map(parse_pair)
        .collect()
}

/// Parse a container size such as `"1200x700"`
pub fn parse_size(text: &str) -> MapResult<DisplaySize> {
    let captures = SIZE
        .captures(text)
        .ok_or_else(|| MapError::ParseError(format!("Invalid size '{}'. Expected 'WIDTHxHEIGHT'", text)))?;
    let size = DisplaySize::new(parse_number(&captures[1])?, parse_number(&captures[2])?);
    if !size.is_usable() {
        return Err(MapError::InvalidDimensions { width: size.width, height: size.height });
    }
    Ok(size)
}

/// Parse a `"lat,lng"` pair
///
/// Each component is either signed or carries a hemisphere letter:
/// `"-14.08,26.22"` and `"14.08S,26.22E"` are the same point. A letter
/// on the wrong axis (`"14E,..."`) is rejected.
pub fn parse_geo_pair(text: &str) -> MapResult<GeoPoint> {
    let mut parts = text.split(',');
    let (lat_text, lng_text) = match (parts.next(), parts.next(), parts.next()) {
        (Some(lat), Some(lng), None) => (lat, lng),
        _ => {
            return Err(MapError::ParseError(format!("Invalid coordinate '{}'. Expected 'lat,lng'", text)));
        },
    };

    let lat = parse_geo_component(lat_text, 'N', 'S')?;
    let lng = parse_geo_component(lng_text, 'E', 'W')?;
    Ok(GeoPoint::new(lat, lng))
}

fn parse_geo_component(text: &str, positive: char, negative: char) -> MapResult<f64> {
    let captures = GEO_COMPONENT
        .captures(text)
        .ok_or_else(|| MapError::ParseError(format!("Invalid coordinate component '{}'", text.trim())))?;
    let value = parse_number(&captures[1])?;

    match captures.get(2).map(|m| m.as_str().to_ascii_uppercase()) {
        None => Ok(value),
        Some(letter) if letter.starts_with(positive) => Ok(value.abs()),
        Some(letter) if letter.starts_with(negative) => Ok(-value.abs()),
        Some(letter) => Err(MapError::ParseError(format!(
            "Hemisphere '{}' does not belong on this axis (expected {} or {})",
            letter, positive, negative
        ))),
    }
}

fn parse_number(text: &str) -> MapResult<f64> {
    text.parse::<f64>()
        .map_err(|_| MapError::ParseError(format!("Invalid number '{}'", text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("4101,2450").unwrap(), (4101.0, 2450.0));
        assert_eq!(parse_pair(" -1.5 , .25 ").unwrap(), (-1.5, 0.25));
        assert!(parse_pair("4101").is_err());
        assert!(parse_pair("a,b").is_err());
        assert!(parse_pair("1,2,3").is_err());
    }

    #[test]
    fn test_parse_point_list() {
        let points = parse_point_list("0,0;60,80;").unwrap();
        assert_eq!(points, vec![(0.0, 0.0), (60.0, 80.0)]);
        assert!(parse_point_list("0,0;bad").is_err());
        assert!(parse_point_list("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_size() {
        let size = parse_size("1200x700").unwrap();
        assert_eq!((size.width, size.height), (1200.0, 700.0));
        assert!(parse_size("1200X700").is_ok());
        assert!(parse_size("0x700").is_err());
        assert!(parse_size("1200,700").is_err());
    }

    #[test]
    fn test_parse_geo_pair_signed_and_lettered() {
        let signed = parse_geo_pair("-14.08,26.22").unwrap();
        let lettered = parse_geo_pair("14.08S, 26.22E").unwrap();
        assert_eq!(signed, lettered);
        assert_eq!(signed, GeoPoint::new(-14.08, 26.22));

        let west = parse_geo_pair("30°N,45.5 w").unwrap();
        assert_eq!(west, GeoPoint::new(30.0, -45.5));
    }

    #[test]
    fn test_parse_geo_pair_rejects_wrong_axis() {
        assert!(parse_geo_pair("14E,26N").is_err());
        assert!(parse_geo_pair("14").is_err());
    }
}
