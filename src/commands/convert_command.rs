//! Coordinate conversion command
//!
//! Converts single raw or geographic coordinates, or a file of raw points
//! (one `x,y` per line) into CSV rows of `x,y,lat,lng`.

use std::fs;

use clap::ArgMatches;
use log::{debug, info, warn};

use crate::commands::command_traits::Command;
use crate::config::MapConfig;
use crate::coordinate::{wrap_x, GeoPoint, GeoTransform, RawPoint};
use crate::errors::{MapError, MapResult};
use crate::utils::format_utils::{format_geo, format_readout};
use crate::utils::logger::Logger;
use crate::utils::parse_utils::{parse_geo_pair, parse_raw_point};
use crate::utils::progress::ProgressTracker;

/// What the convert command was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionRequest {
    /// One raw point to geographic
    ToGeo(RawPoint),
    /// One geographic point to raw
    ToRaw(GeoPoint),
    /// A file of raw points, written to `output` or stdout
    Batch { input: String, output: Option<String> },
}

/// Outcome of converting a batch of lines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResult {
    /// One CSV row per converted point
    pub rows: Vec<String>,
    /// 1-based line numbers that could not be parsed
    pub skipped: Vec<usize>,
}

/// Command for converting between raw and geographic coordinates
pub struct ConvertCommand<'a> {
    config: MapConfig,
    request: ConversionRequest,
    logger: &'a Logger,
}

impl<'a> ConvertCommand<'a> {
    /// Create a new convert command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `config` - Resolved map configuration
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new ConvertCommand instance or an error for malformed input
    pub fn new(args: &ArgMatches, config: MapConfig, logger: &'a Logger) -> MapResult<Self> {
        let request = if let Some(text) = args.get_one::<String>("to-geo") {
            ConversionRequest::ToGeo(parse_raw_point(text)?)
        } else if let Some(text) = args.get_one::<String>("to-raw") {
            ConversionRequest::ToRaw(parse_geo_pair(text)?)
        } else if let Some(input) = args.get_one::<String>("points") {
            ConversionRequest::Batch {
                input: input.clone(),
                output: args.get_one::<String>("output").cloned(),
            }
        } else {
            return Err(MapError::GenericError(
                "Missing conversion input. Use --to-geo, --to-raw or --points".to_string(),
            ));
        };

        Ok(ConvertCommand { config, request, logger })
    }

    /// Convert the lines of a point file
    ///
    /// Blank lines and lines starting with `#` are ignored. Lines that do not
    /// parse are reported in `skipped` and do not stop the batch.
    pub fn convert_lines(config: &MapConfig, content: &str, progress: &ProgressTracker) -> BatchResult {
        let transform = GeoTransform::new(config);
        let mut result = BatchResult::default();

        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                progress.increment(1);
                continue;
            }

            match parse_raw_point(trimmed) {
                Ok(raw) => {
                    let geo = transform.raw_point_to_geo(&raw);
                    result.rows.push(format!("{},{},{:.6},{:.6}", raw.x, raw.y, geo.lat, geo.lng));
                },
                Err(e) => {
                    warn!("Skipping line {}: {}", index + 1, e);
                    result.skipped.push(index + 1);
                },
            }
            progress.increment(1);
        }

        debug!("Converted {} points, skipped {}", result.rows.len(), result.skipped.len());
        result
    }

    fn convert_batch(&self, input: &str, output: Option<&str>) -> MapResult<()> {
        info!("Converting points from {}", input);
        let content = fs::read_to_string(input)?;
        let total = content.lines().count() as u64;

        let progress = match output {
            Some(_) => ProgressTracker::new(total, "Converting points"),
            None => ProgressTracker::hidden(total),
        };
        let result = Self::convert_lines(&self.config, &content, &progress);
        progress.finish();

        let mut csv = String::from("x,y,lat,lng\n");
        for row in &result.rows {
            csv.push_str(row);
            csv.push('\n');
        }

        match output {
            Some(path) => {
                fs::write(path, csv)?;
                info!("Wrote {} points to {}", result.rows.len(), path);
            },
            None => print!("{}", csv),
        }

        if !result.skipped.is_empty() {
            warn!("{} line(s) could not be parsed", result.skipped.len());
        }
        self.logger.log(&format!("Converted {} points from {}", result.rows.len(), input))?;
        Ok(())
    }
}

impl<'a> Command for ConvertCommand<'a> {
    fn execute(&self) -> MapResult<()> {
        let transform = GeoTransform::new(&self.config);

        match &self.request {
            ConversionRequest::ToGeo(raw) => {
                let geo = transform.raw_point_to_geo(raw);
                let shown = RawPoint::new(wrap_x(raw.x, transform.width()), raw.y);
                println!("{:.6},{:.6}", geo.lat, geo.lng);
                info!("{}", format_readout(&shown, &geo));
                self.logger.log(&format!("to-geo {},{} -> {}", raw.x, raw.y, format_geo(&geo)))?;
            },
            ConversionRequest::ToRaw(geo) => {
                let raw = transform.geo_point_to_raw(geo);
                println!("{:.2},{:.2}", raw.x, raw.y);
                info!("{} -> x: {:.2}, y: {:.2}", format_geo(geo), raw.x, raw.y);
                self.logger.log(&format!("to-raw {} -> {:.2},{:.2}", format_geo(geo), raw.x, raw.y))?;
            },
            ConversionRequest::Batch { input, output } => {
                self.convert_batch(input, output.as_deref())?;
            },
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_lines_skips_comments_and_bad_rows() {
        let config = MapConfig::default();
        let content = "# raw points\n4101,2450\n\nnot a point\n0,0\n";
        let progress = ProgressTracker::hidden(5);
        let result = ConvertCommand::convert_lines(&config, content, &progress);

        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.skipped, vec![4]);
        assert!(result.rows[0].starts_with("4101,2450,"));
        assert_eq!(progress.position(), 5);
    }

    #[test]
    fn test_convert_lines_reports_reference_longitude_at_meridian() {
        let mut config = MapConfig::default();
        config.resolve_prime_meridian();
        let line = format!("{},{}", config.prime_meridian_x, config.prime_meridian_y);
        let result = ConvertCommand::convert_lines(&config, &line, &ProgressTracker::hidden(1));

        let fields: Vec<&str> = result.rows[0].split(',').collect();
        let lat: f64 = fields[2].parse().unwrap();
        let lng: f64 = fields[3].parse().unwrap();
        assert!((lat + 14.08).abs() < 1e-6);
        assert!((lng - 26.22).abs() < 1e-6);
    }
}
