//! Configuration summary command
//!
//! The default command: prints the resolved map configuration and any
//! calibration warnings.

use clap::ArgMatches;
use log::{info, warn};

use crate::commands::command_traits::Command;
use crate::config::{LongitudeMode, MapConfig};
use crate::coordinate::{GeoPoint, GeoTransform};
use crate::errors::MapResult;
use crate::utils::format_utils::format_geo;
use crate::utils::logger::Logger;

/// Command for describing the active map configuration
pub struct InfoCommand<'a> {
    config: MapConfig,
    verbose: bool,
    logger: &'a Logger,
}

impl<'a> InfoCommand<'a> {
    /// Create a new info command
    pub fn new(args: &ArgMatches, config: MapConfig, logger: &'a Logger) -> Self {
        InfoCommand {
            config,
            verbose: args.get_flag("verbose"),
            logger,
        }
    }

    /// Summary lines for the configuration
    pub fn summary(&self) -> Vec<String> {
        let config = &self.config;
        let transform = GeoTransform::new(config);
        let mut lines = vec![
            format!("Raw size: {}x{}", config.raw_width, config.raw_height),
            format!("Visible latitudes: {} to {}", config.visible_bounds.south, config.visible_bounds.north),
            format!("Pixels per degree: {:.4} lng, {:.4} lat",
                    config.pixels_per_longitude_degree, config.pixels_per_latitude_degree),
            format!("Equator at y={:.2}", config.equator_y),
            format!("Prime meridian at x={:.2}", config.prime_meridian_x),
        ];

        match (config.longitude_mode, config.prime_meridian_ref) {
            (LongitudeMode::MeridianRelative, Some(reference)) => {
                lines.push(format!("Longitude mode: meridian-relative, reference {}",
                                   format_geo(&GeoPoint::from(reference))));
            },
            (LongitudeMode::MeridianRelative, None) => {
                lines.push("Longitude mode: meridian-relative without reference".to_string());
            },
            (LongitudeMode::Standard, _) => lines.push("Longitude mode: standard".to_string()),
        }

        lines.push(format!("Hemisphere convention: {:?}", config.hemisphere));
        lines.push(format!("Distance calibration: {} mi/px, {} km/px",
                           config.miles_per_pixel, config.km_per_pixel));

        if self.verbose {
            let corner = transform.raw_to_geo(0.0, 0.0);
            let far = transform.raw_to_geo(transform.width(), transform.height());
            lines.push(format!("Top-left corner: {}", format_geo(&corner)));
            lines.push(format!("Bottom-right corner: {}", format_geo(&far)));
        }

        lines
    }
}

impl<'a> Command for InfoCommand<'a> {
    fn execute(&self) -> MapResult<()> {
        info!("Map Configuration:");
        for line in self.summary() {
            info!("  {}", line);
            self.logger.log(&line)?;
        }

        let warnings = self.config.validate();
        if warnings.is_empty() {
            info!("Configuration is consistent");
        }
        for warning in warnings {
            warn!("  {}", warning);
        }

        Ok(())
    }
}
