//! Path distance command

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::optional_f64;
use crate::coordinate::DisplayPoint;
use crate::distance::{Distance, DistanceCalculator};
use crate::config::MapConfig;
use crate::errors::{MapError, MapResult};
use crate::utils::logger::Logger;
use crate::utils::parse_utils::parse_point_list;

/// Command for measuring a path of container pixels
pub struct DistanceCommand<'a> {
    calculator: DistanceCalculator,
    points: Vec<DisplayPoint>,
    zoom: f64,
    center_lat: Option<f64>,
    logger: &'a Logger,
}

impl<'a> DistanceCommand<'a> {
    /// Create a new distance command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `config` - Map configuration supplying the distance calibration
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new DistanceCommand instance or an error
    pub fn new(args: &ArgMatches, config: MapConfig, logger: &'a Logger) -> MapResult<Self> {
        let text = args
            .get_one::<String>("distance")
            .ok_or_else(|| MapError::GenericError("Missing points for distance".to_string()))?;

        let points: Vec<DisplayPoint> = parse_point_list(text)?
            .into_iter()
            .map(|(x, y)| DisplayPoint::new(x, y))
            .collect();
        if points.len() < 2 {
            return Err(MapError::ParseError(format!("Distance needs at least two points, got {}", points.len())));
        }

        Ok(DistanceCommand {
            calculator: DistanceCalculator::from_config(&config),
            points,
            zoom: optional_f64(args, "zoom")?.unwrap_or(0.0),
            center_lat: optional_f64(args, "lat")?,
            logger,
        })
    }

    /// Measure the configured path
    pub fn measure(&self) -> Distance {
        self.calculator.path_distance(&self.points, self.zoom, self.center_lat)
    }
}

impl<'a> Command for DistanceCommand<'a> {
    fn execute(&self) -> MapResult<()> {
        let distance = self.measure();
        info!("Measured {} segment(s) at zoom {}", self.points.len() - 1, self.zoom);
        if let Some(lat) = self.center_lat {
            info!("  Latitude correction at {}°: /{:.3}", lat, DistanceCalculator::latitude_factor(lat));
        }

        println!("{}", distance.format());
        self.logger.log(&format!("Distance: {}", distance.format()))?;
        Ok(())
    }
}
