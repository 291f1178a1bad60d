//! Overlay export command
//!
//! Renders the lat/lon grid and the prime meridian for one view and writes
//! them to an SVG file.

use clap::ArgMatches;
use log::info;

use crate::api::IxMaps;
use crate::commands::command_traits::Command;
use crate::commands::optional_f64;
use crate::config::MapConfig;
use crate::coordinate::{DisplaySize, RawPoint};
use crate::errors::{MapError, MapResult};
use crate::utils::logger::Logger;
use crate::utils::parse_utils::{parse_raw_point, parse_size};

/// Container size used when `--size` is not given
pub const DEFAULT_VIEW_SIZE: DisplaySize = DisplaySize { width: 1200.0, height: 700.0 };

/// Command for exporting the grid overlays of one view
pub struct GridCommand<'a> {
    config: MapConfig,
    zoom: f64,
    center: RawPoint,
    size: DisplaySize,
    show_labels: bool,
    output_file: String,
    logger: &'a Logger,
}

impl<'a> GridCommand<'a> {
    /// Create a new grid command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `config` - Resolved map configuration
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new GridCommand instance or an error
    pub fn new(args: &ArgMatches, config: MapConfig, logger: &'a Logger) -> MapResult<Self> {
        let output_file = args
            .get_one::<String>("output")
            .ok_or_else(|| MapError::GenericError("Missing output file path for grid export".to_string()))?
            .clone();

        let zoom = optional_f64(args, "zoom")?.unwrap_or(0.0);
        let center = match args.get_one::<String>("center") {
            Some(text) => parse_raw_point(text)?,
            None => RawPoint::new(config.raw_width / 2.0, config.raw_height / 2.0),
        };
        let size = match args.get_one::<String>("size") {
            Some(text) => parse_size(text)?,
            None => DEFAULT_VIEW_SIZE,
        };

        Ok(GridCommand {
            config,
            zoom,
            center,
            size,
            show_labels: !args.get_flag("no-labels"),
            output_file,
            logger,
        })
    }

    /// Build an initialized viewer positioned on the requested view
    pub fn viewer(&self) -> MapResult<IxMaps> {
        let mut viewer = IxMaps::new(self.config.clone().with_display(self.size));
        viewer.initialize()?;
        viewer.set_labels_visible(self.show_labels);
        viewer.set_view(self.center, self.zoom);
        Ok(viewer)
    }
}

impl<'a> Command for GridCommand<'a> {
    fn execute(&self) -> MapResult<()> {
        info!("Rendering grid at zoom {} around ({}, {}) into {}x{} view",
              self.zoom, self.center.x, self.center.y, self.size.width, self.size.height);

        let mut viewer = self.viewer()?;
        let (grid, meridian) = viewer.redraw()?;
        info!("  Grid spacing: {}°", grid.spacing);
        info!("  Lines: {}, longitude labels: {}, latitude labels: {}",
              grid.lines.len(), grid.longitude_labels.len(), grid.latitude_labels.len());
        info!("  Prime meridian instances: {}", meridian.instances.len());

        viewer.write_svg(&self.output_file)?;
        info!("Wrote overlays to {}", self.output_file);
        self.logger.log(&format!("Grid export written to {}", self.output_file))?;

        Ok(())
    }
}
