//! CLI command implementations
//!
//! This module contains the commands behind the `ixmaps` binary and the
//! factory that selects one from the command-line flags.

pub mod command_traits;
pub mod info_command;
pub mod convert_command;
pub mod grid_command;
pub mod distance_command;

pub use command_traits::{Command, CommandFactory};
pub use info_command::InfoCommand;
pub use convert_command::{ConversionRequest, ConvertCommand};
pub use grid_command::GridCommand;
pub use distance_command::DistanceCommand;

use clap::ArgMatches;
use log::debug;

use crate::config::{ConfigLoader, MapConfig, DEFAULT_CONFIG};
use crate::errors::{MapError, MapResult};
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
pub struct IxmapsCommandFactory;

impl IxmapsCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        IxmapsCommandFactory
    }
}

impl Default for IxmapsCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for IxmapsCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> MapResult<Box<dyn Command + 'a>> {
        let config = load_config(args)?;

        if args.contains_id("to-geo") || args.contains_id("to-raw") || args.contains_id("points") {
            Ok(Box::new(ConvertCommand::new(args, config, logger)?))
        } else if args.get_flag("grid") {
            Ok(Box::new(GridCommand::new(args, config, logger)?))
        } else if args.contains_id("distance") {
            Ok(Box::new(DistanceCommand::new(args, config, logger)?))
        } else {
            Ok(Box::new(InfoCommand::new(args, config, logger)))
        }
    }
}

/// Load the configuration named by `--config`, or the bundled default
///
/// The result is sanitized and has its prime meridian resolved, so commands
/// can hand it straight to the coordinate components.
pub fn load_config(args: &ArgMatches) -> MapResult<MapConfig> {
    let mut config = match args.get_one::<String>("config") {
        Some(path) => ConfigLoader::from_file(path)?,
        None => {
            debug!("Using bundled map configuration");
            DEFAULT_CONFIG.clone()
        },
    };
    config = config.sanitized();
    config.resolve_prime_meridian();
    Ok(config)
}

/// Parse an optional numeric argument
pub(crate) fn optional_f64(args: &ArgMatches, name: &str) -> MapResult<Option<f64>> {
    match args.get_one::<String>(name) {
        Some(text) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| MapError::ParseError(format!("Invalid value for --{}: {}", name, text))),
        None => Ok(None),
    }
}
