use clap::{Arg, ArgAction, Command as ClapCommand};
use log::error;
use std::process;

use ixmaps::commands::{CommandFactory, IxmapsCommandFactory};
use ixmaps::utils::logger::Logger;

fn main() {
    let matches = ClapCommand::new("IxMaps")
        .version("0.1.0")
        .author("Maurice Schilpp")
        .about("Coordinate engine for the IxMaps world map")
        .arg(
            Arg::new("config")
                .long("config")
                .help("Map configuration file (TOML); defaults to the bundled ixmaps.toml")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write log records to this file as well as the console")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("to-geo")
                .long("to-geo")
                .help("Convert a raw map pixel 'x,y' to latitude/longitude")
                .value_name("X,Y")
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new("to-raw")
                .long("to-raw")
                .help("Convert 'lat,lng' (e.g. '-14.08,26.22' or '14.08S,26.22E') to a raw map pixel")
                .value_name("LAT,LNG")
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new("points")
                .long("points")
                .help("Convert a file of raw 'x,y' points, one per line, to CSV")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file (CSV for --points, SVG for --grid)")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("grid")
                .short('g')
                .long("grid")
                .help("Render the grid and prime meridian overlays to SVG")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("zoom")
                .short('z')
                .long("zoom")
                .help("Zoom level for --grid and --distance")
                .value_name("ZOOM")
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new("center")
                .long("center")
                .help("Raw view centre 'x,y' for --grid; defaults to the map centre")
                .value_name("X,Y")
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new("size")
                .long("size")
                .help("Container size for --grid, e.g. '1200x700'")
                .value_name("WxH")
                .required(false),
        )
        .arg(
            Arg::new("no-labels")
                .long("no-labels")
                .help("Leave grid labels out of the --grid export")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("distance")
                .short('d')
                .long("distance")
                .help("Measure a path of container pixels 'x,y;x,y;...'")
                .value_name("POINTS")
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new("lat")
                .long("lat")
                .help("View centre latitude for the --distance latitude correction")
                .value_name("LAT")
                .allow_hyphen_values(true)
                .required(false),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");

    let logger = match matches.get_one::<String>("log-file") {
        Some(log_file) => {
            let logger = match Logger::new(log_file) {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Error initializing logger: {}", e);
                    process::exit(1);
                }
            };
            if let Err(e) = Logger::init_global_logger(log_file, verbose) {
                eprintln!("Error setting up global logger: {}", e);
                process::exit(1);
            }
            logger
        },
        None => {
            Logger::init_console_logger(verbose);
            Logger::console_only()
        },
    };

    let factory = IxmapsCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
