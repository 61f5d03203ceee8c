use clap::{Arg, ArgAction, Command as ClapCommand};
use log::error;
use std::process;

use crskit::commands::{CommandFactory, CrskitCommandFactory};
use crskit::utils::logger::Logger;

fn main() {
    let matches = ClapCommand::new("CrsKit")
        .version("1.0")
        .about("Transform coordinates between catalog CRS codes")
        .arg(
            Arg::new("source")
                .help("Source CRS code (e.g. 4326 or EPSG:4326)")
                .required(false)
                .index(1),
        )
        .arg(
            Arg::new("target")
                .help("Target CRS code (e.g. 3857)")
                .required(false)
                .index(2),
        )
        .arg(
            Arg::new("point")
                .short('p')
                .long("point")
                .help("Point to transform in 'x,y' format")
                .value_name("X,Y")
                .required(false),
        )
        .arg(
            Arg::new("grid")
                .short('g')
                .long("grid")
                .help("Grid shift file to apply for the datum pair (repeatable)")
                .value_name("FILE")
                .action(ArgAction::Append)
                .required(false),
        )
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .help("TOML catalog file replacing the built-in definitions")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("inspect")
                .short('i')
                .long("inspect")
                .help("Inspect a grid shift file instead of transforming")
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
        .get_matches();

    let log_file = "crskit.log";
    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger("crskit-global.log") {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = CrskitCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
