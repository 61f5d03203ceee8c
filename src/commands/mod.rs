//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod inspect_command;
pub mod transform_command;

pub use command_traits::{Command, CommandFactory};
pub use inspect_command::InspectCommand;
pub use transform_command::TransformCommand;

use clap::ArgMatches;

use crate::crs::errors::CrsResult;
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct CrskitCommandFactory;

impl CrskitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        CrskitCommandFactory
    }
}

impl Default for CrskitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for CrskitCommandFactory {
    fn create_command(
        &self,
        args: &ArgMatches,
        logger: &'a Logger,
    ) -> CrsResult<Box<dyn Command + 'a>> {
        // Determine which command to run based on args
        if args.get_one::<String>("inspect").is_some() {
            Ok(Box::new(InspectCommand::new(args, logger)?))
        } else {
            // Default to point transformation
            Ok(Box::new(TransformCommand::new(args, logger)?))
        }
    }
}
