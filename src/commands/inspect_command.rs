//! Grid shift file inspection command
//!
//! This module implements the command for displaying the header and
//! sub-grid table of a grid shift file.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::crs::errors::{CrsError, CrsResult};
use crate::grid::cache;
use crate::grid::file::{GridShiftFile, GridVersion};
use crate::grid::subgrid::GridShiftGrid;
use crate::utils::angle_utils;
use crate::utils::logger::Logger;

/// Command for inspecting grid shift file structure
pub struct InspectCommand<'a> {
    /// Path to the grid shift file
    input_file: String,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> InspectCommand<'a> {
    /// Create a new inspect command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new InspectCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> CrsResult<Self> {
        let input_file = args
            .get_one::<String>("inspect")
            .ok_or_else(|| CrsError::GenericError("Missing grid file to inspect".to_string()))?
            .clone();

        Ok(InspectCommand { input_file, logger })
    }

    /// Display the file header
    fn display_header(&self, file: &GridShiftFile) {
        let header = file.header();
        info!("Grid Shift File Analysis:");
        match &header.version {
            GridVersion::Ascii(stamp) => info!("  Version: {}", stamp),
            GridVersion::Legacy(number) => info!("  Version: {} (legacy numeric)", number),
        }
        info!("  Coordinate system id: {}", header.coordinate_system_id);
        info!("  Scale factors: xy={}, z={}", header.scale_xy, header.scale_z);
        info!("  Sub-grids: {}", file.grids().len());
    }

    /// Display one sub-grid's placement and lattice shape
    fn display_subgrid(&self, grid: &GridShiftGrid) {
        let east = angle_utils::grid_seconds_to_longitude(grid.min_lon());
        let west = angle_utils::grid_seconds_to_longitude(grid.max_lon());
        let south = angle_utils::seconds_to_degrees(grid.min_lat());
        let north = angle_utils::seconds_to_degrees(grid.max_lat());

        info!(
            "\nSub-grid '{}' (parent: {})",
            grid.name(),
            grid.parent_name().unwrap_or("none")
        );
        info!(
            "  Extent: lon [{:.4}, {:.4}], lat [{:.4}, {:.4}] degrees",
            west, east, south, north
        );
        info!(
            "  Lattice: {}x{} nodes, {} components per node",
            grid.col_count(),
            grid.row_count(),
            grid.dimension()
        );
    }
}

impl Command for InspectCommand<'_> {
    fn execute(&self) -> CrsResult<()> {
        let file = cache::load_cached(&self.input_file)?;

        self.display_header(&file);
        for grid in file.grids() {
            self.display_subgrid(grid);
        }

        self.logger
            .log(&format!("Inspected grid shift file: {}", self.input_file))?;
        Ok(())
    }
}
