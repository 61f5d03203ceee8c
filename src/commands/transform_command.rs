//! Point transformation command
//!
//! This module implements the command for transforming a coordinate
//! between two catalog CRS codes, optionally applying registered grid
//! shift files for the datum pair involved.

use clap::ArgMatches;
use log::{debug, info};
use std::sync::Arc;

use crate::commands::command_traits::Command;
use crate::crs::errors::{CrsError, CrsResult};
use crate::crs::registry::{CatalogRegistry, CrsProvider};
use crate::crs::system::CoordinateSystem;
use crate::grid::GsbGridShiftOperation;
use crate::operation::builder::OperationBuilder;
use crate::operation::point::OperationPoint;
use crate::operation::CoordinatesOperation;
use crate::utils::logger::Logger;

/// Command for transforming a point between two CRS codes
pub struct TransformCommand<'a> {
    /// Code of the CRS the input point is expressed in
    source_code: String,
    /// Code of the CRS to transform into
    target_code: String,
    /// Input coordinates
    x: f64,
    y: f64,
    /// Grid shift files to register for the datum pair
    grid_paths: Vec<String>,
    /// Optional catalog file replacing the built-in one
    catalog: Option<String>,
    /// Whether to enable verbose output
    verbose: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> TransformCommand<'a> {
    /// Create a new transform command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new TransformCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> CrsResult<Self> {
        let source_code = args
            .get_one::<String>("source")
            .ok_or_else(|| CrsError::GenericError("Missing source CRS code".to_string()))?
            .clone();
        let target_code = args
            .get_one::<String>("target")
            .ok_or_else(|| CrsError::GenericError("Missing target CRS code".to_string()))?
            .clone();

        let point_str = args
            .get_one::<String>("point")
            .ok_or_else(|| CrsError::GenericError("Missing --point argument".to_string()))?;
        let (x, y) = parse_point(point_str)?;

        let grid_paths = args
            .get_many::<String>("grid")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        let catalog = args.get_one::<String>("catalog").cloned();
        let verbose = args.get_flag("verbose");

        Ok(TransformCommand {
            source_code,
            target_code,
            x,
            y,
            grid_paths,
            catalog,
            verbose,
            logger,
        })
    }
}

impl Command for TransformCommand<'_> {
    fn execute(&self) -> CrsResult<()> {
        debug!(
            "Transforming point ({}, {}) from {} to {}",
            self.x, self.y, self.source_code, self.target_code
        );

        let registry = match &self.catalog {
            Some(path) => CatalogRegistry::from_file(path)?,
            None => CatalogRegistry::builtin(),
        };
        let source = registry.resolve(&self.source_code)?;
        let target = registry.resolve(&self.target_code)?;

        if self.verbose {
            info!("Source digest: {}", source.digest());
            info!("Target digest: {}", target.digest());
        }

        let mut builder = OperationBuilder::new();
        for path in &self.grid_paths {
            let shift = GsbGridShiftOperation::from_path(path)?;
            builder.register_horizontal_shift(
                geodetic_datum_name(&source)?,
                geodetic_datum_name(&target)?,
                Arc::new(shift),
            );
            info!("Registered grid shift file: {}", path);
        }

        let operation = builder.build(&source, &target)?;
        let mut point = OperationPoint::new(self.x, self.y);
        operation.perform(&mut point);

        info!("Source: {} ({})", source.name(), self.source_code);
        info!("Target: {} ({})", target.name(), self.target_code);
        info!("Input:  ({}, {})", self.x, self.y);
        info!("Output: ({}, {})", point.x, point.y);

        self.logger.log(&format!(
            "Transformed ({}, {}) -> ({}, {})",
            self.x, self.y, point.x, point.y
        ))?;
        Ok(())
    }
}

/// Parses an "x,y" argument into a coordinate pair
fn parse_point(value: &str) -> CrsResult<(f64, f64)> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(CrsError::GenericError(format!(
            "Expected point as 'x,y', got '{}'",
            value
        )));
    }
    let x = parts[0]
        .parse::<f64>()
        .map_err(|e| CrsError::GenericError(format!("Invalid x coordinate: {}", e)))?;
    let y = parts[1]
        .parse::<f64>()
        .map_err(|e| CrsError::GenericError(format!("Invalid y coordinate: {}", e)))?;
    Ok((x, y))
}

/// Name of the geodetic datum behind a horizontal CRS
fn geodetic_datum_name(crs: &CoordinateSystem) -> CrsResult<&str> {
    match crs {
        CoordinateSystem::Geographic(geographic) => Ok(&geographic.datum.name),
        CoordinateSystem::Projected(projected) => Ok(&projected.base.datum.name),
        CoordinateSystem::Compound(compound) => geodetic_datum_name(&compound.horizontal),
        CoordinateSystem::Vertical(_) => Err(CrsError::GenericError(
            "Grid shift files apply to horizontal CRS only".to_string(),
        )),
    }
}
