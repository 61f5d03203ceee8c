//! High-level library facade

use log::info;
use std::sync::Arc;

use crate::crs::errors::CrsResult;
use crate::crs::registry::{CatalogRegistry, CrsProvider};
use crate::crs::system::CoordinateSystem;
use crate::grid::cache;
use crate::grid::file::GridVersion;
use crate::grid::GsbGridShiftOperation;
use crate::operation::builder::OperationBuilder;
use crate::operation::point::OperationPoint;
use crate::operation::CoordinatesOperation;
use crate::utils::angle_utils;
use crate::utils::logger::Logger;

/// Main interface to the CrsKit library
pub struct CrsKit {
    registry: CatalogRegistry,
    builder: OperationBuilder,
    logger: Logger,
}

impl CrsKit {
    /// Create a new CrsKit instance over the built-in catalog
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "crskit.log"
    ///
    /// # Returns
    /// A CrsKit instance or an error if initialization fails
    pub fn new(log_file: Option<&str>) -> CrsResult<Self> {
        let log_path = log_file.unwrap_or("crskit.log");
        let logger = Logger::new(log_path)?;
        Ok(CrsKit {
            registry: CatalogRegistry::builtin(),
            builder: OperationBuilder::new(),
            logger,
        })
    }

    /// Create a CrsKit instance over a catalog loaded from a TOML file
    pub fn with_catalog(catalog_path: &str, log_file: Option<&str>) -> CrsResult<Self> {
        let log_path = log_file.unwrap_or("crskit.log");
        let logger = Logger::new(log_path)?;
        Ok(CrsKit {
            registry: CatalogRegistry::from_file(catalog_path)?,
            builder: OperationBuilder::new(),
            logger,
        })
    }

    /// Resolve an authority code to a CRS definition
    ///
    /// # Arguments
    /// * `code` - Catalog code, with or without an "EPSG:" prefix
    pub fn resolve(&self, code: &str) -> CrsResult<CoordinateSystem> {
        self.registry.resolve(code)
    }

    /// Register a grid shift file for a datum pair
    ///
    /// Grids registered for the same pair are consulted in registration
    /// order; the first whose extent covers a point wins.
    ///
    /// # Arguments
    /// * `path` - Path to the grid shift file
    /// * `source_datum` - Name of the datum the grid shifts from
    /// * `target_datum` - Name of the datum the grid shifts to
    pub fn register_grid(
        &mut self,
        path: &str,
        source_datum: &str,
        target_datum: &str,
    ) -> CrsResult<()> {
        info!(
            "Registering grid shift file {} for {} -> {}",
            path, source_datum, target_datum
        );
        let shift = GsbGridShiftOperation::from_path(path)?;
        self.builder
            .register_horizontal_shift(source_datum, target_datum, Arc::new(shift));
        Ok(())
    }

    /// Transform a 2D coordinate between two catalog CRS codes
    ///
    /// # Arguments
    /// * `source_code` - Code of the CRS the input is expressed in
    /// * `target_code` - Code of the CRS to transform into
    /// * `x` - First coordinate (longitude or easting)
    /// * `y` - Second coordinate (latitude or northing)
    ///
    /// # Returns
    /// The transformed (x, y) pair
    pub fn transform(
        &self,
        source_code: &str,
        target_code: &str,
        x: f64,
        y: f64,
    ) -> CrsResult<(f64, f64)> {
        self.logger.log(&format!(
            "Transforming ({}, {}) from {} to {}",
            x, y, source_code, target_code
        ))?;

        let source = self.registry.resolve(source_code)?;
        let target = self.registry.resolve(target_code)?;
        let operation = self.builder.build(&source, &target)?;

        let mut point = OperationPoint::default();
        let mut result = (0.0, 0.0);
        operation.perform_2d(&mut point, x, y, &mut |out_x, out_y| {
            result = (out_x, out_y);
        });
        Ok(result)
    }

    /// Transform a point in place between two catalog CRS codes
    ///
    /// Unlike `transform` this carries the height through the chain, so
    /// compound CRS transformations and 3D shift grids apply.
    pub fn transform_point(
        &self,
        source_code: &str,
        target_code: &str,
        point: &mut OperationPoint,
    ) -> CrsResult<()> {
        let source = self.registry.resolve(source_code)?;
        let target = self.registry.resolve(target_code)?;
        let operation = self.builder.build(&source, &target)?;
        operation.perform(point);
        Ok(())
    }

    /// Summarize a grid shift file's header and sub-grid table
    ///
    /// # Arguments
    /// * `path` - Path to the grid shift file
    ///
    /// # Returns
    /// String containing the summary or an error
    pub fn inspect_grid(&self, path: &str) -> CrsResult<String> {
        let file = cache::load_cached(path)?;
        let header = file.header();

        let mut result = String::from("Grid Shift File Analysis:\n");
        match &header.version {
            GridVersion::Ascii(stamp) => {
                result.push_str(&format!("  Version: {}\n", stamp));
            }
            GridVersion::Legacy(number) => {
                result.push_str(&format!("  Version: {} (legacy numeric)\n", number));
            }
        }
        result.push_str(&format!(
            "  Coordinate system id: {}\n",
            header.coordinate_system_id
        ));
        result.push_str(&format!(
            "  Scale factors: xy={}, z={}\n",
            header.scale_xy, header.scale_z
        ));
        result.push_str(&format!("  Sub-grids: {}\n", file.grids().len()));

        for grid in file.grids() {
            let east = angle_utils::grid_seconds_to_longitude(grid.min_lon());
            let west = angle_utils::grid_seconds_to_longitude(grid.max_lon());
            let south = angle_utils::seconds_to_degrees(grid.min_lat());
            let north = angle_utils::seconds_to_degrees(grid.max_lat());

            result.push_str(&format!(
                "\nSub-grid '{}' (parent: {})\n",
                grid.name(),
                grid.parent_name().unwrap_or("none")
            ));
            result.push_str(&format!(
                "  Extent: lon [{:.4}, {:.4}], lat [{:.4}, {:.4}] degrees\n",
                west, east, south, north
            ));
            result.push_str(&format!(
                "  Lattice: {}x{} nodes, {} components per node\n",
                grid.col_count(),
                grid.row_count(),
                grid.dimension()
            ));
        }

        Ok(result)
    }
}
