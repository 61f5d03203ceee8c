pub mod api;
pub mod commands;
pub mod crs;
pub mod grid;
pub mod io;
pub mod operation;
pub mod projection;
pub mod utils;

pub use crate::api::CrsKit;

pub use crs::errors::{CrsError, CrsResult};
pub use crs::registry::{CatalogRegistry, CrsProvider};
pub use crs::system::{CoordinateSystem, CrsDigest};
pub use grid::{GridShiftFile, GsbGridShiftOperation};
pub use operation::builder::OperationBuilder;
pub use operation::point::OperationPoint;
pub use operation::{CoordinatesOperation, HorizontalShiftOperation};
