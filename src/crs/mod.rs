//! Coordinate reference system model
//!
//! Units, ellipsoids, datums, parameters, the CRS variants with their
//! canonical digest identity, and the catalog registry that resolves
//! authority codes into CRS objects.

pub mod authority;
pub mod datum;
pub mod ellipsoid;
pub mod errors;
pub mod parameter;
pub mod region;
pub mod registry;
pub mod system;
pub mod unit;

pub use authority::Authority;
pub use datum::{Datum, EngineeringDatum, GeodeticDatum, VerticalDatum};
pub use ellipsoid::Ellipsoid;
pub use errors::{CrsError, CrsResult};
pub use parameter::{ParameterName, ParameterValue};
pub use region::BoundingRegion;
pub use registry::{CatalogRegistry, CrsProvider};
pub use system::{CompoundCrs, CoordinateSystem, CrsDigest, GeographicCrs, ProjectedCrs, VerticalCrs};
pub use unit::{UnitOfMeasure, UnitType};
