//! Coordinate reference system variants and canonical identity
//!
//! A CRS digest is a SHA-256 over the authority-independent structural
//! fields of the definition: datum sameness keys, ellipsoid axes,
//! normalized parameter names and values, and unit factors. Two CRS
//! objects with equal digests are interchangeable for caching operation
//! chains no matter how or from which catalog they were constructed.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::crs::authority::Authority;
use crate::crs::datum::{GeodeticDatum, VerticalDatum};
use crate::crs::errors::{CrsError, CrsResult};
use crate::crs::parameter::{ParameterName, ParameterValue};
use crate::crs::unit::UnitOfMeasure;
use crate::utils::string_utils;

/// Content-addressed identity of a CRS definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CrsDigest(pub [u8; 32]);

impl fmt::Display for CrsDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Whether a CRS addresses horizontal position or height
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    Horizontal,
    Vertical,
}

/// A geographic CRS: geodetic datum plus angular unit
#[derive(Debug, Clone)]
pub struct GeographicCrs {
    pub authority: Authority,
    pub name: String,
    pub datum: GeodeticDatum,
    pub angular_unit: UnitOfMeasure,
}

impl GeographicCrs {
    pub fn new(
        authority: Authority,
        name: &str,
        datum: GeodeticDatum,
        angular_unit: UnitOfMeasure,
    ) -> Self {
        GeographicCrs {
            authority,
            name: name.to_string(),
            datum,
            angular_unit,
        }
    }

    fn update_digest(&self, hasher: &mut Sha256) {
        hasher.update(b"geographic");
        self.datum.update_digest(hasher);
        self.angular_unit.update_digest(hasher);
    }
}

/// A projected CRS: base geographic CRS, projection method, parameters
/// and linear unit
#[derive(Debug, Clone)]
pub struct ProjectedCrs {
    pub authority: Authority,
    pub name: String,
    pub base: Arc<GeographicCrs>,
    /// Projection method name, compared in normalized form
    pub method: String,
    pub parameters: HashMap<ParameterName, ParameterValue>,
    pub linear_unit: UnitOfMeasure,
}

impl ProjectedCrs {
    pub fn new(
        authority: Authority,
        name: &str,
        base: Arc<GeographicCrs>,
        method: &str,
        parameters: HashMap<ParameterName, ParameterValue>,
        linear_unit: UnitOfMeasure,
    ) -> Self {
        ProjectedCrs {
            authority,
            name: name.to_string(),
            base,
            method: method.to_string(),
            parameters,
            linear_unit,
        }
    }

    /// Looks up a parameter value in base units, falling back to the
    /// name's default when the definition omits it
    pub fn parameter_or_default(&self, name: &ParameterName) -> CrsResult<f64> {
        if let Some(value) = self.parameters.get(name) {
            return Ok(value.value);
        }
        match name.default_value {
            Some(default) => Ok(name.unit.to_base(default)),
            None => Err(CrsError::MissingParameter(name.name.clone())),
        }
    }

    fn update_digest(&self, hasher: &mut Sha256) {
        hasher.update(b"projected");
        self.base.update_digest(hasher);
        hasher.update(string_utils::normalize_name(&self.method).as_bytes());

        // Parameter sets digest order-independently: sort by the
        // normalized name before hashing
        let mut entries: Vec<(&ParameterName, &ParameterValue)> = self.parameters.iter().collect();
        entries.sort_by_key(|(name, _)| name.normalized_name());
        for (name, value) in entries {
            name.update_digest(hasher);
            value.update_digest(hasher);
        }

        self.linear_unit.update_digest(hasher);
    }
}

/// A vertical CRS: vertical datum plus length unit
#[derive(Debug, Clone)]
pub struct VerticalCrs {
    pub authority: Authority,
    pub name: String,
    pub datum: VerticalDatum,
    pub unit: UnitOfMeasure,
}

impl VerticalCrs {
    pub fn new(authority: Authority, name: &str, datum: VerticalDatum, unit: UnitOfMeasure) -> Self {
        VerticalCrs {
            authority,
            name: name.to_string(),
            datum,
            unit,
        }
    }

    fn update_digest(&self, hasher: &mut Sha256) {
        hasher.update(b"vertical");
        self.datum.update_digest(hasher);
        self.unit.update_digest(hasher);
    }
}

/// A compound CRS: one horizontal and one vertical component
#[derive(Debug, Clone)]
pub struct CompoundCrs {
    pub authority: Authority,
    pub name: String,
    pub horizontal: CoordinateSystem,
    pub vertical: CoordinateSystem,
}

impl CompoundCrs {
    /// Creates a compound CRS, rejecting component pairs of the same
    /// axis kind
    pub fn new(
        authority: Authority,
        name: &str,
        horizontal: CoordinateSystem,
        vertical: CoordinateSystem,
    ) -> CrsResult<Self> {
        if horizontal.axis_kind() != AxisKind::Horizontal {
            return Err(CrsError::InvalidCompound(format!(
                "horizontal component of '{}' is not a horizontal CRS",
                name
            )));
        }
        if vertical.axis_kind() != AxisKind::Vertical {
            return Err(CrsError::InvalidCompound(format!(
                "vertical component of '{}' is not a vertical CRS",
                name
            )));
        }

        Ok(CompoundCrs {
            authority,
            name: name.to_string(),
            horizontal,
            vertical,
        })
    }

    fn update_digest(&self, hasher: &mut Sha256) {
        // Compound identity is the ordered pair: horizontal first
        hasher.update(b"compound");
        self.horizontal.update_digest(hasher);
        self.vertical.update_digest(hasher);
    }
}

/// Any CRS variant, cheaply cloneable and shareable
#[derive(Debug, Clone)]
pub enum CoordinateSystem {
    Geographic(Arc<GeographicCrs>),
    Projected(Arc<ProjectedCrs>),
    Vertical(Arc<VerticalCrs>),
    Compound(Arc<CompoundCrs>),
}

impl CoordinateSystem {
    /// The axis kind this CRS addresses; compound counts as horizontal
    /// because it carries a horizontal component
    pub fn axis_kind(&self) -> AxisKind {
        match self {
            CoordinateSystem::Geographic(_) | CoordinateSystem::Projected(_) => AxisKind::Horizontal,
            CoordinateSystem::Vertical(_) => AxisKind::Vertical,
            CoordinateSystem::Compound(_) => AxisKind::Horizontal,
        }
    }

    /// Display name of the definition
    pub fn name(&self) -> &str {
        match self {
            CoordinateSystem::Geographic(crs) => &crs.name,
            CoordinateSystem::Projected(crs) => &crs.name,
            CoordinateSystem::Vertical(crs) => &crs.name,
            CoordinateSystem::Compound(crs) => &crs.name,
        }
    }

    /// Catalog provenance of the definition
    pub fn authority(&self) -> &Authority {
        match self {
            CoordinateSystem::Geographic(crs) => &crs.authority,
            CoordinateSystem::Projected(crs) => &crs.authority,
            CoordinateSystem::Vertical(crs) => &crs.authority,
            CoordinateSystem::Compound(crs) => &crs.authority,
        }
    }

    fn update_digest(&self, hasher: &mut Sha256) {
        match self {
            CoordinateSystem::Geographic(crs) => crs.update_digest(hasher),
            CoordinateSystem::Projected(crs) => crs.update_digest(hasher),
            CoordinateSystem::Vertical(crs) => crs.update_digest(hasher),
            CoordinateSystem::Compound(crs) => crs.update_digest(hasher),
        }
    }

    /// Computes the canonical content digest of this definition
    pub fn digest(&self) -> CrsDigest {
        let mut hasher = Sha256::new();
        self.update_digest(&mut hasher);
        CrsDigest(hasher.finalize().into())
    }

    /// Structural equivalence through the canonical digest
    pub fn is_same(&self, other: &CoordinateSystem) -> bool {
        self.digest() == other.digest()
    }
}
