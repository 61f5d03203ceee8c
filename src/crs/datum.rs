//! Geodetic, vertical and engineering datums
//!
//! A datum positions a reference surface relative to the earth. The
//! `is_same` checks here are structural: they ignore authority
//! bookkeeping so that the same datum loaded from two catalogs still
//! compares equal. Only datums of the same variant can be the same.

use sha2::{Digest, Sha256};

use crate::crs::authority::Authority;
use crate::crs::ellipsoid::Ellipsoid;
use crate::crs::region::BoundingRegion;
use crate::utils::string_utils;

/// A datum anchored to a reference ellipsoid
#[derive(Debug, Clone)]
pub struct GeodeticDatum {
    pub authority: Authority,
    pub name: String,
    /// Area of use in degrees
    pub area: BoundingRegion,
    pub deprecated: bool,
    pub ellipsoid: Ellipsoid,
}

impl GeodeticDatum {
    pub fn new(authority: Authority, name: &str, area: BoundingRegion, ellipsoid: Ellipsoid) -> Self {
        GeodeticDatum {
            authority,
            name: name.to_string(),
            area,
            deprecated: false,
            ellipsoid,
        }
    }

    /// Structural equivalence ignoring authority bookkeeping
    pub fn is_same(&self, other: &GeodeticDatum) -> bool {
        string_utils::normalize_name(&self.name) == string_utils::normalize_name(&other.name)
            && self.ellipsoid.is_same(&other.ellipsoid)
    }

    pub fn update_digest(&self, hasher: &mut Sha256) {
        hasher.update(b"geodetic-datum");
        hasher.update(string_utils::normalize_name(&self.name).as_bytes());
        self.ellipsoid.update_digest(hasher);
    }
}

/// A datum for gravity-related heights
#[derive(Debug, Clone)]
pub struct VerticalDatum {
    pub authority: Authority,
    pub name: String,
    pub area: BoundingRegion,
    pub deprecated: bool,
}

impl VerticalDatum {
    pub fn new(authority: Authority, name: &str, area: BoundingRegion) -> Self {
        VerticalDatum {
            authority,
            name: name.to_string(),
            area,
            deprecated: false,
        }
    }

    pub fn is_same(&self, other: &VerticalDatum) -> bool {
        string_utils::normalize_name(&self.name) == string_utils::normalize_name(&other.name)
    }

    pub fn update_digest(&self, hasher: &mut Sha256) {
        hasher.update(b"vertical-datum");
        hasher.update(string_utils::normalize_name(&self.name).as_bytes());
    }
}

/// A datum for local engineering coordinates with no earth anchoring
#[derive(Debug, Clone)]
pub struct EngineeringDatum {
    pub authority: Authority,
    pub name: String,
    pub area: BoundingRegion,
    pub deprecated: bool,
}

impl EngineeringDatum {
    pub fn new(authority: Authority, name: &str, area: BoundingRegion) -> Self {
        EngineeringDatum {
            authority,
            name: name.to_string(),
            area,
            deprecated: false,
        }
    }

    pub fn is_same(&self, other: &EngineeringDatum) -> bool {
        string_utils::normalize_name(&self.name) == string_utils::normalize_name(&other.name)
    }
}

/// Any datum variant
#[derive(Debug, Clone)]
pub enum Datum {
    Geodetic(GeodeticDatum),
    Vertical(VerticalDatum),
    Engineering(EngineeringDatum),
}

impl Datum {
    /// Structural equivalence; mismatched variants are never the same
    pub fn is_same(&self, other: &Datum) -> bool {
        match (self, other) {
            (Datum::Geodetic(a), Datum::Geodetic(b)) => a.is_same(b),
            (Datum::Vertical(a), Datum::Vertical(b)) => a.is_same(b),
            (Datum::Engineering(a), Datum::Engineering(b)) => a.is_same(b),
            _ => false,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Datum::Geodetic(d) => &d.name,
            Datum::Vertical(d) => &d.name,
            Datum::Engineering(d) => &d.name,
        }
    }
}
