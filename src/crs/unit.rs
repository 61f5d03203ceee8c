//! Units of measure and their conversion semantics
//!
//! Every unit converts to a base unit of its type (metre for lengths,
//! radian for angles, unity for scales, second for time) through a
//! positive conversion factor. Angular units additionally have a
//! "normal" form in decimal degrees used when feeding values to grid
//! lookup and catalog comparison.

use lazy_static::lazy_static;
use sha2::{Digest, Sha256};
use std::f64::consts::PI;

use crate::crs::authority::Authority;
use crate::crs::errors::{CrsError, CrsResult};

/// The measurement kind a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitType {
    /// Dimensionless scale (base: unity)
    Scale,
    /// Length (base: metre)
    Length,
    /// Angle (base: radian)
    Angle,
    /// Time (base: second)
    Time,
}

/// A unit of measure with its conversion factor to the base unit
#[derive(Debug, Clone)]
pub struct UnitOfMeasure {
    /// Display name of the unit
    pub name: String,
    /// Measurement kind
    pub unit_type: UnitType,
    /// Factor from this unit to the base unit of its type
    pub conversion_factor: f64,
    /// Catalog provenance
    pub authority: Authority,
    /// Whether the catalog has deprecated this unit
    pub deprecated: bool,
    /// Fixed ratio to the normal form, overriding the route through
    /// the base unit (grad -> degrees is exactly 0.9, not pi-derived)
    normal_ratio: Option<f64>,
}

impl UnitOfMeasure {
    /// Creates a unit of measure
    ///
    /// # Arguments
    /// * `name` - Display name
    /// * `unit_type` - Measurement kind
    /// * `conversion_factor` - Factor to the base unit, must be positive and finite
    /// * `authority` - Catalog provenance
    pub fn new(
        name: &str,
        unit_type: UnitType,
        conversion_factor: f64,
        authority: Authority,
    ) -> CrsResult<Self> {
        if !conversion_factor.is_finite() || conversion_factor <= 0.0 {
            return Err(CrsError::InvalidUnit(format!(
                "conversion factor for '{}' must be positive and finite, got {}",
                name, conversion_factor
            )));
        }

        Ok(UnitOfMeasure {
            name: name.to_string(),
            unit_type,
            conversion_factor,
            authority,
            deprecated: false,
            normal_ratio: None,
        })
    }

    /// Overrides the normal-form conversion with a fixed ratio
    pub fn with_normal_ratio(mut self, ratio: f64) -> Self {
        self.normal_ratio = Some(ratio);
        self
    }

    /// Marks the unit as deprecated in its catalog
    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Converts a value in this unit to the base unit of its type
    pub fn to_base(&self, value: f64) -> f64 {
        value * self.conversion_factor
    }

    /// Converts a base-unit value back to this unit
    ///
    /// Inverse of `to_base` within floating-point tolerance.
    pub fn from_base(&self, value: f64) -> f64 {
        value / self.conversion_factor
    }

    /// Converts a value in this unit to its normal form
    ///
    /// For angular units the normal form is decimal degrees; a fixed
    /// `normal_ratio` takes precedence so that exact catalog ratios
    /// survive (grad -> degrees is 0.9 exactly). All other types
    /// normalize to their base unit.
    pub fn to_normal(&self, value: f64) -> f64 {
        if let Some(ratio) = self.normal_ratio {
            return value * ratio;
        }
        match self.unit_type {
            UnitType::Angle => self.to_base(value).to_degrees(),
            _ => self.to_base(value),
        }
    }

    /// Factor converting values in this unit directly to another unit
    /// of the same type
    pub fn factor_to(&self, other: &UnitOfMeasure) -> f64 {
        self.conversion_factor / other.conversion_factor
    }

    /// Structural equivalence ignoring authority bookkeeping
    pub fn is_same(&self, other: &UnitOfMeasure) -> bool {
        self.unit_type == other.unit_type
            && (self.conversion_factor - other.conversion_factor).abs()
                <= 1e-12 * self.conversion_factor.abs()
    }

    /// Feeds the unit's structural fields into a running digest
    pub fn update_digest(&self, hasher: &mut Sha256) {
        hasher.update([self.unit_type as u8]);
        hasher.update(self.conversion_factor.to_bits().to_be_bytes());
    }
}

lazy_static! {
    /// Metre, the base length unit
    pub static ref METRE: UnitOfMeasure =
        UnitOfMeasure::new("metre", UnitType::Length, 1.0, Authority::epsg(9001))
            .expect("builtin unit");

    /// US survey foot
    pub static ref US_SURVEY_FOOT: UnitOfMeasure = UnitOfMeasure::new(
        "US survey foot",
        UnitType::Length,
        12.0 / 39.37,
        Authority::epsg(9003)
    )
    .expect("builtin unit");

    /// Radian, the base angular unit
    pub static ref RADIAN: UnitOfMeasure =
        UnitOfMeasure::new("radian", UnitType::Angle, 1.0, Authority::epsg(9101))
            .expect("builtin unit");

    /// Decimal degree
    pub static ref DEGREE: UnitOfMeasure =
        UnitOfMeasure::new("degree", UnitType::Angle, PI / 180.0, Authority::epsg(9102))
            .expect("builtin unit");

    /// Arc-second, the native unit of grid shift files
    pub static ref ARC_SECOND: UnitOfMeasure =
        UnitOfMeasure::new("arc-second", UnitType::Angle, PI / 648000.0, Authority::epsg(9104))
            .expect("builtin unit");

    /// Gradian; normal form is a fixed 0.9 ratio to degrees
    pub static ref GRAD: UnitOfMeasure =
        UnitOfMeasure::new("grad", UnitType::Angle, PI / 200.0, Authority::epsg(9105))
            .expect("builtin unit")
            .with_normal_ratio(0.9);

    /// Unity, the base scale unit
    pub static ref UNITY: UnitOfMeasure =
        UnitOfMeasure::new("unity", UnitType::Scale, 1.0, Authority::epsg(9201))
            .expect("builtin unit");

    /// Parts per million
    pub static ref PARTS_PER_MILLION: UnitOfMeasure =
        UnitOfMeasure::new("parts per million", UnitType::Scale, 1e-6, Authority::epsg(9202))
            .expect("builtin unit");

    /// Second, the base time unit
    pub static ref SECOND: UnitOfMeasure =
        UnitOfMeasure::new("second", UnitType::Time, 1.0, Authority::epsg(1040))
            .expect("builtin unit");
}

/// Looks up a builtin unit by catalog name
pub fn builtin_unit(name: &str) -> Option<&'static UnitOfMeasure> {
    match name {
        "metre" | "meter" => Some(&METRE),
        "US survey foot" | "foot_us" => Some(&US_SURVEY_FOOT),
        "radian" => Some(&RADIAN),
        "degree" => Some(&DEGREE),
        "arc-second" | "arcsecond" => Some(&ARC_SECOND),
        "grad" => Some(&GRAD),
        "unity" => Some(&UNITY),
        "parts per million" | "ppm" => Some(&PARTS_PER_MILLION),
        "second" => Some(&SECOND),
        _ => None,
    }
}
