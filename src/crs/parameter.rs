//! Typed named parameters for projected CRS definitions
//!
//! Parameter names compare and hash by a normalized form of their name
//! so that "False Easting", "false easting" and "FALSE  EASTING" are
//! the same map key regardless of how a catalog spelled them.

use lazy_static::lazy_static;
use sha2::{Digest, Sha256};
use std::hash::{Hash, Hasher};

use crate::crs::unit::{UnitOfMeasure, DEGREE, METRE, UNITY};
use crate::utils::string_utils;

/// A named, unit-carrying parameter definition
#[derive(Debug, Clone)]
pub struct ParameterName {
    /// Catalog identifier (EPSG parameter code where applicable)
    pub id: u32,
    /// Display name
    pub name: String,
    /// Unit the parameter's values are expressed in by default
    pub unit: UnitOfMeasure,
    /// Default value in `unit`, used when a definition omits the parameter
    pub default_value: Option<f64>,
}

impl ParameterName {
    pub fn new(id: u32, name: &str, unit: UnitOfMeasure) -> Self {
        ParameterName {
            id,
            name: name.to_string(),
            unit,
            default_value: None,
        }
    }

    pub fn with_default(mut self, value: f64) -> Self {
        self.default_value = Some(value);
        self
    }

    /// The normalized comparison key for this name
    pub fn normalized_name(&self) -> String {
        string_utils::normalize_name(&self.name)
    }

    /// Feeds the lower-cased name into a running digest
    ///
    /// Always lower-cases independent of locale, so digests are stable
    /// across environments.
    pub fn update_digest(&self, hasher: &mut Sha256) {
        hasher.update(self.normalized_name().as_bytes());
    }
}

impl PartialEq for ParameterName {
    fn eq(&self, other: &Self) -> bool {
        self.normalized_name() == other.normalized_name()
    }
}

impl Eq for ParameterName {}

impl Hash for ParameterName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized_name().hash(state);
    }
}

/// A parameter value, kept both as written and normalized to base units
#[derive(Debug, Clone)]
pub struct ParameterValue {
    /// Value converted to the base unit of the parameter's type
    pub value: f64,
    /// Value exactly as the catalog stated it
    pub original_value: f64,
    /// Unit the original value was expressed in
    pub unit: UnitOfMeasure,
}

impl ParameterValue {
    /// Creates a value from a catalog figure in the given unit
    pub fn new(original_value: f64, unit: UnitOfMeasure) -> Self {
        ParameterValue {
            value: unit.to_base(original_value),
            original_value,
            unit,
        }
    }

    /// Compares normalized values, not literal representation
    ///
    /// A central meridian of 9 degrees and one of 10 grad are the same
    /// parameter value.
    pub fn is_same(&self, other: &ParameterValue) -> bool {
        let scale = self.value.abs().max(1.0);
        (self.value - other.value).abs() <= 1e-12 * scale
    }

    /// Feeds the normalized value into a running digest
    pub fn update_digest(&self, hasher: &mut Sha256) {
        // +0.0 and -0.0 must digest identically
        let canonical = if self.value == 0.0 { 0.0 } else { self.value };
        hasher.update(canonical.to_bits().to_be_bytes());
    }
}

lazy_static! {
    /// Latitude of natural origin (EPSG:8801)
    pub static ref LATITUDE_OF_ORIGIN: ParameterName =
        ParameterName::new(8801, "Latitude of natural origin", DEGREE.clone()).with_default(0.0);

    /// Longitude of natural origin / central meridian (EPSG:8802)
    pub static ref CENTRAL_MERIDIAN: ParameterName =
        ParameterName::new(8802, "Longitude of natural origin", DEGREE.clone()).with_default(0.0);

    /// Scale factor at natural origin (EPSG:8805)
    pub static ref SCALE_FACTOR: ParameterName =
        ParameterName::new(8805, "Scale factor at natural origin", UNITY.clone()).with_default(1.0);

    /// False easting (EPSG:8806)
    pub static ref FALSE_EASTING: ParameterName =
        ParameterName::new(8806, "False easting", METRE.clone()).with_default(0.0);

    /// False northing (EPSG:8807)
    pub static ref FALSE_NORTHING: ParameterName =
        ParameterName::new(8807, "False northing", METRE.clone()).with_default(0.0);
}

/// Looks up a well-known parameter name by catalog key
pub fn builtin_parameter(key: &str) -> Option<&'static ParameterName> {
    match string_utils::normalize_name(key).as_str() {
        "central meridian" | "longitude of natural origin" => Some(&CENTRAL_MERIDIAN),
        "latitude of origin" | "latitude of natural origin" => Some(&LATITUDE_OF_ORIGIN),
        "scale factor" | "scale factor at natural origin" => Some(&SCALE_FACTOR),
        "false easting" => Some(&FALSE_EASTING),
        "false northing" => Some(&FALSE_NORTHING),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_names_compare_by_normalized_form() {
        let a = ParameterName::new(8806, "False Easting", METRE.clone());
        let b = ParameterName::new(0, "  false   easting ", METRE.clone());
        assert_eq!(a, b);

        let mut map = HashMap::new();
        map.insert(a, ParameterValue::new(500000.0, METRE.clone()));
        assert!(map.contains_key(&b));
    }

    #[test]
    fn test_digest_contribution_is_case_insensitive() {
        let a = ParameterName::new(8806, "False Easting", METRE.clone());
        let b = ParameterName::new(8806, "FALSE EASTING", METRE.clone());

        let mut ha = Sha256::new();
        a.update_digest(&mut ha);
        let mut hb = Sha256::new();
        b.update_digest(&mut hb);
        assert_eq!(ha.finalize(), hb.finalize());
    }

    #[test]
    fn test_values_compare_after_unit_conversion() {
        let degrees = ParameterValue::new(9.0, DEGREE.clone());
        let grads = ParameterValue::new(10.0, crate::crs::unit::GRAD.clone());
        assert!(degrees.is_same(&grads));
    }

    #[test]
    fn test_negative_zero_digests_like_zero() {
        let pos = ParameterValue::new(0.0, METRE.clone());
        let neg = ParameterValue::new(-0.0, METRE.clone());

        let mut hp = Sha256::new();
        pos.update_digest(&mut hp);
        let mut hn = Sha256::new();
        neg.update_digest(&mut hn);
        assert_eq!(hp.finalize(), hn.finalize());
    }
}
