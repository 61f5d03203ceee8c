//! Operation chain construction
//!
//! Builds the source-to-target operation chain from two resolved CRS
//! definitions: unit conversions, projection forward/inverse steps and
//! registered datum shifts, assembled in the order the math requires.
//! Built chains are cached by the pair of CRS digests, so two callers
//! holding structurally identical definitions share one chain.

use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::crs::errors::{CrsError, CrsResult};
use crate::crs::system::{CoordinateSystem, CrsDigest, GeographicCrs, ProjectedCrs, VerticalCrs};
use crate::crs::unit::{UnitOfMeasure, DEGREE, METRE, RADIAN};
use crate::operation::composite::{CompositeOperation, HorizontalShiftComposite};
use crate::operation::identity::IdentityOperation;
use crate::operation::projection_op::ProjectionOperation;
use crate::operation::unit_conversion::UnitConversionOperation;
use crate::operation::vertical_shift::VerticalShiftOperation;
use crate::operation::{CoordinatesOperation, HorizontalShiftOperation};
use crate::projection::projection_for;
use crate::utils::string_utils;

type ShiftKey = (String, String);

/// Builds and caches operation chains between CRS pairs
#[derive(Default)]
pub struct OperationBuilder {
    /// Registered horizontal shifts per (source datum, target datum),
    /// in registration order (tried first to last)
    shifts: HashMap<ShiftKey, Vec<Arc<dyn HorizontalShiftOperation>>>,
    /// Registered constant vertical offsets per datum pair, in metres
    vertical_offsets: HashMap<ShiftKey, f64>,
    /// Chains already built, keyed by canonical CRS identity
    cache: Mutex<HashMap<(CrsDigest, CrsDigest), Arc<dyn CoordinatesOperation>>>,
}

impl OperationBuilder {
    pub fn new() -> Self {
        OperationBuilder::default()
    }

    fn shift_key(source_datum: &str, target_datum: &str) -> ShiftKey {
        (
            string_utils::normalize_name(source_datum),
            string_utils::normalize_name(target_datum),
        )
    }

    /// Registers a horizontal shift for a datum pair
    ///
    /// Shifts registered for the same pair form a first-success chain
    /// in registration order.
    pub fn register_horizontal_shift(
        &mut self,
        source_datum: &str,
        target_datum: &str,
        shift: Arc<dyn HorizontalShiftOperation>,
    ) {
        self.shifts
            .entry(Self::shift_key(source_datum, target_datum))
            .or_default()
            .push(shift);
    }

    /// Registers a constant vertical offset for a datum pair, in metres
    pub fn register_vertical_offset(&mut self, source_datum: &str, target_datum: &str, offset: f64) {
        self.vertical_offsets
            .insert(Self::shift_key(source_datum, target_datum), offset);
    }

    /// Builds (or fetches from cache) the chain from source to target
    pub fn build(
        &self,
        source: &CoordinateSystem,
        target: &CoordinateSystem,
    ) -> CrsResult<Arc<dyn CoordinatesOperation>> {
        let key = (source.digest(), target.digest());
        if key.0 == key.1 {
            return Ok(Arc::new(IdentityOperation));
        }

        if let Some(found) = self.cache.lock().unwrap().get(&key) {
            return Ok(Arc::clone(found));
        }

        debug!(
            "Building operation chain: {} -> {}",
            source.name(),
            target.name()
        );
        let built = self.assemble(source, target)?;

        let mut cache = self.cache.lock().unwrap();
        Ok(Arc::clone(cache.entry(key).or_insert(built)))
    }

    fn assemble(
        &self,
        source: &CoordinateSystem,
        target: &CoordinateSystem,
    ) -> CrsResult<Arc<dyn CoordinatesOperation>> {
        match (source, target) {
            (CoordinateSystem::Geographic(a), CoordinateSystem::Geographic(b)) => {
                self.geographic_to_geographic(a, b)
            }
            (CoordinateSystem::Geographic(a), CoordinateSystem::Projected(p)) => {
                self.geographic_to_projected(a, p)
            }
            (CoordinateSystem::Projected(p), CoordinateSystem::Geographic(b)) => {
                self.projected_to_geographic(p, b)
            }
            (CoordinateSystem::Projected(p), CoordinateSystem::Projected(q)) => {
                self.projected_to_projected(p, q)
            }
            (CoordinateSystem::Vertical(a), CoordinateSystem::Vertical(b)) => {
                self.vertical_to_vertical(a, b)
            }
            (CoordinateSystem::Compound(a), CoordinateSystem::Compound(b)) => {
                let mut chain = CompositeOperation::new();
                chain.add_operation(self.build(&a.horizontal, &b.horizontal)?);
                chain.add_operation(self.build(&a.vertical, &b.vertical)?);
                Ok(Arc::new(chain))
            }
            // A compound source or target degrades to its horizontal
            // component; the height passes through untouched
            (CoordinateSystem::Compound(a), _) => self.build(&a.horizontal, target),
            (_, CoordinateSystem::Compound(b)) => self.build(source, &b.horizontal),
            _ => Err(CrsError::UnsupportedTransformation(
                source.name().to_string(),
                target.name().to_string(),
            )),
        }
    }

    /// The registered first-success shift chain for a datum pair, if any
    fn shift_chain(
        &self,
        source_datum: &str,
        target_datum: &str,
    ) -> Option<Arc<HorizontalShiftComposite>> {
        let registered = self.shifts.get(&Self::shift_key(source_datum, target_datum))?;
        let mut composite = HorizontalShiftComposite::new();
        for shift in registered {
            composite.add_operation(Arc::clone(shift));
        }
        Some(Arc::new(composite))
    }

    fn add_unit_step(chain: &mut CompositeOperation, from: &UnitOfMeasure, to: &UnitOfMeasure) {
        if !from.is_same(to) {
            chain.add_operation(Arc::new(UnitConversionOperation::between(from, to)));
        }
    }

    fn geographic_to_geographic(
        &self,
        source: &Arc<GeographicCrs>,
        target: &Arc<GeographicCrs>,
    ) -> CrsResult<Arc<dyn CoordinatesOperation>> {
        let mut chain = CompositeOperation::new();

        if source.datum.is_same(&target.datum) {
            Self::add_unit_step(&mut chain, &source.angular_unit, &target.angular_unit);
            return Ok(Arc::new(chain));
        }

        // Shifts work in degrees; bracket the shift with conversions
        Self::add_unit_step(&mut chain, &source.angular_unit, &DEGREE);
        if let Some(shifts) = self.shift_chain(&source.datum.name, &target.datum.name) {
            chain.add_operation(shifts);
        }
        Self::add_unit_step(&mut chain, &DEGREE, &target.angular_unit);
        Ok(Arc::new(chain))
    }

    fn geographic_to_projected(
        &self,
        source: &Arc<GeographicCrs>,
        target: &Arc<ProjectedCrs>,
    ) -> CrsResult<Arc<dyn CoordinatesOperation>> {
        let projection = projection_for(target)?;
        let mut chain = CompositeOperation::new();

        if source.datum.is_same(&target.base.datum) {
            Self::add_unit_step(&mut chain, &source.angular_unit, &RADIAN);
        } else {
            // Datum shift happens at the geographic stage, before the
            // projection is applied
            Self::add_unit_step(&mut chain, &source.angular_unit, &DEGREE);
            if let Some(shifts) = self.shift_chain(&source.datum.name, &target.base.datum.name) {
                chain.add_operation(shifts);
            }
            Self::add_unit_step(&mut chain, &DEGREE, &RADIAN);
        }

        chain.add_operation(Arc::new(ProjectionOperation::forward(projection)));
        Self::add_unit_step(&mut chain, &METRE, &target.linear_unit);
        Ok(Arc::new(chain))
    }

    fn projected_to_geographic(
        &self,
        source: &Arc<ProjectedCrs>,
        target: &Arc<GeographicCrs>,
    ) -> CrsResult<Arc<dyn CoordinatesOperation>> {
        let projection = projection_for(source)?;
        let mut chain = CompositeOperation::new();

        Self::add_unit_step(&mut chain, &source.linear_unit, &METRE);
        chain.add_operation(Arc::new(ProjectionOperation::inverse(projection)));

        if source.base.datum.is_same(&target.datum) {
            Self::add_unit_step(&mut chain, &RADIAN, &target.angular_unit);
        } else {
            Self::add_unit_step(&mut chain, &RADIAN, &DEGREE);
            if let Some(shifts) = self.shift_chain(&source.base.datum.name, &target.datum.name) {
                chain.add_operation(shifts);
            }
            Self::add_unit_step(&mut chain, &DEGREE, &target.angular_unit);
        }
        Ok(Arc::new(chain))
    }

    fn projected_to_projected(
        &self,
        source: &Arc<ProjectedCrs>,
        target: &Arc<ProjectedCrs>,
    ) -> CrsResult<Arc<dyn CoordinatesOperation>> {
        // Route through the geographic stage of each side
        let mut chain = CompositeOperation::new();
        chain.add_operation(self.projected_to_geographic(
            source,
            &Arc::clone(&source.base),
        )?);
        chain.add_operation(self.geographic_to_projected(&source.base, target)?);
        Ok(Arc::new(chain))
    }

    fn vertical_to_vertical(
        &self,
        source: &Arc<VerticalCrs>,
        target: &Arc<VerticalCrs>,
    ) -> CrsResult<Arc<dyn CoordinatesOperation>> {
        let mut chain = CompositeOperation::new();

        // Work in metres, shift, convert out
        let to_metres = source.unit.factor_to(&METRE);
        if (to_metres - 1.0).abs() > 1e-15 {
            chain.add_operation(Arc::new(UnitConversionOperation::new(1.0, to_metres)));
        }

        if !source.datum.is_same(&target.datum) {
            let key = Self::shift_key(&source.datum.name, &target.datum.name);
            if let Some(&offset) = self.vertical_offsets.get(&key) {
                chain.add_operation(Arc::new(VerticalShiftOperation::new(offset)));
            }
            // No registered offset is a pass-through, mirroring the
            // horizontal non-coverage contract
        }

        let from_metres = METRE.factor_to(&target.unit);
        if (from_metres - 1.0).abs() > 1e-15 {
            chain.add_operation(Arc::new(UnitConversionOperation::new(1.0, from_metres)));
        }
        Ok(Arc::new(chain))
    }
}
