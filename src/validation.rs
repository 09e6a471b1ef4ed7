//! Contract-checking primitives
//!
//! Pure guards used at every factory and mutator boundary of the coordinate
//! types. Each guard returns the checked value on success so it can be used
//! inline with `?`.

use std::cmp::Ordering;

use crate::constants::TAU;
use crate::{ContractViolation, Result};

/// Fails with [`ContractViolation::NullValue`] when `value` is absent
pub fn require_not_null<T>(value: Option<T>, context: &'static str) -> Result<T> {
    value.ok_or_else(|| reject(ContractViolation::NullValue { context }))
}

/// Fails with [`ContractViolation::NotFinite`] when `value` is NaN or infinite
pub fn require_finite(value: f64, name: &'static str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(reject(ContractViolation::NotFinite { name, value }))
    }
}

/// Fails with [`ContractViolation::Negative`] when `value < 0`
///
/// NaN passes this guard; pair it with [`require_finite`].
pub fn require_non_negative(value: f64, name: &'static str) -> Result<f64> {
    if value < 0.0 {
        Err(reject(ContractViolation::Negative { name, value }))
    } else {
        Ok(value)
    }
}

/// Fails when `value` lies outside `[low, high)`
///
/// The bounds themselves are checked first: `low >= high` (or a NaN bound)
/// is reported as [`ContractViolation::InvalidRange`].
pub fn require_in_range(value: f64, low: f64, high: f64, name: &'static str) -> Result<f64> {
    if low.partial_cmp(&high) != Some(Ordering::Less) {
        return Err(reject(ContractViolation::InvalidRange { low, high }));
    }
    if value >= low && value < high {
        Ok(value)
    } else {
        Err(reject(ContractViolation::OutOfRange {
            name,
            value,
            low,
            high,
        }))
    }
}

/// Finite and within `[0, 2π)`
pub fn require_radian(value: f64, name: &'static str) -> Result<f64> {
    require_finite(value, name)?;
    require_in_range(value, 0.0, TAU, name)
}

fn reject(violation: ContractViolation) -> ContractViolation {
    log::debug!("contract violation: {}", violation);
    violation
}
