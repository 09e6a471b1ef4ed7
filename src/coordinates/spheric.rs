//! # Spheric Coordinate Module
//!
//! This module provides the spheric representation of a [`Coordinate`]:
//! a point given by its polar angle (latitude), azimuth angle (longitude)
//! and distance from the origin (radius).
//!
//! ## Value Ranges
//!
//! - `latitude`: radians in `[0, 2π)`
//! - `longitude`: radians in `[0, 2π)`
//! - `radius`: `>= 0`
//!
//! All three are finite. The sphere is a pure mathematical one; no geodetic
//! (ellipsoidal) correction is applied anywhere.
//!
//! ## Examples
//!
//! ```rust
//! use wahlzeit_coordinates::SphericCoordinate;
//!
//! let s = SphericCoordinate::get(1.0, 2.0, 3.0).unwrap();
//! let c = s.to_cartesian_coordinate().unwrap();
//! assert!((c.z() - 3.0 * 1.0f64.cos()).abs() < 1e-12);
//!
//! assert!(SphericCoordinate::get(1.0, 1.0, -1.0).is_err());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::Serialize;

use super::cache::{CoordinateCache, CoordinateKey};
use super::cartesian::CartesianCoordinate;
use super::{assert_distance, components_match, ClassInvariant, Coordinate, CoordinateKind};
use crate::validation::{require_finite, require_non_negative, require_not_null, require_radian};
use crate::Result;

lazy_static! {
    /// Shared instances keyed by `(latitude, longitude, radius)`
    static ref SPHERIC_COORDINATES: CoordinateCache<SphericCoordinate> =
        CoordinateCache::new("spheric");
}

pub(crate) fn cache_len() -> usize {
    SPHERIC_COORDINATES.len()
}

/// Coordinate defined by polar angle, azimuth angle and radius
#[derive(Debug, Serialize)]
pub struct SphericCoordinate {
    /// Polar angle in radians
    latitude: f64,
    /// Azimuth angle in radians
    longitude: f64,
    radius: f64,
}

fn require_radius(radius: f64) -> Result<f64> {
    require_finite(radius, "radius")?;
    require_non_negative(radius, "radius")
}

impl SphericCoordinate {
    /// Returns the shared coordinate for `(latitude, longitude, radius)`
    ///
    /// # Errors
    ///
    /// A [`ContractViolation`](crate::ContractViolation) when either angle is
    /// not finite or outside `[0, 2π)`, or when the radius is not finite or
    /// negative.
    pub fn get(latitude: f64, longitude: f64, radius: f64) -> Result<Arc<Self>> {
        require_radian(latitude, "latitude")?;
        require_radian(longitude, "longitude")?;
        require_radius(radius)?;

        let shared = SPHERIC_COORDINATES.get_or_create(
            CoordinateKey::new(latitude, longitude, radius),
            || SphericCoordinate {
                latitude,
                longitude,
                radius,
            },
        );

        shared.assert_class_invariants()?;
        Ok(shared)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Shared coordinate with `latitude` replaced
    pub fn with_latitude(&self, latitude: f64) -> Result<Arc<Self>> {
        self.assert_class_invariants()?;
        Self::get(require_radian(latitude, "latitude")?, self.longitude, self.radius)
    }

    /// Shared coordinate with `longitude` replaced
    pub fn with_longitude(&self, longitude: f64) -> Result<Arc<Self>> {
        self.assert_class_invariants()?;
        Self::get(self.latitude, require_radian(longitude, "longitude")?, self.radius)
    }

    /// Shared coordinate with `radius` replaced
    pub fn with_radius(&self, radius: f64) -> Result<Arc<Self>> {
        self.assert_class_invariants()?;
        Self::get(self.latitude, self.longitude, require_radius(radius)?)
    }

    pub fn key(&self) -> CoordinateKey {
        CoordinateKey::new(self.latitude, self.longitude, self.radius)
    }

    /// Converts to the Cartesian representation
    ///
    /// # Mathematical Conversion
    ///
    /// - `x = radius * sin(latitude) * cos(longitude)`
    /// - `y = radius * sin(latitude) * sin(longitude)`
    /// - `z = radius * cos(latitude)`
    pub fn to_cartesian_coordinate(&self) -> Result<Arc<CartesianCoordinate>> {
        self.assert_class_invariants()?;

        let sin_lat = self.latitude.sin();
        let x = self.radius * sin_lat * self.longitude.cos();
        let y = self.radius * sin_lat * self.longitude.sin();
        let z = self.radius * self.latitude.cos();

        CartesianCoordinate::get(x, y, z)
    }

    /// Euclidean distance to `other`, computed in Cartesian form
    pub fn cartesian_distance<'a>(&self, other: impl Into<Option<&'a Coordinate>>) -> Result<f64> {
        let other = require_not_null(other.into(), "cartesian distance")?;

        let distance = assert_distance(self.to_cartesian_coordinate()?.cartesian_distance(other)?)?;
        self.assert_class_invariants()?;
        Ok(distance)
    }

    /// Distance to `other` in the spheric frame
    ///
    /// This is not a great-circle distance: both points are converted to
    /// Cartesian form and their straight-line distance is returned.
    pub fn spheric_distance<'a>(&self, other: impl Into<Option<&'a Coordinate>>) -> Result<f64> {
        let other = require_not_null(other.into(), "spheric distance")?;

        // TODO: replace with the angular distance on the sphere once callers
        // can cope with the changed values
        let here = self.to_cartesian_coordinate()?;
        let there = other.as_cartesian_coordinate()?;

        let distance = assert_distance(here.euclidean_distance(&there))?;
        self.assert_class_invariants()?;
        Ok(distance)
    }

    /// Natural distance of the spheric representation: [`spheric_distance`](Self::spheric_distance)
    pub fn distance<'a>(&self, other: impl Into<Option<&'a Coordinate>>) -> Result<f64> {
        self.spheric_distance(other)
    }

    /// Compares with `other` converted to spheric form
    ///
    /// Returns `false`, never an error, for `None` or a coordinate whose
    /// conversion is rejected.
    pub fn is_equal<'a>(&self, other: impl Into<Option<&'a Coordinate>>) -> bool {
        match other.into().map(Coordinate::as_spheric_coordinate) {
            Some(Ok(other)) => *self == *other,
            _ => false,
        }
    }
}

impl ClassInvariant for SphericCoordinate {
    fn components(&self) -> [(&'static str, f64); 3] {
        [
            ("latitude", self.latitude),
            ("longitude", self.longitude),
            ("radius", self.radius),
        ]
    }

    fn assert_representation_invariants(&self) -> Result<()> {
        require_radian(self.latitude, "latitude")?;
        require_radian(self.longitude, "longitude")?;
        require_non_negative(self.radius, "radius")?;
        Ok(())
    }
}

impl PartialEq for SphericCoordinate {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || components_match(self.components(), other.components())
    }
}

impl Hash for SphericCoordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        CoordinateKind::Spheric.hash(state);
    }
}

impl fmt::Display for SphericCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Spheric(latitude {}, longitude {}, radius {})",
            self.latitude, self.longitude, self.radius
        )
    }
}
