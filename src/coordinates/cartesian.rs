//! # Cartesian Coordinate Module
//!
//! This module provides the Cartesian representation of a [`Coordinate`]:
//! a point given by its offsets `(x, y, z)` along three orthogonal axes.
//!
//! ## Internal Storage
//!
//! Components are stored as three `f64` values exactly as passed to the
//! factory. Any sign and magnitude is allowed; the only invariant is that all
//! three components are finite.
//!
//! ## Sharing
//!
//! Instances are only created through [`CartesianCoordinate::get`], which
//! returns the registry's shared `Arc` for the exact triple. The `with_*`
//! methods go through the same factory, so a coordinate never changes after
//! construction.
//!
//! ## Examples
//!
//! ```rust
//! use wahlzeit_coordinates::{CartesianCoordinate, Coordinate};
//!
//! let a = CartesianCoordinate::get(1.23, 2.34, 3.45).unwrap();
//! let b = Coordinate::cartesian(3.45, 2.34, 1.23).unwrap();
//!
//! let d = a.cartesian_distance(&b).unwrap();
//! assert!((d - 3.139554).abs() < 1e-5);
//!
//! // "Setters" return another shared instance
//! let moved = a.with_x(0.0).unwrap();
//! assert_eq!(moved.x(), 0.0);
//! assert_eq!(a.x(), 1.23);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use lazy_static::lazy_static;
use nalgebra::Vector3;
use serde::Serialize;

use super::cache::{CoordinateCache, CoordinateKey};
use super::spheric::SphericCoordinate;
use super::{assert_distance, components_match, ClassInvariant, Coordinate, CoordinateKind};
use crate::validation::{require_finite, require_not_null};
use crate::Result;

lazy_static! {
    /// Shared instances keyed by `(x, y, z)`
    static ref CARTESIAN_COORDINATES: CoordinateCache<CartesianCoordinate> =
        CoordinateCache::new("cartesian");
}

pub(crate) fn cache_len() -> usize {
    CARTESIAN_COORDINATES.len()
}

/// Three-dimensional Cartesian coordinate
///
/// # Equality
///
/// `==` compares component by component with an absolute tolerance of
/// [`COMPARISON_DELTA`](crate::constants::COMPARISON_DELTA). Two handles to
/// the same shared instance short-circuit to `true`.
#[derive(Debug, Serialize)]
pub struct CartesianCoordinate {
    /// X-component
    x: f64,
    /// Y-component
    y: f64,
    /// Z-component
    z: f64,
}

impl CartesianCoordinate {
    /// Returns the shared coordinate for `(x, y, z)`
    ///
    /// # Errors
    ///
    /// [`ContractViolation::NotFinite`](crate::ContractViolation::NotFinite)
    /// when any component is NaN or infinite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use wahlzeit_coordinates::CartesianCoordinate;
    ///
    /// let a = CartesianCoordinate::get(1.0, 2.0, 3.0).unwrap();
    /// let b = CartesianCoordinate::get(1.0, 2.0, 3.0).unwrap();
    /// assert!(Arc::ptr_eq(&a, &b));
    ///
    /// assert!(CartesianCoordinate::get(f64::NAN, 0.0, 0.0).is_err());
    /// ```
    pub fn get(x: f64, y: f64, z: f64) -> Result<Arc<Self>> {
        require_finite(x, "x")?;
        require_finite(y, "y")?;
        require_finite(z, "z")?;

        let shared = CARTESIAN_COORDINATES
            .get_or_create(CoordinateKey::new(x, y, z), || CartesianCoordinate { x, y, z });

        shared.assert_class_invariants()?;
        Ok(shared)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// Shared coordinate with `x` replaced
    pub fn with_x(&self, x: f64) -> Result<Arc<Self>> {
        self.assert_class_invariants()?;
        Self::get(require_finite(x, "x")?, self.y, self.z)
    }

    /// Shared coordinate with `y` replaced
    pub fn with_y(&self, y: f64) -> Result<Arc<Self>> {
        self.assert_class_invariants()?;
        Self::get(self.x, require_finite(y, "y")?, self.z)
    }

    /// Shared coordinate with `z` replaced
    pub fn with_z(&self, z: f64) -> Result<Arc<Self>> {
        self.assert_class_invariants()?;
        Self::get(self.x, self.y, require_finite(z, "z")?)
    }

    /// The registry key of this coordinate
    pub fn key(&self) -> CoordinateKey {
        CoordinateKey::new(self.x, self.y, self.z)
    }

    /// Euclidean distance from the origin
    ///
    /// `magnitude = sqrt(x² + y² + z²)`
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Converts to the spheric representation
    ///
    /// # Mathematical Conversion
    ///
    /// - `radius = sqrt(x² + y² + z²)`
    /// - `latitude = atan(sqrt(x² + y²) / z)`
    /// - `longitude = atan(y / x)`
    ///
    /// Single-argument `atan` does not tell quadrants apart, so this is only
    /// a faithful inverse of [`SphericCoordinate::to_cartesian_coordinate`]
    /// for points with positive `x`, `y` and `z`. Elsewhere the recovered
    /// angles may be negative and the spheric factory rejects them; the
    /// origin yields NaN angles and is rejected the same way.
    pub fn to_spheric_coordinate(&self) -> Result<Arc<SphericCoordinate>> {
        self.assert_class_invariants()?;

        let planar = (self.x * self.x + self.y * self.y).sqrt();
        let latitude = (planar / self.z).atan();
        let longitude = (self.y / self.x).atan();
        let radius = self.magnitude();

        SphericCoordinate::get(latitude, longitude, radius)
    }

    /// Euclidean distance to `other`, converting it to Cartesian form first
    ///
    /// # Errors
    ///
    /// [`ContractViolation::NullValue`](crate::ContractViolation::NullValue)
    /// when `other` is `None`.
    pub fn cartesian_distance<'a>(&self, other: impl Into<Option<&'a Coordinate>>) -> Result<f64> {
        let other = require_not_null(other.into(), "cartesian distance")?;
        let other = other.as_cartesian_coordinate()?;

        let distance = assert_distance(self.euclidean_distance(&other))?;
        self.assert_class_invariants()?;
        Ok(distance)
    }

    /// Spheric distance to `other`
    ///
    /// Converts `self` to spheric form and delegates, so both
    /// representations share one spheric distance computation.
    pub fn spheric_distance<'a>(&self, other: impl Into<Option<&'a Coordinate>>) -> Result<f64> {
        let other = require_not_null(other.into(), "spheric distance")?;

        let distance = assert_distance(self.to_spheric_coordinate()?.spheric_distance(other)?)?;
        self.assert_class_invariants()?;
        Ok(distance)
    }

    /// Natural distance of the Cartesian representation: [`cartesian_distance`](Self::cartesian_distance)
    pub fn distance<'a>(&self, other: impl Into<Option<&'a Coordinate>>) -> Result<f64> {
        self.cartesian_distance(other)
    }

    /// Compares with `other` converted to Cartesian form
    ///
    /// Returns `false`, never an error, for `None` or a coordinate that
    /// cannot be converted.
    pub fn is_equal<'a>(&self, other: impl Into<Option<&'a Coordinate>>) -> bool {
        match other.into().map(Coordinate::as_cartesian_coordinate) {
            Some(Ok(other)) => *self == *other,
            _ => false,
        }
    }

    /// Converts to nalgebra Vector3 for linear algebra operations
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Shared coordinate for the components of a nalgebra Vector3
    pub fn from_vector3(vec: Vector3<f64>) -> Result<Arc<Self>> {
        Self::get(vec.x, vec.y, vec.z)
    }

    /// sqrt(dx² + dy² + dz²)
    pub(crate) fn euclidean_distance(&self, other: &CartesianCoordinate) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl ClassInvariant for CartesianCoordinate {
    fn components(&self) -> [(&'static str, f64); 3] {
        [("x", self.x), ("y", self.y), ("z", self.z)]
    }

    fn assert_representation_invariants(&self) -> Result<()> {
        // Any finite triple is a valid Cartesian point
        Ok(())
    }
}

impl PartialEq for CartesianCoordinate {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || components_match(self.components(), other.components())
    }
}

// Consistent with the tolerance-based `==`: see `Coordinate`'s Hash.
impl Hash for CartesianCoordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        CoordinateKind::Cartesian.hash(state);
    }
}

impl fmt::Display for CartesianCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cartesian({}, {}, {})", self.x, self.y, self.z)
    }
}
