//! # Coordinate Module
//!
//! A [`Coordinate`] is a position in 3D space held in one of two
//! interchangeable representations:
//!
//! - [`CartesianCoordinate`]: `(x, y, z)` offsets along three orthogonal axes
//! - [`SphericCoordinate`]: `(latitude, longitude, radius)` with latitude the
//!   polar angle and longitude the azimuth, both in radians
//!
//! Both variants are immutable and shared: the only way to obtain one is
//! through its `get` factory, which hands out the registry's instance for
//! that exact value triple. "Setters" such as
//! [`CartesianCoordinate::with_x`] return another shared instance and never
//! touch the receiver.
//!
//! Operations that take a second coordinate accept anything convertible to
//! `Option<&Coordinate>`, so a caller holding an optional value can pass it
//! straight through. The distance family rejects `None` with
//! [`ContractViolation::NullValue`](crate::ContractViolation::NullValue);
//! `is_equal` answers `false` instead.
//!
//! ## Known conversion defects
//!
//! - Cartesian to spheric conversion recovers both angles with single-argument
//!   `atan`, so quadrants are not disambiguated. Points with negative `x`,
//!   `y` or `z` can produce negative angles, which the spheric factory then
//!   rejects.
//! - Spheric distance is not a great-circle distance: it is the Cartesian
//!   distance between both points after conversion.
//!
//! Both are kept as-is because fixing them changes observable values.
//!
//! ## Examples
//!
//! ```rust
//! use wahlzeit_coordinates::Coordinate;
//!
//! let a = Coordinate::cartesian(1.23, 2.34, 3.45).unwrap();
//! let b = Coordinate::cartesian(3.45, 2.34, 1.23).unwrap();
//! let d = a.distance(&b).unwrap();
//! assert!((d - 3.139554).abs() < 1e-5);
//!
//! assert!(!a.is_equal(None));
//! assert!(a.distance(None).is_err());
//! ```

pub mod cache;
pub mod cartesian;
pub mod spheric;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constants::COMPARISON_DELTA;
use crate::validation::{require_finite, require_non_negative};
use crate::{ContractViolation, Result};

pub use cartesian::CartesianCoordinate;
pub use spheric::SphericCoordinate;

/// The representation a [`Coordinate`] is held in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateKind {
    Cartesian,
    Spheric,
}

/// A shared coordinate in either representation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "RawCoordinate")]
pub enum Coordinate {
    Cartesian(Arc<CartesianCoordinate>),
    Spheric(Arc<SphericCoordinate>),
}

impl Coordinate {
    /// Shared Cartesian coordinate for `(x, y, z)`
    pub fn cartesian(x: f64, y: f64, z: f64) -> Result<Self> {
        CartesianCoordinate::get(x, y, z).map(Coordinate::Cartesian)
    }

    /// Shared spheric coordinate for `(latitude, longitude, radius)`
    pub fn spheric(latitude: f64, longitude: f64, radius: f64) -> Result<Self> {
        SphericCoordinate::get(latitude, longitude, radius).map(Coordinate::Spheric)
    }

    pub fn kind(&self) -> CoordinateKind {
        match self {
            Coordinate::Cartesian(_) => CoordinateKind::Cartesian,
            Coordinate::Spheric(_) => CoordinateKind::Spheric,
        }
    }

    /// Returns the point in Cartesian form
    ///
    /// A Cartesian coordinate returns its own shared instance; a spheric one
    /// is converted.
    pub fn as_cartesian_coordinate(&self) -> Result<Arc<CartesianCoordinate>> {
        match self {
            Coordinate::Cartesian(c) => Ok(Arc::clone(c)),
            Coordinate::Spheric(s) => s.to_cartesian_coordinate(),
        }
    }

    /// Returns the point in spheric form
    ///
    /// A spheric coordinate returns its own shared instance; a Cartesian one
    /// is converted, which fails for points the `atan`-based conversion maps
    /// outside `[0, 2π)`.
    pub fn as_spheric_coordinate(&self) -> Result<Arc<SphericCoordinate>> {
        match self {
            Coordinate::Cartesian(c) => c.to_spheric_coordinate(),
            Coordinate::Spheric(s) => Ok(Arc::clone(s)),
        }
    }

    /// Euclidean distance to `other`
    pub fn cartesian_distance<'a>(&self, other: impl Into<Option<&'a Coordinate>>) -> Result<f64> {
        match self {
            Coordinate::Cartesian(c) => c.cartesian_distance(other),
            Coordinate::Spheric(s) => s.cartesian_distance(other),
        }
    }

    /// Distance to `other` measured in the spheric frame
    pub fn spheric_distance<'a>(&self, other: impl Into<Option<&'a Coordinate>>) -> Result<f64> {
        match self {
            Coordinate::Cartesian(c) => c.spheric_distance(other),
            Coordinate::Spheric(s) => s.spheric_distance(other),
        }
    }

    /// Distance in the representation's natural frame
    pub fn distance<'a>(&self, other: impl Into<Option<&'a Coordinate>>) -> Result<f64> {
        match self {
            Coordinate::Cartesian(c) => c.distance(other),
            Coordinate::Spheric(s) => s.distance(other),
        }
    }

    /// Tolerance-based comparison in the receiver's frame; never fails
    pub fn is_equal<'a>(&self, other: impl Into<Option<&'a Coordinate>>) -> bool {
        match self {
            Coordinate::Cartesian(c) => c.is_equal(other),
            Coordinate::Spheric(s) => s.is_equal(other),
        }
    }

    /// True when both handles point at the same shared instance
    pub fn ptr_eq(a: &Coordinate, b: &Coordinate) -> bool {
        match (a, b) {
            (Coordinate::Cartesian(a), Coordinate::Cartesian(b)) => Arc::ptr_eq(a, b),
            (Coordinate::Spheric(a), Coordinate::Spheric(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Arc<CartesianCoordinate>> for Coordinate {
    fn from(c: Arc<CartesianCoordinate>) -> Self {
        Coordinate::Cartesian(c)
    }
}

impl From<Arc<SphericCoordinate>> for Coordinate {
    fn from(s: Arc<SphericCoordinate>) -> Self {
        Coordinate::Spheric(s)
    }
}

/// Representations never compare equal to each other; use
/// [`Coordinate::is_equal`] to compare across frames.
impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Coordinate::Cartesian(a), Coordinate::Cartesian(b)) => a == b,
            (Coordinate::Spheric(a), Coordinate::Spheric(b)) => a == b,
            _ => false,
        }
    }
}

// Tolerance equality is not transitive, so only the representation is hashed.
impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Cartesian(c) => write!(f, "{}", c),
            Coordinate::Spheric(s) => write!(f, "{}", s),
        }
    }
}

/// Wire form of [`Coordinate`]; converted through the factories
#[derive(Deserialize)]
#[serde(rename_all = "lowercase", deny_unknown_fields)]
enum RawCoordinate {
    Cartesian {
        x: f64,
        y: f64,
        z: f64,
    },
    Spheric {
        latitude: f64,
        longitude: f64,
        radius: f64,
    },
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = ContractViolation;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        match raw {
            RawCoordinate::Cartesian { x, y, z } => Coordinate::cartesian(x, y, z),
            RawCoordinate::Spheric {
                latitude,
                longitude,
                radius,
            } => Coordinate::spheric(latitude, longitude, radius),
        }
    }
}

/// Number of distinct shared instances per representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub cartesian: usize,
    pub spheric: usize,
}

/// Current size of both flyweight registries
pub fn cache_stats() -> CacheStats {
    CacheStats {
        cartesian: cartesian::cache_len(),
        spheric: spheric::cache_len(),
    }
}

/// Class invariant of a coordinate representation
///
/// The shared part (every component finite) is checked by the provided
/// [`assert_class_invariants`](ClassInvariant::assert_class_invariants),
/// which then calls the representation's own checks.
pub(crate) trait ClassInvariant {
    /// Components with their names, in declaration order
    fn components(&self) -> [(&'static str, f64); 3];

    fn assert_representation_invariants(&self) -> Result<()>;

    fn assert_class_invariants(&self) -> Result<()> {
        for (name, value) in self.components() {
            require_finite(value, name)?;
        }
        self.assert_representation_invariants()
    }
}

/// Postcondition shared by every distance operation
pub(crate) fn assert_distance(distance: f64) -> Result<f64> {
    require_non_negative(distance, "distance")
}

/// Per-component comparison with [`COMPARISON_DELTA`]
pub(crate) fn components_match(a: [(&'static str, f64); 3], b: [(&'static str, f64); 3]) -> bool {
    a.iter()
        .zip(b.iter())
        .all(|((_, lhs), (_, rhs))| (lhs - rhs).abs() < COMPARISON_DELTA)
}
