//! Wahlzeit coordinates: shared, immutable 3D coordinate value objects
//!
//! This crate provides the geometric core of the Wahlzeit photo model: a
//! position in 3D space that can be expressed either in Cartesian `(x, y, z)`
//! or in spheric `(latitude, longitude, radius)` form, with distance
//! computation, tolerance-based equality and conversion between the two.
//!
//! Coordinates are only ever obtained through factories backed by a
//! process-wide flyweight registry, so equal value triples share one
//! immutable instance:
//!
//! ```rust
//! use std::sync::Arc;
//! use wahlzeit_coordinates::CartesianCoordinate;
//!
//! let a = CartesianCoordinate::get(1.23, 2.34, 3.45).unwrap();
//! let b = CartesianCoordinate::get(1.23, 2.34, 3.45).unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//! ```

use thiserror::Error;

pub mod constants;
pub mod coordinates;
pub mod location;
pub mod validation;

// Re-export commonly used types
pub use coordinates::cache::CoordinateKey;
pub use coordinates::cartesian::CartesianCoordinate;
pub use coordinates::spheric::SphericCoordinate;
pub use coordinates::{cache_stats, CacheStats, Coordinate, CoordinateKind};
pub use location::Location;

/// Failure of a precondition, postcondition or class invariant check
///
/// A violation always signals a programming error on the caller's side
/// (invalid geometric input). It is never retried or swallowed internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractViolation {
    #[error("null value was given where a value is required: {context}")]
    NullValue { context: &'static str },

    #[error("{name} value {value} is either NaN or infinite")]
    NotFinite { name: &'static str, value: f64 },

    #[error("{name} value {value} is smaller than zero")]
    Negative { name: &'static str, value: f64 },

    #[error("{name} value {value} is not within range [{low}; {high}[")]
    OutOfRange {
        name: &'static str,
        value: f64,
        low: f64,
        high: f64,
    },

    #[error("invalid range [{low}; {high}[: lower bound must be below upper bound")]
    InvalidRange { low: f64, high: f64 },
}

/// Result type for coordinate operations
pub type Result<T> = std::result::Result<T, ContractViolation>;
