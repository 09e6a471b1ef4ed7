//! Constants module for coordinate calculations

use std::f64::consts::PI;

// Angles
/// Tau (2*PI) for full circle, the exclusive upper bound of every angle
pub const TAU: f64 = 2.0 * PI;

// Precision
/// Absolute tolerance used when comparing coordinate components
pub const COMPARISON_DELTA: f64 = 0.00001;
