//! Scalar Helpers for the Simulation Core
//!
//! The vector half of the math kernel is external: the crate consumes
//! `glam::Vec3` for all vector algebra (add/sub, scalar mul/div, dot,
//! length, squared length, normalize, squared distance). This module holds
//! the scalar side: the real type, the epsilon dead-zone used by the
//! spring model, and a square helper.

/// Scalar type used throughout the simulation.
pub type Real = f32;

/// Dead-zone threshold for near-zero scalar tests.
pub const EPSILON: Real = 1e-6;

/// True when `value` is within [`EPSILON`] of zero.
///
/// Used to suppress spring response for displacements too small to be
/// meaningful, and to guard divisions by near-zero scalars.
#[inline]
#[must_use]
pub fn approx_zero(value: Real) -> bool {
    value.abs() < EPSILON
}

/// Square of a scalar.
#[inline]
#[must_use]
pub fn sq(value: Real) -> Real {
    value * value
}

// ============================================================================
// Tests
// ============================================================================
