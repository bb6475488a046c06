//! Applied Force Record
//!
//! A force vector together with its point of application. The cloth's point
//! masses use two of these as per-step accumulators (constant and impulse);
//! only the vector component participates in point-mass integration, while
//! the application point is carried for torque computation in a future rigid
//! extension.

use glam::Vec3;

/// A force applied at a point in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Force {
    /// Force vector (world space)
    vector: Vec3,
    /// Point of application (world space)
    application_point: Vec3,
}

impl Force {
    /// Zero force at the origin.
    pub const ZERO: Self = Self {
        vector: Vec3::ZERO,
        application_point: Vec3::ZERO,
    };

    /// Create a force applied at a point.
    #[inline]
    #[must_use]
    pub const fn applied_at(vector: Vec3, application_point: Vec3) -> Self {
        Self {
            vector,
            application_point,
        }
    }

    /// Force vector.
    #[inline]
    #[must_use]
    pub fn vector(&self) -> Vec3 {
        self.vector
    }

    /// Set the force vector.
    #[inline]
    pub fn set_vector(&mut self, vector: Vec3) {
        self.vector = vector;
    }

    /// Point of application.
    #[inline]
    #[must_use]
    pub fn application_point(&self) -> Vec3 {
        self.application_point
    }

    /// Set the point of application.
    #[inline]
    pub fn set_application_point(&mut self, application_point: Vec3) {
        self.application_point = application_point;
    }

    /// Add to the force vector, leaving the application point untouched.
    #[inline]
    pub fn accumulate(&mut self, vector: Vec3) {
        self.vector += vector;
    }
}

// ============================================================================
// Tests
// ============================================================================
