//! Simulated Point Mass
//!
//! A material point with position, velocity, acceleration, inverse mass,
//! bounding radius, restitution, two force accumulators, and a pin flag.
//!
//! # Features
//!
//! - Semi-implicit Euler integration with one-shot impulse consumption
//! - Pin-aware setters: a pinned particle rejects velocity, acceleration,
//!   and force writes, storing zero instead
//! - Inverse mass is the single authoritative mass representation

use crate::force::Force;
use crate::math::Real;
use glam::Vec3;

/// A point mass in the cloth grid.
///
/// Only the inverse mass is stored; `mass()` and `set_mass()` derive from
/// it. A pinned particle keeps its finite inverse mass (pinning is the
/// explicit flag, not the zero-inverse-mass trick); its velocity,
/// acceleration, and force accumulators are held at zero by the setters.
///
/// `set_location` is deliberately NOT pin-aware: a pinned anchor can still
/// be repositioned by script.
#[derive(Clone, Copy, Debug)]
pub struct MaterialPoint {
    /// Inverse mass (1/kg). Authoritative; mass is derived.
    inverse_mass: Real,
    /// Bounce coefficient for pairwise collision response
    restitution: Real,
    /// Collision radius for the pairwise self-collision test
    bounding_radius: Real,
    /// Position (world space)
    location: Vec3,
    /// Velocity
    linear_velocity: Vec3,
    /// Acceleration, recomputed from the accumulators each integration
    linear_acceleration: Vec3,
    /// Force applied every step until changed by the driver
    constant_force: Force,
    /// Force consumed (zeroed) by the next integration
    impulse_force: Force,
    /// Pin flag; a pinned particle does not move under simulation
    pinned: bool,
}

impl MaterialPoint {
    /// Create a particle at rest.
    ///
    /// `mass` must be positive; the particle stores its reciprocal.
    #[must_use]
    pub fn new(mass: Real, bounding_radius: Real, restitution: Real, location: Vec3) -> Self {
        Self {
            inverse_mass: 1.0 / mass,
            restitution,
            bounding_radius,
            location,
            linear_velocity: Vec3::ZERO,
            linear_acceleration: Vec3::ZERO,
            constant_force: Force::ZERO,
            impulse_force: Force::ZERO,
            pinned: false,
        }
    }

    /// Mass, derived from the stored inverse.
    #[inline]
    #[must_use]
    pub fn mass(&self) -> Real {
        1.0 / self.inverse_mass
    }

    /// Set the mass; stores its reciprocal.
    #[inline]
    pub fn set_mass(&mut self, mass: Real) {
        self.inverse_mass = 1.0 / mass;
    }

    /// Inverse mass.
    #[inline]
    #[must_use]
    pub fn inverse_mass(&self) -> Real {
        self.inverse_mass
    }

    /// Set the inverse mass directly.
    #[inline]
    pub fn set_inverse_mass(&mut self, inverse_mass: Real) {
        self.inverse_mass = inverse_mass;
    }

    /// Restitution (bounce coefficient).
    #[inline]
    #[must_use]
    pub fn restitution(&self) -> Real {
        self.restitution
    }

    /// Set the restitution.
    #[inline]
    pub fn set_restitution(&mut self, restitution: Real) {
        self.restitution = restitution;
    }

    /// Collision radius.
    #[inline]
    #[must_use]
    pub fn bounding_radius(&self) -> Real {
        self.bounding_radius
    }

    /// Set the collision radius.
    #[inline]
    pub fn set_bounding_radius(&mut self, radius: Real) {
        self.bounding_radius = radius;
    }

    /// Position.
    #[inline]
    #[must_use]
    pub fn location(&self) -> Vec3 {
        self.location
    }

    /// Set the position.
    ///
    /// Not pin-aware: pinned anchors can be repositioned by script.
    #[inline]
    pub fn set_location(&mut self, location: Vec3) {
        self.location = location;
    }

    /// Velocity.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> Vec3 {
        self.linear_velocity
    }

    /// Set the velocity. Stores zero while pinned.
    #[inline]
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.linear_velocity = if self.pinned { Vec3::ZERO } else { velocity };
    }

    /// Acceleration.
    #[inline]
    #[must_use]
    pub fn acceleration(&self) -> Vec3 {
        self.linear_acceleration
    }

    /// Set the acceleration. Stores zero while pinned.
    #[inline]
    pub fn set_acceleration(&mut self, acceleration: Vec3) {
        self.linear_acceleration = if self.pinned {
            Vec3::ZERO
        } else {
            acceleration
        };
    }

    /// Constant force accumulator.
    #[inline]
    #[must_use]
    pub fn constant_force(&self) -> Force {
        self.constant_force
    }

    /// Set the constant force. Stores zero while pinned.
    #[inline]
    pub fn set_constant_force(&mut self, force: Force) {
        self.constant_force = if self.pinned { Force::ZERO } else { force };
    }

    /// Impulse force accumulator.
    #[inline]
    #[must_use]
    pub fn impulse_force(&self) -> Force {
        self.impulse_force
    }

    /// Set the impulse force. Stores zero while pinned.
    #[inline]
    pub fn set_impulse_force(&mut self, force: Force) {
        self.impulse_force = if self.pinned { Force::ZERO } else { force };
    }

    /// Add to the impulse accumulator. Discarded while pinned.
    #[inline]
    pub fn accumulate_impulse(&mut self, vector: Vec3) {
        if !self.pinned {
            self.impulse_force.accumulate(vector);
        }
    }

    /// Pin flag.
    #[inline]
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Set the pin flag.
    ///
    /// Pinning zeroes the current velocity, acceleration, and both force
    /// accumulators so the pin invariant holds immediately.
    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
        if pinned {
            self.linear_velocity = Vec3::ZERO;
            self.linear_acceleration = Vec3::ZERO;
            self.constant_force = Force::ZERO;
            self.impulse_force = Force::ZERO;
        }
    }

    /// Integrate the particle forward by `dt` (semi-implicit Euler).
    ///
    /// 1. `acceleration = (constant + impulse) * inverse_mass`
    /// 2. The impulse accumulator is consumed (zeroed)
    /// 3. `velocity += acceleration * dt`
    /// 4. `location += velocity * dt`
    ///
    /// Pinned particles do not move.
    pub fn integrate(&mut self, dt: Real) {
        if self.pinned {
            return;
        }

        self.linear_acceleration =
            (self.constant_force.vector() + self.impulse_force.vector()) * self.inverse_mass;
        self.impulse_force = Force::ZERO;

        self.linear_velocity += self.linear_acceleration * dt;
        self.location += self.linear_velocity * dt;
    }
}

// ============================================================================
// Tests
// ============================================================================
