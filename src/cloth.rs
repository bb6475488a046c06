//! Mass-Spring Cloth Simulation
//!
//! A deformable rectangular grid of point masses connected by structural,
//! shear, and bend-capable springs, stepped once per frame by an external
//! driver.
//!
//! # Features
//!
//! - Grid topology: horizontal + vertical structural springs plus two shear
//!   diagonals per quad, with a per-quad index table (`ClothSquare`)
//! - Damped spring force accumulation with a rest-displacement dead-zone
//! - Pairwise self-collision response using per-particle bounding radii
//!   (deliberately naive O(N²), no spatial acceleration structure)
//! - Uniform linear velocity damping
//! - Pinnable particles for anchoring, with scripted anchor movement
//!
//! The external driver owns the timestep and injects gravity/wind through
//! the per-particle force accessors every frame; impulse forces are consumed
//! by integration, constant forces persist until changed.

use crate::error::ClothError;
use crate::force::Force;
use crate::math::{sq, Real};
use crate::particle::MaterialPoint;
use crate::spring::Spring;
use glam::Vec3;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// ============================================================================
// Construction Parameters
// ============================================================================

/// Uniform physical parameters for cloth construction.
#[derive(Clone, Copy, Debug)]
pub struct ClothParams {
    /// Mass of each particle (must be positive)
    pub particle_mass: Real,
    /// Collision radius of each particle
    pub particle_radius: Real,
    /// Bounce coefficient of each particle
    pub particle_restitution: Real,
    /// Distance between neighboring particles (must be positive)
    pub spacing: Real,
    /// Stiffness coefficient shared by every spring
    pub stiffness: Real,
    /// Damping coefficient shared by every spring
    pub spring_damping: Real,
    /// Uniform per-step velocity damping (0 = none)
    pub linear_damping: Real,
}

impl Default for ClothParams {
    fn default() -> Self {
        Self {
            particle_mass: 0.01,
            particle_radius: 0.05,
            particle_restitution: 0.2,
            spacing: 0.25,
            stiffness: 10.0,
            spring_damping: 0.1,
            linear_damping: 0.01,
        }
    }
}

// ============================================================================
// Quad Index Table
// ============================================================================

/// Per-quad topology record: the four corner particles and the six springs
/// bordering one grid square. Built during construction as a topology index
/// for bend/shear queries; the simulation step itself does not consult it.
#[derive(Clone, Copy, Debug)]
pub struct ClothSquare {
    /// Flat index of the top-left corner particle
    pub top_left: usize,
    /// Flat index of the top-right corner particle
    pub top_right: usize,
    /// Flat index of the bottom-left corner particle
    pub bottom_left: usize,
    /// Flat index of the bottom-right corner particle
    pub bottom_right: usize,
    /// Structural spring along the top edge
    pub top_spring: usize,
    /// Structural spring along the bottom edge
    pub bottom_spring: usize,
    /// Structural spring along the left edge
    pub left_spring: usize,
    /// Structural spring along the right edge
    pub right_spring: usize,
    /// Shear spring from top-left to bottom-right
    pub descending_diagonal: usize,
    /// Shear spring from top-right to bottom-left
    pub ascending_diagonal: usize,
}

// ============================================================================
// Cloth
// ============================================================================

/// A mass-spring cloth: owned particle grid, spring array, and quad table.
///
/// Particles live in one contiguous buffer indexed `row * columns + column`,
/// laid out left-to-right, top-to-bottom. Springs address particles by flat
/// index; the buffer is never reallocated after construction, so the indices
/// are stable for the life of the cloth.
#[derive(Clone, Debug)]
pub struct Cloth {
    rows: usize,
    columns: usize,
    particles: Vec<MaterialPoint>,
    springs: Vec<Spring>,
    squares: Vec<ClothSquare>,
    linear_damping: Real,
}

impl Cloth {
    /// Build a `rows` x `columns` cloth anchored at its upper-left corner.
    ///
    /// Particles are spaced `params.spacing` apart, +X per column and -Y per
    /// row from `upper_left`. Every spring's rest length is set to the
    /// distance between its endpoints in this initial layout, so the
    /// constructed grid is the stress-free configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClothError::InvalidConfiguration`] when `rows` or `columns`
    /// is below 2, or when the particle mass or spacing is not positive.
    pub fn new(
        rows: usize,
        columns: usize,
        upper_left: Vec3,
        params: &ClothParams,
    ) -> Result<Self, ClothError> {
        if rows < 2 {
            return Err(ClothError::InvalidConfiguration {
                reason: "rows must be >= 2",
            });
        }
        if columns < 2 {
            return Err(ClothError::InvalidConfiguration {
                reason: "columns must be >= 2",
            });
        }
        if params.particle_mass <= 0.0 {
            return Err(ClothError::InvalidConfiguration {
                reason: "particle mass must be positive",
            });
        }
        if params.spacing <= 0.0 {
            return Err(ClothError::InvalidConfiguration {
                reason: "spacing must be positive",
            });
        }

        // --- Particle grid ---
        let mut particles = Vec::with_capacity(rows * columns);
        for i in 0..rows {
            for j in 0..columns {
                let location = Vec3::new(
                    upper_left.x + params.spacing * j as Real,
                    upper_left.y - params.spacing * i as Real,
                    upper_left.z,
                );
                particles.push(MaterialPoint::new(
                    params.particle_mass,
                    params.particle_radius,
                    params.particle_restitution,
                    location,
                ));
            }
        }

        // --- Spring topology ---
        // Layout: all horizontal structural springs, then all vertical ones,
        // then the two shear diagonals of each quad.
        let horizontal = rows * (columns - 1);
        let vertical = (rows - 1) * columns;
        let diagonal = 2 * (rows - 1) * (columns - 1);

        let index = |i: usize, j: usize| i * columns + j;
        let mut springs = Vec::with_capacity(horizontal + vertical + diagonal);

        for i in 0..rows {
            for j in 0..columns - 1 {
                springs.push(Spring::new(index(i, j), index(i, j + 1)));
            }
        }
        for i in 0..rows - 1 {
            for j in 0..columns {
                springs.push(Spring::new(index(i, j), index(i + 1, j)));
            }
        }
        for i in 0..rows - 1 {
            for j in 0..columns - 1 {
                springs.push(Spring::new(index(i, j), index(i + 1, j + 1)));
                springs.push(Spring::new(index(i, j + 1), index(i + 1, j)));
            }
        }

        // --- Quad index table ---
        let mut squares = Vec::with_capacity((rows - 1) * (columns - 1));
        for i in 0..rows - 1 {
            for j in 0..columns - 1 {
                let quad = i * (columns - 1) + j;
                squares.push(ClothSquare {
                    top_left: index(i, j),
                    top_right: index(i, j + 1),
                    bottom_left: index(i + 1, j),
                    bottom_right: index(i + 1, j + 1),
                    top_spring: i * (columns - 1) + j,
                    bottom_spring: (i + 1) * (columns - 1) + j,
                    left_spring: horizontal + i * columns + j,
                    right_spring: horizontal + i * columns + j + 1,
                    descending_diagonal: horizontal + vertical + 2 * quad,
                    ascending_diagonal: horizontal + vertical + 2 * quad + 1,
                });
            }
        }

        // --- Uniform spring properties; the initial layout is stress-free ---
        for spring in &mut springs {
            spring.set_force_constant(params.stiffness);
            spring.set_dampening_factor(params.spring_damping);

            let (first, second) = spring.endpoints();
            let separation = particles[first].location() - particles[second].location();
            spring.set_rest_length(separation.length());
        }

        Ok(Self {
            rows,
            columns,
            particles,
            springs,
            squares,
            linear_damping: params.linear_damping,
        })
    }

    /// Number of particle rows.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of particle columns.
    #[inline]
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of particles.
    #[inline]
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Number of springs.
    #[inline]
    #[must_use]
    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    /// Flat index of the particle at `(row, column)`.
    ///
    /// Valid for `row < rows()` and `column < columns()`.
    #[inline]
    #[must_use]
    pub fn particle_index(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    /// Uniform per-step velocity damping coefficient.
    #[inline]
    #[must_use]
    pub fn linear_damping(&self) -> Real {
        self.linear_damping
    }

    /// Set the uniform per-step velocity damping coefficient.
    #[inline]
    pub fn set_linear_damping(&mut self, damping: Real) {
        self.linear_damping = damping;
    }

    /// All particles, row-major.
    #[inline]
    #[must_use]
    pub fn particles(&self) -> &[MaterialPoint] {
        &self.particles
    }

    /// All springs: horizontal, then vertical, then diagonals.
    #[inline]
    #[must_use]
    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    /// All quad records, row-major over the `(rows-1) x (columns-1)` grid.
    #[inline]
    #[must_use]
    pub fn squares(&self) -> &[ClothSquare] {
        &self.squares
    }

    fn checked_index(&self, row: usize, column: usize) -> Result<usize, ClothError> {
        if row >= self.rows || column >= self.columns {
            return Err(ClothError::InvalidParticleIndex {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(self.particle_index(row, column))
    }

    /// Particle at `(row, column)`.
    ///
    /// # Errors
    ///
    /// Returns [`ClothError::InvalidParticleIndex`] when out of range.
    pub fn particle(&self, row: usize, column: usize) -> Result<&MaterialPoint, ClothError> {
        let index = self.checked_index(row, column)?;
        Ok(&self.particles[index])
    }

    /// Mutable particle at `(row, column)`. The primary hook for scripted
    /// anchor movement (`set_location` on a pinned particle).
    ///
    /// # Errors
    ///
    /// Returns [`ClothError::InvalidParticleIndex`] when out of range.
    pub fn particle_mut(
        &mut self,
        row: usize,
        column: usize,
    ) -> Result<&mut MaterialPoint, ClothError> {
        let index = self.checked_index(row, column)?;
        Ok(&mut self.particles[index])
    }

    /// Quad record at `(row, column)` of the square grid.
    ///
    /// # Errors
    ///
    /// Returns [`ClothError::InvalidSquareIndex`] when out of range.
    pub fn square(&self, row: usize, column: usize) -> Result<&ClothSquare, ClothError> {
        if row >= self.rows - 1 || column >= self.columns - 1 {
            return Err(ClothError::InvalidSquareIndex {
                row,
                column,
                rows: self.rows - 1,
                columns: self.columns - 1,
            });
        }
        Ok(&self.squares[row * (self.columns - 1) + column])
    }

    /// Set the impulse force on one particle. Consumed by the next `update`.
    ///
    /// # Errors
    ///
    /// Returns [`ClothError::InvalidParticleIndex`] when out of range.
    pub fn set_impulse_force(
        &mut self,
        row: usize,
        column: usize,
        force: Vec3,
    ) -> Result<(), ClothError> {
        let index = self.checked_index(row, column)?;
        let at = self.particles[index].location();
        self.particles[index].set_impulse_force(Force::applied_at(force, at));
        Ok(())
    }

    /// Impulse force vector currently accumulated on one particle.
    ///
    /// # Errors
    ///
    /// Returns [`ClothError::InvalidParticleIndex`] when out of range.
    pub fn impulse_force(&self, row: usize, column: usize) -> Result<Vec3, ClothError> {
        let index = self.checked_index(row, column)?;
        Ok(self.particles[index].impulse_force().vector())
    }

    /// Set the constant force on one particle. Persists across steps; the
    /// driver re-applies gravity/wind by leaving it in place.
    ///
    /// # Errors
    ///
    /// Returns [`ClothError::InvalidParticleIndex`] when out of range.
    pub fn set_constant_force(
        &mut self,
        row: usize,
        column: usize,
        force: Vec3,
    ) -> Result<(), ClothError> {
        let index = self.checked_index(row, column)?;
        let at = self.particles[index].location();
        self.particles[index].set_constant_force(Force::applied_at(force, at));
        Ok(())
    }

    /// Constant force vector currently applied to one particle.
    ///
    /// # Errors
    ///
    /// Returns [`ClothError::InvalidParticleIndex`] when out of range.
    pub fn constant_force(&self, row: usize, column: usize) -> Result<Vec3, ClothError> {
        let index = self.checked_index(row, column)?;
        Ok(self.particles[index].constant_force().vector())
    }

    /// Set the same constant force on every particle (uniform gravity or
    /// wind). Pinned particles discard it through their pin-aware setter.
    pub fn set_constant_force_all(&mut self, force: Vec3) {
        for particle in &mut self.particles {
            let at = particle.location();
            particle.set_constant_force(Force::applied_at(force, at));
        }
    }

    /// Pin flag of one particle.
    ///
    /// # Errors
    ///
    /// Returns [`ClothError::InvalidParticleIndex`] when out of range.
    pub fn is_pinned(&self, row: usize, column: usize) -> Result<bool, ClothError> {
        let index = self.checked_index(row, column)?;
        Ok(self.particles[index].is_pinned())
    }

    /// Pin or unpin one particle.
    ///
    /// # Errors
    ///
    /// Returns [`ClothError::InvalidParticleIndex`] when out of range.
    pub fn set_pinned(&mut self, row: usize, column: usize, pinned: bool) -> Result<(), ClothError> {
        let index = self.checked_index(row, column)?;
        self.particles[index].set_pinned(pinned);
        Ok(())
    }

    /// Position of one particle, for the external driver/renderer.
    ///
    /// # Errors
    ///
    /// Returns [`ClothError::InvalidParticleIndex`] when out of range.
    pub fn location(&self, row: usize, column: usize) -> Result<Vec3, ClothError> {
        let index = self.checked_index(row, column)?;
        Ok(self.particles[index].location())
    }

    /// Velocity of one particle.
    ///
    /// # Errors
    ///
    /// Returns [`ClothError::InvalidParticleIndex`] when out of range.
    pub fn velocity(&self, row: usize, column: usize) -> Result<Vec3, ClothError> {
        let index = self.checked_index(row, column)?;
        Ok(self.particles[index].velocity())
    }

    /// Advance the simulation by `dt` seconds. No-op for `dt <= 0`.
    ///
    /// Fixed order per step:
    ///
    /// 1. Every displaced spring deposits its reaction impulses
    /// 2. Pairwise self-collision pass over all unordered particle pairs
    /// 3. Uniform linear velocity damping
    /// 4. Semi-implicit Euler integration of every particle
    pub fn update(&mut self, dt: Real) {
        if dt <= 0.0 {
            return;
        }

        // 1. Spring reactions
        for spring in &self.springs {
            if spring.is_displaced(&self.particles) {
                spring.calculate_reactions(&mut self.particles, dt);
            }
        }

        // 2. Pairwise self-collision: O(N²) over unordered pairs
        let count = self.particles.len();
        for first in 0..count {
            for second in first + 1..count {
                let separation =
                    self.particles[first].location() - self.particles[second].location();
                let radius_sum = self.particles[first].bounding_radius()
                    + self.particles[second].bounding_radius();

                if separation.length_squared() < sq(radius_sum) {
                    self.handle_collision(separation, dt, first, second);
                }
            }
        }

        // 3. Uniform linear damping: v -= v * coefficient
        for particle in &mut self.particles {
            let velocity = particle.velocity();
            particle.set_velocity(velocity - velocity * self.linear_damping);
        }

        // 4. Integration
        for particle in &mut self.particles {
            particle.integrate(dt);
        }
    }

    /// Resolve one overlapping particle pair.
    ///
    /// `separation` points from `second` toward `first`. Approaching pairs
    /// receive a restitution impulse on their relative normal velocity
    /// (restitution averaged across the pair); the remaining penetration is
    /// removed by an inverse-mass-weighted positional correction. Pinned
    /// particles carry zero collision weight and do not move.
    fn handle_collision(&mut self, separation: Vec3, _dt: Real, first: usize, second: usize) {
        let normal = separation.normalize_or_zero();
        if normal == Vec3::ZERO {
            // Coincident particles: no usable separation direction
            return;
        }

        let weight_first = collision_weight(&self.particles[first]);
        let weight_second = collision_weight(&self.particles[second]);
        let weight_sum = weight_first + weight_second;
        if weight_sum <= 0.0 {
            return;
        }

        // Restitution impulse on the approach velocity
        let relative_velocity =
            self.particles[first].velocity() - self.particles[second].velocity();
        let approach = relative_velocity.dot(normal);
        if approach < 0.0 {
            let restitution = 0.5
                * (self.particles[first].restitution() + self.particles[second].restitution());
            let impulse = -(1.0 + restitution) * approach / weight_sum;

            let bounced_first =
                self.particles[first].velocity() + normal * (impulse * weight_first);
            let bounced_second =
                self.particles[second].velocity() - normal * (impulse * weight_second);
            self.particles[first].set_velocity(bounced_first);
            self.particles[second].set_velocity(bounced_second);
        }

        // Positional correction out to the radius sum
        let radius_sum = self.particles[first].bounding_radius()
            + self.particles[second].bounding_radius();
        let penetration = radius_sum - separation.length();
        if penetration > 0.0 {
            let correction = normal * (penetration / weight_sum);

            let pushed_first =
                self.particles[first].location() + correction * weight_first;
            let pushed_second =
                self.particles[second].location() - correction * weight_second;
            self.particles[first].set_location(pushed_first);
            self.particles[second].set_location(pushed_second);
        }
    }
}

/// Inverse mass as seen by the collision response: pinned particles act as
/// infinite mass regardless of their stored inverse.
#[inline]
fn collision_weight(particle: &MaterialPoint) -> Real {
    if particle.is_pinned() {
        0.0
    } else {
        particle.inverse_mass()
    }
}

// ============================================================================
// Tests
// ============================================================================
