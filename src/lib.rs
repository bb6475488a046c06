//! # tulle
//!
//! **Mass-Spring Cloth Simulation on a Particle Grid**
//!
//! A single-threaded, in-memory cloth simulation: a rectangular grid of
//! point masses connected by structural and shear springs, integrated with
//! semi-implicit Euler and stepped once per frame by an external driver.
//!
//! ## Features
//!
//! - Grid topology with per-quad particle/spring index tables
//! - Damped spring force accumulation with near-zero dead-zones
//! - Pairwise self-collision response using per-particle bounding radii
//! - Pinnable particles with scripted anchor movement
//! - Fallible construction and bounds-checked accessors (`ClothError`)
//! - `no_std` compatible (requires `alloc`); the `std` feature (default)
//!   enables `std::error::Error`
//!
//! ## Quick Start
//!
//! ```rust
//! use tulle::{Cloth, ClothParams, Vec3};
//!
//! // A 10x10 cloth hanging from its two top corners
//! let mut cloth = Cloth::new(10, 10, Vec3::new(0.0, 5.0, 0.0), &ClothParams::default())
//!     .expect("valid parameters");
//! cloth.set_pinned(0, 0, true).unwrap();
//! cloth.set_pinned(0, 9, true).unwrap();
//!
//! // The driver owns the timestep and applies gravity (scaled by the
//! // particle mass) as a persistent constant force
//! let weight = -9.8 * cloth.particles()[0].mass();
//! cloth.set_constant_force_all(Vec3::new(0.0, weight, 0.0));
//! for _ in 0..60 {
//!     cloth.update(1.0 / 60.0);
//! }
//!
//! assert!(cloth.location(9, 5).unwrap().y < 5.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod cloth;
pub mod error;
pub mod force;
pub mod math;
pub mod particle;
pub mod spring;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::cloth::{Cloth, ClothParams, ClothSquare};
    pub use crate::error::ClothError;
    pub use crate::force::Force;
    pub use crate::math::{approx_zero, Real, EPSILON};
    pub use crate::particle::MaterialPoint;
    pub use crate::spring::Spring;
    pub use glam::Vec3;
}

// Re-export main types at crate root
pub use prelude::*;
