//! Integration tests for the cloth simulation
//!
//! These tests verify end-to-end behaviour through the public API
//! re-exported from the crate root: topology construction, the pin
//! invariant, momentum conservation of the spring network, and the
//! reference hanging-cloth scenario.

use tulle::{Cloth, ClothParams, Vec3};

// ============================================================================
// Helpers
// ============================================================================

/// Run a cloth for `steps` frames with the given `dt`.
fn run_cloth(cloth: &mut Cloth, steps: usize, dt: f32) {
    for _ in 0..steps {
        cloth.update(dt);
    }
}

/// Total linear momentum of the cloth.
fn total_momentum(cloth: &Cloth) -> Vec3 {
    cloth
        .particles()
        .iter()
        .map(|p| p.velocity() * p.mass())
        .sum()
}

// ============================================================================
// Test 1 — Topology counts
// ============================================================================

/// For an R x C grid the spring count must equal
/// `R*(C-1) + (R-1)*C + 2*(R-1)*(C-1)` and the square grid must be
/// `(R-1) x (C-1)`.
#[test]
fn test_topology_counts() {
    for &(rows, columns) in &[(2usize, 2usize), (3, 7), (8, 2), (10, 10)] {
        let cloth = Cloth::new(rows, columns, Vec3::ZERO, &ClothParams::default())
            .expect("valid grid");

        let expected =
            rows * (columns - 1) + (rows - 1) * columns + 2 * (rows - 1) * (columns - 1);
        assert_eq!(
            cloth.spring_count(),
            expected,
            "spring count for {rows}x{columns}"
        );
        assert_eq!(cloth.particle_count(), rows * columns);
        assert_eq!(cloth.squares().len(), (rows - 1) * (columns - 1));
    }
}

// ============================================================================
// Test 2 — Rest lengths define the stress-free configuration
// ============================================================================

/// Immediately after construction every spring's rest length equals the
/// distance between its endpoints, so an undisturbed cloth stays put.
#[test]
fn test_construction_is_stress_free() {
    let mut cloth = Cloth::new(5, 5, Vec3::new(-1.0, 3.0, 0.5), &ClothParams::default())
        .expect("valid grid");

    for spring in cloth.springs() {
        let (first, second) = spring.endpoints();
        let distance =
            (cloth.particles()[first].location() - cloth.particles()[second].location()).length();
        assert!(
            (distance - spring.rest_length()).abs() < 1e-6,
            "rest length must match the constructed separation"
        );
    }

    // No external forces: the grid must not drift
    let before: Vec<Vec3> = cloth.particles().iter().map(|p| p.location()).collect();
    run_cloth(&mut cloth, 30, 1.0 / 60.0);
    for (particle, &location) in cloth.particles().iter().zip(&before) {
        assert!(
            (particle.location() - location).length() < 1e-4,
            "unforced cloth must stay in its stress-free configuration"
        );
    }
}

// ============================================================================
// Test 3 — Pin invariant
// ============================================================================

/// A pinned particle rejects force and velocity writes and never moves under
/// simulation; `set_location` still repositions it (scripted anchors).
#[test]
fn test_pin_invariant() {
    let mut cloth =
        Cloth::new(3, 3, Vec3::ZERO, &ClothParams::default()).expect("valid grid");
    cloth.set_pinned(0, 0, true).unwrap();

    cloth.set_constant_force(0, 0, Vec3::new(5.0, 5.0, 5.0)).unwrap();
    cloth.set_impulse_force(0, 0, Vec3::new(-3.0, 0.0, 0.0)).unwrap();
    assert_eq!(cloth.constant_force(0, 0).unwrap(), Vec3::ZERO);
    assert_eq!(cloth.impulse_force(0, 0).unwrap(), Vec3::ZERO);

    let anchor = cloth.location(0, 0).unwrap();
    let gravity = Vec3::new(0.0, -9.8 * cloth.particles()[0].mass(), 0.0);
    cloth.set_constant_force_all(gravity);
    run_cloth(&mut cloth, 60, 1.0 / 60.0);
    assert_eq!(
        cloth.location(0, 0).unwrap(),
        anchor,
        "pinned particle must not move under simulation"
    );

    // Scripted anchor movement bypasses the pin
    let moved = Vec3::new(0.0, 1.0, 0.0);
    cloth.particle_mut(0, 0).unwrap().set_location(moved);
    assert_eq!(cloth.location(0, 0).unwrap(), moved);
    run_cloth(&mut cloth, 1, 1.0 / 60.0);
    assert_eq!(
        cloth.location(0, 0).unwrap(),
        moved,
        "moved anchor must hold its new position"
    );
}

// ============================================================================
// Test 4 — Momentum conservation of the spring network
// ============================================================================

/// Spring reactions are equal and opposite, so a free cloth (no pins, no
/// external forces, no damping) keeps zero total momentum even when
/// internally deformed.
#[test]
fn test_spring_network_conserves_momentum() {
    let params = ClothParams {
        linear_damping: 0.0,
        ..ClothParams::default()
    };
    let mut cloth = Cloth::new(4, 4, Vec3::ZERO, &params).expect("valid grid");

    // Deform the grid so the springs fire
    let stretched = cloth.location(1, 1).unwrap() + Vec3::new(0.05, 0.05, 0.1);
    cloth.particle_mut(1, 1).unwrap().set_location(stretched);

    run_cloth(&mut cloth, 30, 1.0 / 60.0);

    let momentum = total_momentum(&cloth);
    assert!(
        momentum.length() < 1e-4,
        "internal forces must not create net momentum, got {momentum:?}"
    );
}

// ============================================================================
// Test 5 — Reference hanging scenario
// ============================================================================

/// The 2x2 reference scenario: spacing 1, anchored at the origin, particle
/// (0,0) pinned, constant force (0,-9.8,0) on particle (1,1), one step of
/// dt = 0.01.
#[test]
fn test_hanging_scenario_single_step() {
    let params = ClothParams {
        particle_mass: 1.0,
        particle_radius: 0.05,
        particle_restitution: 0.0,
        spacing: 1.0,
        stiffness: 10.0,
        spring_damping: 0.1,
        linear_damping: 0.0,
    };
    let mut cloth = Cloth::new(2, 2, Vec3::ZERO, &params).expect("valid grid");
    cloth.set_pinned(0, 0, true).unwrap();
    cloth.set_constant_force(1, 1, Vec3::new(0.0, -9.8, 0.0)).unwrap();

    let before: Vec<Vec3> = cloth.particles().iter().map(|p| p.location()).collect();
    cloth.update(0.01);

    // Anchor is exactly fixed
    assert_eq!(cloth.location(0, 0).unwrap(), Vec3::ZERO);

    // The loaded corner fell: y decreased by a*dt*dt = 9.8e-4
    let loaded = cloth.location(1, 1).unwrap();
    assert!(loaded.y < before[3].y, "loaded corner must move down");
    assert!(
        (before[3].y - loaded.y - 9.8e-4).abs() < 1e-6,
        "single-step drop must match semi-implicit Euler, got {}",
        before[3].y - loaded.y
    );

    // The unloaded particles started at rest: their displacement this step
    // is bounded by |velocity| * dt, which is zero
    assert_eq!(cloth.location(0, 1).unwrap(), before[1]);
    assert_eq!(cloth.location(1, 0).unwrap(), before[2]);

    // Over the next few steps the stretched springs clear the displacement
    // dead-zone and drag both neighbors along
    run_cloth(&mut cloth, 4, 0.01);
    assert_ne!(cloth.location(0, 1).unwrap(), before[1]);
    assert_ne!(cloth.location(1, 0).unwrap(), before[2]);
}

// ============================================================================
// Test 6 — Curtain drape
// ============================================================================

/// Pin the top row, apply gravity, and run: the bottom row must sag below
/// its starting height while the pinned row stays put.
#[test]
fn test_curtain_drape() {
    let rows = 6;
    let columns = 6;
    let mut cloth = Cloth::new(rows, columns, Vec3::new(0.0, 5.0, 0.0), &ClothParams::default())
        .expect("valid grid");
    for j in 0..columns {
        cloth.set_pinned(0, j, true).unwrap();
    }
    let gravity = Vec3::new(0.0, -9.8 * cloth.particles()[0].mass(), 0.0);
    cloth.set_constant_force_all(gravity);

    let top_before = cloth.location(0, 2).unwrap();
    let bottom_before = cloth.location(rows - 1, 2).unwrap();

    run_cloth(&mut cloth, 120, 1.0 / 60.0);

    assert_eq!(
        cloth.location(0, 2).unwrap(),
        top_before,
        "pinned row must not move"
    );
    assert!(
        cloth.location(rows - 1, 2).unwrap().y < bottom_before.y,
        "bottom row must sag under gravity"
    );
    for particle in cloth.particles() {
        assert!(
            particle.location().is_finite(),
            "simulation must stay finite"
        );
    }
}

// ============================================================================
// Test 7 — Collision pass keeps overlapping pairs apart
// ============================================================================

/// Force two particles into overlap; one update must not deepen the
/// penetration, and repeated updates must push the pair back out to the
/// radius sum.
#[test]
fn test_collision_resolution_trend() {
    let params = ClothParams {
        particle_radius: 0.3,
        spacing: 1.0,
        stiffness: 0.0,
        spring_damping: 0.0,
        linear_damping: 0.0,
        ..ClothParams::default()
    };
    let mut cloth = Cloth::new(2, 2, Vec3::ZERO, &params).expect("valid grid");

    // Overlap (0,1) with (0,0): separation 0.2 < radius sum 0.6
    cloth
        .particle_mut(0, 1)
        .unwrap()
        .set_location(Vec3::new(0.2, 0.0, 0.0));

    let separation_before =
        (cloth.location(0, 0).unwrap() - cloth.location(0, 1).unwrap()).length();
    cloth.update(1.0 / 60.0);
    let separation_after =
        (cloth.location(0, 0).unwrap() - cloth.location(0, 1).unwrap()).length();

    assert!(
        separation_after >= separation_before - 1e-6,
        "penetration must not deepen: before={separation_before}, after={separation_after}"
    );

    run_cloth(&mut cloth, 10, 1.0 / 60.0);
    let settled = (cloth.location(0, 0).unwrap() - cloth.location(0, 1).unwrap()).length();
    assert!(
        settled >= 0.6 - 1e-3,
        "pair must separate out to the radius sum, got {settled}"
    );
}
