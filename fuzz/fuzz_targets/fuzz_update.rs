#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tulle::{Cloth, ClothParams, Vec3};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    /// Per-particle impulse force components (i16 keeps values reasonable)
    impulses: Vec<(u8, u8, i16, i16, i16)>,
    /// Pin toggles as (row, column) pairs
    pins: Vec<(u8, u8)>,
    /// Number of simulation steps (capped)
    step_count: u8,
}

// Fuzz the simulation step: arbitrary forces and pins on a fixed grid.
// Must never panic regardless of input.
fuzz_target!(|input: FuzzInput| {
    let rows = 6;
    let columns = 6;
    let mut cloth = Cloth::new(rows, columns, Vec3::new(0.0, 2.0, 0.0), &ClothParams::default())
        .expect("fixed grid parameters are valid");

    for &(row, column) in input.pins.iter().take(8) {
        // Out-of-range addresses must error, not panic
        let _ = cloth.set_pinned(row as usize, column as usize, true);
    }

    for &(row, column, fx, fy, fz) in input.impulses.iter().take(32) {
        let force = Vec3::new(fx as f32, fy as f32, fz as f32);
        let _ = cloth.set_impulse_force(row as usize, column as usize, force);
    }

    let steps = (input.step_count as usize).min(32);
    let dt = 1.0 / 60.0;
    for _ in 0..steps {
        cloth.update(dt);
    }

    // Topology must be untouched by stepping
    assert_eq!(cloth.particle_count(), rows * columns);
    for &(row, column) in input.pins.iter().take(8) {
        if let Ok(pinned) = cloth.is_pinned(row as usize, column as usize) {
            assert!(pinned, "pin flags must survive stepping");
        }
    }
});
