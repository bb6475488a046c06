#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tulle::{Cloth, ClothParams, Vec3};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    /// Grid rows (capped)
    rows: u8,
    /// Grid columns (capped)
    columns: u8,
    /// Particle mass numerator, mass = raw / 100
    mass_raw: u16,
    /// Spacing numerator, spacing = raw / 100
    spacing_raw: u16,
    /// Anchor position components
    anchor: (i16, i16, i16),
    /// Stiffness numerator
    stiffness_raw: u16,
}

// Fuzz construction: any parameter combination must either build a
// consistent cloth or return an error. Must never panic.
fuzz_target!(|input: FuzzInput| {
    let rows = (input.rows as usize).min(24);
    let columns = (input.columns as usize).min(24);

    let params = ClothParams {
        particle_mass: input.mass_raw as f32 / 100.0,
        spacing: input.spacing_raw as f32 / 100.0,
        stiffness: input.stiffness_raw as f32 / 100.0,
        ..ClothParams::default()
    };
    let anchor = Vec3::new(
        input.anchor.0 as f32,
        input.anchor.1 as f32,
        input.anchor.2 as f32,
    );

    match Cloth::new(rows, columns, anchor, &params) {
        Ok(cloth) => {
            // Structural invariants of a successful build
            assert_eq!(cloth.particle_count(), rows * columns);
            assert_eq!(
                cloth.spring_count(),
                rows * (columns - 1) + (rows - 1) * columns + 2 * (rows - 1) * (columns - 1)
            );
            assert_eq!(cloth.squares().len(), (rows - 1) * (columns - 1));
            for spring in cloth.springs() {
                let (first, second) = spring.endpoints();
                assert!(first < cloth.particle_count());
                assert!(second < cloth.particle_count());
            }
        }
        Err(_) => {
            // Degenerate parameters must be rejected, not panic
        }
    }
});
