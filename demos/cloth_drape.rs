//! Cloth Drape Demo
//!
//! Builds a curtain pinned along its top row, applies gravity and a light
//! breeze, and prints the bottom-center particle as it settles.
//!
//! ```bash
//! cargo run --example cloth_drape
//! ```

use tulle::{Cloth, ClothParams, Vec3};

fn main() {
    let rows = 10;
    let columns = 10;

    let mut cloth = Cloth::new(
        rows,
        columns,
        Vec3::new(-1.0, 5.0, 0.0),
        &ClothParams::default(),
    )
    .expect("valid cloth parameters");

    // Pin the top row (curtain-like behavior)
    for j in 0..columns {
        cloth.set_pinned(0, j, true).expect("in range");
    }

    // Gravity plus a light breeze along +Z
    cloth.set_constant_force_all(Vec3::new(0.0, -9.8 * 0.01, 0.002));

    println!("tulle cloth drape");
    println!("=================");
    println!("Particles: {}", cloth.particle_count());
    println!("Springs:   {}", cloth.spring_count());
    println!("Pinned top row: {columns} particles");
    println!();

    // Simulate 3 seconds at 60 FPS
    let dt = 1.0 / 60.0;
    for frame in 0..180 {
        cloth.update(dt);

        if frame % 30 == 0 {
            let position = cloth.location(rows - 1, columns / 2).expect("in range");
            println!(
                "Frame {:3}: bottom-center y={:+.4}, z={:+.4}",
                frame, position.y, position.z
            );
        }
    }

    println!();
    println!("Simulation complete (180 frames, 3 seconds).");
}
