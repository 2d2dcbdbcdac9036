// Initial obstacle layout, proportional to the screen

use crate::core::math::Vec2;
use crate::engine::physics::PhysicsWorld;

/// Half-thickness of the scene's capsules
pub const CAPSULE_RADIUS: f64 = 12.0;

/// Place the starting capsules and box
///
/// Two slanted ramps sit in the upper corners, with a box in the lower
/// middle. Returns how many obstacles were added. Geometry that fails
/// validation (for example on a tiny screen) is skipped with a warning.
pub fn build(world: &mut PhysicsWorld, width: f64, height: f64) -> usize {
    let mut added = 0;

    let ramps = [
        (Vec2::new(0.1 * width, 0.15 * height), Vec2::new(0.35 * width, 0.3 * height)),
        (Vec2::new(0.9 * width, 0.15 * height), Vec2::new(0.65 * width, 0.3 * height)),
    ];
    for (start, end) in ramps {
        match world.add_capsule(start, end, CAPSULE_RADIUS) {
            Ok(_) => added += 1,
            Err(err) => log::warn!("Skipping capsule: {}", err),
        }
    }

    let upper_left = Vec2::new(0.45 * width, 0.8 * height);
    let lower_right = Vec2::new(0.55 * width, 0.9 * height);
    match world.add_rectangle(upper_left, lower_right) {
        Ok(_) => added += 1,
        Err(err) => log::warn!("Skipping rectangle: {}", err),
    }

    log::info!(
        "Scene built with {} capsules and {} rectangles",
        world.capsules().len(),
        world.rectangles().len()
    );
    added
}
