// Explicit Euler integration with size-dependent drag

use super::body::Circle;
use super::config::PhysicsConfig;
use crate::core::math::{remap_clamped, Vec2};

/// Drag coefficient for a body of the given area
///
/// Small bodies decelerate faster than large ones.
pub fn drag_coefficient(area: f64, config: &PhysicsConfig) -> f64 {
    remap_clamped(
        area,
        config.reference_area_small(),
        config.reference_area_large(),
        config.drag_small,
        config.drag_large,
    )
}

/// Advance every body by one sub-step of length `dt`
///
/// Pending forces are consumed here; they act for exactly one sub-step.
pub fn integrate(bodies: &mut [Circle], speed_multiplier: f64, dt: f64, config: &PhysicsConfig) {
    for body in bodies.iter_mut() {
        body.previous_position = body.position;

        let drag = drag_coefficient(body.area(), config);
        let friction = body.force - body.velocity * (drag * speed_multiplier);
        body.velocity += friction;
        body.position += body.velocity * (dt * speed_multiplier);

        body.force = Vec2::ZERO;
    }
}
