use super::config::PhysicsConfig;
use super::error::PhysicsError;
use crate::core::math::{clamp, remap, Vec2};

/// Radius range the activity tuning is expressed over
const ACTIVITY_RADIUS_MIN: f64 = 5.0;
const ACTIVITY_RADIUS_MAX: f64 = 70.0;

/// Stable identity of a body
///
/// Assigned once at registration, increasing, and never reused. Storage
/// order changes every sub-step, so anything that outlives a sub-step
/// refers to bodies through a handle rather than an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u64);

impl BodyHandle {
    /// Get the raw id
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// A dynamic circular body
///
/// Area stands in for mass in all collision math.
#[derive(Debug, Clone)]
pub struct Circle {
    handle: BodyHandle,

    // Kinematics
    pub(crate) position: Vec2,
    pub(crate) previous_position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) force: Vec2,
    pub(crate) speed: f64,

    // Shape
    radius: f64,
    area: f64,

    /// Whether this body is currently held by the drag gesture
    pub(crate) selected: bool,

    // Activity - rendering input only
    activity: f64,
    max_mod: f64,
    dim_rate: f64,

    /// Opaque colour tag (hue in degrees) for the presentation layer
    hue: f64,
}

impl Circle {
    /// Create a circle at rest
    pub fn new(handle: BodyHandle, position: Vec2, radius: f64) -> Result<Self, PhysicsError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(PhysicsError::InvalidGeometry(format!(
                "radius must be positive and finite, got {radius}"
            )));
        }
        if !position.is_finite() {
            return Err(PhysicsError::InvalidGeometry(format!(
                "position must be finite, got {position}"
            )));
        }

        Ok(Self {
            handle,
            position,
            previous_position: position,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            speed: 0.0,
            radius,
            area: std::f64::consts::PI * radius * radius,
            selected: false,
            activity: 0.0,
            // Larger bodies charge up and fade more slowly
            max_mod: remap(radius, ACTIVITY_RADIUS_MIN, ACTIVITY_RADIUS_MAX, 5.0, 2.0),
            dim_rate: remap(radius, ACTIVITY_RADIUS_MIN, ACTIVITY_RADIUS_MAX, 0.07, 0.01),
            hue: 0.0,
        })
    }

    pub fn handle(&self) -> BodyHandle {
        self.handle
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Position at the start of the latest sub-step, for trail effects
    pub fn previous_position(&self) -> Vec2 {
        self.previous_position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Force waiting to be applied on the next sub-step
    pub fn accumulated_force(&self) -> Vec2 {
        self.force
    }

    /// Speed as of the end of the last frame
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn activity(&self) -> f64 {
        self.activity
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    /// Set the colour tag, wrapped into `[0, 360)`
    pub fn set_hue(&mut self, hue: f64) {
        self.hue = hue.rem_euclid(360.0);
    }

    /// Set the velocity directly (used by spawners and scripted scenes)
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Add a force that is consumed by the next integration sub-step
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Point-in-circle test
    pub fn contains(&self, point: Vec2) -> bool {
        self.position.distance_squared(point) <= self.radius * self.radius
    }

    /// Refresh the cached speed and let activity decay
    ///
    /// Called once per frame after all sub-steps.
    pub(crate) fn post_update(&mut self, config: &PhysicsConfig) {
        self.speed = self.velocity.length();
        let gain = remap(self.speed, 0.0, config.activity_speed_range, 0.0, self.max_mod);
        self.activity = clamp(
            self.activity + gain - self.dim_rate,
            0.0,
            config.max_charge,
        );
    }

    /// Charge activity from a velocity change caused by a collision
    pub(crate) fn add_collision_energy(&mut self, energy: f64, config: &PhysicsConfig) {
        let gain = remap(energy, 0.0, config.activity_energy_range, 0.0, self.max_mod);
        self.activity = clamp(self.activity + gain, 0.0, config.max_charge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn circle(x: f64, y: f64, r: f64) -> Circle {
        Circle::new(BodyHandle(0), Vec2::new(x, y), r).unwrap()
    }

    #[test]
    fn test_area_is_mass() {
        let c = circle(0.0, 0.0, 10.0);
        assert_relative_eq!(c.area(), std::f64::consts::PI * 100.0, epsilon = 1e-9);
        assert_eq!(c.velocity(), Vec2::ZERO);
        assert_eq!(c.previous_position(), c.position());
    }

    #[test]
    fn test_rejects_bad_radius() {
        for r in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = Circle::new(BodyHandle(0), Vec2::ZERO, r);
            assert!(matches!(result, Err(PhysicsError::InvalidGeometry(_))));
        }
    }

    #[test]
    fn test_rejects_non_finite_position() {
        let result = Circle::new(BodyHandle(0), Vec2::new(f64::NAN, 0.0), 5.0);
        assert!(matches!(result, Err(PhysicsError::InvalidGeometry(_))));
    }

    #[test]
    fn test_contains() {
        let c = circle(10.0, 10.0, 5.0);
        assert!(c.contains(Vec2::new(10.0, 10.0)));
        assert!(c.contains(Vec2::new(14.0, 10.0)));
        assert!(!c.contains(Vec2::new(16.0, 10.0)));
    }

    #[test]
    fn test_activity_stays_bounded() {
        let config = PhysicsConfig::default();
        let mut c = circle(0.0, 0.0, 5.0);

        // At rest activity fades to zero and never goes negative
        c.post_update(&config);
        assert_eq!(c.activity(), 0.0);

        // Fast movement saturates at max charge
        c.set_velocity(Vec2::new(1000.0, 0.0));
        for _ in 0..10 {
            c.post_update(&config);
        }
        assert_eq!(c.activity(), config.max_charge);
        assert_relative_eq!(c.speed(), 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_collision_energy_charges_activity() {
        let config = PhysicsConfig::default();
        let mut c = circle(0.0, 0.0, 5.0);
        c.add_collision_energy(100.0, &config);
        // remap(100, 0, 500, 0, 5) for the smallest body
        assert_relative_eq!(c.activity(), 1.0, epsilon = 1e-9);
        c.add_collision_energy(1e6, &config);
        assert_eq!(c.activity(), config.max_charge);
    }

    #[test]
    fn test_hue_wraps() {
        let mut c = circle(0.0, 0.0, 5.0);
        c.set_hue(370.0);
        assert_relative_eq!(c.hue(), 10.0, epsilon = 1e-9);
        c.set_hue(-90.0);
        assert_relative_eq!(c.hue(), 270.0, epsilon = 1e-9);
    }
}
