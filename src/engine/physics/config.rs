// Physics tuning - one set of constants shared by every body

/// Tuning constants for the simulation
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    // Stepping
    /// Number of sub-steps per logical frame
    pub sub_steps: u32,

    // Drag
    /// Radius whose area maps onto `drag_small`
    pub reference_radius_small: f64,
    /// Radius whose area maps onto `drag_large`
    pub reference_radius_large: f64,
    /// Friction coefficient for the smallest reference body
    pub drag_small: f64,
    /// Friction coefficient for the largest reference body
    pub drag_large: f64,

    // Interaction
    /// Spring strength pulling the drag selection toward the pointer
    pub drag_spring: f64,
    /// Base strength of a fling release
    pub fling_strength: f64,
    /// Fling multiplier for the smallest body seen so far
    pub fling_scale_small: f64,
    /// Fling multiplier for the largest body seen so far
    pub fling_scale_large: f64,

    // Registration
    /// Offset applied along x when a new body lands exactly on another one
    pub nudge_epsilon: f64,

    // Activity (cosmetic)
    /// Upper bound of a body's activity
    pub max_charge: f64,
    /// Speed that yields the full per-frame activity increment
    pub activity_speed_range: f64,
    /// Collision energy that yields the full activity increment
    pub activity_energy_range: f64,
}

/// Default tuning, balanced for a few hundred bodies on a desktop-sized screen
pub const DEFAULT_CONFIG: PhysicsConfig = PhysicsConfig {
    // Stepping
    sub_steps: 8,

    // Drag - small bodies lose speed faster than large ones
    reference_radius_small: 5.0,
    reference_radius_large: 70.0,
    drag_small: 0.02,
    drag_large: 0.004,

    // Interaction
    drag_spring: 0.05,
    fling_strength: 0.1,
    fling_scale_small: 2.0,
    fling_scale_large: 0.5,

    // Registration
    nudge_epsilon: 1e-3,

    // Activity
    max_charge: 1.5,
    activity_speed_range: 100.0,
    activity_energy_range: 500.0,
};

impl Default for PhysicsConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

impl PhysicsConfig {
    /// Copy of the defaults with a different sub-step count
    pub fn with_sub_steps(mut self, sub_steps: u32) -> Self {
        self.sub_steps = sub_steps.max(1);
        self
    }

    /// Area of the small drag reference body
    pub fn reference_area_small(&self) -> f64 {
        std::f64::consts::PI * self.reference_radius_small * self.reference_radius_small
    }

    /// Area of the large drag reference body
    pub fn reference_area_large(&self) -> f64 {
        std::f64::consts::PI * self.reference_radius_large * self.reference_radius_large
    }
}
