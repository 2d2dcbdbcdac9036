// The engine aggregate: storage, registration, and the sub-stepped update

use super::body::{BodyHandle, Circle};
use super::broad_phase::sort_by_x;
use super::collision::{
    confine_to_bounds, resolve_capsules, resolve_circle_pairs, resolve_rectangles,
    CollisionRecord, ObstacleContact,
};
use super::config::PhysicsConfig;
use super::dynamics::{resolve_obstacle_contacts, resolve_pairs};
use super::error::PhysicsError;
use super::integrator::integrate;
use super::interaction::Selection;
use super::obstacle::{Capsule, Rectangle};
use crate::core::math::Vec2;

/// Physics world that owns every body and obstacle
///
/// One instance drives the whole simulation. All mutation goes through
/// `&mut self`; there is no shared or global state.
pub struct PhysicsWorld {
    /// Tuning constants
    pub(super) config: PhysicsConfig,

    /// Dynamic bodies, re-sorted by x every sub-step
    pub(super) bodies: Vec<Circle>,

    /// Static line obstacles
    pub(super) capsules: Vec<Capsule>,

    /// Static box obstacles
    rectangles: Vec<Rectangle>,

    /// Pointer selections, held by handle so they survive re-sorting
    pub(super) selection: Selection,

    /// Contacts of the latest sub-step
    record: CollisionRecord,

    /// Id for the next registered body
    next_id: u64,

    /// Largest body radius, bounds the broad-phase scan
    max_radius: f64,

    /// Smallest and largest body area registered so far
    pub(super) area_range: Option<(f64, f64)>,

    /// Peak body speed after the latest update
    max_speed: f64,
}

impl PhysicsWorld {
    /// Create an empty world with default tuning
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create an empty world with custom tuning
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            config,
            bodies: Vec::new(),
            capsules: Vec::new(),
            rectangles: Vec::new(),
            selection: Selection::default(),
            record: CollisionRecord::new(),
            next_id: 0,
            max_radius: 0.0,
            area_range: None,
            max_speed: 0.0,
        }
    }

    /// Get the tuning constants
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Register a new body at rest
    ///
    /// A position already taken by another body is nudged along x until it
    /// is unique, so no pair ever starts with coincident centres.
    pub fn add_body(&mut self, position: Vec2, radius: f64) -> Result<BodyHandle, PhysicsError> {
        let handle = BodyHandle(self.next_id);
        let mut circle = Circle::new(handle, position, radius)?;

        let mut nudge = self.config.nudge_epsilon;
        while self.bodies.iter().any(|b| b.position == circle.position) {
            circle.position.x += nudge;
            nudge *= 2.0;
        }
        circle.previous_position = circle.position;

        self.next_id += 1;
        self.max_radius = self.max_radius.max(radius);
        let area = circle.area();
        self.area_range = Some(match self.area_range {
            Some((min, max)) => (min.min(area), max.max(area)),
            None => (area, area),
        });

        log::trace!("Added body {:?} at {} (r = {})", handle, circle.position, radius);
        self.bodies.push(circle);
        Ok(handle)
    }

    /// Register a capsule obstacle, returning its index
    pub fn add_capsule(&mut self, start: Vec2, end: Vec2, radius: f64) -> Result<usize, PhysicsError> {
        self.capsules.push(Capsule::new(start, end, radius)?);
        Ok(self.capsules.len() - 1)
    }

    /// Reposition both ends of an existing capsule
    pub fn set_capsule_endpoints(&mut self, index: usize, start: Vec2, end: Vec2) -> Result<(), PhysicsError> {
        let capsule = self
            .capsules
            .get_mut(index)
            .ok_or(PhysicsError::CapsuleOutOfRange(index))?;
        *capsule = Capsule::new(start, end, capsule.radius())?;
        Ok(())
    }

    /// Register a rectangle obstacle, returning its index
    pub fn add_rectangle(&mut self, upper_left: Vec2, lower_right: Vec2) -> Result<usize, PhysicsError> {
        self.rectangles.push(Rectangle::new(upper_left, lower_right)?);
        Ok(self.rectangles.len() - 1)
    }

    /// Step the simulation forward by one logical frame
    ///
    /// The frame is split into `sub_steps` equal sub-steps, each running
    /// integrate, sort, detect and correct, then resolve velocities. The
    /// screen size bounds the world; pass zero for an unbounded world.
    pub fn update(
        &mut self,
        screen_width: f64,
        screen_height: f64,
        speed_multiplier: f64,
        elapsed_time: f64,
    ) {
        self.record.reset_checks();

        let steps = self.config.sub_steps.max(1);
        let dt = elapsed_time / f64::from(steps);
        for _ in 0..steps {
            self.sub_step(screen_width, screen_height, speed_multiplier, dt);
        }

        self.max_speed = 0.0;
        for body in &mut self.bodies {
            body.post_update(&self.config);
            self.max_speed = self.max_speed.max(body.speed);
        }
    }

    fn sub_step(&mut self, width: f64, height: f64, speed_multiplier: f64, dt: f64) {
        self.record.clear();

        integrate(&mut self.bodies, speed_multiplier, dt, &self.config);
        sort_by_x(&mut self.bodies);

        resolve_circle_pairs(&mut self.bodies, self.max_radius, &mut self.record);
        resolve_capsules(&mut self.bodies, &self.capsules, &mut self.record);
        resolve_rectangles(&mut self.bodies, &self.rectangles, &mut self.record);
        confine_to_bounds(&mut self.bodies, width, height);

        resolve_pairs(&mut self.bodies, self.record.pairs(), &self.config);
        resolve_obstacle_contacts(&mut self.bodies, self.record.contacts(), &self.config);
    }

    /// All bodies, in current storage order
    pub fn bodies(&self) -> &[Circle] {
        &self.bodies
    }

    /// Look up a body by handle
    pub fn body(&self, handle: BodyHandle) -> Option<&Circle> {
        self.bodies.iter().find(|b| b.handle() == handle)
    }

    /// Look up a body by handle for mutation
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Circle> {
        self.bodies.iter_mut().find(|b| b.handle() == handle)
    }

    /// Like [`PhysicsWorld::body_mut`], but reports a missing handle as an error
    pub fn try_body_mut(&mut self, handle: BodyHandle) -> Result<&mut Circle, PhysicsError> {
        self.body_mut(handle).ok_or(PhysicsError::UnknownBody(handle))
    }

    pub fn capsules(&self) -> &[Capsule] {
        &self.capsules
    }

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Largest registered body radius
    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    /// Smallest and largest registered body area
    pub fn area_range(&self) -> Option<(f64, f64)> {
        self.area_range
    }

    /// Narrow-phase tests run during the latest update
    pub fn collision_checks(&self) -> u64 {
        self.record.checks()
    }

    /// Peak body speed after the latest update
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Circle pairs that collided in the final sub-step of the latest update
    pub fn collision_pairs(&self) -> impl Iterator<Item = (&Circle, &Circle)> + '_ {
        self.record
            .pairs()
            .iter()
            .filter_map(|&(i, j)| Some((self.bodies.get(i)?, self.bodies.get(j)?)))
    }

    /// Obstacle contacts from the final sub-step of the latest update
    pub fn obstacle_contacts(&self) -> impl Iterator<Item = (&Circle, &ObstacleContact)> + '_ {
        self.record
            .contacts()
            .iter()
            .filter_map(|contact| Some((self.bodies.get(contact.body)?, contact)))
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
