// Demo glue around the physics engine
//
// - Spawning bodies up to a population cap
// - The initial obstacle layout
// - Mapping pointer and key actions onto engine calls

pub mod scene;
pub mod spawner;

pub use spawner::Spawner;

use crate::engine::game_loop::SpeedControl;
use crate::engine::input::{Action, InputState};
use crate::engine::physics::PhysicsWorld;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Population cap
pub const MAX_BODIES: usize = 500;
/// Bodies added per tick while under the cap
pub const SPAWN_PER_TICK: usize = 2;
/// Spawned radii are drawn from `MIN_SPAWN_RADIUS..MAX_SPAWN_RADIUS`
pub const MIN_SPAWN_RADIUS: f64 = 5.0;
pub const MAX_SPAWN_RADIUS: f64 = 50.0;
/// Initial window size
pub const SCREEN_WIDTH: f64 = 1880.0;
pub const SCREEN_HEIGHT: f64 = 1040.0;

/// Physics time per tick, in velocity units
const TICK_ELAPSED: f64 = 1.0;
/// Ticks between telemetry log lines
const TELEMETRY_INTERVAL: u64 = 60;

/// Snapshot of engine counters for logging or an overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    pub bodies: usize,
    pub collision_checks: u64,
    pub max_speed: f64,
    pub colliding_pairs: usize,
    pub obstacle_contacts: usize,
}

/// The running simulation
pub struct Game {
    world: PhysicsWorld,
    spawner: Spawner,
    speed: SpeedControl,
    rng: StdRng,
    width: f64,
    height: f64,
    ticks: u64,
}

impl Game {
    /// Create a game with the default scene and an entropy-seeded spawner
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Create a game with a given random source
    pub fn with_rng(width: f64, height: f64, rng: StdRng) -> Self {
        let mut world = PhysicsWorld::new();
        scene::build(&mut world, width, height);
        Self {
            world,
            spawner: Spawner::default(),
            speed: SpeedControl::new(),
            rng,
            width,
            height,
            ticks: 0,
        }
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn speed(&self) -> &SpeedControl {
        &self.speed
    }

    /// Track a window resize; the new size bounds the world from the next tick
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Run one fixed tick: apply input, grow the population, step physics
    pub fn update(&mut self, input: &InputState) {
        self.handle_speed_keys(input);
        self.handle_pointer(input);

        self.spawner
            .spawn(&mut self.world, self.width, self.height, &mut self.rng);
        self.world.update(
            self.width,
            self.height,
            self.speed.multiplier(),
            TICK_ELAPSED,
        );

        self.ticks += 1;
        if self.ticks % TELEMETRY_INTERVAL == 0 {
            log::debug!("{:?}", self.telemetry());
        }
    }

    fn handle_speed_keys(&mut self, input: &InputState) {
        if input.just_pressed(Action::SlowDown) {
            self.speed.slow_down();
        }
        if input.just_pressed(Action::SpeedUp) {
            self.speed.speed_up();
        }
        if input.just_pressed(Action::TogglePause) {
            self.speed.toggle_pause();
        }
        if input.just_pressed(Action::SpeedSlow) {
            self.speed.set_level(1);
        }
        if input.just_pressed(Action::SpeedHalf) {
            self.speed.set_level(2);
        }
        if input.just_pressed(Action::SpeedFull) {
            self.speed.set_level(3);
        }
    }

    fn handle_pointer(&mut self, input: &InputState) {
        let cursor = input.cursor();
        let world = &mut self.world;

        // Drag: capsule endpoints take priority over bodies
        if input.just_pressed(Action::Drag) && !world.select_capsule_endpoint_at(cursor) {
            world.select_nearest(cursor);
        }
        if input.is_pressed(Action::Drag) && !world.move_selected_capsule_endpoint(cursor) {
            world.move_selected_to(cursor);
        }
        if input.just_released(Action::Drag) {
            world.deselect();
            world.deselect_capsule();
        }

        // Fling
        if input.just_pressed(Action::Fling) {
            world.dynamic_select_nearest(cursor);
        }
        if input.just_released(Action::Fling) {
            world.dynamic_release(cursor);
        }

        // Spring pull, unless a drag already owns the selection
        if !input.is_pressed(Action::Drag) {
            if input.just_pressed(Action::Pull) {
                world.select_nearest(cursor);
            }
            if input.is_pressed(Action::Pull) {
                world.apply_force_to_selected(cursor, self.speed.multiplier());
            }
            if input.just_released(Action::Pull) {
                world.deselect();
            }
        }
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            bodies: self.world.len(),
            collision_checks: self.world.collision_checks(),
            max_speed: self.world.max_speed(),
            colliding_pairs: self.world.collision_pairs().count(),
            obstacle_contacts: self.world.obstacle_contacts().count(),
        }
    }
}
