// Population growth: new bodies appear in the middle of the screen until the cap is hit

use super::{MAX_BODIES, MAX_SPAWN_RADIUS, MIN_SPAWN_RADIUS, SPAWN_PER_TICK};
use crate::core::math::Vec2;
use crate::engine::physics::PhysicsWorld;
use rand::{distributions as distr, distributions::Distribution, Rng};

/// Adds random bodies to a world, a few per tick
#[derive(Debug, Clone)]
pub struct Spawner {
    /// Population cap
    pub max_bodies: usize,
    /// Bodies added per tick while under the cap
    pub per_tick: usize,
    radius: distr::Uniform<f64>,
    hue: distr::Uniform<f64>,
}

impl Spawner {
    pub fn new(max_bodies: usize, per_tick: usize) -> Self {
        Self {
            max_bodies,
            per_tick,
            radius: distr::Uniform::from(MIN_SPAWN_RADIUS..MAX_SPAWN_RADIUS),
            hue: distr::Uniform::from(0.0..360.0),
        }
    }

    /// Run one tick of spawning, returning how many bodies were added
    ///
    /// Positions are drawn from the central half of the screen.
    pub fn spawn<R: Rng>(
        &self,
        world: &mut PhysicsWorld,
        screen_width: f64,
        screen_height: f64,
        rng: &mut R,
    ) -> usize {
        let x_margin = screen_width / 4.0;
        let y_margin = screen_height / 4.0;
        if screen_width - 2.0 * x_margin <= 0.0 || screen_height - 2.0 * y_margin <= 0.0 {
            return 0;
        }
        let x = distr::Uniform::from(x_margin..screen_width - x_margin);
        let y = distr::Uniform::from(y_margin..screen_height - y_margin);

        let mut added = 0;
        while added < self.per_tick && world.len() < self.max_bodies {
            let position = Vec2::new(x.sample(rng), y.sample(rng));
            match world.add_body(position, self.radius.sample(rng)) {
                Ok(handle) => {
                    if let Some(body) = world.body_mut(handle) {
                        body.set_hue(self.hue.sample(rng));
                    }
                    added += 1;
                }
                Err(err) => {
                    log::warn!("Spawner rejected body: {}", err);
                    break;
                }
            }
        }

        if added > 0 && world.len() == self.max_bodies {
            log::info!("Population cap of {} bodies reached", self.max_bodies);
        }
        added
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new(MAX_BODIES, SPAWN_PER_TICK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_spawn_rate_and_cap() {
        let spawner = Spawner::new(5, 2);
        let mut world = PhysicsWorld::new();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(spawner.spawn(&mut world, 800.0, 600.0, &mut rng), 2);
        assert_eq!(spawner.spawn(&mut world, 800.0, 600.0, &mut rng), 2);
        assert_eq!(spawner.spawn(&mut world, 800.0, 600.0, &mut rng), 1);
        assert_eq!(spawner.spawn(&mut world, 800.0, 600.0, &mut rng), 0);
        assert_eq!(world.len(), 5);
    }

    #[test]
    fn test_spawned_bodies_in_central_half() {
        let spawner = Spawner::new(100, 100);
        let mut world = PhysicsWorld::new();
        let mut rng = StdRng::seed_from_u64(42);
        spawner.spawn(&mut world, 800.0, 600.0, &mut rng);

        for body in world.bodies() {
            let p = body.position();
            // The duplicate nudge may push x a hair past the band
            assert!(p.x >= 200.0 && p.x < 600.0 + 1.0);
            assert!(p.y >= 150.0 && p.y < 450.0);
            assert!(body.radius() >= MIN_SPAWN_RADIUS && body.radius() < MAX_SPAWN_RADIUS);
            assert!(body.hue() >= 0.0 && body.hue() < 360.0);
        }
    }

    #[test]
    fn test_degenerate_screen_spawns_nothing() {
        let spawner = Spawner::default();
        let mut world = PhysicsWorld::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(spawner.spawn(&mut world, 0.0, 0.0, &mut rng), 0);
        assert!(world.is_empty());
    }
}
