// Dynamic (velocity) resolution of recorded contacts

use super::body::Circle;
use super::collision::{pair_mut, ObstacleContact};
use super::config::PhysicsConfig;
use crate::core::math::{Vec2, VecExt};

/// Elastic response between two discs, using area as mass
///
/// Returns the new velocities of `a` and `b`, or `None` when the centres
/// coincide (no normal) or the discs are already moving apart.
pub fn elastic_response(
    pos_a: Vec2,
    vel_a: Vec2,
    area_a: f64,
    pos_b: Vec2,
    vel_b: Vec2,
    area_b: f64,
) -> Option<(Vec2, Vec2)> {
    let normal = pos_a.to(pos_b).unit();
    if normal == Vec2::ZERO {
        return None;
    }

    let approach = normal.dot(vel_a - vel_b);
    if approach <= 0.0 {
        return None;
    }

    let p = 2.0 * approach / (area_a + area_b);
    Some((vel_a - normal * (p * area_b), vel_b + normal * (p * area_a)))
}

/// Response of a disc hitting an immovable anchor moving at `anchor_vel`
///
/// The limit of [`elastic_response`] as the anchor's area grows without
/// bound: the disc's relative normal velocity is reflected.
pub fn anchored_response(pos: Vec2, vel: Vec2, anchor_pos: Vec2, anchor_vel: Vec2) -> Option<Vec2> {
    let normal = pos.to(anchor_pos).unit();
    if normal == Vec2::ZERO {
        return None;
    }

    let approach = normal.dot(vel - anchor_vel);
    if approach <= 0.0 {
        return None;
    }
    Some(vel - normal * (2.0 * approach))
}

/// Apply a new velocity to a body and charge its activity with the change
fn set_velocity_with_energy(body: &mut Circle, velocity: Vec2, config: &PhysicsConfig) {
    let delta = velocity - body.velocity;
    body.velocity = velocity;
    body.add_collision_energy(0.5 * delta.length_squared(), config);
}

/// Resolve circle-circle contacts in the order they were recorded
///
/// A drag-selected body is an anchor of unbounded mass: its velocity is
/// never changed, and only the other body bounces.
pub fn resolve_pairs(bodies: &mut [Circle], pairs: &[(usize, usize)], config: &PhysicsConfig) {
    for &(i, j) in pairs {
        if i >= j || j >= bodies.len() {
            continue;
        }
        let (a, b) = pair_mut(bodies, i, j);
        match (a.selected, b.selected) {
            (true, true) => {}
            (true, false) => bounce_off_anchor(b, a, config),
            (false, true) => bounce_off_anchor(a, b, config),
            (false, false) => {
                if let Some((vel_a, vel_b)) = elastic_response(
                    a.position,
                    a.velocity,
                    a.area(),
                    b.position,
                    b.velocity,
                    b.area(),
                ) {
                    set_velocity_with_energy(a, vel_a, config);
                    set_velocity_with_energy(b, vel_b, config);
                }
            }
        }
    }
}

fn bounce_off_anchor(body: &mut Circle, anchor: &Circle, config: &PhysicsConfig) {
    if let Some(velocity) =
        anchored_response(body.position, body.velocity, anchor.position, anchor.velocity)
    {
        set_velocity_with_energy(body, velocity, config);
    }
}

/// Resolve circle-obstacle contacts in the order they were recorded
///
/// The obstacle side is modelled as a mirror disc at the contact point with
/// the circle's area and opposite velocity, which reflects the circle's
/// velocity about the contact normal. Obstacles never move.
pub fn resolve_obstacle_contacts(
    bodies: &mut [Circle],
    contacts: &[ObstacleContact],
    config: &PhysicsConfig,
) {
    for contact in contacts {
        let Some(body) = bodies.get_mut(contact.body) else {
            continue;
        };
        if let Some((velocity, _)) = elastic_response(
            body.position,
            body.velocity,
            body.area(),
            contact.point,
            -body.velocity,
            body.area(),
        ) {
            set_velocity_with_energy(body, velocity, config);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::BodyHandle;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn circle(id: u64, x: f64, y: f64, r: f64) -> Circle {
        Circle::new(BodyHandle(id), Vec2::new(x, y), r).unwrap()
    }

    #[test]
    fn test_equal_areas_head_on_swap() {
        let mut bodies = vec![circle(0, 0.0, 0.0, 5.0), circle(1, 10.0, 0.0, 5.0)];
        bodies[0].set_velocity(Vec2::new(3.0, 0.0));
        bodies[1].set_velocity(Vec2::new(-3.0, 0.0));

        resolve_pairs(&mut bodies, &[(0, 1)], &PhysicsConfig::default());

        assert_abs_diff_eq!(bodies[0].velocity(), Vec2::new(-3.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(bodies[1].velocity(), Vec2::new(3.0, 0.0), epsilon = 1e-12);
        assert!(bodies[0].activity() > 0.0);
    }

    #[test]
    fn test_momentum_and_energy_conserved() {
        let (pa, va, ma) = (Vec2::new(0.0, 0.0), Vec2::new(4.0, 1.0), 3.0);
        let (pb, vb, mb) = (Vec2::new(3.0, 4.0), Vec2::new(-1.0, -2.0), 7.0);

        let (va2, vb2) = elastic_response(pa, va, ma, pb, vb, mb).unwrap();

        let momentum = va * ma + vb * mb;
        let momentum2 = va2 * ma + vb2 * mb;
        assert_abs_diff_eq!(momentum, momentum2, epsilon = 1e-9);

        let energy = ma * va.length_squared() + mb * vb.length_squared();
        let energy2 = ma * va2.length_squared() + mb * vb2.length_squared();
        assert_relative_eq!(energy, energy2, epsilon = 1e-9);
    }

    #[test]
    fn test_tangential_velocity_untouched() {
        let (va2, vb2) = elastic_response(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 5.0),
            1.0,
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, -5.0),
            1.0,
        )
        .unwrap();
        assert_abs_diff_eq!(va2, Vec2::new(0.0, 5.0), epsilon = 1e-12);
        assert_abs_diff_eq!(vb2, Vec2::new(2.0, -5.0), epsilon = 1e-12);
    }

    #[test]
    fn test_separating_pair_is_left_alone() {
        let result = elastic_response(
            Vec2::new(0.0, 0.0),
            Vec2::new(-1.0, 0.0),
            1.0,
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 0.0),
            1.0,
        );
        assert_eq!(result, None);
    }

    #[test]
    fn test_coincident_pair_is_skipped() {
        let result = elastic_response(
            Vec2::ONE,
            Vec2::new(1.0, 0.0),
            1.0,
            Vec2::ONE,
            Vec2::new(-1.0, 0.0),
            1.0,
        );
        assert_eq!(result, None);
    }

    #[test]
    fn test_obstacle_contact_reflects_velocity() {
        let mut bodies = vec![circle(0, 0.0, 0.0, 5.0)];
        bodies[0].set_velocity(Vec2::new(3.0, 4.0));
        let contacts = [ObstacleContact {
            body: 0,
            point: Vec2::new(0.0, 7.0),
            radius: 2.0,
        }];

        resolve_obstacle_contacts(&mut bodies, &contacts, &PhysicsConfig::default());

        assert_abs_diff_eq!(bodies[0].velocity(), Vec2::new(3.0, -4.0), epsilon = 1e-12);
        assert_eq!(bodies[0].position(), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_selected_body_keeps_its_velocity() {
        for selected_first in [true, false] {
            let mut bodies = vec![circle(0, 0.0, 0.0, 5.0), circle(1, 9.0, 0.0, 5.0)];
            let (held, moving) = if selected_first { (0, 1) } else { (1, 0) };
            bodies[held].selected = true;
            let toward_held = if selected_first { -6.0 } else { 6.0 };
            bodies[moving].set_velocity(Vec2::new(toward_held, 2.0));

            resolve_pairs(&mut bodies, &[(0, 1)], &PhysicsConfig::default());

            assert_eq!(bodies[held].velocity(), Vec2::ZERO);
            assert_abs_diff_eq!(
                bodies[moving].velocity(),
                Vec2::new(-toward_held, 2.0),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_anchored_response() {
        // Moving anchor: the relative normal velocity is what gets reflected
        let v = anchored_response(
            Vec2::ZERO,
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(-1.0, 0.0),
        )
        .unwrap();
        assert_abs_diff_eq!(v, Vec2::new(-3.0, 0.0), epsilon = 1e-12);

        // Already separating
        let none = anchored_response(
            Vec2::ZERO,
            Vec2::new(-1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::ZERO,
        );
        assert_eq!(none, None);
    }

    #[test]
    fn test_stale_indices_are_ignored() {
        let mut bodies = vec![circle(0, 0.0, 0.0, 5.0)];
        bodies[0].set_velocity(Vec2::new(1.0, 0.0));
        let config = PhysicsConfig::default();

        resolve_pairs(&mut bodies, &[(0, 3), (1, 0)], &config);
        resolve_obstacle_contacts(
            &mut bodies,
            &[ObstacleContact {
                body: 9,
                point: Vec2::ZERO,
                radius: 0.0,
            }],
            &config,
        );
        assert_eq!(bodies[0].velocity(), Vec2::new(1.0, 0.0));
    }
}
