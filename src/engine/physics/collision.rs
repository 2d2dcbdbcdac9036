// Narrow phase and static (positional) resolution
//
// Every test here corrects positions immediately and records the contact
// for the dynamic resolver. Velocities are left alone, except for the deep
// rectangle case, which bounces the circle straight away.

use super::body::Circle;
use super::broad_phase::scan_limit;
use super::obstacle::{Capsule, Edge, Rectangle};
use crate::core::math::Vec2;

/// Contact between a circle and a static obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleContact {
    /// Storage index of the circle at the time of the contact
    pub body: usize,
    /// Closest point on the obstacle's core (segment or box surface)
    pub point: Vec2,
    /// Radius around `point` that the obstacle occupies (0 for boxes)
    pub radius: f64,
}

/// Contacts found during one sub-step
///
/// Indices refer to body storage order of that sub-step and become stale
/// as soon as the next sort runs.
#[derive(Debug, Default)]
pub struct CollisionRecord {
    pairs: Vec<(usize, usize)>,
    contacts: Vec<ObstacleContact>,
    checks: u64,
}

impl CollisionRecord {
    pub fn new() -> Self {
        Self {
            pairs: Vec::with_capacity(64),
            contacts: Vec::with_capacity(16),
            checks: 0,
        }
    }

    /// Drop this sub-step's contacts (call at the start of every sub-step)
    pub fn clear(&mut self) {
        self.pairs.clear();
        self.contacts.clear();
    }

    /// Reset the narrow-phase test counter (call at the start of a frame)
    pub fn reset_checks(&mut self) {
        self.checks = 0;
    }

    /// Circle-circle pairs `(i, j)` with `i < j`, in the order found
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Circle-obstacle contacts, in the order found
    pub fn contacts(&self) -> &[ObstacleContact] {
        &self.contacts
    }

    /// Narrow-phase tests run since the last reset
    pub fn checks(&self) -> u64 {
        self.checks
    }
}

/// Borrow two distinct bodies mutably, `i < j`
pub(crate) fn pair_mut(bodies: &mut [Circle], i: usize, j: usize) -> (&mut Circle, &mut Circle) {
    debug_assert!(i < j);
    let (head, tail) = bodies.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

/// Push two overlapping circles apart
///
/// The split is inversely proportional to area, so the heavier body moves
/// less. A drag-selected body never moves; the other one takes the whole
/// penetration. Returns whether the circles overlapped.
pub fn separate_circles(a: &mut Circle, b: &mut Circle) -> bool {
    let offset = a.position - b.position;
    let reach = a.radius() + b.radius();
    let distance_sq = offset.length_squared();
    if distance_sq >= reach * reach {
        return false;
    }

    let distance = distance_sq.sqrt();
    if distance == 0.0 {
        log::trace!(
            "skipping coincident bodies {:?} and {:?}",
            a.handle(),
            b.handle()
        );
        return false;
    }

    // Unit axis from b towards a; penetration is negative while overlapping
    let axis = offset / distance;
    let penetration = distance - reach;

    if a.selected {
        b.position += axis * penetration;
    } else if b.selected {
        a.position -= axis * penetration;
    } else {
        let total = a.area() + b.area();
        let a_share = b.area() / total;
        let b_share = a.area() / total;
        a.position -= axis * (penetration * a_share);
        b.position += axis * (penetration * b_share);
    }
    true
}

/// Test and separate every candidate circle pair
///
/// `bodies` must be sorted by x; the scan for each body stops at the first
/// candidate beyond reach of the largest radius.
pub fn resolve_circle_pairs(bodies: &mut [Circle], max_radius: f64, record: &mut CollisionRecord) {
    let count = bodies.len();
    for i in 0..count {
        for j in (i + 1)..count {
            if bodies[j].position.x > scan_limit(&bodies[i], max_radius) {
                break;
            }
            record.checks += 1;

            let (a, b) = pair_mut(bodies, i, j);
            if separate_circles(a, b) {
                record.pairs.push((i, j));
            }
        }
    }
}

/// Push a circle out of a capsule, returning the contact point on the segment
pub fn separate_from_capsule(body: &mut Circle, capsule: &Capsule) -> Option<Vec2> {
    let Some(closest) = capsule.closest_point(body.position) else {
        log::trace!("skipping zero-length capsule at {}", capsule.start());
        return None;
    };

    let offset = body.position - closest;
    let reach = body.radius() + capsule.radius();
    let distance_sq = offset.length_squared();
    if distance_sq >= reach * reach {
        return None;
    }

    let distance = distance_sq.sqrt();
    if distance == 0.0 {
        log::trace!("skipping {:?} centred on a capsule segment", body.handle());
        return None;
    }

    body.position += offset / distance * (reach - distance);
    Some(closest)
}

/// Test and separate every circle against every capsule
pub fn resolve_capsules(bodies: &mut [Circle], capsules: &[Capsule], record: &mut CollisionRecord) {
    for (index, body) in bodies.iter_mut().enumerate() {
        for capsule in capsules {
            record.checks += 1;
            if let Some(point) = separate_from_capsule(body, capsule) {
                record.contacts.push(ObstacleContact {
                    body: index,
                    point,
                    radius: capsule.radius(),
                });
            }
        }
    }
}

/// Outcome of a circle-rectangle test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RectangleHit {
    /// Centre was outside; pushed away from this surface point
    Surface(Vec2),
    /// Centre was inside; snapped out through this edge and bounced
    Embedded(Edge),
}

/// Push a circle out of a rectangle
pub fn separate_from_rectangle(body: &mut Circle, rect: &Rectangle) -> Option<RectangleHit> {
    let nearest = rect.clamp_point(body.position);
    let offset = body.position - nearest;
    let distance_sq = offset.length_squared();
    let radius = body.radius();

    if distance_sq > 0.0 {
        if distance_sq >= radius * radius {
            return None;
        }
        let distance = distance_sq.sqrt();
        body.position += offset / distance * (radius - distance);
        return Some(RectangleHit::Surface(nearest));
    }

    // Centre overshot into the box: leave through the nearest edge
    let (edge, snapped) = rect.nearest_edge(body.position);
    body.position = snapped + edge.outward_normal() * radius;
    match edge {
        Edge::Top | Edge::Bottom => body.velocity.y = -body.velocity.y,
        Edge::Left | Edge::Right => body.velocity.x = -body.velocity.x,
    }
    Some(RectangleHit::Embedded(edge))
}

/// Test and separate every circle against every rectangle
///
/// Surface contacts are recorded with radius 0 so the dynamic resolver
/// reflects them; embedded circles have already bounced.
pub fn resolve_rectangles(
    bodies: &mut [Circle],
    rectangles: &[Rectangle],
    record: &mut CollisionRecord,
) {
    for (index, body) in bodies.iter_mut().enumerate() {
        for rect in rectangles {
            record.checks += 1;
            if let Some(RectangleHit::Surface(point)) = separate_from_rectangle(body, rect) {
                record.contacts.push(ObstacleContact {
                    body: index,
                    point,
                    radius: 0.0,
                });
            }
        }
    }
}

/// Keep circles inside `[0, width] x [0, height]`
///
/// Screen edges act as walls: a circle crossing one is put back and its
/// velocity is turned to point inward. A non-positive size disables bounds.
pub fn confine_to_bounds(bodies: &mut [Circle], width: f64, height: f64) {
    if width <= 0.0 || height <= 0.0 {
        return;
    }

    for body in bodies.iter_mut() {
        let r = body.radius();
        if body.position.x < r {
            body.position.x = r;
            body.velocity.x = body.velocity.x.abs();
        } else if body.position.x > width - r {
            body.position.x = width - r;
            body.velocity.x = -body.velocity.x.abs();
        }
        if body.position.y < r {
            body.position.y = r;
            body.velocity.y = body.velocity.y.abs();
        } else if body.position.y > height - r {
            body.position.y = height - r;
            body.velocity.y = -body.velocity.y.abs();
        }
    }
}
