// Sort-and-sweep along the x axis

use super::body::Circle;

/// Reorder bodies by ascending x position
///
/// A full re-sort every sub-step; positions move too much between sub-steps
/// for an incremental structure to pay off at these body counts.
pub fn sort_by_x(bodies: &mut [Circle]) {
    bodies.sort_by(|a, b| a.position.x.total_cmp(&b.position.x));
}

/// Largest x a candidate may have and still overlap `body`
///
/// With bodies sorted by x, the pair scan for `body` can stop at the first
/// candidate past this bound.
pub fn scan_limit(body: &Circle, max_radius: f64) -> f64 {
    body.position.x + body.radius() + max_radius
}
