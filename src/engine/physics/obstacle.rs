use super::error::PhysicsError;
use crate::core::math::{clamp, Vec2};

/// A static line obstacle with round ends
///
/// Only the interaction controller moves its endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Capsule {
    pub(crate) start: Vec2,
    pub(crate) end: Vec2,
    radius: f64,
}

impl Capsule {
    /// Create a capsule from `start` to `end` with half-thickness `radius`
    pub fn new(start: Vec2, end: Vec2, radius: f64) -> Result<Self, PhysicsError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(PhysicsError::InvalidGeometry(format!(
                "capsule radius must be positive and finite, got {radius}"
            )));
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(PhysicsError::InvalidGeometry(format!(
                "capsule endpoints must be finite, got {start} -> {end}"
            )));
        }
        Ok(Self { start, end, radius })
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn end(&self) -> Vec2 {
        self.end
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Closest point on the segment to `point`
    ///
    /// Returns `None` for a zero-length segment, which has no direction.
    pub fn closest_point(&self, point: Vec2) -> Option<Vec2> {
        let segment = self.end - self.start;
        let length_sq = segment.length_squared();
        if length_sq == 0.0 {
            return None;
        }
        let t = clamp((point - self.start).dot(segment) / length_sq, 0.0, 1.0);
        Some(self.start + segment * t)
    }
}

/// A static axis-aligned box
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    upper_left: Vec2,
    lower_right: Vec2,
}

/// One side of a [`Rectangle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// Unit normal pointing out of the rectangle (y grows downward)
    pub fn outward_normal(self) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(0.0, -1.0),
            Edge::Bottom => Vec2::new(0.0, 1.0),
            Edge::Left => Vec2::new(-1.0, 0.0),
            Edge::Right => Vec2::new(1.0, 0.0),
        }
    }
}

impl Rectangle {
    /// Create a rectangle from its corners; `upper_left` must be strictly
    /// above and left of `lower_right`
    pub fn new(upper_left: Vec2, lower_right: Vec2) -> Result<Self, PhysicsError> {
        if !upper_left.is_finite() || !lower_right.is_finite() {
            return Err(PhysicsError::InvalidGeometry(format!(
                "rectangle corners must be finite, got {upper_left} / {lower_right}"
            )));
        }
        if upper_left.x >= lower_right.x || upper_left.y >= lower_right.y {
            return Err(PhysicsError::InvalidGeometry(format!(
                "rectangle corners out of order: {upper_left} / {lower_right}"
            )));
        }
        Ok(Self {
            upper_left,
            lower_right,
        })
    }

    pub fn upper_left(&self) -> Vec2 {
        self.upper_left
    }

    pub fn lower_right(&self) -> Vec2 {
        self.lower_right
    }

    /// Nearest point of the (filled) rectangle to `point`
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.upper_left, self.lower_right)
    }

    /// Nearest edge to an interior point, and the point snapped onto it
    ///
    /// Ties go to top, then bottom, then left, then right.
    pub fn nearest_edge(&self, point: Vec2) -> (Edge, Vec2) {
        let candidates = [
            (Edge::Top, point.y - self.upper_left.y),
            (Edge::Bottom, self.lower_right.y - point.y),
            (Edge::Left, point.x - self.upper_left.x),
            (Edge::Right, self.lower_right.x - point.x),
        ];

        let mut best = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.1 < best.1 {
                best = *candidate;
            }
        }

        let snapped = match best.0 {
            Edge::Top => Vec2::new(point.x, self.upper_left.y),
            Edge::Bottom => Vec2::new(point.x, self.lower_right.y),
            Edge::Left => Vec2::new(self.upper_left.x, point.y),
            Edge::Right => Vec2::new(self.lower_right.x, point.y),
        };
        (best.0, snapped)
    }
}
