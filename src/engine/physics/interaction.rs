// Pointer gestures: drag, fling, and capsule endpoint editing
//
// Selections are stored as body handles, never storage indices, because
// the broad phase reorders bodies every sub-step.

use super::body::{BodyHandle, Circle};
use super::config::PhysicsConfig;
use super::obstacle::Capsule;
use super::world::PhysicsWorld;
use crate::core::math::{remap_clamped, Vec2};

/// Which end of a capsule is held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    Start,
    End,
}

/// A held capsule endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapsuleEndpoint {
    pub capsule: usize,
    pub end: EndpointKind,
}

/// Current pointer selections
///
/// Each slot is independent; the same body may sit in both body slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Body held by the drag gesture
    pub drag: Option<BodyHandle>,
    /// Body anchored by the fling gesture
    pub fling: Option<BodyHandle>,
    /// Capsule endpoint being repositioned
    pub capsule: Option<CapsuleEndpoint>,
}

/// Index of the body under `point`
///
/// When bodies overlap, the one whose centre is closest wins.
pub fn body_at(bodies: &[Circle], point: Vec2) -> Option<usize> {
    bodies
        .iter()
        .enumerate()
        .filter(|(_, body)| body.contains(point))
        .min_by(|(_, a), (_, b)| {
            a.position
                .distance_squared(point)
                .total_cmp(&b.position.distance_squared(point))
        })
        .map(|(index, _)| index)
}

/// Index of the body under `point`, or failing that the closest one
pub fn nearest_body(bodies: &[Circle], point: Vec2) -> Option<usize> {
    body_at(bodies, point).or_else(|| {
        bodies
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                a.position
                    .distance_squared(point)
                    .total_cmp(&b.position.distance_squared(point))
            })
            .map(|(index, _)| index)
    })
}

/// Closest capsule endpoint whose end cap contains `point`
pub fn capsule_endpoint_at(capsules: &[Capsule], point: Vec2) -> Option<CapsuleEndpoint> {
    let mut best: Option<(CapsuleEndpoint, f64)> = None;
    for (index, capsule) in capsules.iter().enumerate() {
        for (end, position) in [
            (EndpointKind::Start, capsule.start()),
            (EndpointKind::End, capsule.end()),
        ] {
            let distance = position.distance(point);
            if distance > capsule.radius() {
                continue;
            }
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((CapsuleEndpoint { capsule: index, end }, distance));
            }
        }
    }
    best.map(|(endpoint, _)| endpoint)
}

/// Fling multiplier for a body of the given area
///
/// Remapped between the smallest and largest area seen so far, so the same
/// gesture throws a small body harder than a large one.
pub fn fling_scale(area: f64, area_range: Option<(f64, f64)>, config: &PhysicsConfig) -> f64 {
    match area_range {
        Some((min, max)) if max > min => remap_clamped(
            area,
            min,
            max,
            config.fling_scale_small,
            config.fling_scale_large,
        ),
        _ => config.fling_scale_small,
    }
}

impl PhysicsWorld {
    /// Current selections
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    fn set_drag(&mut self, index: usize) {
        self.clear_drag();
        let body = &mut self.bodies[index];
        body.selected = true;
        self.selection.drag = Some(body.handle());
        log::debug!("Selected body {:?}", body.handle());
    }

    fn clear_drag(&mut self) {
        if let Some(handle) = self.selection.drag.take() {
            if let Some(body) = self.body_mut(handle) {
                body.selected = false;
            }
        }
    }

    /// Select the body under `point` for dragging
    ///
    /// Refused while a capsule endpoint is held.
    pub fn select_at(&mut self, point: Vec2) -> bool {
        if self.selection.capsule.is_some() {
            return false;
        }
        match body_at(&self.bodies, point) {
            Some(index) => {
                self.set_drag(index);
                true
            }
            None => false,
        }
    }

    /// Select the body under `point`, or the nearest one, for dragging
    pub fn select_nearest(&mut self, point: Vec2) -> bool {
        if self.selection.capsule.is_some() {
            return false;
        }
        match nearest_body(&self.bodies, point) {
            Some(index) => {
                self.set_drag(index);
                true
            }
            None => false,
        }
    }

    /// Teleport the drag selection to `point`, cancelling its velocity
    pub fn move_selected_to(&mut self, point: Vec2) -> bool {
        let Some(handle) = self.selection.drag else {
            return false;
        };
        match self.body_mut(handle) {
            Some(body) => {
                body.position = point;
                body.velocity = Vec2::ZERO;
                true
            }
            None => false,
        }
    }

    /// Pull the drag selection toward `point` with a spring-like force
    pub fn apply_force_to_selected(&mut self, point: Vec2, speed_multiplier: f64) -> bool {
        let Some(handle) = self.selection.drag else {
            return false;
        };
        let spring = self.config.drag_spring;
        match self.body_mut(handle) {
            Some(body) => {
                let pull = (point - body.position) * (spring * speed_multiplier);
                body.apply_force(pull);
                true
            }
            None => false,
        }
    }

    /// Release the drag selection
    pub fn deselect(&mut self) {
        self.clear_drag();
    }

    /// Position of the drag selection
    pub fn selected_position(&self) -> Option<Vec2> {
        self.selection
            .drag
            .and_then(|handle| self.body(handle))
            .map(Circle::position)
    }

    /// Anchor the body under `point` for a fling
    ///
    /// Refused while a capsule endpoint is held.
    pub fn dynamic_select_at(&mut self, point: Vec2) -> bool {
        if self.selection.capsule.is_some() {
            return false;
        }
        let found = body_at(&self.bodies, point).map(|index| self.bodies[index].handle());
        self.selection.fling = found;
        found.is_some()
    }

    /// Anchor the body under `point`, or the nearest one, for a fling
    pub fn dynamic_select_nearest(&mut self, point: Vec2) -> bool {
        if self.selection.capsule.is_some() {
            return false;
        }
        let found = nearest_body(&self.bodies, point).map(|index| self.bodies[index].handle());
        self.selection.fling = found;
        found.is_some()
    }

    /// Release the fling at `point`
    ///
    /// The body is pushed along the vector from `point` back to it, scaled
    /// inversely by its area.
    pub fn dynamic_release(&mut self, point: Vec2) -> bool {
        let Some(handle) = self.selection.fling.take() else {
            return false;
        };
        let Some(area) = self.body(handle).map(Circle::area) else {
            return false;
        };
        let scale = fling_scale(area, self.area_range, &self.config);
        let strength = self.config.fling_strength * scale;
        match self.body_mut(handle) {
            Some(body) => {
                let impulse = (body.position - point) * strength;
                body.apply_force(impulse);
                log::debug!("Flung body {:?} with impulse {}", handle, impulse);
                true
            }
            None => false,
        }
    }

    /// Position of the fling selection
    pub fn dynamic_position(&self) -> Option<Vec2> {
        self.selection
            .fling
            .and_then(|handle| self.body(handle))
            .map(Circle::position)
    }

    /// Grab the capsule endpoint under `point`
    ///
    /// Refused while a body is held for a drag or a fling.
    pub fn select_capsule_endpoint_at(&mut self, point: Vec2) -> bool {
        if self.selection.drag.is_some() || self.selection.fling.is_some() {
            return false;
        }
        self.selection.capsule = capsule_endpoint_at(&self.capsules, point);
        if let Some(endpoint) = self.selection.capsule {
            log::debug!("Grabbed capsule endpoint {:?}", endpoint);
        }
        self.selection.capsule.is_some()
    }

    /// Move the held capsule endpoint to `point`
    pub fn move_selected_capsule_endpoint(&mut self, point: Vec2) -> bool {
        let Some(endpoint) = self.selection.capsule else {
            return false;
        };
        match self.capsules.get_mut(endpoint.capsule) {
            Some(capsule) => {
                match endpoint.end {
                    EndpointKind::Start => capsule.start = point,
                    EndpointKind::End => capsule.end = point,
                }
                true
            }
            None => false,
        }
    }

    /// Release the held capsule endpoint
    pub fn deselect_capsule(&mut self) {
        self.selection.capsule = None;
    }

    /// Position of the held capsule endpoint
    pub fn selected_capsule_endpoint(&self) -> Option<Vec2> {
        let endpoint = self.selection.capsule?;
        let capsule = self.capsules.get(endpoint.capsule)?;
        Some(match endpoint.end {
            EndpointKind::Start => capsule.start(),
            EndpointKind::End => capsule.end(),
        })
    }
}
