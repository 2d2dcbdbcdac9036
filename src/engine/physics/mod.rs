// Circle collision engine: bodies, static obstacles, and the sub-stepped solver

pub mod body;
pub mod broad_phase;
pub mod collision;
pub mod config;
pub mod dynamics;
pub mod error;
pub mod integrator;
pub mod interaction;
pub mod obstacle;
mod world;

pub use body::{BodyHandle, Circle};
pub use collision::{CollisionRecord, ObstacleContact};
pub use config::{PhysicsConfig, DEFAULT_CONFIG};
pub use error::PhysicsError;
pub use interaction::{CapsuleEndpoint, EndpointKind, Selection};
pub use obstacle::{Capsule, Edge, Rectangle};
pub use world::PhysicsWorld;
