// Interactive 2D circle collision simulation

pub mod core;
pub mod engine;
pub mod game;
