//! plasmafx library.
//!
//! Time-driven 2D effects: a pool of particle batches, staged plasma
//! projectiles and the systems that spawn and draw them. Exposed as a
//! library for the demo binary and the integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod math;
pub mod render;
pub mod resources;
pub mod systems;
