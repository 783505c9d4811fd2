//! Effect systems.
//!
//! Per-frame functions run by the schedule built in [`crate::game`].
//!
//! Submodules overview
//! - [`particles`] – clear the draw list, update and draw the particle pool
//! - [`projectiles`] – random hit rolls, retire and draw projectiles
//! - [`radialburst`] – draw radial bursts
//! - [`shooter`] – aim shooters and fire due shots
//! - [`sparks`] – spawn ambient spark batches
//! - [`swirl`] – draw rotating swirls
//! - [`time`] – advance the simulation clock

pub mod particles;
pub mod projectiles;
pub mod radialburst;
pub mod shooter;
pub mod sparks;
pub mod swirl;
pub mod time;
