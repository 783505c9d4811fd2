//! ECS resources made available to systems.
//!
//! Overview
//! - `animationpool` – round-robin pool of projectile animations
//! - `drawlist` – recorded draw intents of the current frame
//! - `effectsrng` – uniform randomness used by spawns
//! - `gameconfig` – INI-backed settings
//! - `particlepool` – fixed-capacity particle batch pool
//! - `spritestore` – sprite handles keyed by name
//! - `worldtime` – simulation time in milliseconds
pub mod animationpool;
pub mod drawlist;
pub mod effectsrng;
pub mod gameconfig;
pub mod particlepool;
pub mod spritestore;
pub mod worldtime;
