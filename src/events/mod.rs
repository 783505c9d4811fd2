//! Event types and observers used by the effects.
//!
//! Events decouple whoever decides that something happens (a shooter, a hit
//! test, an ambient spawner) from the pools that hold the resulting effects.
//!
//! Submodules:
//! - [`burst`] – spawn any particle batch into the pool
//! - [`fire`] – a shot leaves a weapon: muzzle flash plus projectile
//! - [`hit`] – a projectile struck something and starts its splash
pub mod burst;
pub mod fire;
pub mod hit;
