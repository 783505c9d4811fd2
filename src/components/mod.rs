//! Effect data and per-object behaviour.
//!
//! Submodules overview:
//! - [`color`] – RGBA tint
//! - [`particles`] – particle batch data and the intensity envelope
//! - [`projectile`] – staged plasma projectile animation
//! - [`radialburst`] – looping ring of outward shots
//! - [`shooter`] – firing character: position, aim and firing rate
//! - [`sprite`] – sprite handles and facing
//! - [`swirl`] – rotating swirls around a point

pub mod color;
pub mod particles;
pub mod projectile;
pub mod radialburst;
pub mod shooter;
pub mod sprite;
pub mod swirl;
