//! Sprite handles and their orientation convention.
//!
//! A [`SpriteHandle`] is the opaque image reference the effects work with: an
//! id the backend resolves to a texture, the size it is drawn at, and the
//! direction the artwork points to. Effects always reason about "the sprite
//! points along angle θ"; the per-asset [`Facing`] offset turns that into the
//! rotation the backend has to apply.

use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

use crate::math::Vector2;

/// Opaque id of a loaded image. Resolved by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteId(pub u32);

/// Direction the artwork points to when drawn unrotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Right,
    Up,
    Left,
    Down,
}

impl Facing {
    /// Rotation added to a requested angle so the artwork ends up pointing
    /// along it.
    pub fn angle_offset(self) -> f32 {
        match self {
            Facing::Right => 0.0,
            Facing::Up => -FRAC_PI_2,
            Facing::Left => -PI,
            Facing::Down => -PI * 1.5,
        }
    }
}

/// Image reference with the size it is drawn at.
///
/// `height` is the extent along the direction the sprite points to; the
/// projectile effects use it to anchor an image by its base or its top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteHandle {
    pub id: SpriteId,
    pub width: f32,
    pub height: f32,
    pub facing: Facing,
}

impl SpriteHandle {
    pub fn new(id: u32, width: f32, height: f32, facing: Facing) -> Self {
        Self {
            id: SpriteId(id),
            width,
            height,
            facing,
        }
    }

    /// Centre that puts the sprite's base (trailing end) at `base` when it
    /// points along `unit_direction`.
    pub fn center_for_base_at(&self, base: Vector2, unit_direction: Vector2) -> Vector2 {
        base + unit_direction * (self.height / 2.0)
    }

    /// Centre that puts the sprite's top (leading end) at `top` when it
    /// points along `unit_direction`.
    pub fn center_for_top_at(&self, top: Vector2, unit_direction: Vector2) -> Vector2 {
        top - unit_direction * (self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_facing_offsets() {
        assert!(approx_eq(Facing::Right.angle_offset(), 0.0));
        assert!(approx_eq(Facing::Up.angle_offset(), -FRAC_PI_2));
        assert!(approx_eq(Facing::Left.angle_offset(), -PI));
        assert!(approx_eq(Facing::Down.angle_offset(), -1.5 * PI));
    }

    #[test]
    fn test_center_for_base_moves_forward() {
        let s = SpriteHandle::new(1, 4.0, 10.0, Facing::Up);
        let c = s.center_for_base_at(Vector2::new(1.0, 1.0), Vector2::new(0.0, 1.0));
        assert!(approx_eq(c.x, 1.0));
        assert!(approx_eq(c.y, 6.0));
    }

    #[test]
    fn test_center_for_top_moves_backward() {
        let s = SpriteHandle::new(1, 4.0, 10.0, Facing::Up);
        let c = s.center_for_top_at(Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0));
        assert!(approx_eq(c.x, -5.0));
        assert!(approx_eq(c.y, 0.0));
    }
}
