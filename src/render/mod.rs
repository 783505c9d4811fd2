//! Renderer boundary for the effects.
//!
//! Effects never talk to a graphics API directly. They issue calls against
//! [`SpriteRenderer`], whose single drawing primitive is "draw this sprite
//! centred at P, rotated by θ around its centre". Alpha modulation, color
//! modulation and blend mode are per-sprite state, read and written through
//! the same trait.
//!
//! State changes made while drawing an effect are always scoped with
//! [`ScopedSpriteState`]: the previous state is captured when the scope opens
//! and written back when it drops, so a panicking draw call cannot leak an
//! additive blend or a faded alpha into whatever is drawn next.
//!
//! # Coordinate system
//!
//! Centres are world coordinates with y pointing up and angles are
//! counter-clockwise radians. Backends convert to their own screen space.
//!
//! # Implementations
//!
//! - [`crate::resources::drawlist::DrawList`] – records draw intents
//! - `raylib_backend::RaylibScreen` – draws through raylib (feature `window`)

#[cfg(feature = "window")]
pub mod raylib_backend;

use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

use crate::components::color::Rgba;
use crate::components::sprite::{SpriteHandle, SpriteId};
use crate::math::Vector2;

/// How a sprite's pixels are combined with what is already on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlendMode {
    /// Regular alpha blending.
    #[default]
    Blend,
    /// Additive blending used by glowing effects.
    Additive,
    /// Source pixels replace the destination, alpha included.
    None,
}

/// Mirror flags applied after rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// Per-sprite modulation applied to every draw of that sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteState {
    pub alpha: u8,
    pub color: Rgba,
    pub blend: BlendMode,
}

impl Default for SpriteState {
    fn default() -> Self {
        Self {
            alpha: 255,
            color: Rgba::WHITE,
            blend: BlendMode::Blend,
        }
    }
}

/// Drawing surface the effects render into.
pub trait SpriteRenderer {
    /// Draw `sprite` centred at `center`, rotated by `angle` radians around
    /// its centre. `angle` is applied as-is; see [`draw_oriented`] for the
    /// facing-aware variant.
    fn draw_sprite(&mut self, sprite: &SpriteHandle, center: Vector2, angle: f32, flip: Flip);

    fn sprite_state(&self, sprite: SpriteId) -> SpriteState;

    fn set_sprite_state(&mut self, sprite: SpriteId, state: SpriteState);
}

/// Draw `sprite` so that its artwork points along `angle`, whatever way the
/// image itself faces.
pub fn draw_oriented<R: SpriteRenderer + ?Sized>(
    renderer: &mut R,
    sprite: &SpriteHandle,
    center: Vector2,
    angle: f32,
) {
    renderer.draw_sprite(sprite, center, angle + sprite.facing.angle_offset(), Flip::None);
}

/// Scale an 8-bit alpha by `factor`, clamped to `[0, 1]`.
pub fn scale_alpha(alpha: u8, factor: f32) -> u8 {
    (alpha as f32 * factor.clamp(0.0, 1.0)) as u8
}

/// Temporarily modified sprite state, restored on drop.
///
/// Derefs to the wrapped renderer so draws can be issued while the scope is
/// open.
pub struct ScopedSpriteState<'r, R: SpriteRenderer + ?Sized> {
    renderer: &'r mut R,
    sprite: SpriteId,
    saved: SpriteState,
}

impl<'r, R: SpriteRenderer + ?Sized> ScopedSpriteState<'r, R> {
    pub fn new(renderer: &'r mut R, sprite: SpriteId) -> Self {
        let saved = renderer.sprite_state(sprite);
        Self {
            renderer,
            sprite,
            saved,
        }
    }

    /// State in effect when the scope was opened.
    pub fn saved(&self) -> SpriteState {
        self.saved
    }

    pub fn apply(&mut self, change: impl FnOnce(&mut SpriteState)) {
        let mut state = self.renderer.sprite_state(self.sprite);
        change(&mut state);
        self.renderer.set_sprite_state(self.sprite, state);
    }
}

impl<R: SpriteRenderer + ?Sized> Deref for ScopedSpriteState<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        &*self.renderer
    }
}

impl<R: SpriteRenderer + ?Sized> DerefMut for ScopedSpriteState<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut *self.renderer
    }
}

impl<R: SpriteRenderer + ?Sized> Drop for ScopedSpriteState<'_, R> {
    fn drop(&mut self) {
        self.renderer.set_sprite_state(self.sprite, self.saved);
    }
}

/// Draw `sprite` oriented along `angle` with its alpha scaled by `factor`
/// for this one call.
pub fn draw_faded<R: SpriteRenderer + ?Sized>(
    renderer: &mut R,
    sprite: &SpriteHandle,
    center: Vector2,
    angle: f32,
    factor: f32,
) {
    let mut scope = ScopedSpriteState::new(renderer, sprite.id);
    let alpha = scale_alpha(scope.saved().alpha, factor);
    scope.apply(|state| state.alpha = alpha);
    draw_oriented(&mut *scope, sprite, center, angle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::sprite::Facing;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[derive(Default)]
    struct Probe {
        state: SpriteState,
        draws: Vec<(f32, u8)>,
        panic_on_draw: bool,
    }

    impl SpriteRenderer for Probe {
        fn draw_sprite(&mut self, _sprite: &SpriteHandle, _center: Vector2, angle: f32, _flip: Flip) {
            if self.panic_on_draw {
                panic!("backend failure");
            }
            self.draws.push((angle, self.state.alpha));
        }

        fn sprite_state(&self, _sprite: SpriteId) -> SpriteState {
            self.state
        }

        fn set_sprite_state(&mut self, _sprite: SpriteId, state: SpriteState) {
            self.state = state;
        }
    }

    fn sprite(facing: Facing) -> SpriteHandle {
        SpriteHandle::new(7, 8.0, 8.0, facing)
    }

    #[test]
    fn test_scope_restores_on_drop() {
        let mut probe = Probe::default();
        {
            let mut scope = ScopedSpriteState::new(&mut probe, SpriteId(7));
            scope.apply(|s| {
                s.alpha = 10;
                s.blend = BlendMode::Additive;
            });
            assert_eq!(scope.sprite_state(SpriteId(7)).alpha, 10);
        }
        assert_eq!(probe.state, SpriteState::default());
    }

    #[test]
    fn test_scope_restores_on_panic() {
        let mut probe = Probe {
            panic_on_draw: true,
            ..Default::default()
        };
        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut scope = ScopedSpriteState::new(&mut probe, SpriteId(7));
            scope.apply(|s| s.blend = BlendMode::Additive);
            draw_oriented(&mut *scope, &sprite(Facing::Right), Vector2::ZERO, 0.0);
        }));
        assert!(result.is_err());
        assert_eq!(probe.state.blend, BlendMode::Blend);
    }

    #[test]
    fn test_draw_oriented_adds_facing_offset() {
        let mut probe = Probe::default();
        draw_oriented(&mut probe, &sprite(Facing::Up), Vector2::ZERO, 1.0);
        draw_oriented(&mut probe, &sprite(Facing::Right), Vector2::ZERO, 1.0);
        assert!((probe.draws[0].0 - (1.0 - std::f32::consts::FRAC_PI_2)).abs() < 1e-6);
        assert!((probe.draws[1].0 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_draw_faded_scales_current_alpha() {
        let mut probe = Probe::default();
        probe.state.alpha = 200;
        draw_faded(&mut probe, &sprite(Facing::Right), Vector2::ZERO, 0.0, 0.5);
        assert_eq!(probe.draws[0].1, 100);
        assert_eq!(probe.state.alpha, 200);
    }

    #[test]
    fn test_scale_alpha_clamps() {
        assert_eq!(scale_alpha(255, 2.0), 255);
        assert_eq!(scale_alpha(255, -1.0), 0);
        assert_eq!(scale_alpha(255, 1.0), 255);
    }
}
