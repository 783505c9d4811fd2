//! Rotating swirls around a point.
//!
//! `count` additive sprites, each tracing a figure-eight around `center`.
//! Swirl `i` sits at angle `a_i = (i * ms / (4 * count)) % 360` degrees and
//! is pushed out by `movement_radius * 15 * i / count`, so outer swirls move
//! both wider and faster. Each sprite is also rotated by `a_i`. Everything is
//! a pure function of time.

use bevy_ecs::prelude::Component;
use std::f32::consts::FRAC_PI_2;

use crate::components::sprite::SpriteHandle;
use crate::math::Vector2;
use crate::render::{BlendMode, ScopedSpriteState, SpriteRenderer, draw_oriented};

pub const DEFAULT_SWIRLS: u32 = 64;
pub const DEFAULT_MOVEMENT_RADIUS: f32 = 10.0;
pub const DEFAULT_ALPHA: u8 = 128;
const RADIUS_FACTOR_MAX: f32 = 15.0;
const MS_PER_DEGREE_PER_SWIRL: u64 = 4;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct RotatingSwirls {
    pub center: Vector2,
    pub count: u32,
    pub movement_radius: f32,
    pub alpha: u8,
    pub sprite: SpriteHandle,
}

impl RotatingSwirls {
    pub fn new(center: Vector2, sprite: SpriteHandle) -> Self {
        Self {
            center,
            count: DEFAULT_SWIRLS,
            movement_radius: DEFAULT_MOVEMENT_RADIUS,
            alpha: DEFAULT_ALPHA,
            sprite,
        }
    }

    /// Whole degrees swirl `index` has turned at `ms_now`, in `[0, 360)`.
    pub fn angle_degrees(&self, index: u32, ms_now: u32) -> u32 {
        let divisor = MS_PER_DEGREE_PER_SWIRL * u64::from(self.count.max(1));
        (u64::from(index) * u64::from(ms_now) / divisor % 360) as u32
    }

    /// How far swirl `index` strays from the centre, in movement radii.
    pub fn radius_factor(&self, index: u32) -> f32 {
        RADIUS_FACTOR_MAX * index as f32 / self.count.max(1) as f32
    }

    pub fn swirl_center(&self, index: u32, ms_now: u32) -> Vector2 {
        let angle = (self.angle_degrees(index, ms_now) as f32).to_radians();
        let reach = self.movement_radius * self.radius_factor(index);
        let offset = Vector2::new((2.0 * angle - FRAC_PI_2).cos(), -angle.sin());
        self.center + offset * reach
    }

    pub fn draw<R: SpriteRenderer + ?Sized>(&self, renderer: &mut R, ms_now: u32) {
        let alpha = self.alpha;
        let mut scope = ScopedSpriteState::new(renderer, self.sprite.id);
        scope.apply(|state| {
            state.alpha = alpha;
            state.blend = BlendMode::Additive;
        });
        for i in 0..self.count {
            let angle = (self.angle_degrees(i, ms_now) as f32).to_radians();
            draw_oriented(&mut *scope, &self.sprite, self.swirl_center(i, ms_now), angle);
        }
    }
}
