//! Looping ring of shots flying out from a point.
//!
//! Every shot of the ring sits at the same radius, which grows with time and
//! wraps at `radius_max`. The ring fades as it grows: alpha is
//! `255 * (1 - t)^2` with `t = radius / radius_max`. Like the other effects it
//! is a pure function of time.

use bevy_ecs::prelude::Component;
use std::f32::consts::TAU;

use crate::components::sprite::SpriteHandle;
use crate::math::Vector2;
use crate::render::{BlendMode, ScopedSpriteState, SpriteRenderer, draw_oriented, scale_alpha};

pub const DEFAULT_SHOTS: u32 = 128;
pub const DEFAULT_RADIUS_MAX: u32 = 250;
pub const DEFAULT_MS_PER_UNIT: u32 = 4;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct RadialBurst {
    pub center: Vector2,
    pub shots: u32,
    pub radius_max: u32,
    /// Milliseconds it takes the ring to grow by one unit.
    pub ms_per_unit: u32,
    pub sprite: SpriteHandle,
}

impl RadialBurst {
    pub fn new(center: Vector2, sprite: SpriteHandle) -> Self {
        Self {
            center,
            shots: DEFAULT_SHOTS,
            radius_max: DEFAULT_RADIUS_MAX,
            ms_per_unit: DEFAULT_MS_PER_UNIT,
            sprite,
        }
    }

    pub fn radius_at(&self, ms_now: u32) -> f32 {
        ((ms_now / self.ms_per_unit.max(1)) % self.radius_max.max(1)) as f32
    }

    pub fn alpha_at(&self, ms_now: u32) -> u8 {
        let t = self.radius_at(ms_now) / self.radius_max.max(1) as f32;
        scale_alpha(255, (1.0 - t) * (1.0 - t))
    }

    /// Centre of shot `index`, whose base sits on the ring.
    pub fn shot_center(&self, index: u32, ms_now: u32) -> Vector2 {
        let unit = Vector2::from_angle(self.shot_angle(index));
        self.sprite
            .center_for_base_at(self.center + unit * self.radius_at(ms_now), unit)
    }

    pub fn shot_angle(&self, index: u32) -> f32 {
        TAU * index as f32 / self.shots.max(1) as f32
    }

    pub fn draw<R: SpriteRenderer + ?Sized>(&self, renderer: &mut R, ms_now: u32) {
        let alpha = self.alpha_at(ms_now);
        let mut scope = ScopedSpriteState::new(renderer, self.sprite.id);
        scope.apply(|state| {
            state.alpha = alpha;
            state.blend = BlendMode::Additive;
        });
        for i in 0..self.shots {
            let center = self.shot_center(i, ms_now);
            draw_oriented(&mut *scope, &self.sprite, center, self.shot_angle(i));
        }
    }
}
