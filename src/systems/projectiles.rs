//! Projectile systems.
//!
//! - [`projectile_hit_roll_system`] – random hits standing in for a real
//!   collision pass
//! - [`projectile_render_system`] – retire ended shots, draw the rest

use bevy_ecs::prelude::*;

use crate::events::hit::HitEvent;
use crate::resources::animationpool::AnimationPool;
use crate::resources::drawlist::DrawList;
use crate::resources::effectsrng::{EffectsRng, UniformSource};
use crate::resources::gameconfig::GameConfig;
use crate::resources::worldtime::WorldTime;

/// Each frame, every hittable projectile is hit with probability
/// `hit_chance`.
pub fn projectile_hit_roll_system(
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    projectiles: Res<AnimationPool>,
    mut rng: ResMut<EffectsRng>,
    mut commands: Commands,
) {
    if config.hit_chance <= 0.0 {
        return;
    }
    let now = time.now_ms;
    for (slot, anim) in projectiles.iter().enumerate() {
        if anim.can_be_hit(now) && rng.next_f32() < config.hit_chance {
            commands.trigger(HitEvent { slot, ms: now });
        }
    }
}

/// Stop ended projectiles, then draw every active one into the [`DrawList`].
pub fn projectile_render_system(
    time: Res<WorldTime>,
    mut projectiles: ResMut<AnimationPool>,
    mut draw_list: ResMut<DrawList>,
) {
    let now = time.now_ms;
    projectiles.retire_ended(now);
    projectiles.draw_all(&mut *draw_list, now);
}
