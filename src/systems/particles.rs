//! Particle pool rendering.

use bevy_ecs::prelude::*;

use crate::resources::drawlist::DrawList;
use crate::resources::particlepool::ParticleBatchPool;
use crate::resources::worldtime::WorldTime;

/// Start a new frame of draw intents.
pub fn clear_draw_list_system(mut draw_list: ResMut<DrawList>) {
    draw_list.clear();
}

/// Reclaim expired batches and draw the live ones.
pub fn particle_render_system(
    time: Res<WorldTime>,
    mut pool: ResMut<ParticleBatchPool>,
    mut draw_list: ResMut<DrawList>,
) {
    pool.update_and_render(&mut *draw_list, time.now_ms);
}
