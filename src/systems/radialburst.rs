//! Radial burst rendering.

use bevy_ecs::prelude::*;

use crate::components::radialburst::RadialBurst;
use crate::resources::drawlist::DrawList;
use crate::resources::worldtime::WorldTime;

/// Draw every [`RadialBurst`] entity at the current time.
pub fn radial_burst_render_system(
    time: Res<WorldTime>,
    query: Query<&RadialBurst>,
    mut draw_list: ResMut<DrawList>,
) {
    for burst in query.iter() {
        burst.draw(&mut *draw_list, time.now_ms);
    }
}
