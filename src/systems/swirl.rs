//! Rotating swirl rendering.

use bevy_ecs::prelude::*;

use crate::components::swirl::RotatingSwirls;
use crate::resources::drawlist::DrawList;
use crate::resources::worldtime::WorldTime;

/// Draw every [`RotatingSwirls`] entity at the current time.
pub fn swirl_render_system(
    time: Res<WorldTime>,
    query: Query<&RotatingSwirls>,
    mut draw_list: ResMut<DrawList>,
) {
    for swirls in query.iter() {
        swirls.draw(&mut *draw_list, time.now_ms);
    }
}
