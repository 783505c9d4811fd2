//! Time update system.
//!
//! Advances the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, before the schedule runs.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance the clock by `dt_ms` milliseconds.
///
/// The clock wraps after `u32::MAX` ms like the timestamps it feeds.
pub fn update_world_time(world: &mut World, dt_ms: u32) {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.now_ms = wt.now_ms.wrapping_add(dt_ms);
    wt.delta_ms = dt_ms;
    wt.frame_count += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_world_time_accumulates() {
        let mut world = World::new();
        world.insert_resource(WorldTime::starting_at(100));
        update_world_time(&mut world, 16);
        update_world_time(&mut world, 17);
        let wt = world.resource::<WorldTime>();
        assert_eq!(wt.now_ms, 133);
        assert_eq!(wt.delta_ms, 17);
        assert_eq!(wt.frame_count, 2);
    }
}
