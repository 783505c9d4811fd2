use bevy_ecs::prelude::Resource;

/// Simulation clock in whole milliseconds.
///
/// Effects are pure functions of `now_ms`; `delta_ms` is only used by
/// systems that act per frame (shooters, sparks).
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldTime {
    pub now_ms: u32,
    pub delta_ms: u32,
    pub frame_count: u64,
}

impl WorldTime {
    pub fn starting_at(now_ms: u32) -> Self {
        WorldTime {
            now_ms,
            ..Default::default()
        }
    }
}

/// Milliseconds from `then` to `now` on the wrapping clock.
///
/// `None` when `then` lies ahead of `now`, that is when the wrapped
/// difference is above `i32::MAX`.
pub fn ms_since(now: u32, then: u32) -> Option<u32> {
    let dt = now.wrapping_sub(then);
    (dt <= i32::MAX as u32).then_some(dt)
}
