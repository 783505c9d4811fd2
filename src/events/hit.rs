//! Projectile hit event.
//!
//! Whatever decides that a shot struck something (a collision pass, a
//! scripted rule, the random hit roll of the demo) triggers a [`HitEvent`]
//! for the shot's slot. The [`hit_observer`] forwards it to the
//! [`AnimationPool`], where the first accepted hit wins.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::animationpool::AnimationPool;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitEvent {
    /// Slot of the projectile in the [`AnimationPool`].
    pub slot: usize,
    pub ms: u32,
}

pub fn hit_observer(trigger: On<HitEvent>, mut projectiles: ResMut<AnimationPool>) {
    let event = trigger.event();
    if projectiles.hit(event.slot, event.ms) {
        debug!("Projectile in slot {} hit at {} ms", event.slot, event.ms);
    }
}
