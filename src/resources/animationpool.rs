//! Round-robin pool of projectile animations.
//!
//! A fixed number of [`ProjectileAnimation`] slots sharing one set of images
//! and durations. New shots go to the slot under the cursor, which then
//! advances modulo the pool size. What happens when that slot is still busy
//! depends on [`SlotPolicy`].

use bevy_ecs::prelude::Resource;
use log::debug;
use std::str::FromStr;

use crate::components::projectile::{
    ProjectileAnimation, ProjectileDurations, ProjectileImages, ProjectileLaunch, Stage,
};
use crate::render::SpriteRenderer;

/// Behaviour when the cursor lands on a shot that has not ended yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotPolicy {
    /// Restart the slot, cancelling the shot in flight.
    Overwrite,
    /// Refuse the spawn and keep the cursor where it is.
    #[default]
    SkipActive,
}

impl FromStr for SlotPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(SlotPolicy::Overwrite),
            "skip_active" | "skipactive" | "skip" => Ok(SlotPolicy::SkipActive),
            other => Err(format!("Unknown slot policy '{}'", other)),
        }
    }
}

impl std::fmt::Display for SlotPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotPolicy::Overwrite => write!(f, "overwrite"),
            SlotPolicy::SkipActive => write!(f, "skip_active"),
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct AnimationPool {
    slots: Vec<ProjectileAnimation>,
    cursor: usize,
    policy: SlotPolicy,
}

impl AnimationPool {
    /// `size` inert slots. A size of zero is bumped to one.
    pub fn new(
        size: usize,
        images: ProjectileImages,
        durations: ProjectileDurations,
        policy: SlotPolicy,
    ) -> Self {
        let size = size.max(1);
        Self {
            slots: vec![ProjectileAnimation::new(images, durations); size],
            cursor: 0,
            policy,
        }
    }

    /// Start a shot in the slot under the cursor.
    ///
    /// Returns the slot index, or `None` when [`SlotPolicy::SkipActive`]
    /// found the slot still running.
    pub fn spawn_at_next_slot(&mut self, launch: ProjectileLaunch, ms_now: u32) -> Option<usize> {
        let slot = self.cursor;
        let anim = &mut self.slots[slot];
        if self.policy == SlotPolicy::SkipActive
            && anim.is_active()
            && anim.stage(ms_now) != Stage::Ended
        {
            debug!("Projectile slot {} still busy, shot dropped", slot);
            return None;
        }
        anim.start(launch, ms_now);
        self.cursor = (self.cursor + 1) % self.slots.len();
        Some(slot)
    }

    /// Stop every slot whose shot has ended. Returns how many were stopped.
    pub fn retire_ended(&mut self, ms_now: u32) -> usize {
        let mut retired = 0;
        for anim in self
            .slots
            .iter_mut()
            .filter(|a| a.is_active() && a.stage(ms_now) == Stage::Ended)
        {
            anim.stop();
            retired += 1;
        }
        retired
    }

    /// Hit the shot in `slot`. Out-of-range slots are refused.
    pub fn hit(&mut self, slot: usize, ms_hit: u32) -> bool {
        self.slots
            .get_mut(slot)
            .is_some_and(|anim| anim.hit(ms_hit))
    }

    pub fn get(&self, slot: usize) -> Option<&ProjectileAnimation> {
        self.slots.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectileAnimation> {
        self.slots.iter()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|a| a.is_active()).count()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn policy(&self) -> SlotPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Draw every active slot at `ms_now`, in slot order.
    pub fn draw_all<R: SpriteRenderer + ?Sized>(&self, renderer: &mut R, ms_now: u32) {
        for anim in self.slots.iter().filter(|a| a.is_active()) {
            anim.draw(renderer, ms_now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::sprite::{Facing, SpriteHandle, SpriteId};
    use crate::math::Vector2;
    use crate::resources::drawlist::DrawList;

    fn images() -> ProjectileImages {
        ProjectileImages {
            halo: SpriteHandle::new(1, 8.0, 8.0, Facing::Up),
            fire: SpriteHandle::new(2, 8.0, 8.0, Facing::Up),
            projectile: SpriteHandle::new(3, 4.0, 16.0, Facing::Up),
            splash: SpriteHandle::new(4, 16.0, 16.0, Facing::Up),
        }
    }

    fn pool(size: usize, policy: SlotPolicy) -> AnimationPool {
        AnimationPool::new(size, images(), ProjectileDurations::default(), policy)
    }

    fn launch() -> ProjectileLaunch {
        ProjectileLaunch::toward(Vector2::new(10.0, 10.0), 0.0, 1.0)
    }

    #[test]
    fn test_new_pool_is_inert() {
        let p = pool(4, SlotPolicy::SkipActive);
        assert_eq!(p.len(), 4);
        assert_eq!(p.active_count(), 0);
        assert_eq!(p.cursor(), 0);
    }

    #[test]
    fn test_zero_size_becomes_one() {
        assert_eq!(pool(0, SlotPolicy::Overwrite).len(), 1);
    }

    #[test]
    fn test_round_robin_overwrite() {
        let mut p = pool(3, SlotPolicy::Overwrite);
        let slots: Vec<_> = (0..4)
            .map(|i| p.spawn_at_next_slot(launch(), i * 10))
            .collect();
        assert_eq!(slots, vec![Some(0), Some(1), Some(2), Some(0)]);
        // slot 0 was restarted by the fourth shot
        assert_eq!(p.get(0).and_then(|a| a.ms_start()), Some(30));
        assert_eq!(p.cursor(), 1);
    }

    #[test]
    fn test_overwrite_clears_previous_hit() {
        let mut p = pool(1, SlotPolicy::Overwrite);
        p.spawn_at_next_slot(launch(), 0);
        assert!(p.hit(0, 100));
        p.spawn_at_next_slot(launch(), 150);
        assert!(p.get(0).is_some_and(|a| !a.is_hit()));
    }

    #[test]
    fn test_skip_active_refuses_busy_slot() {
        let mut p = pool(2, SlotPolicy::SkipActive);
        assert_eq!(p.spawn_at_next_slot(launch(), 0), Some(0));
        assert_eq!(p.spawn_at_next_slot(launch(), 10), Some(1));
        assert_eq!(p.spawn_at_next_slot(launch(), 20), None);
        assert_eq!(p.cursor(), 0);
        // default durations end an unhit shot after 400 ms
        assert_eq!(p.spawn_at_next_slot(launch(), 401), Some(0));
        assert_eq!(p.cursor(), 1);
    }

    #[test]
    fn test_skip_active_reuses_retired_slot() {
        let mut p = pool(1, SlotPolicy::SkipActive);
        p.spawn_at_next_slot(launch(), 0);
        assert_eq!(p.retire_ended(401), 1);
        assert_eq!(p.active_count(), 0);
        assert_eq!(p.spawn_at_next_slot(launch(), 402), Some(0));
    }

    #[test]
    fn test_slot_freed_after_clock_wrap() {
        let mut p = pool(1, SlotPolicy::SkipActive);
        let start = u32::MAX - 10;
        assert_eq!(p.spawn_at_next_slot(launch(), start), Some(0));
        let later = start.wrapping_add(5000);
        assert_eq!(p.get(0).map(|a| a.stage(later)), Some(Stage::Ended));
        assert_eq!(p.retire_ended(later), 1);
        assert_eq!(p.spawn_at_next_slot(launch(), later), Some(0));
    }

    #[test]
    fn test_retire_ended_leaves_running_shots() {
        let mut p = pool(3, SlotPolicy::Overwrite);
        p.spawn_at_next_slot(launch(), 0);
        p.spawn_at_next_slot(launch(), 300);
        assert_eq!(p.retire_ended(450), 1);
        assert_eq!(p.active_count(), 1);
        assert!(p.get(1).is_some_and(|a| a.is_active()));
    }

    #[test]
    fn test_hit_out_of_range_refused() {
        let mut p = pool(2, SlotPolicy::Overwrite);
        assert!(!p.hit(5, 10));
    }

    #[test]
    fn test_draw_all_skips_inert_slots() {
        let mut p = pool(3, SlotPolicy::Overwrite);
        p.spawn_at_next_slot(launch(), 0);
        let mut list = DrawList::new();
        p.draw_all(&mut list, 100);
        assert_eq!(list.count_for(SpriteId(3)), 1);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_slot_policy_parse() {
        assert_eq!("overwrite".parse::<SlotPolicy>(), Ok(SlotPolicy::Overwrite));
        assert_eq!(" Skip_Active ".parse::<SlotPolicy>(), Ok(SlotPolicy::SkipActive));
        assert!("sometimes".parse::<SlotPolicy>().is_err());
        assert_eq!(SlotPolicy::SkipActive.to_string(), "skip_active");
    }
}
