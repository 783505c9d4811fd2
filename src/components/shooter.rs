//! Firing character reduced to what the effects need.
//!
//! A [`Shooter`] knows where it stands, where it aims and how fast it fires.
//! [`shooter_system`](crate::systems::shooter::shooter_system) asks it each
//! frame how many shots are due and triggers one
//! [`FireEvent`](crate::events::fire::FireEvent) per shot.
//!
//! Shots are counted from the time firing started, not per frame, so a long
//! frame produces several shots at once and the average rate is exact.

use bevy_ecs::prelude::Component;

use crate::math::Vector2;
use crate::resources::worldtime::ms_since;

/// Distance from the shooter's position to the tip of its weapon.
pub const DEFAULT_MUZZLE_OFFSET: f32 = 20.0;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Shooter {
    pub position: Vector2,
    pub muzzle_offset: f32,
    /// Projectile speed in units per millisecond.
    pub projectile_speed: f32,
    aim: Vector2,
    aim_angle: f32,
    /// Milliseconds between shots; `None` never fires.
    period_ms: Option<u32>,
    /// Time the next shot is counted from.
    firing_since: Option<u32>,
}

impl Shooter {
    /// Shooter at `position` aiming right.
    pub fn new(position: Vector2, shots_per_second: f32, projectile_speed: f32) -> Self {
        Self {
            position,
            muzzle_offset: DEFAULT_MUZZLE_OFFSET,
            projectile_speed,
            aim: Vector2::RIGHT,
            aim_angle: 0.0,
            period_ms: period_for(shots_per_second),
            firing_since: None,
        }
    }

    pub fn with_muzzle_offset(mut self, offset: f32) -> Self {
        self.muzzle_offset = offset;
        self
    }

    /// Start counting shots from `ms_now`. Does nothing when already firing.
    pub fn start_firing(&mut self, ms_now: u32) {
        if self.firing_since.is_none() {
            self.firing_since = Some(ms_now);
        }
    }

    pub fn stop_firing(&mut self) {
        self.firing_since = None;
    }

    pub fn is_firing(&self) -> bool {
        self.firing_since.is_some()
    }

    pub fn period_ms(&self) -> Option<u32> {
        self.period_ms
    }

    /// Aim at `point`. Aiming at the shooter's own position is ignored and
    /// returns `false`.
    pub fn aim_at(&mut self, point: Vector2) -> bool {
        match (point - self.position).try_normalize() {
            Some(unit) => {
                self.aim = unit;
                self.aim_angle = unit.angle();
                true
            }
            None => false,
        }
    }

    pub fn aim(&self) -> Vector2 {
        self.aim
    }

    pub fn aim_angle(&self) -> f32 {
        self.aim_angle
    }

    pub fn muzzle_position(&self) -> Vector2 {
        self.position + self.aim * self.muzzle_offset
    }

    /// Number of shots due at `ms_now`, consuming them.
    pub fn take_due_shots(&mut self, ms_now: u32) -> u32 {
        let (Some(since), Some(period)) = (self.firing_since, self.period_ms) else {
            return 0;
        };
        let shots = ms_since(ms_now, since).unwrap_or(0) / period;
        if shots > 0 {
            self.firing_since = Some(since.wrapping_add(shots * period));
        }
        shots
    }
}

/// Moving aim point: the shooter tracks a point orbiting `center`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct AimOrbit {
    pub center: Vector2,
    pub radius: f32,
    /// Milliseconds per full turn; zero holds the point still.
    pub ms_per_turn: u32,
}

impl AimOrbit {
    pub fn point_at(&self, ms_now: u32) -> Vector2 {
        if self.ms_per_turn == 0 {
            return self.center + Vector2::RIGHT * self.radius;
        }
        let turn = (ms_now % self.ms_per_turn) as f32 / self.ms_per_turn as f32;
        self.center + Vector2::from_angle(turn * std::f32::consts::TAU) * self.radius
    }
}

fn period_for(shots_per_second: f32) -> Option<u32> {
    if shots_per_second.is_finite() && shots_per_second > 0.0 {
        Some((1000.0 / shots_per_second).round().max(1.0) as u32)
    } else {
        None
    }
}
