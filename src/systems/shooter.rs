//! Shooter systems.
//!
//! [`aim_orbit_system`] points every shooter with an
//! [`AimOrbit`](crate::components::shooter::AimOrbit) at its orbiting point.
//! [`shooter_system`] then fires the shots that are due, one
//! [`FireEvent`] each.
//!
//! # Catch-up
//!
//! Shots are counted from when firing started, so a frame longer than the
//! firing period triggers several events stamped with the same time.

use bevy_ecs::prelude::*;

use crate::components::shooter::{AimOrbit, Shooter};
use crate::events::fire::FireEvent;
use crate::resources::worldtime::WorldTime;

pub fn aim_orbit_system(time: Res<WorldTime>, mut query: Query<(&AimOrbit, &mut Shooter)>) {
    for (orbit, mut shooter) in query.iter_mut() {
        let point = orbit.point_at(time.now_ms);
        shooter.aim_at(point);
    }
}

/// Trigger a [`FireEvent`] for every shot due on every shooter.
///
/// # Ordering
///
/// Should run after aiming and before the render systems so the muzzle flash
/// and projectile show on the frame they are fired.
pub fn shooter_system(
    time: Res<WorldTime>,
    mut query: Query<&mut Shooter>,
    mut commands: Commands,
) {
    let now = time.now_ms;
    for mut shooter in query.iter_mut() {
        let shots = shooter.take_due_shots(now);
        for _ in 0..shots {
            commands.trigger(FireEvent {
                origin: shooter.muzzle_position(),
                angle: shooter.aim_angle(),
                speed: shooter.projectile_speed,
                ms: now,
            });
        }
    }
}
