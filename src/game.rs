//! World setup and the per-frame schedule.
//!
//! [`setup_world`] inserts every resource and observer the effects need;
//! [`spawn_demo_scene`] adds the shooter and the radial burst the demo
//! binary shows; [`build_schedule`] orders the systems of one frame.
//!
//! # Frame order
//!
//! 1. aim, fire due shots (fire observers spawn flashes and projectiles)
//! 2. ambient sparks
//! 3. random projectile hits
//! 4. render: clear the draw list, particles, projectiles, radial bursts,
//!    swirls
//!
//! The caller advances [`WorldTime`] with
//! [`update_world_time`](crate::systems::time::update_world_time) before each
//! run.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::radialburst::RadialBurst;
use crate::components::shooter::{AimOrbit, Shooter};
use crate::components::swirl::RotatingSwirls;
use crate::events::burst::burst_observer;
use crate::events::fire::fire_observer;
use crate::events::hit::hit_observer;
use crate::math::Vector2;
use crate::resources::animationpool::AnimationPool;
use crate::resources::drawlist::DrawList;
use crate::resources::effectsrng::EffectsRng;
use crate::resources::gameconfig::GameConfig;
use crate::resources::particlepool::ParticleBatchPool;
use crate::resources::spritestore::{RADIAL_SHOT, SWIRL, SpriteStore};
use crate::resources::worldtime::WorldTime;
use crate::systems::particles::{clear_draw_list_system, particle_render_system};
use crate::systems::projectiles::{projectile_hit_roll_system, projectile_render_system};
use crate::systems::radialburst::radial_burst_render_system;
use crate::systems::shooter::{aim_orbit_system, shooter_system};
use crate::systems::sparks::ambient_sparks_system;
use crate::systems::swirl::swirl_render_system;

/// Milliseconds per turn of the demo shooter's aim.
const DEMO_AIM_MS_PER_TURN: u32 = 4000;

/// Build a world holding every effect resource and observer.
pub fn setup_world(config: GameConfig, sprites: SpriteStore) -> Result<World, String> {
    let images = sprites.projectile_images()?;

    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(match config.seed {
        Some(seed) => EffectsRng::with_seed(seed),
        None => EffectsRng::default(),
    });
    world.insert_resource(ParticleBatchPool::new());
    world.insert_resource(AnimationPool::new(
        config.pool_size,
        images,
        config.durations,
        config.slot_policy,
    ));
    world.insert_resource(DrawList::new());
    world.insert_resource(sprites);
    world.insert_resource(config);

    world.spawn(Observer::new(fire_observer));
    world.spawn(Observer::new(hit_observer));
    world.spawn(Observer::new(burst_observer));
    // Observers must be registered before any system triggers events.
    world.flush();

    Ok(world)
}

/// Spawn a firing shooter sweeping its aim around the window centre, with a
/// radial burst and rotating swirls in the middle.
pub fn spawn_demo_scene(world: &mut World) -> Result<(), String> {
    let (width, height, shots_per_second, speed, muzzle_offset) = {
        let config = world.resource::<GameConfig>();
        (
            config.window_width as f32,
            config.window_height as f32,
            config.shots_per_second,
            config.projectile_speed,
            config.muzzle_offset,
        )
    };
    let burst_sprite = world.resource::<SpriteStore>().require(RADIAL_SHOT)?;
    let swirl_sprite = world.resource::<SpriteStore>().require(SWIRL)?;
    let now = world.resource::<WorldTime>().now_ms;
    let center = Vector2::new(width * 0.5, height * 0.5);

    let mut shooter =
        Shooter::new(Vector2::new(width * 0.5, height * 0.15), shots_per_second, speed)
            .with_muzzle_offset(muzzle_offset);
    shooter.start_firing(now);
    world.spawn((
        shooter,
        AimOrbit {
            center,
            radius: height * 0.3,
            ms_per_turn: DEMO_AIM_MS_PER_TURN,
        },
    ));
    world.spawn(RadialBurst::new(center, burst_sprite));
    world.spawn(RotatingSwirls::new(center, swirl_sprite));
    world.flush();

    info!("Demo scene ready: shooter at {} shots/s, radial burst at {:?}", shots_per_second, center);
    Ok(())
}

/// Systems of one frame, in order.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            (aim_orbit_system, shooter_system).chain(),
            ambient_sparks_system,
            projectile_hit_roll_system,
            (
                clear_draw_list_system,
                particle_render_system,
                projectile_render_system,
                radial_burst_render_system,
                swirl_render_system,
            )
                .chain(),
        )
            .chain(),
    );
    update
}
