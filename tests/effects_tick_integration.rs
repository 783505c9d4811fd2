//! Frame-level integration tests: events, observers and the full schedule.

use bevy_ecs::prelude::*;

use plasmafx::components::color::Rgba;
use plasmafx::components::particles::ParticleBatchSetup;
use plasmafx::components::projectile::Phase;
use plasmafx::components::shooter::Shooter;
use plasmafx::components::swirl::DEFAULT_SWIRLS;
use plasmafx::components::sprite::SpriteId;
use plasmafx::events::burst::BurstEvent;
use plasmafx::events::fire::FireEvent;
use plasmafx::events::hit::HitEvent;
use plasmafx::game::{build_schedule, setup_world, spawn_demo_scene};
use plasmafx::math::Vector2;
use plasmafx::resources::animationpool::AnimationPool;
use plasmafx::resources::drawlist::DrawList;
use plasmafx::resources::gameconfig::GameConfig;
use plasmafx::resources::particlepool::{MAX_BATCHES, ParticleBatchPool};
use plasmafx::resources::spritestore::{self, SpriteStore};
use plasmafx::resources::worldtime::WorldTime;
use plasmafx::systems::time::update_world_time;

/// No ambient sparks, no random hits, fixed seed.
fn quiet_config() -> GameConfig {
    let mut config = GameConfig::new();
    config.sparks_per_frame = 0;
    config.hit_chance = 0.0;
    config.seed = Some(1);
    config
}

fn make_world(config: GameConfig) -> World {
    setup_world(config, SpriteStore::with_effect_sprites()).unwrap()
}

fn sprite_id(world: &World, name: &str) -> SpriteId {
    world.resource::<SpriteStore>().get(name).unwrap().id
}

fn run_frame(world: &mut World, schedule: &mut Schedule, dt_ms: u32) {
    update_world_time(world, dt_ms);
    schedule.run(world);
}

fn fire_at(world: &mut World, ms: u32) {
    world.trigger(FireEvent {
        origin: Vector2::new(100.0, 100.0),
        angle: 0.0,
        speed: 1.0,
        ms,
    });
}

#[test]
fn fire_event_spawns_flash_and_projectile() {
    let mut world = make_world(quiet_config());
    fire_at(&mut world, 0);

    let pool = world.resource::<ParticleBatchPool>();
    assert_eq!(pool.len(), 1);
    assert_eq!(pool.batches()[0].color, Rgba::MUZZLE_ORANGE);
    assert_eq!(pool.batches()[0].ms_duration, 1000);
    assert_eq!(world.resource::<AnimationPool>().active_count(), 1);
}

#[test]
fn projectile_drawn_on_the_frame_it_is_fired() {
    let mut world = make_world(quiet_config());
    let mut schedule = build_schedule();
    fire_at(&mut world, 0);
    schedule.run(&mut world);

    let draw_list = world.resource::<DrawList>();
    assert_eq!(draw_list.count_for(sprite_id(&world, spritestore::PROJECTILE)), 1);
    assert_eq!(draw_list.count_for(sprite_id(&world, spritestore::FIRE)), 1);
    assert_eq!(draw_list.count_for(sprite_id(&world, spritestore::HALO)), 1);
    assert_eq!(
        draw_list.count_for(sprite_id(&world, spritestore::MUZZLE_PARTICLE)),
        30
    );
}

#[test]
fn hit_event_switches_projectile_to_splash() {
    let mut world = make_world(quiet_config());
    let mut schedule = build_schedule();
    fire_at(&mut world, 0);
    world.trigger(HitEvent { slot: 0, ms: 100 });
    run_frame(&mut world, &mut schedule, 150);

    let projectile = sprite_id(&world, spritestore::PROJECTILE);
    let splash = sprite_id(&world, spritestore::SPLASH);
    let draw_list = world.resource::<DrawList>();
    assert_eq!(draw_list.count_for(projectile), 0);
    assert_eq!(draw_list.count_for(splash), 1);
    assert_eq!(
        world.resource::<AnimationPool>().get(0).map(|a| a.phase(150)),
        Some(Phase::Splashing)
    );
}

#[test]
fn ended_projectile_is_retired_and_not_drawn() {
    let mut world = make_world(quiet_config());
    let mut schedule = build_schedule();
    fire_at(&mut world, 0);
    run_frame(&mut world, &mut schedule, 401);

    let projectile = sprite_id(&world, spritestore::PROJECTILE);
    assert_eq!(world.resource::<AnimationPool>().active_count(), 0);
    assert_eq!(world.resource::<DrawList>().count_for(projectile), 0);
    // the muzzle flash outlives the shot
    assert_eq!(world.resource::<ParticleBatchPool>().len(), 1);
}

#[test]
fn shooter_fires_due_shots_with_catch_up() {
    let mut world = make_world(quiet_config());
    let mut schedule = build_schedule();
    let mut shooter = Shooter::new(Vector2::new(400.0, 100.0), 10.0, 1.0);
    shooter.start_firing(0);
    world.spawn(shooter);

    run_frame(&mut world, &mut schedule, 100);
    assert_eq!(world.resource::<AnimationPool>().active_count(), 1);
    assert_eq!(world.resource::<ParticleBatchPool>().len(), 1);

    run_frame(&mut world, &mut schedule, 250);
    assert_eq!(world.resource::<AnimationPool>().active_count(), 3);
    assert_eq!(world.resource::<ParticleBatchPool>().len(), 3);
}

#[test]
fn random_hits_with_certain_chance() {
    let mut config = quiet_config();
    config.hit_chance = 1.0;
    let mut world = make_world(config);
    let mut schedule = build_schedule();
    fire_at(&mut world, 0);
    run_frame(&mut world, &mut schedule, 10);

    let anim = world.resource::<AnimationPool>().get(0).cloned().unwrap();
    assert_eq!(anim.ms_hit(), Some(10));

    run_frame(&mut world, &mut schedule, 1);
    let splash = sprite_id(&world, spritestore::SPLASH);
    assert_eq!(world.resource::<DrawList>().count_for(splash), 1);
}

#[test]
fn ambient_sparks_spawn_spark_batches() {
    let mut config = quiet_config();
    config.sparks_per_frame = 5;
    let mut world = make_world(config);
    let mut schedule = build_schedule();
    for _ in 0..20 {
        run_frame(&mut world, &mut schedule, 16);
    }

    let spark = sprite_id(&world, spritestore::SPARK);
    let pool = world.resource::<ParticleBatchPool>();
    assert!(!pool.is_empty());
    assert!(pool.batches().iter().all(|b| b.sprite.id == spark));
    assert!(pool.batches().iter().all(|b| b.ms_duration == 500));
}

#[test]
fn burst_events_stop_at_pool_capacity() {
    let mut world = make_world(quiet_config());
    let sprite = world
        .resource::<SpriteStore>()
        .get(spritestore::SPARK)
        .unwrap();
    let setup = ParticleBatchSetup {
        start_position: Vector2::ZERO,
        center_out_angle: 0.0,
        spread_angle: 1.0,
        min_speed: 0.0,
        max_speed: 0.1,
        color: Rgba::WHITE,
        ms_start: 0,
        ms_duration: 100,
        sprite,
    };
    for _ in 0..MAX_BATCHES + 5 {
        world.trigger(BurstEvent { setup });
    }
    assert_eq!(world.resource::<ParticleBatchPool>().len(), MAX_BATCHES);
}

#[test]
fn render_state_left_pristine_after_frames() {
    let mut config = quiet_config();
    config.sparks_per_frame = 3;
    config.hit_chance = 0.05;
    let mut world = make_world(config);
    spawn_demo_scene(&mut world).unwrap();
    let mut schedule = build_schedule();
    for _ in 0..60 {
        run_frame(&mut world, &mut schedule, 16);
        assert!(world.resource::<DrawList>().state_is_pristine());
    }
    assert!(!world.resource::<DrawList>().is_empty());
}

#[test]
fn same_seed_gives_same_frames() {
    let mut config = GameConfig::new();
    config.seed = Some(42);
    let mut a = make_world(config.clone());
    let mut b = make_world(config);
    spawn_demo_scene(&mut a).unwrap();
    spawn_demo_scene(&mut b).unwrap();
    let mut schedule_a = build_schedule();
    let mut schedule_b = build_schedule();

    for _ in 0..45 {
        run_frame(&mut a, &mut schedule_a, 16);
        run_frame(&mut b, &mut schedule_b, 16);
        assert_eq!(
            a.resource::<DrawList>().commands(),
            b.resource::<DrawList>().commands()
        );
    }
    assert_eq!(a.resource::<WorldTime>().now_ms, 45 * 16);
}

#[test]
fn effects_keep_running_across_clock_wrap() {
    let mut world = make_world(quiet_config());
    let start = u32::MAX - 10;
    world.insert_resource(WorldTime::starting_at(start));
    let mut schedule = build_schedule();
    fire_at(&mut world, start);

    run_frame(&mut world, &mut schedule, 50);
    let projectile = sprite_id(&world, spritestore::PROJECTILE);
    assert_eq!(world.resource::<DrawList>().count_for(projectile), 1);

    run_frame(&mut world, &mut schedule, 5000);
    assert_eq!(world.resource::<AnimationPool>().active_count(), 0);
    assert!(world.resource::<ParticleBatchPool>().is_empty());

    let now = world.resource::<WorldTime>().now_ms;
    fire_at(&mut world, now);
    assert_eq!(world.resource::<AnimationPool>().active_count(), 1);
}

#[test]
fn demo_scene_draws_swirls_every_frame() {
    let mut world = make_world(quiet_config());
    spawn_demo_scene(&mut world).unwrap();
    let mut schedule = build_schedule();
    let swirl = sprite_id(&world, spritestore::SWIRL);
    for _ in 0..5 {
        run_frame(&mut world, &mut schedule, 16);
        assert_eq!(
            world.resource::<DrawList>().count_for(swirl),
            DEFAULT_SWIRLS as usize
        );
    }
}
