//! plasmafx demo driver.
//!
//! Sets up the effects world with a shooter firing plasma shots, ambient
//! sparks and a radial burst, then runs it:
//!
//! - headless (default): a fixed number of frames of simulated time, logging
//!   a summary; `--dump` prints every frame's draw list as JSON lines
//! - `--window` (feature `window`): live in a raylib window
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 300 --seed 42 --dump
//! cargo run --release --features window -- --window
//! ```

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};
use std::io::Write;
use std::path::PathBuf;

use plasmafx::game::{build_schedule, setup_world, spawn_demo_scene};
use plasmafx::resources::animationpool::AnimationPool;
use plasmafx::resources::drawlist::DrawList;
use plasmafx::resources::gameconfig::GameConfig;
use plasmafx::resources::particlepool::ParticleBatchPool;
use plasmafx::resources::spritestore::SpriteStore;
use plasmafx::resources::worldtime::WorldTime;
use plasmafx::systems::time::update_world_time;

/// Time-driven particle and plasma projectile effects.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Frames to simulate in headless mode.
    #[arg(long)]
    frames: Option<u32>,

    /// Simulated milliseconds per frame.
    #[arg(long, value_name = "MS")]
    frame_ms: Option<u32>,

    /// Seed for effect randomness.
    #[arg(long)]
    seed: Option<u64>,

    /// Print each frame's draw list as JSON lines on stdout.
    #[arg(long)]
    dump: bool,

    /// Run in a raylib window.
    #[arg(long)]
    window: bool,

    /// Write the effective configuration to PATH and exit.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        warn!("{} ({:?}), using defaults", e, config.config_path);
    }
    if let Some(frames) = cli.frames {
        config.frames = frames;
    }
    if let Some(frame_ms) = cli.frame_ms {
        config.frame_ms = frame_ms;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    if let Some(path) = cli.write_config {
        config.config_path = path;
        if let Err(e) = config.save_to_file() {
            error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    let mut world = match setup_world(config, SpriteStore::with_effect_sprites()) {
        Ok(world) => world,
        Err(e) => {
            error!("World setup failed: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = spawn_demo_scene(&mut world) {
        error!("Demo scene setup failed: {}", e);
        std::process::exit(1);
    }

    let mut update = build_schedule();
    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    if cli.window {
        run_window(&mut world, &mut update);
    } else {
        run_headless(&mut world, &mut update, cli.dump);
    }
}

#[cfg(feature = "window")]
fn run_window(world: &mut World, update: &mut Schedule) {
    if let Err(e) = plasmafx::render::raylib_backend::run_window(world, update) {
        error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "window"))]
fn run_window(_world: &mut World, _update: &mut Schedule) {
    error!("This build has no window support; rebuild with `--features window`");
    std::process::exit(1);
}

fn run_headless(world: &mut World, update: &mut Schedule, dump: bool) {
    let (frames, frame_ms) = {
        let config = world.resource::<GameConfig>();
        (config.frames, config.frame_ms)
    };
    info!("Running {} frames of {} ms", frames, frame_ms);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut total_draws = 0usize;
    let mut peak_batches = 0usize;
    let mut peak_projectiles = 0usize;

    for frame in 0..frames {
        update_world_time(world, frame_ms);
        update.run(world);

        peak_batches = peak_batches.max(world.resource::<ParticleBatchPool>().len());
        peak_projectiles = peak_projectiles.max(world.resource::<AnimationPool>().active_count());
        let draw_list = world.resource::<DrawList>();
        total_draws += draw_list.len();

        if dump {
            let now_ms = world.resource::<WorldTime>().now_ms;
            let header = serde_json::json!({
                "frame": frame,
                "now_ms": now_ms,
                "commands": draw_list.len(),
            });
            let written = draw_list
                .to_json_lines()
                .and_then(|lines| {
                    write!(out, "{}\n{}", header, lines)
                        .map_err(|e| format!("Failed to write dump: {}", e))
                });
            if let Err(e) = written {
                error!("{}", e);
                std::process::exit(1);
            }
        }
    }

    info!(
        "Done at {} ms: {} draw calls, peak {} particle batches, peak {} projectiles, {} batches live",
        world.resource::<WorldTime>().now_ms,
        total_draws,
        peak_batches,
        peak_projectiles,
        world.resource::<ParticleBatchPool>().len()
    );
}
