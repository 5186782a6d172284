//! Bounce Arena headless runner
//!
//! Spawns bodies, steps the pipeline at a fixed host frame time, and reports
//! what happened. Optionally dumps the final world as JSON.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bounce_arena::render;
use bounce_arena::sim::{World, tick};
use bounce_arena::{Settings, consts};

#[derive(Debug, Parser)]
#[command(name = "bounce-arena", about = "Run the bouncing-body simulation headless")]
struct Args {
    /// RNG seed (defaults to a time-derived seed)
    #[arg(long)]
    seed: Option<u64>,
    /// Bodies to spawn before the first frame
    #[arg(long, default_value_t = consts::INITIAL_BODY_COUNT)]
    bodies: usize,
    /// Frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u64,
    /// Host frame time in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    /// Settings JSON file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override body speed after loading settings
    #[arg(long)]
    speed: Option<f32>,
    /// Write the final world snapshot here as JSON
    #[arg(long)]
    dump: Option<PathBuf>,
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let seed = args.seed.unwrap_or_else(time_seed);
    log::info!("Bounce Arena starting (seed {})", seed);

    let mut world = World::with_settings(settings, seed);
    world.spawn_bodies(args.bodies);
    if let Some(speed) = args.speed {
        world.set_body_speed(speed);
    }

    let mut body_contacts = 0usize;
    let mut wall_contacts = 0usize;
    for _ in 0..args.frames {
        let report = tick(&mut world, args.dt);
        body_contacts += report.body_contacts.len();
        wall_contacts += report.wall_contacts;
    }

    log::info!(
        "Simulated {} frames: {} bodies, {} body contacts, {} wall contacts, {} instances",
        world.frame,
        world.body_count(),
        body_contacts,
        wall_contacts,
        render::instances(&world).len()
    );

    if let Some(path) = &args.dump {
        let json = serde_json::to_string_pretty(&world.snapshot())?;
        fs::write(path, json).with_context(|| format!("writing snapshot to {}", path.display()))?;
        log::info!("Snapshot written to {}", path.display());
    }

    Ok(())
}
