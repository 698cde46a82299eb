#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Storm the Castle headlessly.
//!
//! An autopilot drafts the requested party, drops every reserve unit onto the
//! field whenever a room is populated and lets the fixed-step loop run until
//! the party falls or the frame budget is spent.

mod autopilot;
mod config;
mod session;
mod surface;

use std::{io, path::PathBuf, time::Duration};

use anyhow::{bail, Result};
use clap::Parser;
use storm_castle_core::Roster;
use storm_castle_world::World;

use crate::{
    autopilot::Autopilot,
    session::{play, Pacing},
    surface::TextSurface,
};

#[derive(Parser, Debug)]
#[command(name = "storm-castle")]
#[command(about = "Headless Storm the Castle runs driven by a scripted player")]
struct Args {
    /// Seed for waves, loot and progression; overrides the config file.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file with game settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum number of frames to simulate.
    #[arg(long, default_value_t = 3_600)]
    frames: u32,
    /// Simulated milliseconds per frame.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// Warriors, rangers and mages to draft.
    #[arg(long, value_delimiter = ',', default_value = "2,2,1")]
    draft: Vec<u32>,
    /// Print every n-th frame; zero prints none.
    #[arg(long, default_value_t = 0)]
    render_every: u32,
}

/// Entry point for the Storm the Castle command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = config::load(args.config.as_deref(), args.seed)?;
    let draft = match args.draft.as_slice() {
        &[warriors, rangers, mages] => Roster::from_counts(warriors, rangers, mages),
        other => bail!("--draft expects three counts, got {}", other.len()),
    };
    if draft.total() != config.starting_units {
        bail!(
            "--draft must add up to {} units, got {}",
            config.starting_units,
            draft.total()
        );
    }
    if args.frame_ms == 0 {
        bail!("--frame-ms must be positive");
    }

    log::info!("starting run with seed {}", config.seed);
    let mut world = World::with_config(config)?;
    let mut surface = TextSurface::new(io::stdout().lock());
    let summary = play(
        &mut world,
        &Autopilot::new(draft),
        Pacing {
            frames: args.frames,
            frame: Duration::from_millis(args.frame_ms),
            render_every: args.render_every,
        },
        &mut surface,
    )?;
    log::debug!("last presented frame drew {} images", surface.images());

    print!("{summary}");
    Ok(())
}
