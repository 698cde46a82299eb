#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave composition: how many enemies, which classes, where.

use glam::Vec2;
use rand::Rng;
use storm_castle_core::{Arena, UnitKind, WaveSpawn};
use storm_castle_system_progression::WaveBounds;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    chest_spawn_chance: f64,
}

impl Config {
    /// Creates a new configuration using the provided chest probability.
    ///
    /// Values outside `0.0..=1.0` disable chests.
    #[must_use]
    pub fn new(chest_spawn_chance: f64) -> Self {
        let chest_spawn_chance = if (0.0..=1.0).contains(&chest_spawn_chance) {
            chest_spawn_chance
        } else {
            0.0
        };
        Self { chest_spawn_chance }
    }

    /// Probability that a wave carries a chest.
    #[must_use]
    pub const fn chest_spawn_chance(&self) -> f64 {
        self.chest_spawn_chance
    }
}

/// Pure system that lays out the contents of a new room.
#[derive(Clone, Debug)]
pub struct Spawning {
    config: Config,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Draws a wave within `bounds`, appending its spawns to `out` in spawn order.
    ///
    /// Enemies come first, each independently a skeleton or a zombie at a
    /// random point below the header band; a chest may follow.
    pub fn compose<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        bounds: &WaveBounds,
        arena: &Arena,
        out: &mut Vec<WaveSpawn>,
    ) {
        let count = bounds.sample(rng);
        out.reserve(count as usize + 1);

        for _ in 0..count {
            let kind = UnitKind::ENEMIES[rng.gen_range(0..UnitKind::ENEMIES.len())];
            let at = spawn_point(rng, arena);
            out.push(WaveSpawn::Enemy { kind, at });
        }

        if rng.gen_bool(self.config.chest_spawn_chance) {
            let at = spawn_point(rng, arena);
            out.push(WaveSpawn::Chest { at });
        }
    }
}

/// Samples a whole-pixel point inside the arena and below the header band.
pub fn spawn_point<R: Rng + ?Sized>(rng: &mut R, arena: &Arena) -> Vec2 {
    let width = arena.width().max(0.0) as u32;
    let top = arena.header_band().max(0.0) as u32;
    let bottom = (arena.height().max(0.0) as u32).max(top);
    Vec2::new(
        rng.gen_range(0..=width) as f32,
        rng.gen_range(top..=bottom) as f32,
    )
}
