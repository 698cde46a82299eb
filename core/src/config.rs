//! Tunable parameters loaded by adapters before the world is created.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::Arena;

/// Top-level configuration accepted by [`crate::Command`] consumers.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Seed for the single random stream that drives waves, loot and progression.
    pub seed: u64,
    /// Arena dimensions.
    pub arena: ArenaConfig,
    /// Probability that a freshly generated wave also contains a loot chest.
    pub chest_spawn_chance: f64,
    /// Time the cleared room lingers before the next wave arrives.
    pub room_transition_ms: u64,
    /// Time each notification stays on screen.
    pub notification_lifetime_ms: u64,
    /// Units the player distributes before a run begins.
    pub starting_units: u32,
}

impl GameConfig {
    /// Checks that the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ArenaConfig {
            width,
            height,
            header_band,
        } = self.arena;
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::EmptyArena { width, height });
        }
        if !(header_band >= 0.0 && header_band < height) {
            return Err(ConfigError::HeaderBandTooTall {
                header_band,
                height,
            });
        }
        if !(0.0..=1.0).contains(&self.chest_spawn_chance) {
            return Err(ConfigError::ChestChanceOutOfRange(self.chest_spawn_chance));
        }
        if self.starting_units == 0 {
            return Err(ConfigError::NoStartingUnits);
        }
        Ok(())
    }

    /// Arena described by the configuration.
    #[must_use]
    pub fn arena(&self) -> Arena {
        Arena::new(self.arena.width, self.arena.height, self.arena.header_band)
    }

    /// Room transition delay as a duration.
    #[must_use]
    pub fn room_transition(&self) -> Duration {
        Duration::from_millis(self.room_transition_ms)
    }

    /// Notification lifetime as a duration.
    #[must_use]
    pub fn notification_lifetime(&self) -> Duration {
        Duration::from_millis(self.notification_lifetime_ms)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0x5707_6d00_c457_1e00,
            arena: ArenaConfig::default(),
            chest_spawn_chance: 0.05,
            room_transition_ms: 1_000,
            notification_lifetime_ms: 3_000,
            starting_units: 5,
        }
    }
}

/// Arena section of [`GameConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Height of the HUD band where nothing spawns or is placed.
    pub header_band: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        let arena = Arena::default();
        Self {
            width: arena.width(),
            height: arena.height(),
            header_band: arena.header_band(),
        }
    }
}

/// Reasons a [`GameConfig`] is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Width or height is not positive.
    #[error("arena must have a positive size, got {width}x{height}")]
    EmptyArena {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// The header band leaves no room to spawn or place units.
    #[error("header band of {header_band}px leaves no room in an arena {height}px tall")]
    HeaderBandTooTall {
        /// Configured header band.
        header_band: f32,
        /// Configured arena height.
        height: f32,
    },
    /// The chest probability is not a probability.
    #[error("chest spawn chance {0} must lie within 0.0..=1.0")]
    ChestChanceOutOfRange(f64),
    /// A run could never start.
    #[error("at least one starting unit is required")]
    NoStartingUnits,
}
