//! Loads the game configuration from disk and command-line overrides.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use storm_castle_core::GameConfig;

/// Reads the optional TOML file, applies the seed override and validates the result.
pub(crate) fn load(path: Option<&Path>, seed: Option<u64>) -> Result<GameConfig> {
    let mut config = match path {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read config at {}", path.display()))?;
            parse(&contents).with_context(|| format!("invalid config at {}", path.display()))?
        }
        None => GameConfig::default(),
    };

    if let Some(seed) = seed {
        config.seed = seed;
    }
    config
        .validate()
        .context("configuration describes an unplayable game")?;
    Ok(config)
}

fn parse(contents: &str) -> Result<GameConfig> {
    toml::from_str(contents).context("failed to parse TOML")
}
