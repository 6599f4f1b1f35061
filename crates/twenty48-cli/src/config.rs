use std::io::Read;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use twenty48_core::engine::SpawnWeights;

#[derive(Clone, Debug, PartialEq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub spawn: Spawn,
}

/// Relative odds of spawning a 2 versus a 4.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Spawn {
    #[serde(default = "defaults::two")]
    pub two: u32,

    #[serde(default = "defaults::four")]
    pub four: u32,
}

impl Default for Spawn {
    fn default() -> Self {
        Self {
            two: defaults::two(),
            four: defaults::four(),
        }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = std::fs::File::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let cfg: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.spawn.two + self.spawn.four == 0 {
            bail!("spawn weights must not both be zero");
        }
        Ok(())
    }

    pub fn spawn_weights(&self) -> SpawnWeights {
        SpawnWeights {
            two: self.spawn.two,
            four: self.spawn.four,
        }
    }
}

mod defaults {
    pub fn two() -> u32 {
        80
    }

    pub fn four() -> u32 {
        20
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_spawn_weights() {
        let cfg: Config = toml::from_str("[spawn]\ntwo = 50\nfour = 50\n").unwrap();
        assert_eq!(cfg.spawn, Spawn { two: 50, four: 50 });
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.spawn_weights(), SpawnWeights::default());
    }

    #[test]
    fn rejects_zero_total_weight() {
        let cfg: Config = toml::from_str("[spawn]\ntwo = 0\nfour = 0\n").unwrap();
        assert!(cfg.validate().is_err());
    }
}
