use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::types::Floor;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fleet: FleetConfig,
    pub clock: ClockConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    pub cars: u32,
    pub bottom_floor: Floor,
    pub top_floor: Floor,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub tick_interval_ms: u64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            cars: 2,
            bottom_floor: 0,
            top_floor: 10,
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 500,
        }
    }
}

impl FleetConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.cars == 0 {
            anyhow::bail!("fleet needs at least one car");
        }
        if self.bottom_floor >= self.top_floor {
            anyhow::bail!(
                "bottom floor {} must be below top floor {}",
                self.bottom_floor,
                self.top_floor
            );
        }
        Ok(())
    }
}

impl ClockConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(raw).context("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.fleet.validate()?;
        if self.clock.tick_interval_ms == 0 {
            anyhow::bail!("tick interval must be positive");
        }
        Ok(())
    }
}
