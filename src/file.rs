use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::SimulationConfig;
use crate::error::SimResult;

pub fn read_config(path: impl AsRef<Path>) -> SimResult<SimulationConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let config: SimulationConfig = serde_json::from_str(&contents)?;
    debug!(path = %path.display(), planets = config.planets.len(), "read config");
    Ok(config)
}

pub fn write_config(path: impl AsRef<Path>, config: &SimulationConfig) -> SimResult<()> {
    fs::write(path, serde_json::to_string_pretty(config)?)?;
    Ok(())
}
