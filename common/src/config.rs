use std::fs;
use std::path::Path;

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

/// Cluster layout for one job: where the workers live and where the
/// results go.
///
/// The loader validates the invariants the rest of the system relies on;
/// the coordinator core consumes this as an already-checked value object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Mapper endpoints, e.g. `http://[::1]:8040`, in dispatch order.
    pub mappers: Vec<String>,

    /// Reducer endpoints, in shard order.
    pub reducers: Vec<String>,

    /// Directory the output files are created in.
    pub output_dir: String,
}

impl Config {
    /// Read and validate a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file `{}`", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config file `{}`", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the coordinator relies on.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(!self.mappers.is_empty(), "no mapper endpoints configured");
        ensure!(!self.reducers.is_empty(), "no reducer endpoints configured");
        ensure!(!self.output_dir.is_empty(), "no output directory configured");
        Ok(())
    }
}
