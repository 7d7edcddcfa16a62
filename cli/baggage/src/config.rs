//! `baggage.toml` parsing.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "baggage.toml";

/// Budget used by `baggage trim` when neither flag nor config gives one.
pub const DEFAULT_MAX_BYTES: usize = 1024;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaggageConfig {
    #[serde(default)]
    pub trim: TrimConfig,
    /// Display names for top-level bags, keyed by bag index.
    #[serde(default)]
    pub bags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrimConfig {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

impl Default for TrimConfig {
    fn default() -> Self {
        TrimConfig {
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

fn default_max_bytes() -> usize {
    DEFAULT_MAX_BYTES
}

impl BaggageConfig {
    /// Load `explicit` if given, otherwise `baggage.toml` in `cwd` if it
    /// exists, otherwise the defaults.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => {
                let candidate = cwd.join(CONFIG_FILE);
                if candidate.is_file() {
                    Self::read(&candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse a config from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing baggage.toml")
    }

    /// Configured display name of top-level bag `index`.
    pub fn bag_name(&self, index: u64) -> Option<&str> {
        self.bags.get(&index.to_string()).map(String::as_str)
    }
}
