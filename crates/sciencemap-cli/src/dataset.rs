//! Dataset layout from the command line.
//!
//! Layers, lowest first: conventional layout under `--root`, then a JSON
//! config file (`--config`, or `<root>/sciencemap.json` when present), then
//! the individual path flags.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use sciencemap_store::{DatasetConfig, DatasetOverrides};

pub const DEFAULT_CONFIG_FILE: &str = "sciencemap.json";

#[derive(Args, Debug, Default)]
pub struct DatasetArgs {
    /// Dataset root; records live under `<root>/assets/`
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,
    /// JSON file overriding any of: events_dir, people_dir, events_index, people_index
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[arg(long, global = true)]
    pub events_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    pub people_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    pub events_index: Option<PathBuf>,
    #[arg(long, global = true)]
    pub people_index: Option<PathBuf>,
}

impl DatasetArgs {
    pub fn resolve(&self) -> Result<DatasetConfig> {
        let mut config = DatasetConfig::from_root(&self.root);

        let config_file = match &self.config {
            Some(path) => Some(path.clone()),
            None => Some(self.root.join(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()),
        };
        if let Some(path) = config_file {
            let overrides = DatasetOverrides::load(&path)
                .with_context(|| format!("loading dataset config {}", path.display()))?;
            config = overrides.apply(config);
        }

        let flags = DatasetOverrides {
            events_dir: self.events_dir.clone(),
            people_dir: self.people_dir.clone(),
            events_index: self.events_index.clone(),
            people_index: self.people_index.clone(),
        };
        Ok(flags.apply(config))
    }
}
