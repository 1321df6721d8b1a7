//! Shared load/save plumbing for CLI commands.
//!
//! A command's life is: resolve the data directory, load it into a
//! `SocialNetwork`, apply one operation, and (for mutations) write the
//! directory back. Read-only commands skip the save.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use socnet_core::{loader, SocialNetwork};
use tracing::{debug, info};

use crate::config::SocnetConfig;

/// --data flag, then the config's data_dir, then ./data.
pub fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(config) = SocnetConfig::load_optional()? {
        if let Some(dir) = config.data_dir {
            return Ok(dir);
        }
    }
    Ok(PathBuf::from("data"))
}

/// Load the data directory into a fresh network. A directory with no data
/// files yet starts empty instead of warning file by file.
pub fn open(dir: &Path) -> Result<SocialNetwork> {
    let mut network = SocialNetwork::new();
    if !dir.join(loader::USERS_FILE).exists() {
        debug!("no {} under {}, starting with an empty network", loader::USERS_FILE, dir.display());
        return Ok(network);
    }

    let stats = loader::load_network(&mut network, dir)
        .with_context(|| format!("failed to load data directory {}", dir.display()))?;
    info!(
        "data directory {} loaded ({} records, {} skipped)",
        dir.display(),
        stats.loaded,
        stats.skipped
    );
    Ok(network)
}

/// Write the network back out as the three data files.
pub fn save(network: &SocialNetwork, dir: &Path) -> Result<()> {
    loader::save_network(network, dir)
        .with_context(|| format!("failed to save data directory {}", dir.display()))
}
