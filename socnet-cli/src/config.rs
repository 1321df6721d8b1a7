//! socnet configuration (~/.socnet/config.toml)

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

/// Persistent CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocnetConfig {
    /// Default data directory used when --data is not passed
    pub data_dir: Option<PathBuf>,
}

impl SocnetConfig {
    /// Get config file path: ~/.socnet/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".socnet/config.toml")
    }

    /// Load the config if it exists; a missing file is not an error.
    pub fn load_optional() -> Result<Option<Self>> {
        let config_path = Self::config_path();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&config_path)
            .context(format!("Failed to read config file: {:?}", config_path))?;
        let config: Self =
            toml::from_str(&content).context("Failed to parse config file (invalid TOML)")?;
        Ok(Some(config))
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_str =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        fs::write(&config_path, toml_str)
            .context(format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Create the config file
    Init(InitArgs),
    /// Show the current config
    Show,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Default data directory to record in the config
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Path => {
            println!("{}", SocnetConfig::config_path().display());
            Ok(())
        }
    }
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = SocnetConfig::config_path();

    if config_path.exists() && !args.force {
        anyhow::bail!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        );
    }

    let config = SocnetConfig {
        data_dir: args.data_dir,
    };
    config.save()?;

    println!("Created config at {:?}", config_path);
    Ok(())
}

fn run_show() -> Result<()> {
    match SocnetConfig::load_optional()? {
        Some(config) => {
            let toml_str = toml::to_string_pretty(&config)?;
            print!("{}", toml_str);
        }
        None => println!(
            "No config at {:?} (run: socnet config init)",
            SocnetConfig::config_path()
        ),
    }
    Ok(())
}
