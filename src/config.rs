//! Command line configuration.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;

/// Command line configuration for featuredoc.
#[derive(Debug, Clone, Parser)]
#[command(name = "featuredoc", version, about, long_about = None)]
pub struct Config {
    /// Feature folder to document
    #[arg(default_value = ".")]
    pub features: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "docs")]
    pub output: PathBuf,

    /// Project name (defaults to the feature folder name)
    #[arg(long)]
    pub name: Option<String>,

    /// Log build progress
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the feature folder does not exist or is not a directory.
    pub fn validate(&self) -> Result<()> {
        if !self.features.exists() {
            bail!("Feature folder does not exist: {}", self.features.display());
        }
        if !self.features.is_dir() {
            bail!("Feature folder is not a directory: {}", self.features.display());
        }

        Ok(())
    }

    /// Returns project name from configuration or the feature folder name.
    ///
    /// # Errors
    ///
    /// Returns error if the feature folder has no name component or contains invalid UTF8.
    pub fn project_name(&self) -> Result<String> {
        if let Some(name) = &self.name {
            return Ok(name.clone());
        }

        let path = self
            .features
            .canonicalize()
            .unwrap_or_else(|_| self.features.clone());

        path.file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Cannot extract project name from path: {}", path.display()))
            .map(String::from)
    }
}
