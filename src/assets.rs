//! Static asset bundling

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::components::layout::{SCRIPT, STYLESHEET};

const STYLES: &str = include_str!("../assets/featuredoc.css");
const SCRIPTS: &str = include_str!("../assets/featuredoc.js");

/// Writes the bundled stylesheet and script below the output root
///
/// Runs before any page is rendered so pages can reference the assets at
/// their fixed relative locations. Existing asset files are overwritten.
///
/// # Errors
///
/// Returns error if a directory or file cannot be written
pub fn write_assets(output_root: &Path) -> Result<()> {
    write_asset(output_root, STYLESHEET, STYLES)?;
    write_asset(output_root, SCRIPT, SCRIPTS)?;
    Ok(())
}

fn write_asset(root: &Path, relative: &str, content: &str) -> Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create asset directory: {}", parent.display()))?;
    }
    fs::write(&path, content).with_context(|| format!("Failed to write asset: {}", relative))?;
    Ok(())
}
