//! Shared test utilities for integration tests.
//!
//! Provides helpers for laying out feature folders in temporary directories.

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Writes `content` to `path` below `root`, creating parent directories.
///
/// # Errors
///
/// Returns error if a directory or the file cannot be created
pub fn write_file(root: &Path, path: &str, content: &str) -> Result<()> {
    let file = root.join(path);
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file, content)?;
    Ok(())
}

/// Creates a small shop feature folder.
///
/// Layout:
///
/// ```text
/// index.md                  links to Checkout
/// dirA/contentX.feature     Checkout, links to Basket
/// dirA/zz_copy.feature      second feature named Checkout
/// dirB/contentY.feature     Basket, links to Checkout
/// dirB/notes.md             links to an unknown feature
/// ```
///
/// # Errors
///
/// Returns error if the temporary directory or a file cannot be created
pub fn create_feature_folder() -> Result<TempDir> {
    let dir = TempDir::new()?;
    let root = dir.path();

    write_file(root, "index.md", "# Shop\n\nStart with [Checkout]().\n")?;
    write_file(
        root,
        "dirA/contentX.feature",
        "@payments
Feature: Checkout
  Pay for everything in the [Basket]().

  Scenario: Pay by card
    Given a basket with items
      | item | qty |
      | tea  | 2   |
    When I pay by card
    Then I see a receipt
",
    )?;
    write_file(root, "dirA/zz_copy.feature", "Feature: Checkout\n")?;
    write_file(
        root,
        "dirB/contentY.feature",
        "Feature: Basket
  Proceed to [Checkout]() when done.

  Scenario: Add item
    Given an empty basket
    When I add tea
    Then the basket holds 1 item
",
    )?;
    write_file(root, "dirB/notes.md", "# Notes\n\nSee [Refunds]().\n")?;

    Ok(dir)
}
