//! End-to-end tests for the featuredoc binary.

mod common;

use anyhow::Result;
use common::create_feature_folder;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const BINARY: &str = env!("CARGO_BIN_EXE_featuredoc");

/// Tests full binary execution generates linked output.
#[test]
fn test_full_workflow_e2e() -> Result<()> {
    // Arrange
    let features = create_feature_folder()?;
    let out = TempDir::new()?;
    let site = out.path().join("site");

    // Act
    let output = Command::new(BINARY)
        .arg(features.path())
        .arg("-o")
        .arg(&site)
        .args(["--name", "E2E Shop"])
        .output()?;

    // Assert
    assert!(
        output.status.success(),
        "Binary failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated 7 pages"), "Got: {}", stdout);
    assert!(stdout.contains("1 feature links could not be resolved"));

    let index = fs::read_to_string(site.join("index.html"))?;
    assert!(index.contains("E2E Shop"));
    let basket = fs::read_to_string(site.join("dirB/contentY.html"))?;
    assert!(basket.contains(r#"<a href="../dirA/contentX.html">Checkout</a>"#));
    Ok(())
}

/// Tests the dangling link warning reaches the log.
#[test]
fn test_dangling_link_logged_e2e() -> Result<()> {
    // Arrange
    let features = create_feature_folder()?;
    let out = TempDir::new()?;

    // Act
    let output = Command::new(BINARY)
        .arg(features.path())
        .arg("-o")
        .arg(out.path())
        .env("RUST_LOG", "warn")
        .output()?;

    // Assert
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Link names an unknown feature"), "Got: {}", stderr);
    assert!(stderr.contains("Refunds"));
    Ok(())
}

/// Tests a missing feature folder fails with a readable message.
#[test]
fn test_missing_folder_e2e() -> Result<()> {
    // Arrange
    let out = TempDir::new()?;

    // Act
    let output = Command::new(BINARY)
        .arg(out.path().join("does-not-exist"))
        .arg("-o")
        .arg(out.path().join("site"))
        .output()?;

    // Assert
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "Got: {}", stderr);
    assert!(!out.path().join("site").exists());
    Ok(())
}
