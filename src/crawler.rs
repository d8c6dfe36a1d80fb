//! Builds the source tree from a feature folder on disk.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::gherkin::parse_feature;
use crate::tree::{INDEX_MARKDOWN, TreeNode};

const FEATURE_EXTENSION: &str = "feature";
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Reads `root` into a tree of directories, features and markdown pages.
///
/// `.feature` files become feature nodes, markdown files become markdown
/// nodes except `index.md`, which becomes its directory's index node. Hidden
/// entries are skipped and directories without any documentable content are
/// pruned. Children are ordered index first, then files by name, then
/// subdirectories by name.
///
/// Feature files that fail to parse are skipped with a warning.
///
/// # Returns
///
/// `None` when the folder holds nothing to document
///
/// # Errors
///
/// Returns error if a directory cannot be listed or a file cannot be read
///
/// # Examples
///
/// ```no_run
/// use featuredoc::crawl;
/// use std::path::Path;
///
/// if let Some(tree) = crawl(Path::new("features"))? {
///     println!("{} top level entries", tree.children().len());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn crawl(root: &Path) -> Result<Option<TreeNode>> {
    crawl_directory(root, Vec::new())
}

fn crawl_directory(dir: &Path, segments: Vec<String>) -> Result<Option<TreeNode>> {
    let mut files = Vec::new();
    let mut subdirs = Vec::new();

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let Some(name) = entry.file_name().to_str().map(String::from) else {
            warn!(path = %entry.path().display(), "Skipping entry with non UTF8 name");
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to inspect {}", entry.path().display()))?;
        if file_type.is_dir() {
            subdirs.push(name);
        } else {
            files.push(name);
        }
    }
    files.sort();
    subdirs.sort();

    let mut node = TreeNode::directory(segments.clone(), dir);
    let mut index = None;
    let mut pages = Vec::new();

    for name in files {
        let path = dir.join(&name);
        let mut child_segments = segments.clone();
        child_segments.push(name.clone());

        if let Some(child) = read_file(&path, child_segments)? {
            if child.is_index() {
                index = Some(child);
            } else {
                pages.push(child);
            }
        }
    }

    if let Some(index) = index {
        node.push_child(index);
    }
    for page in pages {
        node.push_child(page);
    }

    for name in subdirs {
        let mut child_segments = segments.clone();
        child_segments.push(name.clone());
        if let Some(child) = crawl_directory(&dir.join(&name), child_segments)? {
            node.push_child(child);
        }
    }

    if node.children().is_empty() {
        debug!(path = %dir.display(), "Pruning folder without content");
        return Ok(None);
    }
    Ok(Some(node))
}

fn read_file(path: &Path, segments: Vec<String>) -> Result<Option<TreeNode>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let Some(extension) = extension else {
        return Ok(None);
    };

    let is_feature = extension == FEATURE_EXTENSION;
    let is_markdown = MARKDOWN_EXTENSIONS.contains(&extension.as_str());
    if !is_feature && !is_markdown {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if is_feature {
        return match parse_feature(&content) {
            Ok(feature) => Ok(Some(TreeNode::feature(segments, path, feature))),
            Err(e) => {
                warn!(path = %path.display(), "Skipping unparsable feature: {:#}", e);
                Ok(None)
            }
        };
    }

    let is_index = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.eq_ignore_ascii_case(INDEX_MARKDOWN));
    if is_index {
        Ok(Some(TreeNode::index(segments, path, content)))
    } else {
        Ok(Some(TreeNode::markdown(segments, path, content)))
    }
}
