//! Mapping from tree nodes to output files and relative hrefs.
//!
//! Content nodes keep their relative directory and swap the source extension
//! for `.html`. Directory nodes become a folder holding `index.html`. Index
//! nodes have no file of their own; links to them land on their directory's
//! index page.

use anyhow::{Context, Result};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::fs;
use std::path::{Path, PathBuf};

use crate::tree::TreeNode;

/// Extension of every rendered page.
pub const OUTPUT_EXTENSION: &str = "html";

/// File name of a directory's own page.
pub const INDEX_FILE: &str = "index.html";

/// Characters escaped inside a single href path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Output file name for a content node's source file name.
fn page_name(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name);
    format!("{}.{}", stem, OUTPUT_EXTENSION)
}

/// Output-relative segments of the page showing `node`.
///
/// Index nodes map to their directory's page.
pub fn page_segments(node: &TreeNode) -> Vec<String> {
    let segments = node.relative_path_from_root();

    if node.is_directory() {
        let mut page = segments.to_vec();
        page.push(INDEX_FILE.to_string());
        return page;
    }

    let (name, parent) = match segments.split_last() {
        Some((name, parent)) => (name, parent),
        None => return vec![INDEX_FILE.to_string()],
    };
    let mut page = parent.to_vec();
    if node.is_index() {
        page.push(INDEX_FILE.to_string());
    } else {
        page.push(page_name(name));
    }
    page
}

/// Output directory that relative links on `node`'s page resolve against.
pub fn base_segments(node: &TreeNode) -> &[String] {
    let segments = node.relative_path_from_root();
    if node.is_directory() {
        segments
    } else {
        segments.split_last().map_or(segments, |(_, parent)| parent)
    }
}

/// Number of directory levels between `node`'s page and the output root.
pub fn depth(node: &TreeNode) -> usize {
    base_segments(node).len()
}

/// Prefix leading from `node`'s page back to the output root (`../../`).
pub fn root_prefix(node: &TreeNode) -> String {
    "../".repeat(depth(node))
}

/// Relative href from the page of `from` to the page of `to`.
///
/// Climbs out of `from`'s directory as far as the two pages share no
/// ancestor, then descends into the target. Absolute output locations never
/// enter the computation.
///
/// # Examples
///
/// ```
/// use featuredoc::{Feature, TreeNode, relative_href};
///
/// let segs = |p: &str| p.split('/').map(String::from).collect::<Vec<_>>();
/// let from = TreeNode::feature(segs("docs/index.feature"), "", Feature::default());
/// let to = TreeNode::feature(segs("docs/auth/login.feature"), "", Feature::default());
///
/// assert_eq!(relative_href(&from, &to), "auth/login.html");
/// assert_eq!(relative_href(&to, &from), "../index.html");
/// ```
pub fn relative_href(from: &TreeNode, to: &TreeNode) -> String {
    let base = base_segments(from);
    let target = page_segments(to);
    let target_dir = &target[..target.len() - 1];

    let common = base
        .iter()
        .zip(target_dir)
        .take_while(|(a, b)| a == b)
        .count();

    let mut href = "../".repeat(base.len() - common);
    let descent: Vec<String> = target[common..]
        .iter()
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect();
    href.push_str(&descent.join("/"));
    href
}

/// Absolute destination of `node`'s page below `output_root`.
///
/// Returns `None` for index nodes, whose content is written by their
/// directory's page.
pub fn destination(node: &TreeNode, output_root: &Path) -> Option<PathBuf> {
    if node.is_index() {
        return None;
    }
    Some(
        page_segments(node)
            .iter()
            .fold(output_root.to_path_buf(), |path, segment| path.join(segment)),
    )
}

/// Creates the directories `node`'s page needs and returns its destination.
///
/// Directory nodes get their own folder, every other node gets its parent
/// folder. Creating a folder that already exists is not an error.
///
/// # Errors
///
/// Returns error if a directory cannot be created.
pub fn prepare_destination(node: &TreeNode, output_root: &Path) -> Result<Option<PathBuf>> {
    let dir = base_segments(node)
        .iter()
        .fold(output_root.to_path_buf(), |path, segment| path.join(segment));

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    Ok(destination(node, output_root))
}
