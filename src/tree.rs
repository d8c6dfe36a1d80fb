//! In-memory tree mirroring the feature folder hierarchy.
//!
//! Every node carries its position in the source tree as an ordered list of
//! path segments. The tree is assembled once (by the crawler or by hand in
//! tests) and is only ever borrowed immutably afterwards.

use std::path::{Path, PathBuf};

use crate::gherkin::Feature;

/// File name that turns a markdown file into its directory's landing content.
pub const INDEX_MARKDOWN: &str = "index.md";

/// Variant payload of a tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Pure grouping directory
    Directory,
    /// Parsed `.feature` file
    Feature(Feature),
    /// Standalone markdown page
    Markdown(String),
    /// Markdown folded into the parent directory's index page
    Index(String),
}

/// One node of the source tree.
///
/// # Examples
///
/// ```
/// use featuredoc::{NodeKind, TreeNode};
///
/// let mut root = TreeNode::directory(Vec::new(), "features");
/// root.push_child(TreeNode::markdown(
///     vec!["about.md".to_string()],
///     "features/about.md",
///     "# About",
/// ));
///
/// assert_eq!(root.children().len(), 1);
/// assert!(root.children()[0].is_content());
/// assert!(matches!(root.kind(), NodeKind::Directory));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    segments: Vec<String>,
    source: PathBuf,
    kind: NodeKind,
    children: Vec<TreeNode>,
}

impl TreeNode {
    /// Creates a directory node. The root directory has no segments.
    pub fn directory(segments: Vec<String>, source: impl Into<PathBuf>) -> Self {
        Self::new(segments, source, NodeKind::Directory)
    }

    /// Creates a content node for a parsed feature file.
    pub fn feature(segments: Vec<String>, source: impl Into<PathBuf>, feature: Feature) -> Self {
        Self::new(segments, source, NodeKind::Feature(feature))
    }

    /// Creates a content node for a standalone markdown file.
    pub fn markdown(
        segments: Vec<String>,
        source: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(segments, source, NodeKind::Markdown(content.into()))
    }

    /// Creates the index node that supplies a directory's landing content.
    pub fn index(
        segments: Vec<String>,
        source: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(segments, source, NodeKind::Index(content.into()))
    }

    fn new(segments: Vec<String>, source: impl Into<PathBuf>, kind: NodeKind) -> Self {
        Self {
            segments,
            source: source.into(),
            kind,
            children: Vec::new(),
        }
    }

    /// Appends a child, keeping insertion order.
    pub fn push_child(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    /// Builder form of [`TreeNode::push_child`].
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.push_child(child);
        self
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Path segments from the tree root to this node.
    pub fn relative_path_from_root(&self) -> &[String] {
        &self.segments
    }

    /// Slash separated form of [`TreeNode::relative_path_from_root`].
    ///
    /// Directories carry a trailing slash, the root is the empty string.
    pub fn relative_path(&self) -> String {
        let joined = self.segments.join("/");
        if self.is_directory() && !joined.is_empty() {
            format!("{}/", joined)
        } else {
            joined
        }
    }

    /// Location of the node in the source tree on disk.
    pub fn source_path(&self) -> &Path {
        &self.source
    }

    /// True for nodes rendered as a single page of their own.
    pub fn is_content(&self) -> bool {
        matches!(self.kind, NodeKind::Feature(_) | NodeKind::Markdown(_))
    }

    /// True for nodes that only feed their directory's index page.
    pub fn is_index(&self) -> bool {
        matches!(self.kind, NodeKind::Index(_))
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory)
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn as_feature(&self) -> Option<&Feature> {
        match &self.kind {
            NodeKind::Feature(feature) => Some(feature),
            _ => None,
        }
    }

    /// Name under which cross references may address this node.
    pub fn feature_name(&self) -> Option<&str> {
        self.as_feature().map(|feature| feature.name.as_str())
    }

    /// Last path segment, empty for the root.
    pub fn file_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Human readable label used in titles and navigation.
    pub fn title(&self) -> String {
        match &self.kind {
            NodeKind::Feature(feature) => feature.name.clone(),
            NodeKind::Directory => self.file_name().to_string(),
            NodeKind::Markdown(_) | NodeKind::Index(_) => Path::new(self.file_name())
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_else(|| self.file_name())
                .to_string(),
        }
    }

    /// Returns the index child supplying this directory's landing content.
    pub fn index_child(&self) -> Option<&TreeNode> {
        self.children.iter().find(|child| child.is_index())
    }

    /// Returns the chain of nodes from `self` down to the node at `segments`.
    ///
    /// The chain starts with `self` and ends with the target. An empty vector
    /// means no node lives at that position.
    pub fn lineage(&self, segments: &[String]) -> Vec<&TreeNode> {
        if !segments.starts_with(&self.segments) {
            return Vec::new();
        }

        let mut chain = vec![self];
        let mut current = self;

        for depth in current.segments.len()..segments.len() {
            let prefix = &segments[..=depth];
            match current
                .children
                .iter()
                .find(|child| child.segments.as_slice() == prefix)
            {
                Some(child) => {
                    chain.push(child);
                    current = child;
                }
                None => return Vec::new(),
            }
        }

        chain
    }
}
