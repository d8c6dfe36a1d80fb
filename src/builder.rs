//! Two pass site build: register features, then render and link pages.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::assets::write_assets;
use crate::config::Config;
use crate::document::Document;
use crate::formatter::DocumentFormatter;
use crate::links::LinkResolver;
use crate::path::prepare_destination;
use crate::registry::FeatureRegistry;
use crate::tree::TreeNode;
use crate::visitor;

/// Counters reported after a build.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages_written: usize,
    pub links_resolved: usize,
    pub links_dangling: usize,
}

/// Renders a feature tree into a folder of linked pages.
///
/// The build runs two full traversals over the same tree. The first records
/// every feature by name; the second renders each page, completes by-name
/// links against that registry and writes the page. Pages may therefore
/// link to features that are rendered later in traversal order.
pub struct SiteBuilder<F> {
    output: PathBuf,
    feature_root: PathBuf,
    formatter: F,
}

impl<F: DocumentFormatter> SiteBuilder<F> {
    /// Creates builder writing below `output` for a tree read from `feature_root`.
    pub fn new(
        output: impl Into<PathBuf>,
        feature_root: impl Into<PathBuf>,
        formatter: F,
    ) -> Self {
        Self {
            output: output.into(),
            feature_root: feature_root.into(),
            formatter,
        }
    }

    /// Creates builder from command line configuration.
    pub fn from_config(config: &Config, formatter: F) -> Self {
        Self::new(&config.output, &config.features, formatter)
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Builds the site for `tree`.
    ///
    /// Assets are written first. An absent tree then ends the build without
    /// rendering anything. Index nodes get no page of their own; their
    /// directory's page shows their content.
    ///
    /// # Errors
    ///
    /// Returns error on the first node whose directory cannot be created,
    /// whose page cannot be formatted, or whose file cannot be written. Pages
    /// written before the failure stay on disk.
    pub fn build(&self, tree: Option<&TreeNode>) -> Result<BuildSummary> {
        info!(output = %self.output.display(), "Writing HTML");

        fs::create_dir_all(&self.output).with_context(|| {
            format!("Failed to create output directory: {}", self.output.display())
        })?;
        write_assets(&self.output).context("Failed to write static assets")?;

        let Some(root) = tree else {
            info!("No features found, nothing to render");
            return Ok(BuildSummary::default());
        };

        let registry = FeatureRegistry::build(Some(root));
        debug!(features = registry.len(), "Registered features");

        let resolver = LinkResolver::new(&registry);
        visitor::try_fold(Some(root), BuildSummary::default(), |summary, node| {
            self.render_node(node, root, &resolver, summary)
        })
    }

    fn render_node(
        &self,
        node: &TreeNode,
        root: &TreeNode,
        resolver: &LinkResolver<'_, '_>,
        mut summary: BuildSummary,
    ) -> Result<BuildSummary> {
        if node.is_index() {
            return Ok(summary);
        }

        let Some(destination) = prepare_destination(node, &self.output)? else {
            return Ok(summary);
        };

        let mut document = self
            .formatter
            .format(node, root, &self.feature_root)
            .with_context(|| format!("Failed to render '{}'", node.relative_path()))?;

        let report = resolver.complete_links(&mut document, node);
        write_document(&destination, &document)?;

        debug!(
            page = %destination.display(),
            resolved = report.resolved,
            dangling = report.dangling,
            "Generated"
        );

        summary.pages_written += 1;
        summary.links_resolved += report.resolved;
        summary.links_dangling += report.dangling;
        Ok(summary)
    }
}

/// Writes a document as UTF-8, replacing any existing file.
///
/// The document is serialized completely before the file is opened.
///
/// # Errors
///
/// Returns error if the file cannot be written
pub fn write_document(path: &Path, document: &Document) -> Result<()> {
    let content = document.to_xhtml();
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
