//! Turning a tree node into a rendered page.

use anyhow::{Context, Result};
use maud::Markup;
use std::path::Path;

use crate::components::layout::{PageContext, page_wrapper};
use crate::components::nav::{breadcrumb, table_of_contents};
use crate::document::Document;
use crate::markdown::MarkdownRenderer;
use crate::pages;
use crate::path::root_prefix;
use crate::tree::{NodeKind, TreeNode};

/// Produces the page for one node.
///
/// Implementations must be deterministic for a given node and tree. They may
/// emit hyperlinks with an empty target whose text names a feature; those
/// are completed by the [`LinkResolver`](crate::LinkResolver) once every
/// feature's location is known.
pub trait DocumentFormatter {
    /// Renders `node`, using `tree` for navigation context.
    ///
    /// `feature_root` is the source folder the tree was read from.
    ///
    /// # Errors
    ///
    /// Returns error if the page cannot be produced or is not a well formed
    /// document.
    fn format(&self, node: &TreeNode, tree: &TreeNode, feature_root: &Path) -> Result<Document>;
}

/// XHTML formatter built on maud templates.
pub struct HtmlFormatter<'a> {
    project_name: String,
    markdown: MarkdownRenderer<'a>,
}

impl HtmlFormatter<'_> {
    /// Creates formatter labelling pages with `project_name`.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            markdown: MarkdownRenderer::new(),
        }
    }

    /// Renders the complete page markup for `node`.
    pub fn render(&self, node: &TreeNode, tree: &TreeNode, feature_root: &Path) -> Markup {
        let title = if node.is_root() {
            self.project_name.clone()
        } else {
            node.title()
        };

        let body = match node.kind() {
            NodeKind::Directory => pages::directory::render(node, &title, &self.markdown),
            NodeKind::Feature(feature) => pages::feature::render(feature, &self.markdown),
            NodeKind::Markdown(content) | NodeKind::Index(content) => {
                pages::markdown::render(content, &self.markdown)
            }
        };

        let prefix = root_prefix(node);
        let source = feature_root.join(node.relative_path());
        let source = source.display().to_string();
        let ctx = PageContext {
            title: &title,
            project: &self.project_name,
            root_prefix: &prefix,
            source: &source,
        };

        page_wrapper(
            &ctx,
            table_of_contents(tree, node, &self.project_name),
            breadcrumb(tree, node, &self.project_name),
            body,
        )
    }
}

impl DocumentFormatter for HtmlFormatter<'_> {
    fn format(&self, node: &TreeNode, tree: &TreeNode, feature_root: &Path) -> Result<Document> {
        let html = self.render(node, tree, feature_root).into_string();
        Document::parse(&html).with_context(|| {
            format!(
                "Rendered page for '{}' is not a well formed document",
                node.relative_path()
            )
        })
    }
}
