//! Completion of by-name feature links in rendered pages.

use tracing::warn;

use crate::document::Document;
use crate::path::relative_href;
use crate::registry::FeatureRegistry;
use crate::tree::TreeNode;

/// Outcome of completing links on one page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LinkReport {
    /// Links that received a target
    pub resolved: usize,
    /// Links naming a feature the registry does not know
    pub dangling: usize,
}

/// Fills in empty hyperlink targets from the feature registry.
///
/// A hyperlink is unresolved when its `href` is absent or empty. Its text is
/// taken as a feature name; when the registry knows that name the link
/// receives the relative path from the current page to the feature's page.
/// Unknown names leave the link untouched and are logged. Links that already
/// have a target are never modified.
pub struct LinkResolver<'r, 'a> {
    registry: &'r FeatureRegistry<'a>,
}

impl<'r, 'a> LinkResolver<'r, 'a> {
    pub fn new(registry: &'r FeatureRegistry<'a>) -> Self {
        Self { registry }
    }

    /// Completes every unresolved link in `document`, rendered for `current`.
    ///
    /// The link text is trimmed of surrounding whitespace before the lookup,
    /// so `<a> Login </a>` names the feature `Login`. Links whose text is
    /// empty after trimming are skipped and counted neither as resolved nor
    /// as dangling.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuredoc::{Document, Feature, FeatureRegistry, LinkResolver, TreeNode};
    ///
    /// let segs = |p: &str| p.split('/').map(String::from).collect::<Vec<_>>();
    /// let login = Feature { name: "Login".to_string(), ..Feature::default() };
    /// let tree = TreeNode::directory(Vec::new(), ".")
    ///     .with_child(TreeNode::feature(segs("auth/login.feature"), "", login));
    /// let current = TreeNode::feature(segs("shop/cart.feature"), "", Feature::default());
    ///
    /// let registry = FeatureRegistry::build(Some(&tree));
    /// let mut doc = Document::parse(r#"<p><a href="">Login</a></p>"#)?;
    /// let report = LinkResolver::new(&registry).complete_links(&mut doc, &current);
    ///
    /// assert_eq!(report.resolved, 1);
    /// assert_eq!(doc.anchors()[0].attr("href"), Some("../auth/login.html"));
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn complete_links(&self, document: &mut Document, current: &TreeNode) -> LinkReport {
        let mut report = LinkReport::default();

        document.for_each_anchor_mut(|anchor| {
            if anchor.attr("href").is_some_and(|href| !href.is_empty()) {
                return;
            }

            let text = anchor.text();
            let name = text.trim();
            if name.is_empty() {
                return;
            }

            match self.registry.get(name) {
                Some(target) => {
                    anchor.set_attr("href", relative_href(current, target));
                    report.resolved += 1;
                }
                None => {
                    warn!(
                        feature = name,
                        page = %current.relative_path(),
                        "Link names an unknown feature"
                    );
                    report.dangling += 1;
                }
            }
        });

        report
    }
}
