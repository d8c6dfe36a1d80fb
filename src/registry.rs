//! Feature name lookup built by the first traversal pass.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use crate::tree::TreeNode;
use crate::visitor;

/// Maps feature names to the first node carrying that name.
///
/// Built once per build before any page is rendered and only read
/// afterwards. Later nodes reusing a name are still rendered but cannot be
/// reached through a by-name link.
#[derive(Debug, Default)]
pub struct FeatureRegistry<'a> {
    features: HashMap<&'a str, &'a TreeNode>,
}

impl<'a> FeatureRegistry<'a> {
    /// Walks the whole tree and records every feature node, first seen wins.
    ///
    /// Performs no I/O. An absent tree yields an empty registry.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuredoc::{Feature, FeatureRegistry, TreeNode};
    ///
    /// let login = |path: &str| {
    ///     let feature = Feature { name: "Login".to_string(), ..Feature::default() };
    ///     TreeNode::feature(vec![path.to_string()], path, feature)
    /// };
    /// let tree = TreeNode::directory(Vec::new(), ".")
    ///     .with_child(login("a.feature"))
    ///     .with_child(login("b.feature"));
    ///
    /// let registry = FeatureRegistry::build(Some(&tree));
    /// assert_eq!(registry.get("Login").map(|n| n.file_name()), Some("a.feature"));
    /// ```
    pub fn build(tree: Option<&'a TreeNode>) -> Self {
        let features = visitor::fold(tree, HashMap::new(), |mut features, node| {
            let Some(name) = node.feature_name() else {
                return features;
            };
            match features.entry(name) {
                Entry::Vacant(slot) => {
                    slot.insert(node);
                }
                Entry::Occupied(first) => {
                    debug!(
                        feature = name,
                        kept = %first.get().relative_path(),
                        ignored = %node.relative_path(),
                        "Duplicate feature name"
                    );
                }
            }
            features
        });

        Self { features }
    }

    /// Returns the node registered under `name`.
    pub fn get(&self, name: &str) -> Option<&'a TreeNode> {
        self.features.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&'a str> {
        let mut names: Vec<&'a str> = self.features.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gherkin::Feature;

    fn feature(path: &str, name: &str) -> TreeNode {
        let segments = path.split('/').map(String::from).collect();
        let feature = Feature {
            name: name.to_string(),
            ..Feature::default()
        };
        TreeNode::feature(segments, path, feature)
    }

    fn dir(path: &str) -> TreeNode {
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        TreeNode::directory(segments, path)
    }

    #[test]
    fn test_registry_collects_features() {
        // Arrange
        let tree = dir("")
            .with_child(dir("a").with_child(feature("a/x.feature", "Checkout")))
            .with_child(feature("y.feature", "Login"))
            .with_child(TreeNode::markdown(vec!["notes.md".into()], "notes.md", "# Notes"));

        // Act
        let registry = FeatureRegistry::build(Some(&tree));

        // Assert
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["Checkout", "Login"]);
        assert!(registry.get("notes").is_none());
    }

    #[test]
    fn test_registry_first_write_wins() {
        // Arrange: pre-order visits a/login.feature before b/login.feature
        let tree = dir("")
            .with_child(dir("a").with_child(feature("a/login.feature", "Login")))
            .with_child(dir("b").with_child(feature("b/login.feature", "Login")));

        // Act
        let registry = FeatureRegistry::build(Some(&tree));

        // Assert
        let node = registry.get("Login").expect("Login should be registered");
        assert_eq!(node.relative_path(), "a/login.feature");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_first_write_wins_parent_before_child_subtree() {
        // Arrange: file at root level comes after directory a in stored order
        let tree = dir("")
            .with_child(dir("a").with_child(feature("a/deep.feature", "Shared")))
            .with_child(feature("shallow.feature", "Shared"));

        // Act
        let registry = FeatureRegistry::build(Some(&tree));

        // Assert
        assert_eq!(
            registry.get("Shared").map(TreeNode::relative_path),
            Some("a/deep.feature".to_string())
        );
    }

    #[test]
    fn test_registry_empty_tree() {
        // Act
        let registry = FeatureRegistry::build(None);

        // Assert
        assert!(registry.is_empty());
        assert!(registry.get("Anything").is_none());
    }
}
