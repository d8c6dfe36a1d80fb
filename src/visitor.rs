//! Pre-order traversal over the source tree.
//!
//! All traversals visit parents before children and children in stored
//! order. An absent root yields an empty traversal.

use crate::tree::TreeNode;

/// Depth first, parent before children iterator.
pub struct PreOrder<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Returns a pre-order iterator starting at `root`.
pub fn pre_order(root: Option<&TreeNode>) -> PreOrder<'_> {
    PreOrder {
        stack: root.into_iter().collect(),
    }
}

/// Invokes `action` exactly once for every node.
pub fn visit<'a>(root: Option<&'a TreeNode>, action: impl FnMut(&'a TreeNode)) {
    pre_order(root).for_each(action);
}

/// Threads an accumulator through every node and returns its final value.
pub fn fold<'a, B>(
    root: Option<&'a TreeNode>,
    init: B,
    step: impl FnMut(B, &'a TreeNode) -> B,
) -> B {
    pre_order(root).fold(init, step)
}

/// Fallible [`fold`]: the first error stops the traversal and is returned.
pub fn try_fold<'a, B, E>(
    root: Option<&'a TreeNode>,
    init: B,
    step: impl FnMut(B, &'a TreeNode) -> Result<B, E>,
) -> Result<B, E> {
    pre_order(root).try_fold(init, step)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(path: &str) -> TreeNode {
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        TreeNode::directory(segments, path)
    }

    /// root -> {a -> {a/x, a/y}, b -> {b/z}}
    fn sample_tree() -> TreeNode {
        node("")
            .with_child(node("a").with_child(node("a/x")).with_child(node("a/y")))
            .with_child(node("b").with_child(node("b/z")))
    }

    #[test]
    fn test_visit_pre_order() {
        // Arrange
        let tree = sample_tree();
        let mut seen = Vec::new();

        // Act
        visit(Some(&tree), |n| seen.push(n.relative_path()));

        // Assert
        assert_eq!(seen, vec!["", "a/", "a/x/", "a/y/", "b/", "b/z/"]);
    }

    #[test]
    fn test_visit_counts_every_node_once() {
        // Arrange
        let tree = sample_tree();
        let mut count = 0;

        // Act
        visit(Some(&tree), |_| count += 1);

        // Assert
        assert_eq!(count, 6);
    }

    #[test]
    fn test_visit_absent_root_is_noop() {
        // Arrange
        let mut called = false;

        // Act
        visit(None, |_| called = true);

        // Assert
        assert!(!called);
    }

    #[test]
    fn test_fold_accumulates() {
        // Arrange
        let tree = sample_tree();

        // Act
        let leaves = fold(Some(&tree), 0usize, |acc, n| {
            if n.children().is_empty() {
                acc + 1
            } else {
                acc
            }
        });

        // Assert
        assert_eq!(leaves, 3);
    }

    #[test]
    fn test_try_fold_stops_at_first_error() {
        // Arrange
        let tree = sample_tree();
        let mut visited = Vec::new();

        // Act
        let result: Result<(), String> = try_fold(Some(&tree), (), |_, n| {
            visited.push(n.relative_path());
            if n.relative_path() == "a/x/" {
                return Err("boom".to_string());
            }
            Ok(())
        });

        // Assert
        assert_eq!(result, Err("boom".to_string()));
        assert_eq!(visited, vec!["", "a/", "a/x/"]);
    }

    #[test]
    fn test_single_node_tree() {
        // Arrange
        let tree = node("");

        // Act
        let nodes: Vec<_> = pre_order(Some(&tree)).collect();

        // Assert
        assert_eq!(nodes.len(), 1);
    }
}
