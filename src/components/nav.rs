//! Navigation components: breadcrumb trail and tree table of contents

use maud::{Markup, html};

use crate::path::relative_href;
use crate::tree::TreeNode;

/// Label of a node in navigation; the root shows the project name.
fn label(node: &TreeNode, project: &str) -> String {
    if node.is_root() {
        project.to_string()
    } else {
        node.title()
    }
}

/// Renders breadcrumb navigation from the tree root down to `current`
///
/// Ancestors are links relative to `current`'s page, the last component is
/// plain text.
///
/// # Arguments
///
/// * `tree`: Root of the whole tree
/// * `current`: Node whose page is being rendered
/// * `project`: Label for the root component
pub fn breadcrumb(tree: &TreeNode, current: &TreeNode, project: &str) -> Markup {
    let lineage = tree.lineage(current.relative_path_from_root());
    let ancestors = lineage.split_last().map_or(&[][..], |(_, rest)| rest);

    html! {
        header {
            div class="breadcrumb" {
                @for ancestor in ancestors {
                    a href=(relative_href(current, ancestor)) class="breadcrumb-link" {
                        (label(ancestor, project))
                    }
                    span class="breadcrumb-separator" { "/" }
                }
                span class="breadcrumb-current" { (label(current, project)) }
            }
        }
    }
}

/// Renders the whole tree as nested lists with links relative to `current`
///
/// Index nodes are left out: their content is part of the directory page
/// the directory entry already links to.
pub fn table_of_contents(tree: &TreeNode, current: &TreeNode, project: &str) -> Markup {
    html! {
        a href=(relative_href(current, tree)) class="toc-home" { (project) }
        (toc_list(tree, current))
    }
}

fn toc_list(node: &TreeNode, current: &TreeNode) -> Markup {
    html! {
        ul class="toc-list" {
            @for child in node.children().iter().filter(|child| !child.is_index()) {
                @let is_current =
                    child.relative_path_from_root() == current.relative_path_from_root();
                li class=(if child.is_directory() { "toc-directory" } else { "toc-page" }) {
                    @if is_current {
                        a href=(relative_href(current, child)) class="toc-link toc-current" {
                            (child.title())
                        }
                    } @else {
                        a href=(relative_href(current, child)) class="toc-link" { (child.title()) }
                    }
                    @if child.is_directory() && !child.children().is_empty() {
                        (toc_list(child, current))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gherkin::Feature;

    fn segs(path: &str) -> Vec<String> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    fn feature(path: &str, name: &str) -> TreeNode {
        let feature = Feature {
            name: name.to_string(),
            ..Feature::default()
        };
        TreeNode::feature(segs(path), path, feature)
    }

    fn tree() -> TreeNode {
        TreeNode::directory(Vec::new(), "")
            .with_child(TreeNode::index(segs("index.md"), "index.md", "# Home"))
            .with_child(
                TreeNode::directory(segs("shop"), "shop")
                    .with_child(feature("shop/cart.feature", "Cart")),
            )
            .with_child(feature("login.feature", "Login"))
    }

    #[test]
    fn test_breadcrumb_links_ancestors() {
        // Arrange
        let tree = tree();
        let current = &tree.children()[1].children()[0];

        // Act
        let html = breadcrumb(&tree, current, "Shop Docs").into_string();

        // Assert
        assert!(html.contains(r#"<a href="../index.html" class="breadcrumb-link">Shop Docs</a>"#));
        assert!(html.contains(r#"<a href="index.html" class="breadcrumb-link">shop</a>"#));
        assert!(html.contains(r#"<span class="breadcrumb-current">Cart</span>"#));
    }

    #[test]
    fn test_breadcrumb_root_only() {
        // Arrange
        let tree = tree();

        // Act
        let html = breadcrumb(&tree, &tree, "Shop Docs").into_string();

        // Assert
        assert!(!html.contains("breadcrumb-link"));
        assert!(html.contains(r#"<span class="breadcrumb-current">Shop Docs</span>"#));
    }

    #[test]
    fn test_table_of_contents_relative_links() {
        // Arrange
        let tree = tree();
        let current = &tree.children()[1].children()[0];

        // Act
        let html = table_of_contents(&tree, current, "Shop Docs").into_string();

        // Assert
        assert!(html.contains(r#"href="../index.html" class="toc-home""#));
        assert!(html.contains(r#"href="index.html" class="toc-link">shop</a>"#));
        assert!(html.contains(r#"href="cart.html" class="toc-link toc-current">Cart</a>"#));
        assert!(html.contains(r#"href="../login.html" class="toc-link">Login</a>"#));
    }

    #[test]
    fn test_table_of_contents_skips_index_nodes() {
        // Arrange
        let tree = tree();

        // Act
        let html = table_of_contents(&tree, &tree, "Shop Docs").into_string();

        // Assert
        assert!(!html.contains(">index<"));
        assert_eq!(html.matches("toc-link").count(), 3);
    }
}
