//! Directory index page content

use maud::{Markup, PreEscaped, html};

use crate::markdown::MarkdownRenderer;
use crate::path::relative_href;
use crate::tree::{NodeKind, TreeNode};

/// Short label describing a listed child.
fn kind_label(node: &TreeNode) -> String {
    match node.kind() {
        NodeKind::Directory => "folder".to_string(),
        NodeKind::Feature(feature) => match feature.scenarios.len() {
            1 => "1 scenario".to_string(),
            n => format!("{} scenarios", n),
        },
        NodeKind::Markdown(_) | NodeKind::Index(_) => "page".to_string(),
    }
}

/// Renders a directory's landing page
///
/// When the directory holds an index node its markdown comes first and
/// provides the heading; otherwise the directory title is used. A listing of
/// the directory's children follows, linked relative to this page.
///
/// # Arguments
///
/// * `node`: Directory node being rendered
/// * `title`: Heading used when there is no index content
/// * `markdown`: Renderer for the index content
pub fn render(node: &TreeNode, title: &str, markdown: &MarkdownRenderer<'_>) -> Markup {
    let index_content = node.index_child().and_then(|index| match index.kind() {
        NodeKind::Index(content) => Some(content.as_str()),
        _ => None,
    });
    let entries: Vec<&TreeNode> = node
        .children()
        .iter()
        .filter(|child| !child.is_index())
        .collect();

    html! {
        article class="directory" {
            @if let Some(content) = index_content {
                div class="markdown-body" {
                    (PreEscaped(markdown.render(content)))
                }
            } @else {
                h1 { (title) }
            }
            @if entries.is_empty() {
                p class="empty-state" { "Nothing in this folder" }
            } @else {
                ul class="directory-listing" {
                    @for entry in entries {
                        li class="directory-entry" {
                            a href=(relative_href(node, entry)) { (entry.title()) }
                            " "
                            span class="entry-kind" { (kind_label(entry)) }
                        }
                    }
                }
            }
        }
    }
}
