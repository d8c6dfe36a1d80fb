//! Markdown page content

use maud::{Markup, PreEscaped, html};

use crate::markdown::MarkdownRenderer;

/// Renders a standalone markdown document
pub fn render(content: &str, markdown: &MarkdownRenderer<'_>) -> Markup {
    html! {
        article class="markdown-body" {
            (PreEscaped(markdown.render(content)))
        }
    }
}
