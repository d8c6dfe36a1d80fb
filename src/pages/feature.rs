//! Feature page content

use maud::{Markup, html};

use crate::components::gherkin::{description, scenario, tags};
use crate::gherkin::Feature;
use crate::markdown::MarkdownRenderer;

/// Renders the main content of a feature page
///
/// Shows tags, title, the markdown description (where by-name feature
/// references appear as links with empty targets), the background and every
/// scenario in file order.
pub fn render(feature: &Feature, markdown: &MarkdownRenderer<'_>) -> Markup {
    html! {
        article class="feature" {
            (tags(&feature.tags))
            h1 class="feature-title" { (feature.name) }
            (description(&feature.description, markdown))
            @if let Some(background) = &feature.background {
                (scenario(background, markdown))
            }
            @for item in &feature.scenarios {
                (scenario(item, markdown))
            }
        }
    }
}
