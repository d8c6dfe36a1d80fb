//! Building blocks for rendering parsed Gherkin

use maud::{Markup, PreEscaped, html};

use crate::gherkin::{Scenario, Step, StepArgument, Table};
use crate::markdown::MarkdownRenderer;

/// Renders tag badges
pub fn tags(tags: &[String]) -> Markup {
    html! {
        @if !tags.is_empty() {
            ul class="tags" {
                @for tag in tags {
                    li class="tag" { (tag) }
                }
            }
        }
    }
}

/// Renders a Gherkin table, first row as header
pub fn table(table: &Table) -> Markup {
    html! {
        table class="gherkin-table" {
            @if let Some(header) = table.header() {
                thead {
                    tr {
                        @for cell in header {
                            th { (cell) }
                        }
                    }
                }
            }
            tbody {
                @for row in table.body() {
                    tr {
                        @for cell in row {
                            td { (cell) }
                        }
                    }
                }
            }
        }
    }
}

/// Renders a markdown description block, nothing when empty
pub fn description(text: &str, markdown: &MarkdownRenderer<'_>) -> Markup {
    html! {
        @if !text.is_empty() {
            div class="description" {
                (PreEscaped(markdown.render(text)))
            }
        }
    }
}

fn step(step: &Step) -> Markup {
    html! {
        li class="step" {
            span class="keyword" { (step.keyword) }
            " "
            span class="step-text" { (step.text) }
            @match &step.argument {
                Some(StepArgument::Table(data)) => {
                    (table(data))
                }
                Some(StepArgument::DocString(text)) => {
                    pre class="doc-string" { code { (text) } }
                }
                None => {}
            }
        }
    }
}

/// Renders a background or scenario section
///
/// # Arguments
///
/// * `scenario`: Scenario, outline or background
/// * `markdown`: Renderer for the scenario description
pub fn scenario(scenario: &Scenario, markdown: &MarkdownRenderer<'_>) -> Markup {
    let class = if scenario.keyword == "Background" {
        "background"
    } else {
        "scenario"
    };

    html! {
        section class=(class) {
            (tags(&scenario.tags))
            h2 {
                span class="keyword" { (scenario.keyword) ":" }
                @if !scenario.name.is_empty() {
                    " " (scenario.name)
                }
            }
            (description(&scenario.description, markdown))
            @if !scenario.steps.is_empty() {
                ul class="steps" {
                    @for item in &scenario.steps {
                        (step(item))
                    }
                }
            }
            @for examples in &scenario.examples {
                div class="examples" {
                    h3 {
                        span class="keyword" { "Examples:" }
                        @if !examples.name.is_empty() {
                            " " (examples.name)
                        }
                    }
                    (table(&examples.table))
                }
            }
        }
    }
}
