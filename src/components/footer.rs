//! Page footer component

use maud::{Markup, html};

/// Renders page footer naming the source file the page was generated from
pub fn footer(source: &str) -> Markup {
    html! {
        footer {
            p class="source" {
                "Source: "
                code { (source) }
            }
            p {
                "Generated by featuredoc"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_escapes_source() {
        // Act
        let html = footer("features/a&b.feature").into_string();

        // Assert
        assert!(html.contains("features/a&amp;b.feature"));
        assert!(html.contains("featuredoc"));
    }
}
