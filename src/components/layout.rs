//! Page layout wrapper component

use maud::{DOCTYPE, Markup, html};

use super::footer::footer;

/// Location of the bundled stylesheet below the output root.
pub const STYLESHEET: &str = "css/featuredoc.css";

/// Location of the bundled script below the output root.
pub const SCRIPT: &str = "js/featuredoc.js";

/// Page level values shared by every page type.
pub struct PageContext<'a> {
    /// Page title text (without project suffix)
    pub title: &'a str,
    pub project: &'a str,
    /// Relative prefix from the page back to the output root
    pub root_prefix: &'a str,
    /// Source file shown in the footer
    pub source: &'a str,
}

/// Wraps page content with standard XHTML structure
///
/// Provides DOCTYPE, namespace, charset, viewport, stylesheet and script
/// loading. Asset paths are made relative through `root_prefix` so pages
/// work from any depth and without a web server.
///
/// # Arguments
///
/// * `ctx`: Page title, project and location
/// * `nav`: Table of contents markup for the side bar
/// * `breadcrumb`: Breadcrumb trail above the content
/// * `body`: Page-specific content
pub fn page_wrapper(
    ctx: &PageContext<'_>,
    nav: Markup,
    breadcrumb: Markup,
    body: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" xmlns="http://www.w3.org/1999/xhtml" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (ctx.title) " - " (ctx.project) }
                link rel="stylesheet" href=(format!("{}{}", ctx.root_prefix, STYLESHEET));
                script src=(format!("{}{}", ctx.root_prefix, SCRIPT)) {}
            }
            body {
                div class="layout" {
                    nav class="toc" id="toc" {
                        (nav)
                    }
                    div class="container" {
                        (breadcrumb)
                        main {
                            (body)
                        }
                        (footer(ctx.source))
                    }
                }
            }
        }
    }
}
