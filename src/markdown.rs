//! Markdown rendering for feature descriptions and markdown pages.
//!
//! Output is always well formed XHTML so rendered pages can be parsed back
//! into a [`Document`](crate::Document) for link completion.

use comrak::Options;

/// Renders markdown to XHTML with GitHub Flavored Markdown extensions.
///
/// Enables tables, strikethrough, autolinks and task lists. Raw HTML in the
/// source is suppressed (comrak replaces it with a comment) since arbitrary
/// HTML fragments cannot be guaranteed to parse as XML. Footnotes stay off
/// because comrak marks their section with a valueless attribute.
///
/// A link with an empty destination, `[Checkout]()`, renders as
/// `<a href="">Checkout</a>`: an unresolved reference to the feature named
/// by the link text.
pub struct MarkdownRenderer<'a> {
    options: Options<'a>,
}

impl<'a> MarkdownRenderer<'a> {
    pub fn new() -> Self {
        let mut options = Options::default();

        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;

        // Link text must reach the resolver exactly as the feature is named
        options.parse.smart = false;

        // Keep raw HTML out: the page must round-trip through an XML reader
        options.render.unsafe_ = false;

        Self { options }
    }

    /// Renders markdown content to an XHTML fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuredoc::MarkdownRenderer;
    ///
    /// let html = MarkdownRenderer::new().render("See [Login]().");
    /// assert!(html.contains(r#"<a href="">Login</a>"#));
    /// ```
    pub fn render(&self, content: &str) -> String {
        comrak::markdown_to_html(content, &self.options)
    }
}

impl Default for MarkdownRenderer<'_> {
    fn default() -> Self {
        Self::new()
    }
}
