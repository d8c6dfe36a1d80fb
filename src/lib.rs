//! Static documentation generator for Gherkin feature folders.

mod assets;
mod builder;
pub mod components;
mod config;
mod crawler;
mod document;
mod formatter;
mod gherkin;
mod links;
mod markdown;
pub mod pages;
pub mod path;
mod registry;
mod tree;
pub mod visitor;

pub use assets::write_assets;
pub use builder::{BuildSummary, SiteBuilder, write_document};
pub use config::Config;
pub use crawler::crawl;
pub use document::{Document, Element, Node};
pub use formatter::{DocumentFormatter, HtmlFormatter};
pub use gherkin::{Examples, Feature, Scenario, Step, StepArgument, Table, parse_feature};
pub use links::{LinkReport, LinkResolver};
pub use markdown::MarkdownRenderer;
pub use path::relative_href;
pub use registry::FeatureRegistry;
pub use tree::{INDEX_MARKDOWN, NodeKind, TreeNode};
