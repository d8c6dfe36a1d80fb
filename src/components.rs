//! Reusable HTML components for page generation
//!
//! Maud component functions shared by every page type (feature, markdown,
//! directory). The page modules supply only their main content; layout,
//! navigation and Gherkin building blocks live here.

pub mod footer;
pub mod gherkin;
pub mod layout;
pub mod nav;
