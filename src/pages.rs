//! Page content modules for different node kinds
//!
//! Each module renders the main content of one node kind (feature,
//! markdown, directory). Layout and navigation are applied by the
//! formatter using the shared components module.

pub mod directory;
pub mod feature;
pub mod markdown;
