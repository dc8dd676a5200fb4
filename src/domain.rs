//! Domain models for document splitting.
//!
//! This module contains the core value types: slugs, sections, the slug
//! registry built during segmentation, diagnostics and configuration.

/// Title to identifier normalisation.
pub mod slug;
pub use slug::{Slug, slugify};

mod section;
pub use section::Section;

/// Section and subsection identifiers collected during segmentation.
pub mod registry;
pub use registry::{Registry, Target};

mod diagnostic;
pub use diagnostic::Diagnostic;

/// Tool configuration and the legal notice prepended to every page.
pub mod config;
pub use config::{Config, Notice};
