//! Split a long-form markdown document into per-section pages.
//!
//! A single source document is cut into sections at its `## ` headings.
//! Same-document links are rewritten to point at the page that now holds
//! their target, every page gets prev/next navigation, and a manifest lists
//! the pages for the site generator.

pub mod domain;
pub use domain::{Config, Diagnostic, Registry, Section, Slug};

/// The segmentation, link-rewriting and navigation pipeline.
pub mod split;
pub use split::{Document, SegmentError, split};

/// Writing pages and the manifest to disk.
pub mod storage;
pub use storage::{EmitError, Manifest, OutputDirectory};
