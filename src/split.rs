//! The splitting pipeline.
//!
//! Splitting runs in two phases. Segmentation walks the source once and
//! returns the sections together with a [`Registry`] of every link target.
//! Rewriting then takes that registry by shared reference, so every link is
//! resolved against the complete set of targets regardless of where in the
//! document it appears. Navigation is appended last.

mod links;
/// Previous/next footers.
pub mod navigation;
mod segment;

pub use links::{LinkRewriter, Rewritten};
pub use segment::{CONTENTS, INTRODUCTION, SegmentError, Segmented, segment};
use tracing::{instrument, warn};

use crate::domain::{Config, Diagnostic, Registry, Section};

/// A fully processed document, ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    sections: Vec<Section>,
    registry: Registry,
    diagnostics: Vec<Diagnostic>,
}

impl Document {
    /// Sections in document order, with links rewritten and navigation
    /// appended.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// The identifiers links were resolved against.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Problems found while rewriting links.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Split a source document into linked sections.
///
/// # Errors
///
/// Returns an error if two sections, or two subsections, share a slug.
#[instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn split(source: &str, config: &Config) -> Result<Document, SegmentError> {
    let Segmented {
        mut sections,
        registry,
    } = segment(source.split_inclusive('\n'))?;

    let diagnostics = rewrite_links(&mut sections, &registry, config.url_extension());
    navigation::annotate(&mut sections, config.url_extension());

    Ok(Document {
        sections,
        registry,
        diagnostics,
    })
}

/// Rewrite same-document links in every section, collecting a diagnostic for
/// each link that could not be resolved.
pub fn rewrite_links(
    sections: &mut [Section],
    registry: &Registry,
    url_extension: &str,
) -> Vec<Diagnostic> {
    let rewriter = LinkRewriter::new(registry, url_extension);
    let mut diagnostics = Vec::new();

    for section in sections {
        let slug = section.slug().clone();
        for (index, line) in section.lines_mut().iter_mut().enumerate() {
            let Rewritten {
                line: rewritten,
                unresolved,
            } = rewriter.rewrite_line(line);
            let rewritten = rewritten.into_owned();

            for target in unresolved {
                warn!(section = %slug, line = index + 1, target = target.as_str(), "unresolved link");
                diagnostics.push(Diagnostic::UnresolvedLink {
                    section: slug.clone(),
                    line: index + 1,
                    target,
                });
            }
            *line = rewritten;
        }
    }

    diagnostics
}
