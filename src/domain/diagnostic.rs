use std::fmt;

use serde::Serialize;

use crate::domain::Slug;

/// A non-fatal problem found while splitting a document.
///
/// Diagnostics are collected and returned alongside the result rather than
/// printed, so callers decide how (and whether) to surface them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A same-document link whose target is neither a section nor a
    /// subsection. The link markup was dropped and its text kept.
    UnresolvedLink {
        /// The section containing the link.
        section: Slug,
        /// 1-based line number within the section.
        line: usize,
        /// The fragment the link pointed at.
        target: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedLink {
                section,
                line,
                target,
            } => write!(f, "{section}:{line}: unresolved link target '#{target}'"),
        }
    }
}
