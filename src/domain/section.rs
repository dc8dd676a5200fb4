use crate::domain::{Slug, slugify};

/// A top-level titled unit of the source document.
///
/// Each section becomes exactly one output page. Lines keep their own line
/// terminators so that concatenating them reproduces the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    title: String,
    slug: Slug,
    lines: Vec<String>,
}

impl Section {
    /// Creates an empty section, deriving its slug from the title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let slug = slugify(&title);
        Self::with_slug(title, slug)
    }

    pub(crate) const fn with_slug(title: String, slug: Slug) -> Self {
        Self {
            title,
            slug,
            lines: Vec::new(),
        }
    }

    /// The display title, as written in the heading.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The section's unique identifier.
    #[must_use]
    pub const fn slug(&self) -> &Slug {
        &self.slug
    }

    /// The lines owned by this section, in document order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Mutable access to the lines, for in-place rewriting.
    pub fn lines_mut(&mut self) -> &mut [String] {
        &mut self.lines
    }

    /// Appends a line (including its terminator) to the section.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Returns `true` if no lines have been accumulated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The section body: all lines concatenated.
    #[must_use]
    pub fn body(&self) -> String {
        self.lines.concat()
    }
}
