use crate::domain::{Notice, Section, Slug};

/// The file name of the page at position `index`.
///
/// The index is zero-padded to `digits` so that pages sort in document
/// order: `01-alpha.md`, `02-beta.md`, ...
#[must_use]
pub fn page_file_name(index: usize, slug: &Slug, digits: usize, extension: &str) -> String {
    format!("{index:0digits$}-{slug}.{extension}")
}

/// The full content of a page: the notice, then the section body.
#[must_use]
pub fn render_page(notice: &Notice, section: &Section) -> String {
    let mut page = notice.render();
    page.push_str(&section.body());
    page
}
