//! Previous/next links between consecutive pages.

use crate::domain::Section;

const SEPARATOR: &str = " | ";

/// The navigation text for a page, given its neighbours.
///
/// Either neighbour may be absent; with neither, the text is empty.
#[must_use]
pub fn links(previous: Option<&Section>, next: Option<&Section>, url_extension: &str) -> String {
    let previous = previous.map(|section| {
        format!(
            "[← Previous: {}]({}.{url_extension})",
            section.title(),
            section.slug()
        )
    });
    let next = next.map(|section| {
        format!(
            "[Next: {} →]({}.{url_extension})",
            section.title(),
            section.slug()
        )
    });
    previous
        .into_iter()
        .chain(next)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// The footer block appended to a page: a horizontal rule followed by the
/// navigation links.
#[must_use]
pub fn footer(previous: Option<&Section>, next: Option<&Section>, url_extension: &str) -> String {
    format!("\n\n---\n\n{}\n", links(previous, next, url_extension))
}

/// Append a navigation footer to every section.
///
/// Navigation depends only on position, so this may run before or after
/// link rewriting.
pub fn annotate(sections: &mut [Section], url_extension: &str) {
    let footers: Vec<String> = (0..sections.len())
        .map(|i| {
            let previous = i.checked_sub(1).map(|p| &sections[p]);
            let next = sections.get(i + 1);
            footer(previous, next, url_extension)
        })
        .collect();

    for (section, footer) in sections.iter_mut().zip(footers) {
        section.push_line(footer);
    }
}
