//! Cutting the source line stream into sections.
//!
//! The source is a preamble (dropped), a body delimited by two lines
//! consisting solely of `---`, and a postamble (also dropped). The body is
//! split at `## ` headings. Deeper headings become subsections: they stay in
//! their section's page, are raised one level, and are registered so that
//! links to them can be redirected to the owning page.

use tracing::{debug, instrument, trace, warn};

use crate::domain::{Registry, Section, Slug, registry::DuplicateSlug, slugify};

/// Title of the implicit section that holds everything before the first
/// `## ` heading.
pub const INTRODUCTION: &str = "Introduction";

/// A `## ` heading with this title stays in the current section instead of
/// starting a new one.
pub const CONTENTS: &str = "Contents";

const RULE: &str = "---";
const SECTION_MARKER: &str = "## ";

/// The output of segmentation: sections in document order plus the registry
/// of every identifier a link can target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmented {
    /// Sections in document order.
    pub sections: Vec<Section>,
    /// Section and subsection slugs.
    pub registry: Registry,
}

/// Errors that can occur while segmenting a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SegmentError {
    /// Two sections slugify to the same identifier.
    #[error("section '{title}' (line {line}) duplicates the slug '{slug}' of an earlier section")]
    DuplicateSection {
        /// Title of the later section.
        title: String,
        /// The shared slug.
        slug: Slug,
        /// 1-based line number in the source.
        line: usize,
    },
    /// Two subsections slugify to the same identifier.
    ///
    /// Every line starting with `#` is a heading, including comment lines in
    /// fenced code blocks.
    #[error(
        "heading '{title}' (line {line}) duplicates the slug '{slug}' of a heading in section \
         '{existing}'; lines starting with '#' count as headings, even inside code blocks"
    )]
    DuplicateSubsection {
        /// Title of the later heading.
        title: String,
        /// The shared slug.
        slug: Slug,
        /// The section holding the earlier heading.
        existing: Slug,
        /// 1-based line number in the source.
        line: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeforePreamble,
    InDocument,
    Done,
}

/// Line-at-a-time segmentation state machine.
#[derive(Debug)]
struct Segmenter {
    state: State,
    sections: Vec<Section>,
    registry: Registry,
    line_number: usize,
}

impl Segmenter {
    fn new() -> Self {
        Self {
            state: State::BeforePreamble,
            sections: Vec::new(),
            registry: Registry::default(),
            line_number: 0,
        }
    }

    fn is_done(&self) -> bool {
        self.state == State::Done
    }

    fn feed(&mut self, line: &str) -> Result<(), SegmentError> {
        self.line_number += 1;
        let content = strip_terminator(line);

        match self.state {
            State::BeforePreamble => {
                if content == RULE {
                    self.open_introduction();
                }
            }
            State::InDocument => self.feed_body(line, content)?,
            State::Done => {}
        }
        Ok(())
    }

    fn open_introduction(&mut self) {
        trace!(line = self.line_number, "end of preamble");
        let introduction = Section::new(INTRODUCTION);
        self.registry = Registry::with_section(introduction.slug().clone());
        self.sections.push(introduction);
        self.state = State::InDocument;
    }

    fn feed_body(&mut self, line: &str, content: &str) -> Result<(), SegmentError> {
        if content == RULE {
            trace!(line = self.line_number, "end of document body");
            self.state = State::Done;
            return Ok(());
        }

        if let Some(title) = content.strip_prefix(SECTION_MARKER) {
            if title == CONTENTS {
                self.current().push_line(line);
            } else {
                self.open_section(title)?;
            }
            return Ok(());
        }

        if content.is_empty() && self.current().is_empty() {
            return Ok(());
        }

        if content.starts_with('#') {
            return self.add_subsection(line, content);
        }

        self.current().push_line(line);
        Ok(())
    }

    fn open_section(&mut self, title: &str) -> Result<(), SegmentError> {
        let slug = slugify(title);
        debug!(title, %slug, line = self.line_number, "section");
        if slug.is_empty() {
            warn!(title, line = self.line_number, "section title has an empty slug");
        }

        self.registry
            .insert_section(slug.clone())
            .map_err(|DuplicateSlug(slug)| SegmentError::DuplicateSection {
                title: title.to_string(),
                slug,
                line: self.line_number,
            })?;
        self.sections
            .push(Section::with_slug(title.to_string(), slug));
        Ok(())
    }

    fn add_subsection(&mut self, line: &str, content: &str) -> Result<(), SegmentError> {
        let title = content.trim_start_matches('#').trim_start();
        let slug = slugify(title);
        let owner = self.current().slug().clone();
        trace!(title, %slug, section = %owner, "subsection");

        self.registry
            .insert_subsection(slug.clone(), owner)
            .map_err(|DuplicateSlug(existing)| SegmentError::DuplicateSubsection {
                title: title.to_string(),
                slug,
                existing,
                line: self.line_number,
            })?;

        // Raise the heading one level: it now sits under the page title.
        self.current().push_line(&line[1..]);
        Ok(())
    }

    fn current(&mut self) -> &mut Section {
        self.sections
            .last_mut()
            .expect("a section is always open while in the document body")
    }

    fn finish(self) -> Segmented {
        if self.state == State::BeforePreamble {
            debug!("no preamble delimiter found; document is empty");
        }
        Segmented {
            sections: self.sections,
            registry: self.registry,
        }
    }
}

/// Segment a document given as a sequence of lines.
///
/// Lines may carry their line terminators (as produced by
/// [`str::split_inclusive`]); terminators are preserved in the section
/// buffers and ignored when matching markers.
///
/// # Errors
///
/// Returns an error if two sections, or two subsections, share a slug.
#[instrument(level = "debug", skip_all)]
pub fn segment<'a, I>(lines: I) -> Result<Segmented, SegmentError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut segmenter = Segmenter::new();
    for line in lines {
        segmenter.feed(line)?;
        if segmenter.is_done() {
            break;
        }
    }
    let segmented = segmenter.finish();
    debug!(sections = segmented.sections.len(), "segmented");
    Ok(segmented)
}

fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment_str(source: &str) -> Segmented {
        segment(source.split_inclusive('\n')).unwrap()
    }

    fn titles(segmented: &Segmented) -> Vec<&str> {
        segmented.sections.iter().map(Section::title).collect()
    }

    #[test]
    fn splits_at_level_two_headings() {
        let segmented = segment_str(
            "Preamble\n---\n## Alpha\ncontent A\n## Beta\nsee [x](#alpha)\n---\nPostamble\n",
        );

        assert_eq!(titles(&segmented), ["Introduction", "Alpha", "Beta"]);
        let [intro, alpha, beta] = segmented.sections.as_slice() else {
            panic!("expected three sections");
        };
        assert_eq!(intro.slug(), "introduction");
        assert!(intro.is_empty());
        assert_eq!(alpha.slug(), "alpha");
        assert_eq!(alpha.lines(), ["content A\n"]);
        assert_eq!(beta.slug(), "beta");
        assert_eq!(beta.lines(), ["see [x](#alpha)\n"]);
    }

    #[test]
    fn preamble_and_postamble_are_dropped() {
        let segmented = segment_str("# Title\nabout\n---\nintro\n---\n## After\nignored\n");

        assert_eq!(titles(&segmented), ["Introduction"]);
        assert_eq!(segmented.sections[0].lines(), ["intro\n"]);
        assert!(!segmented.registry.is_section("after"));
    }

    #[test]
    fn missing_opening_rule_yields_no_sections() {
        let segmented = segment_str("## Alpha\ncontent\n");
        assert!(segmented.sections.is_empty());
        assert_eq!(segmented.registry.sections().count(), 0);
    }

    #[test]
    fn missing_closing_rule_runs_to_end_of_input() {
        let segmented = segment_str("---\n## Alpha\nlast line");
        assert_eq!(titles(&segmented), ["Introduction", "Alpha"]);
        assert_eq!(segmented.sections[1].lines(), ["last line"]);
    }

    #[test]
    fn contents_heading_stays_in_current_section() {
        let segmented = segment_str("---\nWelcome\n## Contents\n- [Alpha](#alpha)\n## Alpha\n---\n");

        assert_eq!(titles(&segmented), ["Introduction", "Alpha"]);
        assert_eq!(
            segmented.sections[0].lines(),
            ["Welcome\n", "## Contents\n", "- [Alpha](#alpha)\n"]
        );
        assert!(!segmented.registry.is_section("contents"));
    }

    #[test]
    fn section_count_is_headings_plus_introduction() {
        let source = "---\n## A\n## Contents\n## B\n### b1\n## C\n---\n";
        let headings = source
            .lines()
            .filter(|l| l.starts_with("## ") && *l != "## Contents")
            .count();
        assert_eq!(segment_str(source).sections.len(), headings + 1);
    }

    #[test]
    fn leading_blank_lines_are_dropped() {
        let segmented = segment_str("---\n\n\nintro\n\n## Alpha\n\n\ntext\n\nmore\n---\n");

        assert_eq!(segmented.sections[0].lines(), ["intro\n", "\n"]);
        assert_eq!(
            segmented.sections[1].lines(),
            ["text\n", "\n", "more\n"]
        );
    }

    #[test]
    fn subsection_is_registered_and_raised() {
        let segmented = segment_str("---\n## Alpha\n### Detail\nbody\n#### Fine Print\n---\n");

        let alpha = &segmented.sections[1];
        assert_eq!(alpha.lines(), ["## Detail\n", "body\n", "### Fine Print\n"]);
        assert_eq!(
            segmented.registry.owner_of("detail").map(Slug::as_str),
            Some("alpha")
        );
        assert_eq!(
            segmented.registry.owner_of("fine-print").map(Slug::as_str),
            Some("alpha")
        );
    }

    #[test]
    fn subsection_before_first_section_belongs_to_introduction() {
        let segmented = segment_str("---\n### Getting started\n## Alpha\n---\n");
        assert_eq!(
            segmented
                .registry
                .owner_of("getting-started")
                .map(Slug::as_str),
            Some("introduction")
        );
        assert_eq!(segmented.sections[0].lines(), ["## Getting started\n"]);
    }

    #[test]
    fn level_one_heading_is_a_subsection() {
        let segmented = segment_str("---\n## Alpha\n# Odd\n---\n");
        assert_eq!(segmented.sections[1].lines(), [" Odd\n"]);
        assert!(segmented.registry.owner_of("odd").is_some());
    }

    #[test]
    fn heading_without_space_is_not_a_section() {
        let segmented = segment_str("---\n##Alpha\n---\n");
        assert_eq!(titles(&segmented), ["Introduction"]);
        assert_eq!(segmented.sections[0].lines(), ["#Alpha\n"]);
    }

    #[test]
    fn crlf_terminators_are_recognised_and_preserved() {
        let segmented = segment_str("pre\r\n---\r\n## Alpha\r\ntext\r\n---\r\n");
        assert_eq!(titles(&segmented), ["Introduction", "Alpha"]);
        assert_eq!(segmented.sections[1].lines(), ["text\r\n"]);
    }

    #[test]
    fn indented_rule_is_content() {
        let segmented = segment_str("---\n## Alpha\n ---\nstill alpha\n---\n");
        assert_eq!(segmented.sections[1].lines(), [" ---\n", "still alpha\n"]);
    }

    #[test]
    fn duplicate_section_fails_fast() {
        let error = segment("---\n## Alpha\n## alpha!\n---\n".split_inclusive('\n')).unwrap_err();
        assert_eq!(
            error,
            SegmentError::DuplicateSection {
                title: "alpha!".to_string(),
                slug: slugify("Alpha"),
                line: 3,
            }
        );
    }

    #[test]
    fn introduction_heading_collides_with_implicit_section() {
        let error = segment("---\n## Introduction\n---\n".split_inclusive('\n')).unwrap_err();
        assert!(matches!(error, SegmentError::DuplicateSection { line: 2, .. }));
    }

    #[test]
    fn duplicate_subsection_fails_fast() {
        let error = segment(
            "---\n## Alpha\n### Examples\n## Beta\n### Examples\n---\n".split_inclusive('\n'),
        )
        .unwrap_err();
        assert_eq!(
            error,
            SegmentError::DuplicateSubsection {
                title: "Examples".to_string(),
                slug: slugify("Examples"),
                existing: slugify("Alpha"),
                line: 5,
            }
        );
    }

    #[test]
    fn comment_lines_in_code_fences_are_headings() {
        let source = "---\n## Scripts\n```python\n# comment\nx = 1\n```\n\n```python\n# comment\n```\n---\n";
        let error = segment(source.split_inclusive('\n')).unwrap_err();

        assert_eq!(
            error,
            SegmentError::DuplicateSubsection {
                title: "comment".to_string(),
                slug: slugify("comment"),
                existing: slugify("Scripts"),
                line: 9,
            }
        );
        assert!(error.to_string().contains("even inside code blocks"));
    }

    #[test]
    fn subsection_may_share_a_section_slug() {
        let segmented = segment_str("---\n## Alpha\n## Beta\n### Alpha\n---\n");
        assert!(segmented.registry.is_section("alpha"));
        assert_eq!(
            segmented.registry.owner_of("alpha").map(Slug::as_str),
            Some("beta")
        );
    }

    #[test]
    fn duplicates_after_closing_rule_are_ignored() {
        let segmented = segment_str("---\n## Alpha\n---\n## Alpha\n");
        assert_eq!(titles(&segmented), ["Introduction", "Alpha"]);
    }
}
