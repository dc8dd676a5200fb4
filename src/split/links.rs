//! Redirecting same-document links to the page that now holds their target.
//!
//! Links are found by their closing `](#target)` rather than by the whole
//! `[text](#target)` construct. The text may wrap onto earlier lines or nest
//! brackets arbitrarily deep; rewriting only ever touches the part from `]`
//! onwards, so the opening `[` does not have to be on the same line.

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

use crate::domain::{Registry, Target};

/// `](#target)`, the tail of a same-document link.
static LINK_TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\(#([-A-Za-z0-9]+)\)").expect("link pattern is valid"));

/// Rewrites same-document links against a finished [`Registry`].
#[derive(Debug, Clone, Copy)]
pub struct LinkRewriter<'a> {
    registry: &'a Registry,
    url_extension: &'a str,
}

/// The result of rewriting a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten<'a> {
    /// The rewritten line. Borrowed when the line contained no
    /// same-document links.
    pub line: Cow<'a, str>,
    /// Targets that matched neither a section nor a subsection, in order of
    /// appearance.
    pub unresolved: Vec<String>,
}

impl<'a> LinkRewriter<'a> {
    /// Creates a rewriter producing links of the form `slug.{url_extension}`.
    #[must_use]
    pub const fn new(registry: &'a Registry, url_extension: &'a str) -> Self {
        Self {
            registry,
            url_extension,
        }
    }

    /// Rewrite every same-document link in `line`.
    ///
    /// - a section target becomes a link to that section's page
    /// - a subsection target becomes a link to the owning page with the
    ///   subsection as fragment
    /// - an unknown target loses its link markup and is reported in
    ///   [`Rewritten::unresolved`]. If the matching `[` is on this line it is
    ///   removed too and the visible text is kept; otherwise only the
    ///   `](#target)` part is dropped.
    ///
    /// Rewritten links no longer match the same-document pattern, so
    /// rewriting an already rewritten line changes nothing.
    #[must_use]
    pub fn rewrite_line<'l>(&self, line: &'l str) -> Rewritten<'l> {
        let mut unresolved = Vec::new();
        let mut rewritten = String::with_capacity(line.len());
        let mut rest = 0;

        for captures in LINK_TARGET.captures_iter(line) {
            let link = captures.get_match();
            let target = &captures[1];
            let text = &line[rest..link.start()];
            rest = link.end();

            match self.registry.resolve(target) {
                Some(Target::Section(section)) => {
                    rewritten.push_str(text);
                    rewritten.push_str(&format!("]({section}.{})", self.url_extension));
                }
                Some(Target::Subsection { section, anchor }) => {
                    rewritten.push_str(text);
                    rewritten.push_str(&format!("]({section}.{}#{anchor})", self.url_extension));
                }
                None => {
                    unresolved.push(target.to_string());
                    rewritten.push_str(&without_opening_bracket(text));
                }
            }
        }

        if rest == 0 {
            return Rewritten {
                line: Cow::Borrowed(line),
                unresolved,
            };
        }
        rewritten.push_str(&line[rest..]);
        Rewritten {
            line: Cow::Owned(rewritten),
            unresolved,
        }
    }
}

/// Drop the `[` that opens the link whose `]` directly follows `text`.
///
/// Brackets are balanced from the right, so nested pairs inside the link
/// text are kept. If the opening bracket is not in `text` (the link text
/// started on an earlier line), `text` is returned unchanged.
fn without_opening_bracket(text: &str) -> Cow<'_, str> {
    opening_bracket(text).map_or(Cow::Borrowed(text), |open| {
        Cow::Owned(format!("{}{}", &text[..open], &text[open + 1..]))
    })
}

fn opening_bracket(text: &str) -> Option<usize> {
    let mut depth = 0_usize;
    for (index, c) in text.char_indices().rev() {
        match c {
            ']' => depth += 1,
            '[' if depth == 0 => return Some(index),
            '[' => depth -= 1,
            _ => {}
        }
    }
    None
}
