use std::{borrow::Borrow, fmt, ops::Deref};

use serde::Serialize;

/// A URL- and filename-safe identifier derived from a heading title.
///
/// Slugs only ever contain lowercase ASCII letters, digits and hyphens. The
/// only way to build one is [`slugify`], so every slug in the crate is the
/// deterministic image of some title.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the title contained nothing that survives
    /// slugification.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Derive a slug from a title.
///
/// ASCII alphanumerics, spaces and hyphens are kept, everything else is
/// dropped (not replaced). Spaces then become hyphens and the result is
/// lowercased.
///
/// ```
/// use sectional::domain::slugify;
///
/// assert_eq!(slugify("Hello, World!").as_str(), "hello-world");
/// assert_eq!(slugify("Null-safety (`?.`)").as_str(), "null-safety-");
/// ```
#[must_use]
pub fn slugify(title: &str) -> Slug {
    let slug = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-'))
        .map(|c| if c == ' ' { '-' } else { c.to_ascii_lowercase() })
        .collect();
    Slug(slug)
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Slug {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Deref for Slug {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Slug {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Slug {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
