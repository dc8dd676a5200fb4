//! The registry maps link targets to the page that holds them.
//!
//! It is filled while the document is segmented and is read-only once
//! segmentation returns; link rewriting only ever sees a shared reference.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::Slug;

/// Section slugs and subsection slugs (with their owning section).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    sections: BTreeSet<Slug>,
    subsections: BTreeMap<Slug, Slug>,
}

/// What a same-document link target resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// The target is a whole section; link to its page.
    Section(&'a Slug),
    /// The target is a heading inside a section; link to the owning page
    /// with a fragment.
    Subsection {
        /// The section whose page contains the heading.
        section: &'a Slug,
        /// The heading's own slug, used as the fragment.
        anchor: &'a Slug,
    },
}

/// Returned when a slug is registered twice within the same class.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("slug '{0}' is already registered")]
pub struct DuplicateSlug(pub Slug);

impl Registry {
    /// A registry holding the single section `slug`.
    pub(crate) fn with_section(slug: Slug) -> Self {
        Self {
            sections: BTreeSet::from([slug]),
            subsections: BTreeMap::new(),
        }
    }

    pub(crate) fn insert_section(&mut self, slug: Slug) -> Result<(), DuplicateSlug> {
        if self.sections.contains(&slug) {
            return Err(DuplicateSlug(slug));
        }
        self.sections.insert(slug);
        Ok(())
    }

    /// Registers `slug` as a heading inside `section`.
    ///
    /// On collision, the error carries the section that already owns the
    /// slug.
    pub(crate) fn insert_subsection(
        &mut self,
        slug: Slug,
        section: Slug,
    ) -> Result<(), DuplicateSlug> {
        if let Some(owner) = self.subsections.get(&slug) {
            return Err(DuplicateSlug(owner.clone()));
        }
        self.subsections.insert(slug, section);
        Ok(())
    }

    /// Resolve a link target.
    ///
    /// Section slugs take precedence over subsection slugs.
    #[must_use]
    pub fn resolve(&self, target: &str) -> Option<Target<'_>> {
        if let Some(section) = self.sections.get(target) {
            return Some(Target::Section(section));
        }
        self.subsections
            .get_key_value(target)
            .map(|(anchor, section)| Target::Subsection { section, anchor })
    }

    /// Returns `true` if `slug` names a section.
    #[must_use]
    pub fn is_section(&self, slug: &str) -> bool {
        self.sections.contains(slug)
    }

    /// The section that owns the subsection `slug`, if any.
    #[must_use]
    pub fn owner_of(&self, slug: &str) -> Option<&Slug> {
        self.subsections.get(slug)
    }

    /// All registered section slugs, in sorted order.
    pub fn sections(&self) -> impl Iterator<Item = &Slug> {
        self.sections.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::slugify;

    fn registry() -> Registry {
        let mut registry = Registry::default();
        registry.insert_section(slugify("Alpha")).unwrap();
        registry.insert_section(slugify("Beta")).unwrap();
        registry
            .insert_subsection(slugify("Detail"), slugify("Alpha"))
            .unwrap();
        registry
    }

    #[test]
    fn resolves_section() {
        let registry = registry();
        assert_eq!(
            registry.resolve("beta"),
            Some(Target::Section(&slugify("Beta")))
        );
    }

    #[test]
    fn resolves_subsection_with_owner() {
        let registry = registry();
        let alpha = slugify("Alpha");
        let detail = slugify("Detail");
        assert_eq!(
            registry.resolve("detail"),
            Some(Target::Subsection {
                section: &alpha,
                anchor: &detail,
            })
        );
        assert_eq!(registry.owner_of("detail"), Some(&alpha));
    }

    #[test]
    fn section_wins_over_subsection() {
        let mut registry = registry();
        registry
            .insert_subsection(slugify("Beta"), slugify("Alpha"))
            .unwrap();
        assert_eq!(
            registry.resolve("beta"),
            Some(Target::Section(&slugify("Beta")))
        );
    }

    #[test]
    fn seeded_registry_holds_one_section() {
        let registry = Registry::with_section(slugify("Introduction"));
        assert!(registry.is_section("introduction"));
        assert_eq!(registry.sections().count(), 1);
        assert_eq!(registry.owner_of("introduction"), None);
    }

    #[test]
    fn unknown_target_is_unresolved() {
        assert_eq!(registry().resolve("nowhere"), None);
        assert!(!registry().is_section("nowhere"));
    }

    #[test]
    fn duplicate_section_is_rejected() {
        let mut registry = registry();
        let error = registry.insert_section(slugify("alpha")).unwrap_err();
        assert_eq!(error, DuplicateSlug(slugify("Alpha")));
    }

    #[test]
    fn duplicate_subsection_reports_existing_owner() {
        let mut registry = registry();
        let error = registry
            .insert_subsection(slugify("Detail"), slugify("Beta"))
            .unwrap_err();
        assert_eq!(error, DuplicateSlug(slugify("Alpha")));
    }
}
