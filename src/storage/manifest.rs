use serde::{Deserialize, Serialize};

use crate::{
    domain::{Config, Section},
    storage::page_file_name,
};

/// One page in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// The page's file name, relative to the output directory.
    #[serde(rename = "md")]
    pub filename: String,
    /// The URL the site generator publishes the page under.
    pub url: String,
    /// The page's display title.
    pub title: String,
}

/// The listing of every emitted page, in document order.
///
/// Serialized as a YAML sequence with a blank line between records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Builds the manifest for `sections`, numbering pages from zero.
    #[must_use]
    pub fn new(sections: &[Section], config: &Config) -> Self {
        let entries = sections
            .iter()
            .enumerate()
            .map(|(index, section)| ManifestEntry {
                filename: page_file_name(
                    index,
                    section.slug(),
                    config.index_digits(),
                    config.page_extension(),
                ),
                url: format!("{}.{}", section.slug(), config.url_extension()),
                title: section.title().to_string(),
            })
            .collect();
        Self { entries }
    }

    /// The entries, in page order.
    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Render the manifest as YAML.
    ///
    /// Each record is serialized on its own as a one-item sequence so that
    /// records can be separated by a blank line; the concatenation is still a
    /// single valid YAML sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry cannot be serialized.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        let mut yaml = String::new();
        for entry in &self.entries {
            yaml.push_str(&serde_yaml::to_string(std::slice::from_ref(entry))?);
            yaml.push('\n');
        }
        Ok(yaml)
    }

    /// Parse a manifest previously produced by [`Manifest::to_yaml`].
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a YAML sequence of entries.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let entries = serde_yaml::from_str(yaml)?;
        Ok(Self { entries })
    }
}
