use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for splitting a document.
///
/// Controls how output files and URLs are named and what legal notice is
/// prepended to each page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Extension of the emitted page files, without the dot.
    ///
    /// For example, 'md' gives `01-alpha.md`.
    page_extension: String,

    /// Extension used in rewritten links, navigation and the manifest URL,
    /// without the dot.
    ///
    /// This is the extension the site generator publishes pages under, so
    /// it usually differs from the page extension.
    url_extension: String,

    /// The number of digits in the page index.
    ///
    /// Indices are padded to this width with leading zeros.
    /// For example, '01' (2 digits) or '001' (3 digits).
    index_digits: usize,

    /// File name of the manifest, relative to the output directory.
    pub manifest: String,

    /// Attribution and license notice prepended to every page.
    pub notice: Notice,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_extension: default_page_extension(),
            url_extension: default_url_extension(),
            index_digits: default_index_digits(),
            manifest: default_manifest(),
            notice: Notice::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(Error::Read)?;
        Ok(toml::from_str(&content)?)
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(Error::Write)
    }

    /// Extension of the emitted page files.
    #[must_use]
    pub fn page_extension(&self) -> &str {
        &self.page_extension
    }

    /// Extension used in links to other pages.
    #[must_use]
    pub fn url_extension(&self) -> &str {
        &self.url_extension
    }

    /// Returns the number of digits for padding page indices.
    #[must_use]
    pub const fn index_digits(&self) -> usize {
        self.index_digits
    }

    /// Sets the page file extension. A leading dot is ignored.
    pub fn set_page_extension(&mut self, extension: &str) {
        self.page_extension = extension.trim_start_matches('.').to_string();
    }

    /// Sets the link extension. A leading dot is ignored.
    pub fn set_url_extension(&mut self, extension: &str) {
        self.url_extension = extension.trim_start_matches('.').to_string();
    }
}

/// Errors that can occur when loading or saving a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Read(#[source] std::io::Error),
    /// The configuration file could not be written.
    #[error("failed to write config file: {0}")]
    Write(#[source] std::io::Error),
    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be rendered as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The attribution block written at the top of every page.
///
/// Rendered as a single italic paragraph naming the author, the rights
/// holder and the license, followed by the disclaimer and a horizontal rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notice {
    /// Who wrote the material.
    pub author: Attribution,
    /// Who owns the material.
    pub owner: Attribution,
    /// The license the material is used under.
    pub license: Attribution,
    /// Closing sentence of the notice.
    pub disclaimer: String,
}

/// A name with a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    /// Display name.
    pub name: String,
    /// Link target for the name.
    pub url: String,
}

impl Attribution {
    fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

impl Default for Notice {
    fn default() -> Self {
        Self {
            author: Attribution::new("Aasmund Eldhuset", "https://eldhuset.net/"),
            owner: Attribution::new("Khan Academy", "https://www.khanacademy.org/"),
            license: Attribution::new(
                "CC BY-NC-SA 3.0 US",
                "https://creativecommons.org/licenses/by-nc-sa/3.0/us/",
            ),
            disclaimer: "Please note that this is not a part of Khan Academy's official product \
                         offering."
                .to_string(),
        }
    }
}

impl Notice {
    /// Render the notice as the markdown block that opens a page.
    #[must_use]
    pub fn render(&self) -> String {
        let Self {
            author,
            owner,
            license,
            disclaimer,
        } = self;
        format!(
            "_This material was written by [{}]({}); it is owned by [{}]({}) and is licensed \
             for use under [{}]({}). {disclaimer}_\n\n---\n\n\n",
            author.name, author.url, owner.name, owner.url, license.name, license.url,
        )
    }
}

fn default_page_extension() -> String {
    "md".to_string()
}

fn default_url_extension() -> String {
    "html".to_string()
}

const fn default_index_digits() -> usize {
    2
}

fn default_manifest() -> String {
    "manifest.yaml".to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_page_extension")]
        page_extension: String,

        #[serde(default = "default_url_extension")]
        url_extension: String,

        /// The number of digits in the page index.
        #[serde(default = "default_index_digits")]
        index_digits: usize,

        #[serde(default = "default_manifest")]
        manifest: String,

        #[serde(default)]
        notice: Notice,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                page_extension,
                url_extension,
                index_digits,
                manifest,
                notice,
            } => Self {
                page_extension,
                url_extension,
                index_digits,
                manifest,
                notice,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            page_extension: config.page_extension,
            url_extension: config.url_extension,
            index_digits: config.index_digits,
            manifest: config.manifest,
            notice: config.notice,
        }
    }
}
