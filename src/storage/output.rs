use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, info, instrument};

use crate::{
    Document,
    domain::Config,
    storage::{Manifest, render_page},
};

/// The directory pages and the manifest are written to.
#[derive(Debug)]
pub struct OutputDirectory {
    root: PathBuf,
    config: Config,
}

/// Errors that can occur when writing the split document.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// A page, the manifest, or the directory itself could not be written.
    #[error("failed to write {}", .path.display())]
    Io {
        /// The path being written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// The manifest could not be serialized.
    #[error("failed to serialize manifest")]
    Yaml(#[from] serde_yaml::Error),
}

impl OutputDirectory {
    /// Creates a handle on `root`. Nothing is touched until [`Self::write`].
    #[must_use]
    pub const fn new(root: PathBuf, config: Config) -> Self {
        Self { root, config }
    }

    /// The output directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The path of the manifest file.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.config.manifest)
    }

    /// Write one page per section and the manifest.
    ///
    /// The directory is created if it does not exist. Existing files with the
    /// same names are overwritten, so regenerating from the same input is
    /// idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be written. Files written before
    /// the failure are left in place.
    #[instrument(skip(self, document), fields(root = %self.root.display()))]
    pub fn write(&self, document: &Document) -> Result<Manifest, EmitError> {
        fs::create_dir_all(&self.root).map_err(|source| EmitError::Io {
            path: self.root.clone(),
            source,
        })?;

        let manifest = Manifest::new(document.sections(), &self.config);

        for (section, entry) in document.sections().iter().zip(manifest.entries()) {
            let path = self.root.join(&entry.filename);
            debug!(path = %path.display(), "writing page");
            let page = render_page(&self.config.notice, section);
            write_file(&path, page.as_bytes())?;
        }

        let path = self.manifest_path();
        write_file(&path, manifest.to_yaml()?.as_bytes())?;

        info!(pages = manifest.entries().len(), "wrote pages");
        Ok(manifest)
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), EmitError> {
    let write = || -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(contents)?;
        writer.flush()
    };
    write().map_err(|source| EmitError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::split;

    const SOURCE: &str = "preamble\n---\n## Alpha\ncontent A\n## Beta\nsee [x](#alpha)\n---\n";

    #[test]
    fn writes_pages_and_manifest() {
        let tmp = TempDir::new().unwrap();
        let config = Config::default();
        let document = split(SOURCE, &config).unwrap();

        let output = OutputDirectory::new(tmp.path().to_path_buf(), config.clone());
        let manifest = output.write(&document).unwrap();

        let names: Vec<_> = manifest
            .entries()
            .iter()
            .map(|e| e.filename.as_str())
            .collect();
        assert_eq!(names, ["00-introduction.md", "01-alpha.md", "02-beta.md"]);

        let notice = config.notice.render();
        let beta = fs::read_to_string(tmp.path().join("02-beta.md")).unwrap();
        assert_eq!(
            beta,
            format!("{notice}see [x](alpha.html)\n\n\n---\n\n[← Previous: Alpha](alpha.html)\n")
        );

        let yaml = fs::read_to_string(tmp.path().join("manifest.yaml")).unwrap();
        assert_eq!(Manifest::from_yaml(&yaml).unwrap(), manifest);
    }

    #[test]
    fn creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("site").join("pages");
        let config = Config::default();
        let document = split(SOURCE, &config).unwrap();

        OutputDirectory::new(root.clone(), config)
            .write(&document)
            .unwrap();

        assert!(root.join("01-alpha.md").is_file());
        assert!(root.join("manifest.yaml").is_file());
    }

    #[test]
    fn regeneration_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let config = Config::default();
        let output = OutputDirectory::new(tmp.path().to_path_buf(), config.clone());

        output.write(&split(SOURCE, &config).unwrap()).unwrap();
        let first = fs::read_to_string(tmp.path().join("01-alpha.md")).unwrap();
        output.write(&split(SOURCE, &config).unwrap()).unwrap();
        let second = fs::read_to_string(tmp.path().join("01-alpha.md")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn custom_manifest_name_and_extension() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.manifest = "kotlinlang.org.yaml".to_string();
        config.set_page_extension("markdown");
        let document = split(SOURCE, &config).unwrap();

        OutputDirectory::new(tmp.path().to_path_buf(), config)
            .write(&document)
            .unwrap();

        assert!(tmp.path().join("00-introduction.markdown").is_file());
        assert!(tmp.path().join("kotlinlang.org.yaml").is_file());
    }

    #[test]
    fn unwritable_destination_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("not-a-directory");
        fs::write(&blocker, "").unwrap();
        let config = Config::default();
        let document = split(SOURCE, &config).unwrap();

        let error = OutputDirectory::new(blocker.clone(), config)
            .write(&document)
            .unwrap_err();

        assert!(matches!(error, EmitError::Io { path, .. } if path == blocker));
    }
}
