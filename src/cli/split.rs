use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sectional::{Config, OutputDirectory};
use tracing::instrument;

use super::{
    read_source, report,
    terminal::{Tone, complain, say},
};

#[derive(Debug, Parser)]
pub struct Split {
    /// The document to split ('-' reads standard input)
    #[arg(default_value = "README.md")]
    input: PathBuf,

    /// Directory to write the pages and the manifest to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Manifest file name, overriding the configuration
    #[arg(long, value_name = "NAME")]
    manifest: Option<String>,

    /// Treat unresolved links as errors; nothing is written if any are found
    #[arg(long)]
    strict: bool,
}

impl Default for Split {
    fn default() -> Self {
        Self {
            input: PathBuf::from("README.md"),
            out_dir: PathBuf::from("."),
            manifest: None,
            strict: false,
        }
    }
}

impl Split {
    #[instrument(skip(config))]
    pub fn run(self, mut config: Config) -> anyhow::Result<()> {
        if let Some(manifest) = self.manifest {
            config.manifest = manifest;
        }

        let source = read_source(&self.input)?;
        let document = sectional::split(&source, &config)
            .with_context(|| format!("failed to split {}", self.input.display()))?;

        let diagnostics = document.diagnostics();
        report(diagnostics);
        if self.strict && !diagnostics.is_empty() {
            complain(
                Tone::Hint,
                "Fix the links above or run without --strict to drop their markup.",
            );
            anyhow::bail!(
                "{} unresolved link(s) in {}; nothing written",
                diagnostics.len(),
                self.input.display()
            );
        }

        let output = OutputDirectory::new(self.out_dir, config);
        let manifest = output.write(&document)?;

        say(
            Tone::Success,
            &format!(
                "Wrote {} page(s) and {} to {}",
                manifest.entries().len(),
                output.manifest_path().display(),
                output.root().display()
            ),
        );
        if !diagnostics.is_empty() {
            say(
                Tone::Warning,
                &format!(
                    "{} unresolved link(s) were reduced to plain text",
                    diagnostics.len()
                ),
            );
        }

        Ok(())
    }
}
