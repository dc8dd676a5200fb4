use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sectional::{Config, Diagnostic, Document, Manifest, storage::ManifestEntry};
use serde::Serialize;
use tracing::instrument;

use super::{
    read_source, report,
    terminal::{Tone, say},
};

#[derive(Debug, Parser)]
#[command(about = "Report sections and unresolved links without writing anything")]
pub struct Check {
    /// The document to check ('-' reads standard input)
    #[arg(default_value = "README.md")]
    input: PathBuf,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    pages: &'a [ManifestEntry],
    diagnostics: &'a [Diagnostic],
}

impl Check {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let source = read_source(&self.input)?;
        let document = sectional::split(&source, config)
            .with_context(|| format!("failed to split {}", self.input.display()))?;
        let manifest = Manifest::new(document.sections(), config);

        match self.output {
            OutputFormat::Table => Self::output_table(&document, &manifest),
            OutputFormat::Json => Self::output_json(&document, &manifest)?,
        }

        if !document.diagnostics().is_empty() {
            std::process::exit(2);
        }
        Ok(())
    }

    fn output_table(document: &Document, manifest: &Manifest) {
        if manifest.entries().is_empty() {
            say(
                Tone::Warning,
                "No sections found: the document has no '---' line ending its preamble.",
            );
            return;
        }

        let width = manifest
            .entries()
            .iter()
            .map(|entry| entry.filename.len())
            .max()
            .unwrap_or_default();
        for entry in manifest.entries() {
            println!("{:width$}  {}", entry.filename, entry.title);
        }

        let diagnostics = document.diagnostics();
        println!();
        if diagnostics.is_empty() {
            say(Tone::Success, "✅ All links resolved.");
        } else {
            report(diagnostics);
            println!();
            say(
                Tone::Error,
                &format!("{} unresolved link(s)", diagnostics.len()),
            );
        }
    }

    fn output_json(document: &Document, manifest: &Manifest) -> anyhow::Result<()> {
        let report = Report {
            pages: manifest.entries(),
            diagnostics: document.diagnostics(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }
}
