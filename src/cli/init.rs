use std::path::PathBuf;

use clap::Parser;
use sectional::Config;
use tracing::instrument;

use super::{
    DEFAULT_CONFIG,
    terminal::{Tone, say},
};

#[derive(Debug, Parser)]
pub struct Init {
    /// Where to write the configuration file
    #[arg(default_value = DEFAULT_CONFIG)]
    path: PathBuf,
}

impl Init {
    #[instrument]
    pub fn run(self) -> anyhow::Result<()> {
        if self.path.exists() {
            anyhow::bail!(
                "Refusing to overwrite existing configuration at {}",
                self.path.display()
            );
        }

        Config::default()
            .save(&self.path)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", self.path.display()))?;

        say(Tone::Success, &format!("Created {}", self.path.display()));
        say(
            Tone::Hint,
            "Edit the [notice] table to change the attribution written on every page.",
        );
        Ok(())
    }
}
