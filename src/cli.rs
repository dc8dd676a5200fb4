use std::{
    io::Read,
    path::{Path, PathBuf},
};

mod check;
mod init;
mod split;
mod terminal;

use anyhow::Context;
use check::Check;
use clap::ArgAction;
use init::Init;
use sectional::{Config, Diagnostic};
use split::Split;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use self::terminal::{Stream, Tone};

/// Configuration file looked up in the working directory when `--config` is
/// not given.
const DEFAULT_CONFIG: &str = "sectional.toml";

/// Input path meaning "read standard input".
const STDIN: &str = "-";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a configuration file [default: ./sectional.toml if present]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        init_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Split(Split::default()))
            .run(self.config.as_deref())
    }
}

/// The most verbose level shown for `-v` repeated `verbosity` times.
const fn log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Log to standard error, keeping standard output for results.
///
/// `RUST_LOG` directives refine the level chosen by `-v`; a malformed
/// `RUST_LOG` is ignored rather than failing the run.
fn init_logging(verbosity: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(log_level(verbosity).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Split a document into pages and write the manifest (default)
    Split(Split),

    /// Report sections and unresolved links without writing anything
    ///
    /// Exits with status 2 if any link cannot be resolved.
    Check(Check),

    /// Write a configuration file with the default settings
    Init(Init),
}

impl Command {
    fn run(self, config: Option<&Path>) -> anyhow::Result<()> {
        match self {
            Self::Split(command) => command.run(load_config(config)?)?,
            Self::Check(command) => command.run(&load_config(config)?)?,
            Self::Init(command) => command.run()?,
        }
        Ok(())
    }
}

/// Load the configuration from `path`, or from [`DEFAULT_CONFIG`] in the
/// working directory, falling back to the defaults.
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG).is_file() => Path::new(DEFAULT_CONFIG),
        None => {
            tracing::debug!("no configuration file; using defaults");
            return Ok(Config::default());
        }
    };
    tracing::debug!(path = %path.display(), "loading configuration");
    Config::load(path).with_context(|| format!("invalid configuration in {}", path.display()))
}

/// Read the whole source document. `-` reads standard input.
fn read_source(input: &Path) -> anyhow::Result<String> {
    if input.as_os_str() == STDIN {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("failed to read standard input")?;
        return Ok(source);
    }
    std::fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))
}

/// Print diagnostics to standard error.
fn report(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{} {diagnostic}", Tone::Warning.paint(Stream::Stderr, "warning:"));
    }
}
