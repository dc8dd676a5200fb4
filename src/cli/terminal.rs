//! Coloured output for the command line.
//!
//! Colour is decided per stream: diagnostics go to standard error while
//! results go to standard output, and either may be redirected on its own.

use owo_colors::OwoColorize;

/// The stream a message is printed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    /// Results.
    Stdout,
    /// Diagnostics and hints.
    Stderr,
}

impl Stream {
    fn is_colored(self) -> bool {
        let stream = match self {
            Self::Stdout => supports_color::Stream::Stdout,
            Self::Stderr => supports_color::Stream::Stderr,
        };
        supports_color::on_cached(stream).is_some()
    }
}

/// How a message should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Work completed (green).
    Success,
    /// Output was produced but something was lost (yellow).
    Warning,
    /// The run failed (bold red).
    Error,
    /// A follow-up suggestion (dimmed).
    Hint,
}

impl Tone {
    /// `text` styled for `stream`, or unchanged if the stream is not a
    /// colour terminal.
    pub fn paint(self, stream: Stream, text: &str) -> String {
        if !stream.is_colored() {
            return text.to_string();
        }
        match self {
            Self::Success => text.green().to_string(),
            Self::Warning => text.yellow().to_string(),
            Self::Error => text.red().bold().to_string(),
            Self::Hint => text.dimmed().to_string(),
        }
    }
}

/// Print `text` on standard output in the given tone.
pub fn say(tone: Tone, text: &str) {
    println!("{}", tone.paint(Stream::Stdout, text));
}

/// Print `text` on standard error in the given tone.
pub fn complain(tone: Tone, text: &str) {
    eprintln!("{}", tone.paint(Stream::Stderr, text));
}
