//! Colored terminal output for user-facing progress.
//!
//! Status lines go to stdout, warnings and errors to stderr. Color is only
//! used when the stream is a terminal.

// `cyrup_termcolor` exposes its library as `termcolor`.
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use std::io::{self, IsTerminal, Write};

/// Writes labeled, optionally colored messages.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Prints a message only in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.verbose && !self.quiet {
            self.write_stdout(None, "", message)
        } else {
            Ok(())
        }
    }

    /// Prints a progress line.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_stdout(Some(Color::Cyan), "==> ", message)
    }

    /// Prints a success line.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_stdout(Some(Color::Green), "✓ ", message)
    }

    /// Prints a section header followed by a blank line.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_stdout(Some(Color::Magenta), "", title)?;
        writeln!(io::stdout())
    }

    /// Prints an indented line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_stdout(None, "    ", message)
    }

    /// Prints a warning to stderr, even in quiet mode.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        write_labeled(stderr(), Some(Color::Yellow), "WARNING: ", message)
    }

    /// Prints an error to stderr.
    pub fn error(&self, message: &str) -> io::Result<()> {
        write_labeled(stderr(), Some(Color::Red), "ERROR: ", message)
    }

    fn write_stdout(&self, color: Option<Color>, label: &str, message: &str) -> io::Result<()> {
        let choice = if io::stdout().is_terminal() {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        write_labeled(StandardStream::stdout(choice), color, label, message)
    }
}

fn stderr() -> StandardStream {
    let choice = if io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stderr(choice)
}

fn write_labeled(
    mut stream: StandardStream,
    color: Option<Color>,
    label: &str,
    message: &str,
) -> io::Result<()> {
    if let Some(color) = color {
        stream.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(stream, "{label}")?;
        stream.reset()?;
    } else {
        write!(stream, "{label}")?;
    }
    writeln!(stream, "{message}")?;
    stream.flush()
}
