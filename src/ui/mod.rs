//! User interface module - console interaction and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - `scripted` - Console replaying prepared answers, for tests
//! - This module - The [Console] seam and the real terminal behind it

use std::io::{self, BufRead};

use console::{style, Term};

pub mod formatter;
pub mod scripted;

pub use formatter::display_error;
pub use scripted::ScriptedConsole;

/// Line based console the release workflow talks to.
///
/// Output is written eagerly, so a user sees the reasoning trace even when
/// a later step fails or is declined.
pub trait Console {
    /// Write a line to regular output
    fn write_line(&self, line: &str) -> io::Result<()>;

    /// Write a line to error output
    fn write_error_line(&self, line: &str) -> io::Result<()>;

    /// Write a line reporting a successful outcome
    fn write_success(&self, line: &str) -> io::Result<()> {
        self.write_line(line)
    }

    fn write_empty_line(&self) -> io::Result<()> {
        self.write_line("")
    }

    /// Display `message` and block until the user entered a line.
    ///
    /// Returns the entered text without surrounding whitespace. A closed
    /// input stream is an `UnexpectedEof` error.
    fn prompt(&self, message: &str) -> io::Result<String>;

    /// Ask a yes/no question; only "y" or "yes" (case-insensitive) confirm.
    fn confirm(&self, message: &str) -> io::Result<bool> {
        let response = self.prompt(message)?.to_lowercase();
        Ok(response == "y" || response == "yes")
    }
}

/// Console backed by the process' stdin, stdout and stderr
pub struct Terminal {
    out: Term,
    err: Term,
}

impl Terminal {
    pub fn new() -> Self {
        Terminal {
            out: Term::stdout(),
            err: Term::stderr(),
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for Terminal {
    fn write_line(&self, line: &str) -> io::Result<()> {
        self.out.write_line(line)
    }

    fn write_error_line(&self, line: &str) -> io::Result<()> {
        self.err.write_line(&style(line).red().to_string())
    }

    fn write_success(&self, line: &str) -> io::Result<()> {
        self.out.write_line(&formatter::success(line))
    }

    fn prompt(&self, message: &str) -> io::Result<String> {
        self.out.write_str(message)?;
        self.out.flush()?;

        read_answer(&mut io::stdin().lock())
    }
}

/// Read one answer line from `input`, without surrounding whitespace.
///
/// A closed input stream is an `UnexpectedEof` error.
fn read_answer(input: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input stream closed while waiting for an answer",
        ));
    }

    Ok(line.trim().to_string())
}
