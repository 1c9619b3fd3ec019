//! Pure formatting functions for UI output.
//!
//! Everything here only builds strings, except `display_error` which is
//! used by the binary for fatal errors happening outside of a console.

use console::style;

/// Format an error message with a red prefix.
pub fn error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red(), message)
}

/// Format a success message with green checkmark.
pub fn success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

/// Print an error message to stderr.
pub fn display_error(message: &str) {
    eprintln!("{}", error(message));
}
