//! Messages for the terminal. Everything here goes to stderr; stdout is
//! reserved for the ChangeLog.

use console::style;

/// Format an error message behind a red `ERROR:` marker.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

/// Print an error message to stderr.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}
