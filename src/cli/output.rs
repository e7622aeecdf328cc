//! Coloured terminal output. `colored` honours NO_COLOR and CLICOLOR.

use std::fmt::Display;

use colored::Colorize;

/// Red `error:` line on stderr.
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

/// Green status line, e.g. after all workers joined.
pub fn success(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().green());
}

/// Bold table header or section title.
pub fn header(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().bold());
}

/// Dimmed per-worker status line.
pub fn status(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().dimmed());
}

/// Uncoloured line, kept plain so table rows stay tab-separated.
pub fn row(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}
