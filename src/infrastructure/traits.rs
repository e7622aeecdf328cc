//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing input resolution
//! to be tested with mock implementations.

use std::io::{self, BufRead, Write};
use std::path::Path;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Raw file contents; no encoding is assumed.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;
}

/// Line-oriented interactive input.
pub trait Prompt: Send + Sync {
    /// Show `message` and read one line, without its line terminator.
    fn ask(&self, message: &str) -> io::Result<String>;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Prompt on stdout, answer from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&self, message: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", message)?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed before an answer was given",
            ));
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}
