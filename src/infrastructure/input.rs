//! Resolve the input text and worker count from flags, config or stdin.

use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::services::parse_worker_count;
use crate::application::ApplicationError;
use crate::infrastructure::traits::{FileSystem, Prompt, RealFileSystem, StdinPrompt};
use crate::infrastructure::{InfraError, InfraResult};

pub const TEXT_PROMPT: &str = "Enter some text: ";
pub const WORKERS_PROMPT: &str = "Enter how many threads you want to work for you: ";

/// Re-terminate every line with `\n`, so a file always ends with one and
/// `\r\n` endings count the same as `\n`. Bytes are passed through as is.
pub fn normalize_lines(content: &[u8]) -> Vec<u8> {
    let mut text = Vec::with_capacity(content.len() + 1);
    if content.is_empty() {
        return text;
    }
    let body = content.strip_suffix(b"\n").unwrap_or(content);
    for line in body.split(|&b| b == b'\n') {
        text.extend_from_slice(line.strip_suffix(b"\r").unwrap_or(line));
        text.push(b'\n');
    }
    text
}

pub struct InputResolver {
    fs: Arc<dyn FileSystem>,
    prompt: Arc<dyn Prompt>,
}

impl InputResolver {
    pub fn new(fs: Arc<dyn FileSystem>, prompt: Arc<dyn Prompt>) -> Self {
        Self { fs, prompt }
    }

    /// Resolver backed by the real filesystem and stdin.
    pub fn real() -> Self {
        Self::new(Arc::new(RealFileSystem), Arc::new(StdinPrompt))
    }

    /// Text from `file`, else `text`, else one line asked on stdin.
    pub fn resolve_text(&self, file: Option<&Path>, text: Option<&str>) -> InfraResult<Vec<u8>> {
        if let Some(path) = file {
            debug!("resolve_text: file={}", path.display());
            if !self.fs.is_file(path) {
                return Err(InfraError::io(
                    format!("open {} as a regular file", path.display()),
                    std::io::Error::from(std::io::ErrorKind::NotFound),
                ));
            }
            let content = self
                .fs
                .read(path)
                .map_err(|e| InfraError::io(format!("read {}", path.display()), e))?;
            return Ok(normalize_lines(&content));
        }
        if let Some(text) = text {
            return Ok(text.as_bytes().to_vec());
        }
        self.prompt
            .ask(TEXT_PROMPT)
            .map(String::into_bytes)
            .map_err(|e| InfraError::io("read text from stdin", e))
    }

    /// Worker count from `tasks`, else `configured`, else asked on stdin.
    ///
    /// Every source is validated before any worker starts.
    pub fn resolve_workers(
        &self,
        tasks: Option<&str>,
        configured: Option<usize>,
    ) -> InfraResult<NonZeroUsize> {
        if let Some(raw) = tasks {
            return Ok(parse_worker_count(raw)?);
        }
        if let Some(n) = configured {
            return NonZeroUsize::new(n)
                .ok_or_else(|| ApplicationError::InvalidWorkerCount(n.to_string()).into());
        }
        let answer = self
            .prompt
            .ask(WORKERS_PROMPT)
            .map_err(|e| InfraError::io("read worker count from stdin", e))?;
        Ok(parse_worker_count(&answer)?)
    }
}
