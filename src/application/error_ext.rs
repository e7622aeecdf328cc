//! Attach the failing path to I/O errors.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

pub trait IoResultExt<T> {
    /// Wrap an I/O error as `OperationFailed` naming `action` and `path`.
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::OperationFailed {
            context: format!("{action} {}", path.display()),
            source: source.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_names_action_and_path() {
        let result: io::Result<()> = Err(io::Error::from(io::ErrorKind::NotFound));
        let err = result
            .with_path_context("read config", Path::new("/tmp/run.toml"))
            .unwrap_err();
        assert_eq!(err.to_string(), "operation failed: read config /tmp/run.toml");
    }
}
