//! Errors raised while reading input from files or stdin.

use std::io;

use thiserror::Error;

use crate::application::ApplicationError;

#[derive(Error, Debug)]
pub enum InfraError {
    /// A worker count read from a flag, config or stdin was rejected.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error("cannot {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl InfraError {
    /// `context` reads as a verb phrase: "read input.txt", "read text from stdin".
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

pub type InfraResult<T> = Result<T, InfraError>;
