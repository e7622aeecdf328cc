//! Top-level error shown to the user, with its process exit code.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::exitcode;
use crate::infrastructure::InfraError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Infra(#[from] InfraError),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// sysexits code for this failure.
    pub fn exit_code(&self) -> i32 {
        let CliError::Infra(e) = self;
        match e {
            InfraError::Io { .. } if e.is_not_found() => exitcode::NOINPUT,
            InfraError::Io { .. } => exitcode::IOERR,
            InfraError::Application(app) => match app {
                ApplicationError::InvalidWorkerCount(_) => exitcode::USAGE,
                ApplicationError::Config { .. } => exitcode::CONFIG,
                ApplicationError::OperationFailed { .. } => exitcode::IOERR,
                ApplicationError::Domain(_)
                | ApplicationError::WorkerFailed { .. }
                | ApplicationError::WorkerPanicked(_)
                | ApplicationError::LockPoisoned
                | ApplicationError::ThreadPool(_) => exitcode::SOFTWARE,
            },
        }
    }
}
