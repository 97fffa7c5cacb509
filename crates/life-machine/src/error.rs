use life_machine_operations::{NotifyError, OperationError, RegistryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error("failed to determine the current directory")]
    CurrentDir(#[source] std::io::Error),
}

impl From<RegistryError> for CliError {
    fn from(err: RegistryError) -> Self {
        Self::Operation(err.into())
    }
}

impl From<NotifyError> for CliError {
    fn from(err: NotifyError) -> Self {
        Self::Operation(err.into())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
