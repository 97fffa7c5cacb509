mod error;
pub mod operations;
pub mod providers;
pub mod templates;
pub mod traits;

#[cfg(test)]
pub mod mocks;

pub use error::{CommandError, NotifyError, OperationError, RegistryError, Result, error_chain};
