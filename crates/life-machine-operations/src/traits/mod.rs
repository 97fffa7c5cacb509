mod command_runner;
mod notifier;
mod registry_client;

pub use command_runner::{CommandInvocation, CommandOutput, CommandRunner};
pub use notifier::Notifier;
pub use registry_client::{PublishedManifest, RegistryClient};
