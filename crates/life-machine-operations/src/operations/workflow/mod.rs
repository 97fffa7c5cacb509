mod credentials;
mod operation;

pub use credentials::{NPMRC_AUTH_LINE, RegistryCredentials};
pub use operation::{WorkflowInput, WorkflowOperation, WorkflowOutput};
