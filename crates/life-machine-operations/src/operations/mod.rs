mod setup;
mod workflow;

pub use setup::{FileAction, ScaffoldedFile, SetupOperation, SetupOutput};
pub use workflow::{
    NPMRC_AUTH_LINE, RegistryCredentials, WorkflowInput, WorkflowOperation, WorkflowOutput,
};
