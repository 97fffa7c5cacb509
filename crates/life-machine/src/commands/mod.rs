mod setup;
mod workflow;

use std::path::Path;

use clap::Subcommand;
use tracing::warn;

use crate::error::Result;

use workflow::WorkflowArgs;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Write the config, CI workflow and dependabot files (default)
    Setup,
    /// Test, bump and publish the package from CI
    #[command(alias = "?workflow")]
    Workflow(WorkflowArgs),
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

impl Commands {
    pub(crate) fn execute(self, project_root: &Path) -> Result<()> {
        match self {
            Self::Setup => setup::run(project_root),
            Self::Workflow(args) => workflow::run(project_root, args),
            Self::Unknown(args) => {
                warn!(
                    argument = args.first().map_or("", String::as_str),
                    "unrecognized mode, running setup"
                );
                setup::run(project_root)
            }
        }
    }
}
