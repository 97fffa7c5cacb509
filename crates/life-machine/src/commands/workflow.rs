use std::path::Path;

use clap::Args;
use life_machine_operations::operations::{WorkflowInput, WorkflowOperation};
use life_machine_operations::providers::{
    HttpRegistryClient, ProcessCommandRunner, WebhookNotifier,
};

use crate::error::Result;

#[derive(Args)]
pub(crate) struct WorkflowArgs {
    /// npm automation token used to publish
    #[arg(env = "LM_NPM_TOKEN", hide_env_values = true, default_value = "")]
    npm_token: String,

    /// GitHub token of the workflow run
    #[arg(env = "GITHUB_TOKEN", hide_env_values = true, default_value = "")]
    github_token: String,

    /// Discord-compatible webhook URL for notifications
    #[arg(env = "LM_DISCORD_TOKEN", hide_env_values = true)]
    webhook_url: Option<String>,
}

pub(crate) fn run(project_root: &Path, args: WorkflowArgs) -> Result<()> {
    let notifier = WebhookNotifier::new(args.webhook_url)?;
    let registry = HttpRegistryClient::new()?;

    let operation = WorkflowOperation::new(ProcessCommandRunner::new(), registry, notifier);
    let output = operation.execute(
        project_root,
        &WorkflowInput {
            npm_token: args.npm_token,
            github_token: args.github_token,
        },
    )?;

    println!("{}@{}", output.package, output.version);

    Ok(())
}
