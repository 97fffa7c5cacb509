use std::fmt;
use std::path::{Path, PathBuf};

use life_machine_core::{ProjectPaths, write_default_config};
use tracing::{debug, info};

use crate::templates::{DEPENDABOT_TEMPLATE, WORKFLOW_TEMPLATE};
use crate::{OperationError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Created,
    Overwritten,
    Skipped,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::Overwritten => "overwritten",
            Self::Skipped => "skipped (already exists)",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldedFile {
    pub path: PathBuf,
    pub action: FileAction,
}

pub struct SetupOutput {
    pub files: Vec<ScaffoldedFile>,
}

/// Scaffolds the config file, CI workflow and dependabot config into a project.
///
/// The config and workflow are always rewritten; an existing dependabot
/// config is left untouched.
#[derive(Default)]
pub struct SetupOperation;

impl SetupOperation {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// # Errors
    ///
    /// Returns an error if a directory or file cannot be written.
    pub fn execute(&self, project_root: &Path) -> Result<SetupOutput> {
        let paths = ProjectPaths::new(project_root);

        std::fs::create_dir_all(paths.workflows_dir())?;

        let config_path = paths.config();
        let config_action = action_for(&config_path);
        write_default_config(&config_path)?;

        let workflow_path = paths.workflow();
        let workflow_action = action_for(&workflow_path);
        write_file(&workflow_path, WORKFLOW_TEMPLATE)?;

        let dependabot_path = paths.dependabot();
        let dependabot_action = if dependabot_path.exists() {
            debug!(path = %dependabot_path.display(), "keeping existing dependabot config");
            FileAction::Skipped
        } else {
            write_file(&dependabot_path, DEPENDABOT_TEMPLATE)?;
            FileAction::Created
        };

        info!("initialized life-machine in {}", project_root.display());

        Ok(SetupOutput {
            files: vec![
                ScaffoldedFile {
                    path: config_path,
                    action: config_action,
                },
                ScaffoldedFile {
                    path: workflow_path,
                    action: workflow_action,
                },
                ScaffoldedFile {
                    path: dependabot_path,
                    action: dependabot_action,
                },
            ],
        })
    }
}

fn action_for(path: &Path) -> FileAction {
    if path.exists() {
        FileAction::Overwritten
    } else {
        FileAction::Created
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(OperationError::Io)
}
