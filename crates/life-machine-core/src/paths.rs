use std::path::{Path, PathBuf};

pub const GITHUB_DIR: &str = ".github";
pub const WORKFLOWS_DIR: &str = "workflows";
pub const CONFIG_FILE: &str = ".life-machine.json";
pub const WORKFLOW_FILE: &str = "life-machine.yml";
pub const DEPENDABOT_FILE: &str = "dependabot.yml";
pub const PACKAGE_MANIFEST_FILE: &str = "package.json";
pub const NPMRC_FILE: &str = ".npmrc";

/// Well-known file locations relative to the project being released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    root: PathBuf,
}

impl ProjectPaths {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn github_dir(&self) -> PathBuf {
        self.root.join(GITHUB_DIR)
    }

    #[must_use]
    pub fn workflows_dir(&self) -> PathBuf {
        self.github_dir().join(WORKFLOWS_DIR)
    }

    #[must_use]
    pub fn config(&self) -> PathBuf {
        self.github_dir().join(CONFIG_FILE)
    }

    #[must_use]
    pub fn workflow(&self) -> PathBuf {
        self.workflows_dir().join(WORKFLOW_FILE)
    }

    #[must_use]
    pub fn dependabot(&self) -> PathBuf {
        self.github_dir().join(DEPENDABOT_FILE)
    }

    #[must_use]
    pub fn package_manifest(&self) -> PathBuf {
        self.root.join(PACKAGE_MANIFEST_FILE)
    }

    #[must_use]
    pub fn npmrc(&self) -> PathBuf {
        self.root.join(NPMRC_FILE)
    }
}
