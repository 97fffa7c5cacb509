mod config;
mod error;
mod paths;
mod types;

pub use config::{Config, DiscordNotifications, load_config, write_default_config};
pub use error::ConfigError;
pub use paths::{
    CONFIG_FILE, DEPENDABOT_FILE, GITHUB_DIR, NPMRC_FILE, PACKAGE_MANIFEST_FILE, ProjectPaths,
    WORKFLOW_FILE, WORKFLOWS_DIR,
};
pub use types::VersionType;
