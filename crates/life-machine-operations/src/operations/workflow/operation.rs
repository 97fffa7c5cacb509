use std::path::Path;

use life_machine_core::{Config, ProjectPaths, VersionType, load_config};
use life_machine_manifest::{
    DependencyComparison, PackageManifest, compare_dependencies, first_major, read_manifest,
    read_version,
};
use semver::Version;
use tracing::{debug, info, warn};

use super::credentials::RegistryCredentials;
use crate::traits::{CommandInvocation, CommandRunner, Notifier, RegistryClient};
use crate::{OperationError, Result};

pub struct WorkflowInput {
    pub npm_token: String,
    pub github_token: String,
}

#[derive(Debug)]
pub struct WorkflowOutput {
    pub package: String,
    pub version: Version,
    pub comparisons: Vec<DependencyComparison>,
    pub notified: bool,
}

/// Test, gate, bump and publish a package on behalf of a dependency-bot PR.
///
/// Every failure after the config has been loaded is forwarded once to the
/// notifier when `onAttentionNeeded` is enabled, then returned to the caller.
/// The manual-only gate is always forwarded.
pub struct WorkflowOperation<C, R, N> {
    command_runner: C,
    registry: R,
    notifier: N,
}

impl<C, R, N> WorkflowOperation<C, R, N>
where
    C: CommandRunner,
    R: RegistryClient,
    N: Notifier,
{
    pub fn new(command_runner: C, registry: R, notifier: N) -> Self {
        Self {
            command_runner,
            registry,
            notifier,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the config or manifest is missing, a token is
    /// empty, a gate blocks the release, any command fails, or a required
    /// notification cannot be delivered.
    pub fn execute(&self, project_root: &Path, input: &WorkflowInput) -> Result<WorkflowOutput> {
        info!("Detected workflow - Starting Life Machine");
        info!("NPM Token length: {}", input.npm_token.len());
        info!("GITHUB Token length: {}", input.github_token.len());
        info!(
            "DISCORD Token provided: {}",
            if self.notifier.has_destination() {
                "yes"
            } else {
                "no"
            }
        );

        let paths = ProjectPaths::new(project_root);
        let config = load_config(&paths.config())?;
        debug!(?config, "loaded config");

        self.run(&paths, &config, input).inspect_err(|err| {
            self.forward_failure(&config, err);
        })
    }

    fn run(
        &self,
        paths: &ProjectPaths,
        config: &Config,
        input: &WorkflowInput,
    ) -> Result<WorkflowOutput> {
        if input.npm_token.is_empty() {
            return Err(OperationError::MissingToken { name: "NPM_TOKEN" });
        }
        if input.github_token.is_empty() {
            return Err(OperationError::MissingToken {
                name: "GITHUB_TOKEN",
            });
        }

        let manifest_path = paths.package_manifest();
        if !manifest_path.exists() {
            return Err(OperationError::ManifestMissing {
                path: paths.root().to_path_buf(),
            });
        }
        let manifest = read_manifest(&manifest_path)?;

        if config.manual_only() {
            return Err(OperationError::ManualOnlyGate {
                package: manifest.name,
            });
        }

        if config.run_tests() {
            if let Some(command) = config.test_command() {
                self.run_tests(paths, command, &manifest.name)?;
            }
        }

        let comparisons = if config.manual_check_on_major() {
            self.check_dependencies(&manifest)?
        } else {
            Vec::new()
        };

        self.bump_version(paths, config.version_type())?;
        let version = read_version(&manifest_path)?;

        self.publish(paths, &manifest.name, &input.npm_token)?;

        let notified = if config.discord_notifications().on_publish() {
            self.notifier.send(&format!(
                "✅ Successfully published package {}@{version}!",
                manifest.name
            ))?;
            true
        } else {
            false
        };

        info!(
            "✅ Successfully published package {}@{version}!",
            manifest.name
        );

        Ok(WorkflowOutput {
            package: manifest.name,
            version,
            comparisons,
            notified,
        })
    }

    fn run_tests(&self, paths: &ProjectPaths, command: &str, package: &str) -> Result<()> {
        if command.trim().is_empty() {
            warn!("testCommand is empty, skipping tests");
            return Ok(());
        }

        let invocation = shell_invocation(command, paths.root());
        info!("🧪 Running tests: {invocation}");

        self.command_runner
            .run_checked(&invocation)
            .map_err(|source| OperationError::TestFailure {
                package: package.to_string(),
                source,
            })?;

        Ok(())
    }

    fn check_dependencies(&self, manifest: &PackageManifest) -> Result<Vec<DependencyComparison>> {
        let Some(published) = self.registry.latest_manifest(&manifest.name)? else {
            warn!(
                "{} has not been published yet, skipping major update check",
                manifest.name
            );
            return Ok(Vec::new());
        };

        debug!(latest = %published.version, "comparing against published version");

        let comparisons =
            compare_dependencies(&manifest.shared_dependencies(), &published.shared_dependencies());
        for comparison in &comparisons {
            info!("⚕️ {comparison}");
        }

        if let Some(major) = first_major(&comparisons) {
            return Err(OperationError::MajorUpdateGate {
                package: manifest.name.clone(),
                dependency: major.name.clone(),
                local: major.local.clone(),
                latest: major.latest.clone(),
            });
        }

        Ok(comparisons)
    }

    fn bump_version(&self, paths: &ProjectPaths, version_type: &VersionType) -> Result<()> {
        let invocation = CommandInvocation::new("npm", paths.root()).args([
            "version",
            version_type.as_str(),
            "--no-git-tag-version",
        ]);
        info!("🔖 Bumping version: {invocation}");

        self.command_runner.run_checked(&invocation)?;
        Ok(())
    }

    fn publish(&self, paths: &ProjectPaths, package: &str, npm_token: &str) -> Result<()> {
        let credentials = RegistryCredentials::write(&paths.npmrc())?;

        let invocation = CommandInvocation::new("npm", paths.root())
            .arg("publish")
            .env("NPM_TOKEN", npm_token);
        info!("📦 Publishing {package}");

        let published = self
            .command_runner
            .run_checked(&invocation)
            .map_err(|source| OperationError::PublishFailure {
                package: package.to_string(),
                source,
            });
        let cleanup = credentials.restore();

        published?;
        cleanup
    }

    fn forward_failure(&self, config: &Config, err: &OperationError) {
        let always = matches!(err, OperationError::ManualOnlyGate { .. });
        if !always && !config.discord_notifications().on_attention_needed() {
            return;
        }
        if let Err(notify_err) = self.notifier.send(&err.attention_message()) {
            warn!(error = %notify_err, "failed to forward failure to webhook");
        }
    }
}

/// Runs `command` through the platform shell so chaining, pipes and quoting
/// behave as they would in `npm run`.
fn shell_invocation(command: &str, cwd: &Path) -> CommandInvocation {
    if cfg!(windows) {
        CommandInvocation::new("cmd", cwd).args(["/C", command])
    } else {
        CommandInvocation::new("sh", cwd).args(["-c", command])
    }
}
