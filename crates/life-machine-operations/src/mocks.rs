use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use life_machine_manifest::DependencyMap;

use crate::traits::{
    CommandInvocation, CommandOutput, CommandRunner, Notifier, PublishedManifest, RegistryClient,
};
use crate::{CommandError, NotifyError, RegistryError};

enum Scripted {
    Exit(i32),
    SpawnError,
}

/// What a recorded invocation saw on disk when it ran.
#[derive(Debug, Clone)]
pub struct RecordedInvocation {
    pub invocation: CommandInvocation,
    pub observed_file: Option<String>,
}

/// Records invocations and answers with scripted exit codes.
///
/// Rules match on the invocation's display form prefix, e.g. `"npm publish"`.
/// Invocations without a rule succeed.
pub struct MockCommandRunner {
    rules: Vec<(String, Scripted)>,
    version_bump: Option<(PathBuf, String)>,
    observed_path: Option<PathBuf>,
    calls: Mutex<Vec<RecordedInvocation>>,
}

impl MockCommandRunner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            version_bump: None,
            observed_path: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing(mut self, prefix: &str, code: i32) -> Self {
        self.rules.push((prefix.to_string(), Scripted::Exit(code)));
        self
    }

    #[must_use]
    pub fn unspawnable(mut self, prefix: &str) -> Self {
        self.rules.push((prefix.to_string(), Scripted::SpawnError));
        self
    }

    /// Emulates `npm version` by rewriting the manifest's version field.
    #[must_use]
    pub fn with_version_bump(mut self, manifest: PathBuf, new_version: &str) -> Self {
        self.version_bump = Some((manifest, new_version.to_string()));
        self
    }

    /// Captures the content of `path` at the moment each command runs.
    #[must_use]
    pub fn observing(mut self, path: PathBuf) -> Self {
        self.observed_path = Some(path);
        self
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedInvocation> {
        self.calls.lock().expect("mutex poisoned").clone()
    }

    #[must_use]
    pub fn commands(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|call| call.invocation.to_string())
            .collect()
    }

    #[must_use]
    pub fn find(&self, prefix: &str) -> Option<RecordedInvocation> {
        self.calls()
            .into_iter()
            .find(|call| call.invocation.to_string().starts_with(prefix))
    }

    fn bump_manifest(&self) {
        let Some((path, version)) = &self.version_bump else {
            return;
        };
        let content = std::fs::read_to_string(path).expect("read manifest for bump");
        let mut doc: serde_json::Value = serde_json::from_str(&content).expect("manifest json");
        doc["version"] = serde_json::Value::String(version.clone());
        std::fs::write(
            path,
            serde_json::to_string_pretty(&doc).expect("serialize manifest"),
        )
        .expect("write bumped manifest");
    }
}

impl Default for MockCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for MockCommandRunner {
    fn run(&self, invocation: &CommandInvocation) -> Result<CommandOutput, CommandError> {
        let observed_file = self
            .observed_path
            .as_ref()
            .and_then(|path| std::fs::read_to_string(path).ok());
        self.calls
            .lock()
            .expect("mutex poisoned")
            .push(RecordedInvocation {
                invocation: invocation.clone(),
                observed_file,
            });

        let display = invocation.to_string();
        let rule = self
            .rules
            .iter()
            .find(|(prefix, _)| display.starts_with(prefix.as_str()));

        match rule {
            Some((_, Scripted::SpawnError)) => Err(CommandError::Spawn {
                command: display,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "program not found"),
            }),
            Some((_, Scripted::Exit(code))) => Ok(CommandOutput {
                status: Some(*code),
                stdout: String::new(),
                stderr: format!("{display} failed"),
            }),
            None => {
                let is_version_bump = invocation.program == "npm"
                    && invocation.args.first().is_some_and(|a| a == "version");
                if is_version_bump {
                    self.bump_manifest();
                }
                Ok(CommandOutput {
                    status: Some(0),
                    stdout: String::new(),
                    stderr: String::new(),
                })
            }
        }
    }
}

pub struct MockRegistryClient {
    manifest: Option<PublishedManifest>,
    fail: bool,
    requests: Mutex<Vec<String>>,
}

impl MockRegistryClient {
    /// A registry that has never seen the package.
    #[must_use]
    pub fn unpublished() -> Self {
        Self {
            manifest: None,
            fail: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_latest(dependencies: &[(&str, &str)], dev_dependencies: &[(&str, &str)]) -> Self {
        let to_map = |entries: &[(&str, &str)]| -> DependencyMap {
            entries
                .iter()
                .map(|(name, range)| ((*name).to_string(), (*range).to_string()))
                .collect()
        };
        Self {
            manifest: Some(PublishedManifest {
                version: "1.0.0".to_string(),
                dependencies: to_map(dependencies),
                dev_dependencies: to_map(dev_dependencies),
            }),
            fail: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            manifest: None,
            fail: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("mutex poisoned").clone()
    }
}

impl RegistryClient for MockRegistryClient {
    fn latest_manifest(&self, package: &str) -> Result<Option<PublishedManifest>, RegistryError> {
        self.requests
            .lock()
            .expect("mutex poisoned")
            .push(package.to_string());
        if self.fail {
            return Err(RegistryError::Status {
                url: format!("https://registry.npmjs.org/{package}"),
                status: 500,
            });
        }
        Ok(self.manifest.clone())
    }
}

pub struct MockNotifier {
    has_destination: bool,
    messages: Mutex<Vec<String>>,
}

impl MockNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            has_destination: true,
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Behaves like a notifier invoked without a webhook URL.
    #[must_use]
    pub fn without_destination() -> Self {
        Self {
            has_destination: false,
            messages: Mutex::new(Vec::new()),
        }
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("mutex poisoned").clone()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for MockNotifier {
    fn has_destination(&self) -> bool {
        self.has_destination
    }

    fn send(&self, content: &str) -> Result<(), NotifyError> {
        if !self.has_destination {
            return Err(NotifyError::MissingWebhook);
        }
        self.messages
            .lock()
            .expect("mutex poisoned")
            .push(content.to_string());
        Ok(())
    }
}

impl CommandRunner for Arc<MockCommandRunner> {
    fn run(&self, invocation: &CommandInvocation) -> Result<CommandOutput, CommandError> {
        MockCommandRunner::run(self, invocation)
    }
}

impl RegistryClient for Arc<MockRegistryClient> {
    fn latest_manifest(&self, package: &str) -> Result<Option<PublishedManifest>, RegistryError> {
        MockRegistryClient::latest_manifest(self, package)
    }
}

impl Notifier for Arc<MockNotifier> {
    fn has_destination(&self) -> bool {
        MockNotifier::has_destination(self)
    }

    fn send(&self, content: &str) -> Result<(), NotifyError> {
        MockNotifier::send(self, content)
    }
}
