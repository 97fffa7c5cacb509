use std::path::PathBuf;

use thiserror::Error;

fn exit_code_label(code: Option<i32>) -> String {
    code.map_or_else(|| "none (terminated by signal)".to_string(), |c| c.to_string())
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Could not spawn command: {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not wait for command: {command}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command {command} exited with code {}", exit_code_label(*code))]
    Exited { command: String, code: Option<i32> },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to build registry HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("failed to fetch registry metadata from '{url}'")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("registry responded with HTTP {status} for '{url}'")]
    Status { url: String, status: u16 },

    #[error("failed to decode registry metadata from '{url}'")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("registry metadata for '{package}' has no 'latest' dist-tag")]
    MissingLatest { package: String },

    #[error("registry metadata for '{package}' has no entry for version '{version}'")]
    MissingVersion { package: String, version: String },
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Can't send a discord message without discord webhook url!")]
    MissingWebhook,

    #[error("failed to build webhook HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("failed to post message to webhook")]
    Request(#[source] reqwest::Error),

    #[error("webhook responded with HTTP {status}")]
    Status { status: u16 },
}

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Config(#[from] life_machine_core::ConfigError),

    #[error(transparent)]
    Manifest(#[from] life_machine_manifest::ManifestError),

    #[error("{name} can't be empty")]
    MissingToken { name: &'static str },

    #[error("package.json must exist in '{}'", path.display())]
    ManifestMissing { path: PathBuf },

    #[error("Did not publish because manualOnly is set to true")]
    ManualOnlyGate { package: String },

    #[error("Did not publish package {package}, because the tests failed")]
    TestFailure {
        package: String,
        #[source]
        source: CommandError,
    },

    #[error(
        "Did not update package {package}, because package {dependency} needs a major update and manualCheckOnMajor is set to true!"
    )]
    MajorUpdateGate {
        package: String,
        dependency: String,
        local: String,
        latest: String,
    },

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(
        "Failed to publish package {package}, because npm publish command failed. This is probably because your NPM_TOKEN is invalid"
    )]
    PublishFailure {
        package: String,
        #[source]
        source: CommandError,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Notification(#[from] NotifyError),

    #[error("failed to manage registry credentials file '{}'", path.display())]
    Credentials {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

impl OperationError {
    /// Message forwarded to the webhook when a run needs human attention.
    #[must_use]
    pub fn attention_message(&self) -> String {
        match self {
            Self::ManualOnlyGate { package } => format!(
                ":warning: @everyone Package {package} has new dependency updates available! Didn't publish because manualOnly is set to true!"
            ),
            _ => format!("[❌ ERROR] {} @everyone", error_chain(self)),
        }
    }
}

pub type Result<T> = std::result::Result<T, OperationError>;

/// Joins an error and all of its sources into a single line.
#[must_use]
pub fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exited_error_names_command_and_code() {
        let err = CommandError::Exited {
            command: "npm version patch --no-git-tag-version".to_string(),
            code: Some(1),
        };

        assert_eq!(
            err.to_string(),
            "Command npm version patch --no-git-tag-version exited with code 1"
        );
    }

    #[test]
    fn exited_by_signal_has_no_code() {
        let err = CommandError::Exited {
            command: "npm publish".to_string(),
            code: None,
        };

        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn test_failure_names_package() {
        let err = OperationError::TestFailure {
            package: "my-pkg".to_string(),
            source: CommandError::Exited {
                command: "npm test".to_string(),
                code: Some(1),
            },
        };

        assert_eq!(
            err.to_string(),
            "Did not publish package my-pkg, because the tests failed"
        );
    }

    #[test]
    fn attention_message_includes_source_chain_and_tag() {
        let err = OperationError::PublishFailure {
            package: "my-pkg".to_string(),
            source: CommandError::Exited {
                command: "npm publish".to_string(),
                code: Some(1),
            },
        };

        let msg = err.attention_message();

        assert!(msg.starts_with("[❌ ERROR] Failed to publish package my-pkg"));
        assert!(msg.contains("Command npm publish exited with code 1"));
        assert!(msg.ends_with(" @everyone"));
    }

    #[test]
    fn manual_only_attention_message_is_a_warning() {
        let err = OperationError::ManualOnlyGate {
            package: "my-pkg".to_string(),
        };

        let msg = err.attention_message();

        assert!(msg.starts_with(":warning: @everyone Package my-pkg"));
        assert!(msg.contains("manualOnly is set to true"));
    }

    #[test]
    fn missing_webhook_converts_via_from() {
        let err: OperationError = NotifyError::MissingWebhook.into();

        assert!(matches!(
            err,
            OperationError::Notification(NotifyError::MissingWebhook)
        ));
        assert!(err.to_string().contains("webhook url"));
    }

    #[test]
    fn error_chain_joins_sources() {
        let err = CommandError::Spawn {
            command: "missing-binary --flag".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };

        assert_eq!(
            error_chain(&err),
            "Could not spawn command: missing-binary --flag: not found"
        );
    }
}
