use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::types::VersionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordNotifications {
    on_publish: bool,
    on_attention_needed: bool,
}

impl DiscordNotifications {
    #[must_use]
    pub fn new(on_publish: bool, on_attention_needed: bool) -> Self {
        Self {
            on_publish,
            on_attention_needed,
        }
    }

    #[must_use]
    pub fn on_publish(&self) -> bool {
        self.on_publish
    }

    #[must_use]
    pub fn on_attention_needed(&self) -> bool {
        self.on_attention_needed
    }

    fn from_json(value: Option<&Value>) -> Self {
        let Some(Value::Object(fields)) = value else {
            return Self::default();
        };
        Self {
            on_publish: flag(fields, "onPublish"),
            on_attention_needed: flag(fields, "onAttentionNeeded"),
        }
    }
}

/// Contents of `.github/.life-machine.json`.
///
/// Loading never rejects a syntactically valid document: fields that are
/// missing or carry the wrong JSON type behave as if they were absent, so
/// `Config::default()` is the "everything off" configuration. The values
/// written by setup mode come from [`Config::recommended`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    manual_check_on_major: bool,
    run_tests: bool,
    manual_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_command: Option<String>,
    discord_notifications: DiscordNotifications,
    version_type: VersionType,
}

impl Config {
    #[must_use]
    pub fn recommended() -> Self {
        Self {
            manual_check_on_major: true,
            run_tests: true,
            manual_only: false,
            test_command: Some("npm test".to_string()),
            discord_notifications: DiscordNotifications::new(true, true),
            version_type: VersionType::Patch,
        }
    }

    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let Value::Object(fields) = value else {
            return Self::default();
        };

        Self {
            manual_check_on_major: flag(fields, "manualCheckOnMajor"),
            run_tests: flag(fields, "runTests"),
            manual_only: flag(fields, "manualOnly"),
            test_command: fields
                .get("testCommand")
                .and_then(Value::as_str)
                .map(str::to_string),
            discord_notifications: DiscordNotifications::from_json(
                fields.get("discordNotifications"),
            ),
            version_type: fields
                .get("versionType")
                .and_then(Value::as_str)
                .map(VersionType::from)
                .unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn manual_check_on_major(&self) -> bool {
        self.manual_check_on_major
    }

    #[must_use]
    pub fn run_tests(&self) -> bool {
        self.run_tests
    }

    #[must_use]
    pub fn manual_only(&self) -> bool {
        self.manual_only
    }

    #[must_use]
    pub fn test_command(&self) -> Option<&str> {
        self.test_command.as_deref()
    }

    #[must_use]
    pub fn discord_notifications(&self) -> DiscordNotifications {
        self.discord_notifications
    }

    #[must_use]
    pub fn version_type(&self) -> &VersionType {
        &self.version_type
    }

    /// Pretty-printed JSON as written by setup mode (4-space indent).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_manual_check_on_major(mut self, enabled: bool) -> Self {
        self.manual_check_on_major = enabled;
        self
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_run_tests(mut self, enabled: bool) -> Self {
        self.run_tests = enabled;
        self
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_manual_only(mut self, enabled: bool) -> Self {
        self.manual_only = enabled;
        self
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_test_command(mut self, command: Option<&str>) -> Self {
        self.test_command = command.map(str::to_string);
        self
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_notifications(mut self, notifications: DiscordNotifications) -> Self {
        self.discord_notifications = notifications;
        self
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_version_type(mut self, version_type: VersionType) -> Self {
        self.version_type = version_type;
        self
    }
}

fn flag(fields: &Map<String, Value>, key: &str) -> bool {
    matches!(fields.get(key), Some(Value::Bool(true)))
}

/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist,
/// `ConfigError::Read` if it cannot be read, or `ConfigError::Parse` if it is
/// not valid JSON.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Config::from_json(&value))
}

/// Writes [`Config::recommended`] to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// cannot be written.
pub fn write_default_config(path: &Path) -> Result<Config, ConfigError> {
    let config = Config::recommended();
    let content = config
        .to_pretty_json()
        .map_err(|source| ConfigError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, content).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(config)
}
