use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Argument handed to `npm version`.
///
/// The three common keywords get their own variants; anything else npm
/// understands (`prerelease`, `preminor`, an explicit `1.2.3`, ...) is passed
/// through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum VersionType {
    #[default]
    Patch,
    Minor,
    Major,
    Other(String),
}

impl VersionType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
            Self::Other(keyword) => keyword,
        }
    }
}

impl fmt::Display for VersionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for VersionType {
    fn from(value: &str) -> Self {
        match value {
            "patch" => Self::Patch,
            "minor" => Self::Minor,
            "major" => Self::Major,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for VersionType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<VersionType> for String {
    fn from(value: VersionType) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for VersionType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}
