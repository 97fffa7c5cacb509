use std::path::Path;

use indexmap::IndexMap;
use semver::Version;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ManifestError;

/// Dependency name to version range, in manifest order.
pub type DependencyMap = IndexMap<String, String>;

/// The parts of `package.json` the release workflow cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManifest {
    pub name: String,
    pub version: Version,
    pub dependencies: DependencyMap,
    pub dev_dependencies: DependencyMap,
}

impl PackageManifest {
    #[must_use]
    pub fn shared_dependencies(&self) -> DependencyMap {
        shared_dependencies(&self.dependencies, &self.dev_dependencies)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawManifest {
    name: Option<String>,
    version: Option<String>,
    #[serde(default)]
    dependencies: Value,
    #[serde(default)]
    dev_dependencies: Value,
}

/// Merges runtime and dev dependencies into one map. A name present in both
/// keeps the dev dependency's range.
#[must_use]
pub fn shared_dependencies(
    dependencies: &DependencyMap,
    dev_dependencies: &DependencyMap,
) -> DependencyMap {
    let mut shared = dependencies.clone();
    for (name, range) in dev_dependencies {
        shared.insert(name.clone(), range.clone());
    }
    shared
}

/// Keeps the string-valued entries of a JSON dependency object.
#[must_use]
pub fn dependency_map(value: &Value) -> DependencyMap {
    let Value::Object(entries) = value else {
        return DependencyMap::new();
    };
    entries
        .iter()
        .filter_map(|(name, range)| range.as_str().map(|r| (name.clone(), r.to_string())))
        .collect()
}

/// # Errors
///
/// Returns `ManifestError::Read` if the file cannot be read,
/// `ManifestError::Parse` if the JSON is malformed, `ManifestError::MissingField`
/// if `name` or `version` is absent, or `ManifestError::InvalidVersion` if the
/// version is not valid semver.
pub fn read_manifest(path: &Path) -> Result<PackageManifest, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: RawManifest =
        serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let name = raw.name.ok_or_else(|| ManifestError::MissingField {
        path: path.to_path_buf(),
        field: "name".to_string(),
    })?;

    let version_str = raw.version.ok_or_else(|| ManifestError::MissingField {
        path: path.to_path_buf(),
        field: "version".to_string(),
    })?;

    let version = Version::parse(&version_str).map_err(|source| ManifestError::InvalidVersion {
        path: path.to_path_buf(),
        version: version_str.clone(),
        source,
    })?;

    Ok(PackageManifest {
        name,
        version,
        dependencies: dependency_map(&raw.dependencies),
        dev_dependencies: dependency_map(&raw.dev_dependencies),
    })
}

/// # Errors
///
/// Returns an error if the manifest cannot be read or its version is invalid.
pub fn read_version(path: &Path) -> Result<Version, ManifestError> {
    read_manifest(path).map(|manifest| manifest.version)
}
