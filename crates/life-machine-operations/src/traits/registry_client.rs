use life_machine_manifest::{DependencyMap, shared_dependencies};

use crate::RegistryError;

/// Dependency sections of the version a registry reports as `latest`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PublishedManifest {
    pub version: String,
    pub dependencies: DependencyMap,
    pub dev_dependencies: DependencyMap,
}

impl PublishedManifest {
    #[must_use]
    pub fn shared_dependencies(&self) -> DependencyMap {
        shared_dependencies(&self.dependencies, &self.dev_dependencies)
    }
}

pub trait RegistryClient: Send + Sync {
    /// Returns `None` when the registry has never seen the package.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the metadata is malformed.
    fn latest_manifest(&self, package: &str) -> Result<Option<PublishedManifest>, RegistryError>;
}
