mod compare;
mod error;
mod reader;

pub use compare::{
    DependencyChange, DependencyComparison, classify, compare_dependencies, first_major,
    major_component,
};
pub use error::ManifestError;
pub use reader::{
    DependencyMap, PackageManifest, dependency_map, read_manifest, read_version,
    shared_dependencies,
};
