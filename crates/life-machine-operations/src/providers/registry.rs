use life_machine_manifest::dependency_map;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;

use crate::RegistryError;
use crate::traits::{PublishedManifest, RegistryClient};

pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Reads package metadata ("packuments") from an npm-compatible registry.
pub struct HttpRegistryClient {
    client: Client,
    base_url: String,
}

impl HttpRegistryClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_base_url(NPM_REGISTRY_URL)
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .user_agent(concat!("life-machine/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RegistryError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    #[must_use]
    pub fn package_url(&self, package: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            package.replace('/', "%2F")
        )
    }
}

impl RegistryClient for HttpRegistryClient {
    fn latest_manifest(&self, package: &str) -> Result<Option<PublishedManifest>, RegistryError> {
        let url = self.package_url(package);
        debug!(%url, "fetching registry metadata");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|source| RegistryError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(RegistryError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|source| RegistryError::Request {
            url: url.clone(),
            source,
        })?;

        decode_packument(package, &url, &body).map(Some)
    }
}

/// Extracts the `latest` version's dependency sections from registry metadata.
///
/// # Errors
///
/// Returns an error if the body is not JSON or lacks the `latest` dist-tag or
/// its version entry.
pub fn decode_packument(
    package: &str,
    url: &str,
    body: &str,
) -> Result<PublishedManifest, RegistryError> {
    let document: Value = serde_json::from_str(body).map_err(|source| RegistryError::Decode {
        url: url.to_string(),
        source,
    })?;

    let latest = document
        .get("dist-tags")
        .and_then(|tags| tags.get("latest"))
        .and_then(Value::as_str)
        .ok_or_else(|| RegistryError::MissingLatest {
            package: package.to_string(),
        })?;

    let entry = document
        .get("versions")
        .and_then(|versions| versions.get(latest))
        .ok_or_else(|| RegistryError::MissingVersion {
            package: package.to_string(),
            version: latest.to_string(),
        })?;

    let section = |key: &str| entry.get(key).map(dependency_map).unwrap_or_default();

    Ok(PublishedManifest {
        version: latest.to_string(),
        dependencies: section("dependencies"),
        dev_dependencies: section("devDependencies"),
    })
}
