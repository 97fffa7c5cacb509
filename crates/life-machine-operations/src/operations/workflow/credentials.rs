use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{OperationError, Result};

/// Written verbatim: npm substitutes `${NPM_TOKEN}` from the publish
/// command's environment when it reads the file.
pub const NPMRC_AUTH_LINE: &str = "//registry.npmjs.org/:_authToken=${NPM_TOKEN}";

/// A temporary `.npmrc` holding the registry auth line.
///
/// [`RegistryCredentials::restore`] puts back whatever was at the path
/// before (or removes the file if nothing was). Dropping an unrestored value
/// restores on a best-effort basis.
pub struct RegistryCredentials {
    path: PathBuf,
    previous: Option<Vec<u8>>,
    restored: bool,
}

impl RegistryCredentials {
    /// # Errors
    ///
    /// Returns `OperationError::Credentials` if an existing file cannot be
    /// read or the auth line cannot be written.
    pub fn write(path: &Path) -> Result<Self> {
        let previous = match std::fs::read(path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(source) => {
                return Err(OperationError::Credentials {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        std::fs::write(path, NPMRC_AUTH_LINE).map_err(|source| OperationError::Credentials {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            path = %path.display(),
            replaced_existing = previous.is_some(),
            "wrote registry credentials"
        );

        Ok(Self {
            path: path.to_path_buf(),
            previous,
            restored: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// # Errors
    ///
    /// Returns `OperationError::Credentials` if the file cannot be removed or
    /// its previous content cannot be written back.
    pub fn restore(mut self) -> Result<()> {
        self.restore_in_place()
    }

    fn restore_in_place(&mut self) -> Result<()> {
        self.restored = true;
        let outcome = match &self.previous {
            Some(content) => std::fs::write(&self.path, content),
            None => match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                other => other,
            },
        };
        outcome.map_err(|source| OperationError::Credentials {
            path: self.path.clone(),
            source,
        })
    }
}

impl Drop for RegistryCredentials {
    fn drop(&mut self) {
        if !self.restored {
            if let Err(e) = self.restore_in_place() {
                warn!(error = %e, "failed to clean up registry credentials");
            }
        }
    }
}
