// store.rs — Reading and writing the `.depvet` policy file.
//
// The store is the only fallible surface in the crate: everything past
// `load` operates on an in-memory document and cannot fail.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::{self, PolicyDocument, DEFAULT_VERSION};
use crate::error::PolicyError;

/// Name of the policy file at a project root.
pub const POLICY_FILENAME: &str = ".depvet";

/// Options for loading a policy document.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Skip storage entirely and act as if no policy exists.
    pub ignore_policy: bool,
}

/// Reads and writes the policy document for one project.
pub struct PolicyStore {
    path: PathBuf,
}

impl PolicyStore {
    /// A store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store for the policy file at a project root.
    pub fn for_project(root: &Path) -> Self {
        Self::new(root.join(POLICY_FILENAME))
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and normalize the policy document.
    pub fn load(&self) -> Result<PolicyDocument, PolicyError> {
        self.load_with(&LoadOptions::default())
    }

    /// Load with options. With `ignore_policy` set, an empty document is
    /// returned without touching storage.
    pub fn load_with(&self, options: &LoadOptions) -> Result<PolicyDocument, PolicyError> {
        if options.ignore_policy {
            debug!("policy ignored by request");
            return Ok(document::normalize(None));
        }

        let data = fs::read_to_string(&self.path).map_err(|source| PolicyError::Io {
            path: self.path.clone(),
            source,
        })?;
        let raw: PolicyDocument = serde_yaml::from_str(&data)?;
        Ok(document::normalize(Some(raw)))
    }

    /// Save a policy document, stamping the current default schema version.
    pub fn save(&self, doc: &PolicyDocument) -> Result<(), PolicyError> {
        let mut doc = doc.clone();
        doc.version = DEFAULT_VERSION.to_string();

        let yaml = serde_yaml::to_string(&doc).map_err(PolicyError::Serialize)?;
        fs::write(&self.path, yaml).map_err(|source| PolicyError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "policy saved");
        Ok(())
    }
}
