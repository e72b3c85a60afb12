// error.rs — Error types for policy storage.
//
// The matching core never fails; everything here originates at the
// `.depvet` file boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading or writing the policy file.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The policy file could not be read or written.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The policy file is not valid YAML for the document shape.
    #[error("failed to parse policy YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The document could not be serialized back to YAML.
    #[error("failed to serialize policy: {0}")]
    Serialize(serde_yaml::Error),
}
