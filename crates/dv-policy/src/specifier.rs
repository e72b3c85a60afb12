// specifier.rs — Package specifier parsing ("name@versionOrRange").

use std::fmt;

use serde::{Deserialize, Serialize};

/// A parsed `name@version` token from a dependency chain or rule segment.
///
/// Scoped names keep their leading `@` — `"@scope/pkg@1.2.3"` splits on the
/// *last* `@` into name `"@scope/pkg"` and version `"1.2.3"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageSpecifier {
    pub name: String,
    pub version: String,
}

impl PackageSpecifier {
    /// Parse a token by splitting on its last `@`.
    ///
    /// Total: a token without a version part degrades to the wildcard
    /// range instead of erroring.
    pub fn parse(token: &str) -> Self {
        match token.rfind('@') {
            // An `@` at position 0 is a bare scoped name, not a separator.
            Some(at) if at > 0 => Self {
                name: token[..at].to_string(),
                version: token[at + 1..].to_string(),
            },
            _ => Self {
                name: token.to_string(),
                version: "*".to_string(),
            },
        }
    }
}

impl fmt::Display for PackageSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}
