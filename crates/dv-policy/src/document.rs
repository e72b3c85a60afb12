// document.rs — The in-memory policy document and its versioning.
//
// A policy document carries a schema version tag plus `ignore` and `patch`
// rule tables keyed by vulnerability id. Versioning is a registry of pure
// transforms: unknown or missing tags coerce to the default version and
// run through its parser, so loading old or foreign documents never fails.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Current (and only) schema version; stamped into saved documents.
pub const DEFAULT_VERSION: &str = "v1";

/// Arbitrary metadata attached to a rule (reason, expiry, ...).
pub type Metadata = BTreeMap<String, serde_yaml::Value>;

/// One path rule: a single pattern mapped to its metadata.
///
/// Serialized transparently so the on-disk form stays a single-key
/// mapping:
///
/// ```yaml
/// - 'express-hbs@0.8.4 > handlebars@3.0.3 > uglify-js@2.3.6':
///     reason: fix pending upstream
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Rule {
    entries: BTreeMap<String, Metadata>,
}

impl Rule {
    /// Build a rule from one pattern and its metadata.
    pub fn new(pattern: impl Into<String>, metadata: Metadata) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(pattern.into(), metadata);
        Self { entries }
    }

    /// The rule's pattern string. A well-formed rule has exactly one key;
    /// a degenerate multi-key rule yields its first.
    pub fn pattern(&self) -> Option<&str> {
        self.entries.keys().next().map(String::as_str)
    }

    /// The metadata attached to the rule's pattern.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.entries.values().next()
    }
}

/// The loaded policy document: per-vulnerability ignore and patch rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyDocument {
    /// Schema version tag; unknown tags are coerced by [`normalize`].
    #[serde(default)]
    pub version: String,

    /// Suppression rules, keyed by vulnerability id.
    #[serde(default)]
    pub ignore: BTreeMap<String, Vec<Rule>>,

    /// Remediation rules, keyed by vulnerability id.
    #[serde(default)]
    pub patch: BTreeMap<String, Vec<Rule>>,
}

impl Default for PolicyDocument {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            ignore: BTreeMap::new(),
            patch: BTreeMap::new(),
        }
    }
}

/// A schema-version parser: a pure transform from raw to current shape.
type Parser = fn(PolicyDocument) -> PolicyDocument;

/// v1 documents are already in the current shape.
fn parse_v1(doc: PolicyDocument) -> PolicyDocument {
    doc
}

/// Look up the parser registered for a version tag.
///
/// A future v2 adds an arm here upgrading the old shape.
fn parser_for(version: &str) -> Option<Parser> {
    match version {
        "v1" => Some(parse_v1),
        _ => None,
    }
}

/// Normalize a raw document into a known schema version.
///
/// Total: an absent document becomes an empty one, and an absent or
/// unrecognized version tag is coerced to the default before its parser
/// runs. Idempotent.
pub fn normalize(raw: Option<PolicyDocument>) -> PolicyDocument {
    let mut doc = raw.unwrap_or_default();

    if parser_for(&doc.version).is_none() {
        doc.version = DEFAULT_VERSION.to_string();
    }

    let parser = parser_for(&doc.version).unwrap_or(parse_v1);
    parser(doc)
}
