// resolver.rs — Rule resolution: which policy rule covers a vulnerability.
//
// Scans the `ignore` rules and then the `patch` rules registered for the
// vulnerability's id, in document order. Every hit replaces the previous
// one, so the last matching rule wins — a vulnerability covered by both
// categories resolves to `patch`, which is scanned second.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{Metadata, PolicyDocument, Rule};
use crate::matcher;

/// A vulnerability as reported by an advisory source.
///
/// `from` is the root-inclusive dependency chain: `from[0]` is the project
/// itself, the vulnerable package is last.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vulnerability {
    pub id: String,
    pub from: Vec<String>,
}

/// Which policy category a matched rule came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    Ignore,
    Patch,
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleType::Ignore => write!(f, "ignore"),
            RuleType::Patch => write!(f, "patch"),
        }
    }
}

/// The outcome of resolving a vulnerability against a policy document.
///
/// Serializes with the matched rule's metadata flattened beside the fixed
/// fields, so consumers see one flat record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    pub id: String,
    /// The vulnerability's full root-inclusive chain.
    pub rule: Vec<String>,
    /// Metadata carried by the matched rule (reason, expiry, ...).
    #[serde(flatten)]
    pub metadata: Metadata,
}

/// Resolve a vulnerability against a policy document.
///
/// Returns `None` when no rule covers the vulnerability — a normal
/// outcome, not an error.
pub fn resolve(policy: &PolicyDocument, vuln: &Vulnerability) -> Option<MatchResult> {
    let mut found = None;

    let categories = [
        (RuleType::Ignore, &policy.ignore),
        (RuleType::Patch, &policy.patch),
    ];

    for (rule_type, rules_by_id) in categories {
        let rules = match rules_by_id.get(&vuln.id) {
            Some(rules) => rules,
            None => continue,
        };

        for rule in rules {
            if rule_matches(vuln, rule) {
                debug!(id = %vuln.id, %rule_type, "rule covers vulnerability");
                found = Some(MatchResult {
                    rule_type,
                    id: vuln.id.clone(),
                    rule: vuln.from.clone(),
                    metadata: rule.metadata().cloned().unwrap_or_default(),
                });
            }
        }
    }

    found
}

/// Check whether a single rule's pattern covers the vulnerability's chain.
///
/// The root project (`from[0]`) is never part of the matched chain.
fn rule_matches(vuln: &Vulnerability, rule: &Rule) -> bool {
    match rule.pattern() {
        Some(pattern) => {
            let chain = vuln.from.get(1..).unwrap_or_default();
            matcher::matches(chain, pattern)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vuln(id: &str, from: &[&str]) -> Vulnerability {
        Vulnerability {
            id: id.to_string(),
            from: from.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn reason(text: &str) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert(
            "reason".to_string(),
            serde_yaml::Value::String(text.to_string()),
        );
        metadata
    }

    fn policy_with_ignore(id: &str, rules: Vec<Rule>) -> PolicyDocument {
        let mut policy = PolicyDocument::default();
        policy.ignore.insert(id.to_string(), rules);
        policy
    }

    #[test]
    fn ignore_rule_covers_vulnerability() {
        let policy = policy_with_ignore("VULN-1", vec![Rule::new("pkgA > pkgB@1.x", reason("x"))]);
        let vuln = vuln("VULN-1", &["root", "pkgA@1.0.0", "pkgB@1.5.0"]);

        let result = resolve(&policy, &vuln).unwrap();
        assert_eq!(result.rule_type, RuleType::Ignore);
        assert_eq!(result.id, "VULN-1");
        assert_eq!(result.rule, vuln.from);
        assert_eq!(
            result.metadata.get("reason"),
            Some(&serde_yaml::Value::String("x".to_string()))
        );
    }

    #[test]
    fn unknown_id_yields_none() {
        let policy = policy_with_ignore("VULN-1", vec![Rule::new("*", Metadata::new())]);
        let vuln = vuln("VULN-2", &["root", "pkgA@1.0.0"]);
        assert!(resolve(&policy, &vuln).is_none());
    }

    #[test]
    fn non_matching_path_yields_none() {
        let policy = policy_with_ignore(
            "VULN-1",
            vec![Rule::new("pkgX@9.9.9 > pkgY@1.0.0", Metadata::new())],
        );
        let vuln = vuln("VULN-1", &["root", "pkgA@1.0.0", "pkgB@1.5.0"]);
        assert!(resolve(&policy, &vuln).is_none());
    }

    #[test]
    fn patch_scanned_after_ignore_wins() {
        let mut policy = policy_with_ignore("VULN-1", vec![Rule::new("*", reason("ignored"))]);
        policy.patch.insert(
            "VULN-1".to_string(),
            vec![Rule::new("*", reason("patched"))],
        );
        let vuln = vuln("VULN-1", &["root", "pkgA@1.0.0"]);

        let result = resolve(&policy, &vuln).unwrap();
        assert_eq!(result.rule_type, RuleType::Patch);
        assert_eq!(
            result.metadata.get("reason"),
            Some(&serde_yaml::Value::String("patched".to_string()))
        );
    }

    #[test]
    fn later_rule_in_same_category_wins() {
        let policy = policy_with_ignore(
            "VULN-1",
            vec![
                Rule::new("*", reason("first")),
                Rule::new("pkgA@1.x", reason("second")),
            ],
        );
        let vuln = vuln("VULN-1", &["root", "pkgA@1.0.0"]);

        let result = resolve(&policy, &vuln).unwrap();
        assert_eq!(
            result.metadata.get("reason"),
            Some(&serde_yaml::Value::String("second".to_string()))
        );
    }

    #[test]
    fn root_is_excluded_from_matching() {
        // A rule naming the root package must not match through it.
        let policy = policy_with_ignore("VULN-1", vec![Rule::new("root@1.0.0", Metadata::new())]);
        let vuln = vuln("VULN-1", &["root@1.0.0", "pkgA@2.0.0"]);
        assert!(resolve(&policy, &vuln).is_none());
    }

    #[test]
    fn rule_without_metadata_yields_empty_metadata() {
        let policy = policy_with_ignore("VULN-1", vec![Rule::new("*", Metadata::new())]);
        let vuln = vuln("VULN-1", &["root", "pkgA@1.0.0"]);

        let result = resolve(&policy, &vuln).unwrap();
        assert!(result.metadata.is_empty());
    }

    #[test]
    fn match_result_serializes_flat() {
        let policy = policy_with_ignore("VULN-1", vec![Rule::new("*", reason("dev dependency"))]);
        let vuln = vuln("VULN-1", &["root", "pkgA@1.0.0"]);

        let result = resolve(&policy, &vuln).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"type\":\"ignore\""));
        assert!(json.contains("\"reason\":\"dev dependency\""));
    }
}
