//! # dv-policy
//!
//! Vulnerability policy engine for depvet.
//!
//! A project's `.depvet` file lists, per vulnerability id, path rules
//! describing which dependency chains are ignored or treated as patched.
//! [`resolve`] decides whether a reported vulnerability is covered by any
//! rule, matching the chain it arrived through against each rule's pattern.
//!
//! ## Key invariants
//!
//! - **Matching never fails**: malformed specifiers degrade to wildcard
//!   versions, unknown document versions coerce to the default, and an
//!   uncovered vulnerability is `None`, not an error.
//! - **Root excluded**: `from[0]` (the project itself) is never part of a
//!   matched chain.
//! - **Last match wins**: `ignore` rules are scanned before `patch` rules,
//!   and a later match replaces an earlier one.

pub mod document;
pub mod error;
pub mod matcher;
pub mod resolver;
pub mod specifier;
pub mod store;
pub mod version;

pub use document::{normalize, Metadata, PolicyDocument, Rule, DEFAULT_VERSION};
pub use error::PolicyError;
pub use resolver::{resolve, MatchResult, RuleType, Vulnerability};
pub use specifier::PackageSpecifier;
pub use store::{LoadOptions, PolicyStore, POLICY_FILENAME};
