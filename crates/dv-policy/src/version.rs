// version.rs — Semver validity and range satisfaction.
//
// Rule segments carry npm-style ranges ("2.x", "^1.0.0", "*"). Two details
// matter here:
// - A bare version in range position ("2.3.6") means exactly that version
//   in npm; `VersionReq` would default it to a caret range. Pin it with `=`.
// - Invalid ranges and invalid versions never match (fail-closed).

use semver::{Version, VersionReq};

/// Check whether `version` is a syntactically valid semantic version.
pub fn is_valid(version: &str) -> bool {
    Version::parse(version).is_ok()
}

/// Check whether `version` satisfies the npm-style `range`.
///
/// Returns false when the version is not valid semver or the range does
/// not parse — a malformed rule never matches anything.
pub fn satisfies(version: &str, range: &str) -> bool {
    let version = match Version::parse(version) {
        Ok(v) => v,
        Err(_) => return false,
    };

    let req = if Version::parse(range).is_ok() {
        // Bare version: exact equality, not the caret default.
        VersionReq::parse(&format!("={range}"))
    } else {
        VersionReq::parse(range)
    };

    match req {
        Ok(req) => req.matches(&version),
        Err(_) => false,
    }
}
