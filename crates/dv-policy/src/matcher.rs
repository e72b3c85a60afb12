// matcher.rs — Dependency-path matching against rule patterns.
//
// A rule pattern looks like:
//
//   express-hbs@0.8.4 > handlebars@3.0.3 > uglify-js@2.3.6
//
// and is matched against the chain a vulnerability arrived through. The
// root project is never part of the chain; the vulnerable package is the
// last entry. Patterns may use `*` as a wildcard spanning zero or more
// chain entries, and semver ranges:
//
//   * > uglify-js@2.x
//
// The walk keeps two explicit cursors, one into the segment list and one
// into the chain, so a wildcard can absorb a variable number of entries
// without index arithmetic on a shared offset.

use tracing::{debug, trace};

use crate::specifier::PackageSpecifier;
use crate::version;

/// Separator between segments in both patterns and joined chains.
const PATH_SEPARATOR: &str = " > ";

/// Match a dependency chain against a single rule pattern.
///
/// `chain` is the vulnerability's `from` path with the root project
/// already sliced off by the caller.
pub fn matches(chain: &[String], pattern: &str) -> bool {
    // Fast path: a rule that spells out the chain literally (possibly with
    // extra leading context) matches without any segment walking.
    if pattern.contains(&chain.join(PATH_SEPARATOR)) {
        debug!(pattern, "exact path match");
        return true;
    }

    matches_segments(chain, pattern)
}

/// Segment-by-segment walk. Every segment must pass; the first failure
/// short-circuits the whole match.
fn matches_segments(chain: &[String], pattern: &str) -> bool {
    let segments: Vec<&str> = pattern.split(PATH_SEPARATOR).collect();
    trace!(pattern, ?chain, "checking path");

    let mut seg_idx = 0;
    let mut chain_idx = 0;

    while seg_idx < segments.len() {
        let segment = segments[seg_idx];

        if segment == "*" {
            // A trailing wildcard (the lone `*` rule included) matches any
            // remaining suffix, empty or not.
            let target = match segments.get(seg_idx + 1) {
                Some(next) => PackageSpecifier::parse(next),
                None => {
                    trace!("trailing wildcard");
                    return true;
                }
            };

            // Absorb chain entries until the next segment's package name
            // appears, starting at the current position. Running off the
            // end is not a failure here: the next segment then fails
            // against the missing entry.
            while chain_idx < chain.len() {
                let entry = PackageSpecifier::parse(&chain[chain_idx]);
                if entry.name == target.name {
                    trace!(target = %target.name, "wildcard found target");
                    break;
                }
                chain_idx += 1;
            }

            // The found entry (if any) is left for the next segment.
            seg_idx += 1;
            continue;
        }

        let entry = match chain.get(chain_idx) {
            Some(entry) => entry,
            None => {
                trace!(segment, "chain exhausted");
                return false;
            }
        };

        if !segment_matches(segment, entry) {
            trace!(segment, entry = %entry, "failed match");
            return false;
        }

        seg_idx += 1;
        chain_idx += 1;
    }

    debug!(pattern, "path match");
    true
}

/// Test one non-wildcard pattern segment against one chain entry.
fn segment_matches(segment: &str, entry: &str) -> bool {
    if segment == entry {
        trace!(segment, "exact segment match");
        return true;
    }

    // Semver fallback. A segment with no version reads as `name@*`, and
    // the chain entry passes when its version is valid semver satisfying
    // the segment's range. Only versions are compared here; names are
    // tied down by the byte-equality test above.
    let segment = PackageSpecifier::parse(segment);
    let entry = PackageSpecifier::parse(entry);

    version::is_valid(&entry.version) && version::satisfies(&entry.version, &segment.version)
}
