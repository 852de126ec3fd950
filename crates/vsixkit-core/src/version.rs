//! Release version resolution.
//!
//! Manifest versions may carry a pre-release marker (`-SNAPSHOT`) that
//! must be substituted with a CI build identifier before release. The
//! resolution is idempotent: the same manifest version and CI context
//! always yield the same version string.

use crate::SNAPSHOT_SUFFIX;
use crate::ci::CiContext;

/// Compute the effective release version for a manifest version.
///
/// - A version not ending in the pre-release marker is already final
///   and is returned unchanged.
/// - Otherwise the marker is replaced with `.` plus the first CI build
///   identifier present (primary build number, then the second
///   provider's build id).
/// - With neither identifier available, the version is returned
///   unchanged, still carrying the marker. This is a valid, incomplete
///   outcome, not an error.
pub fn resolve_version(manifest_version: &str, ctx: &CiContext) -> String {
    if !manifest_version.ends_with(SNAPSHOT_SUFFIX) {
        return manifest_version.to_string();
    }

    match ctx.build_identifier() {
        Some(id) => {
            let base = &manifest_version[..manifest_version.len() - SNAPSHOT_SUFFIX.len()];
            format!("{base}.{id}")
        }
        None => manifest_version.to_string(),
    }
}
