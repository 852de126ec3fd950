//! Discovery of produced artifacts in the build output directory.
//!
//! Matching is glob-based and anchored at the build output root. Match
//! order is stable (lexicographic by path) so downstream qualifier
//! extraction is deterministic for a fixed directory snapshot.

use glob::glob;
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Suffixes of companion files published next to each package:
/// SBOM documents and detached signatures.
pub const COMPANION_SUFFIXES: [&str; 2] = ["-cyclonedx.json", ".asc"];

fn matches_for(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in glob(pattern)? {
        paths.push(entry?);
    }
    Ok(paths)
}

/// Locate primary package files (`*<product>.vsix`) under `build_dir`.
pub fn discover_packages(build_dir: &Path, product: &str) -> Result<Vec<PathBuf>> {
    let pattern = build_dir.join(format!("*{product}.vsix"));
    let mut paths = matches_for(&pattern.to_string_lossy())?;
    paths.sort();
    Ok(paths)
}

/// Locate companion files (signatures, SBOM documents) for `product`.
///
/// Matches from all companion suffixes are merged and sorted into one
/// stable sequence.
pub fn discover_companions(build_dir: &Path, product: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for suffix in COMPANION_SUFFIXES {
        let pattern = build_dir.join(format!("*{product}{suffix}"));
        paths.extend(matches_for(&pattern.to_string_lossy())?);
    }
    paths.sort();
    Ok(paths)
}

/// Extract the qualifier embedded in a package file name.
///
/// The qualifier is the text between the resolved version and the
/// `.vsix` extension. A package whose name does not embed the resolved
/// version is a mismatch between expected version and actual artifact
/// naming, and is fatal rather than skipped.
pub fn extract_qualifier(path: &Path, resolved_version: &str) -> Result<String> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let pattern = format!(r"{}-(.+)\.vsix$", regex::escape(resolved_version));
    let qualifier_match = Regex::new(&pattern)?;

    qualifier_match
        .captures(&file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(Error::QualifierMismatch {
            file: file_name,
            version: resolved_version.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn build_dir(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in files {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        dir
    }

    #[test]
    fn finds_only_matching_packages() {
        let dir = build_dir(&[
            "ext-1.0.0-linux-server.vsix",
            "ext-1.0.0-win-server.vsix",
            "ext-1.0.0-linux-cloud.vsix",
            "notes.txt",
        ]);

        let found = discover_packages(dir.path(), "server").unwrap();

        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["ext-1.0.0-linux-server.vsix", "ext-1.0.0-win-server.vsix"]
        );
    }

    #[test]
    fn package_matches_are_sorted() {
        let dir = build_dir(&[
            "ext-1.0.0-z-server.vsix",
            "ext-1.0.0-a-server.vsix",
            "ext-1.0.0-m-server.vsix",
        ]);

        let found = discover_packages(dir.path(), "server").unwrap();

        for window in found.windows(2) {
            assert!(window[0] <= window[1], "matches not sorted: {found:?}");
        }
    }

    #[test]
    fn empty_directory_yields_no_packages() {
        let dir = TempDir::new().unwrap();
        assert!(discover_packages(dir.path(), "server").unwrap().is_empty());
    }

    #[test]
    fn companions_cover_both_suffixes() {
        let dir = build_dir(&[
            "ext-1.0.0-server.vsix",
            "ext-1.0.0-server.asc",
            "ext-1.0.0-server-cyclonedx.json",
            "ext-1.0.0-cloud.asc",
        ]);

        let found = discover_companions(dir.path(), "server").unwrap();

        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "ext-1.0.0-server-cyclonedx.json",
                "ext-1.0.0-server.asc",
            ]
        );
    }

    #[test]
    fn extracts_qualifier_between_version_and_extension() {
        let path = Path::new("myext-1.2.3-abcdef123.vsix");
        assert_eq!(extract_qualifier(path, "1.2.3").unwrap(), "abcdef123");
    }

    #[test]
    fn qualifier_can_span_multiple_segments() {
        let path = Path::new("ext-2.0.0.42-linux-x64-server.vsix");
        assert_eq!(
            extract_qualifier(path, "2.0.0.42").unwrap(),
            "linux-x64-server"
        );
    }

    #[test]
    fn version_mismatch_is_fatal() {
        let path = Path::new("myext-9.9.9-abcdef123.vsix");
        let err = extract_qualifier(path, "1.2.3").unwrap_err();

        match err {
            Error::QualifierMismatch { file, version } => {
                assert_eq!(file, "myext-9.9.9-abcdef123.vsix");
                assert_eq!(version, "1.2.3");
            }
            other => panic!("expected QualifierMismatch, got {other:?}"),
        }
    }

    #[test]
    fn version_dots_are_not_wildcards() {
        // "1.2.3" must not match "1x2x3" via the regex dot.
        let path = Path::new("myext-1x2x3-abc.vsix");
        assert!(extract_qualifier(path, "1.2.3").is_err());
    }
}
