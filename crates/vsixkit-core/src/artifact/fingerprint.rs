//! Content fingerprints for produced artifacts.
//!
//! Each discovered file is hashed under a fixed pair of digest
//! algorithms, in a fixed order, over its exact bytes. The identity
//! depends **only** on file content; filesystem metadata is ignored.
//! Fingerprints are computed once per file and never cached across
//! invocations.

use md5::Md5;
use sha1::{Digest, Sha1};
use std::{fs, path::Path};
use tracing::info;

use crate::error::Result;

/// Digest algorithms applied to every artifact, in computation order.
pub const DIGEST_ALGORITHMS: [&str; 2] = ["sha1", "md5"];

/// Digest pair for one artifact file, lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    pub sha1: String,
    pub md5: String,
}

impl Fingerprint {
    /// The digests as `(algorithm, hex)` pairs in computation order.
    pub fn pairs(&self) -> [(&'static str, &str); 2] {
        [("sha1", &self.sha1), ("md5", &self.md5)]
    }
}

/// Hash a file's content under both digest algorithms.
///
/// The file is read as a byte stream, never as text, so digests cannot
/// drift with encoding. Each computed digest is logged with the file's
/// base name for traceability. A missing or unreadable file is fatal
/// for the whole run; there is no retry.
pub fn fingerprint_file(path: &Path) -> Result<Fingerprint> {
    let bytes = fs::read(path)?;

    let sha1 = hex::encode(Sha1::digest(&bytes));
    let md5 = hex::encode(Md5::digest(&bytes));

    let base_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    info!("Computed \"{base_name}\" sha1: {sha1}");
    info!("Computed \"{base_name}\" md5: {md5}");

    Ok(Fingerprint { sha1, md5 })
}
