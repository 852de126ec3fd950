//! Package and extension manifest models.
//!
//! Two JSON manifests drive a build: the package manifest
//! (`package.json`) naming the npm package, and the extension manifest
//! (`vss-extension.json`) carrying the marketplace identity and the
//! version that release resolution starts from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Subset of `package.json` consumed by the build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,

    #[serde(rename = "devDependencies", default, skip_serializing_if = "Option::is_none")]
    pub dev_dependencies: Option<BTreeMap<String, String>>,
}

impl PackageManifest {
    /// Read and parse a package manifest.
    ///
    /// An unreadable or malformed file is fatal for the run.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Task manifests must not declare dev dependencies; the packaged
    /// task ships its full dependency closure.
    pub fn ensure_no_dev_dependencies(&self, path: &Path) -> Result<()> {
        let has_dev_deps = self
            .dev_dependencies
            .as_ref()
            .is_some_and(|deps| !deps.is_empty());

        if has_dev_deps {
            return Err(Error::Config(format!(
                "task package.json should not contain dev dependencies. Offending package.json: {}",
                path.display()
            )));
        }
        Ok(())
    }
}

/// Subset of the extension manifest consumed by the build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionManifest {
    pub id: String,
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

impl ExtensionManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
