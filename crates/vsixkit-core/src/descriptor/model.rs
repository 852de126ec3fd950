use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level build-info descriptor.
///
/// This struct is the stable JSON contract handed to the downstream
/// quality-analysis service. Field names below are the wire names; the
/// descriptor must remain deterministic for a fixed directory snapshot
/// and CI context (the `started` timestamp aside).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildInfo {
    /// Descriptor schema version, always
    /// [`crate::BUILD_INFO_SCHEMA_VERSION`].
    pub version: String,

    /// Package name from the package manifest.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    /// Build start timestamp, formatted with [`STARTED_FORMAT`].
    pub started: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(rename = "vcsRevision", default, skip_serializing_if = "Option::is_none")]
    pub vcs_revision: Option<String>,

    #[serde(rename = "vcsUrl", default, skip_serializing_if = "Option::is_none")]
    pub vcs_url: Option<String>,

    pub modules: Vec<BuildModule>,

    pub properties: BTreeMap<String, String>,
}

/// One module entry; a build always produces exactly one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildModule {
    /// `<group>:<package name>:<resolved version>`.
    pub id: String,

    pub properties: ModuleProperties,

    pub artifacts: Vec<ArtifactEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleProperties {
    /// Comma-joined `<group>:<name>:vsix:<qualifier>` entries, one per
    /// primary package.
    #[serde(rename = "artifactsToDownload")]
    pub artifacts_to_download: String,
}

/// Fingerprint entry for one discovered file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactEntry {
    /// File extension without the leading dot.
    #[serde(rename = "type")]
    pub kind: String,

    pub sha1: String,

    pub md5: String,

    /// Base file name.
    pub name: String,
}

/// `chrono` format of the `started` field.
pub const STARTED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Property keys of the fixed top-level property bag.
pub const PROP_JAVA_SPEC: &str = "java.specification.version";
pub const PROP_PROJECT_VERSION: &str = "buildInfo.env.PROJECT_VERSION";
pub const PROP_DEPLOY_REPO: &str = "buildInfo.env.ARTIFACTORY_DEPLOY_REPO";
pub const PROP_LEGACY_COMMIT: &str = "buildInfo.env.TRAVIS_COMMIT";

/// The descriptor consumer rejects builds without a JVM spec version.
pub const JAVA_SPEC_COMPAT: &str = "1.8";
