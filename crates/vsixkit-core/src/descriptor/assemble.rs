//! Build descriptor assembly.
//!
//! Composes version resolution, artifact discovery and fingerprinting
//! into the single descriptor consumed downstream. Assembly is
//! all-or-nothing: any discovery or fingerprinting failure aborts the
//! whole descriptor; partial descriptors are never returned. The
//! filesystem is only read, never written.

use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::path::Path;

use crate::artifact::discover::{discover_companions, discover_packages, extract_qualifier};
use crate::artifact::fingerprint::fingerprint_file;
use crate::ci::CiContext;
use crate::descriptor::model::{
    ArtifactEntry, BuildInfo, BuildModule, JAVA_SPEC_COMPAT, ModuleProperties, PROP_DEPLOY_REPO,
    PROP_JAVA_SPEC, PROP_LEGACY_COMMIT, PROP_PROJECT_VERSION, STARTED_FORMAT,
};
use crate::error::{Error, Result};
use crate::manifest::{ExtensionManifest, PackageManifest};
use crate::version::resolve_version;
use crate::{BUILD_INFO_SCHEMA_VERSION, MODULE_GROUP_ID};

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn file_kind(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Assemble the build descriptor using the current system clock.
pub fn assemble(
    package: &PackageManifest,
    extension: &ExtensionManifest,
    product: &str,
    build_dir: &Path,
    ctx: &CiContext,
) -> Result<BuildInfo> {
    assemble_at(package, extension, product, build_dir, ctx, Local::now())
}

/// Assemble the build descriptor with a caller-supplied start time.
///
/// 1. Resolve the effective version from the extension manifest and
///    the CI context.
/// 2. Discover primary packages and companion files for `product`.
/// 3. Extract one qualifier per primary package against the resolved
///    version.
/// 4. Fingerprint every discovered file, primaries first.
/// 5. Emit exactly one module entry plus the fixed property bag.
pub fn assemble_at(
    package: &PackageManifest,
    extension: &ExtensionManifest,
    product: &str,
    build_dir: &Path,
    ctx: &CiContext,
    started: DateTime<Local>,
) -> Result<BuildInfo> {
    let resolved = resolve_version(&extension.version, ctx);

    let packages = discover_packages(build_dir, product)?;
    if packages.is_empty() {
        return Err(Error::NoArtifacts {
            dir: build_dir.to_path_buf(),
            pattern: format!("*{product}.vsix"),
        });
    }
    let companions = discover_companions(build_dir, product)?;

    let artifacts_to_download = packages
        .iter()
        .map(|path| {
            extract_qualifier(path, &resolved)
                .map(|q| format!("{MODULE_GROUP_ID}:{}:vsix:{q}", package.name))
        })
        .collect::<Result<Vec<_>>>()?
        .join(",");

    let mut artifacts = Vec::with_capacity(packages.len() + companions.len());
    for path in packages.iter().chain(companions.iter()) {
        let fp = fingerprint_file(path)?;
        artifacts.push(ArtifactEntry {
            kind: file_kind(path),
            sha1: fp.sha1,
            md5: fp.md5,
            name: base_name(path),
        });
    }

    let mut properties = BTreeMap::new();
    properties.insert(PROP_JAVA_SPEC.to_string(), JAVA_SPEC_COMPAT.to_string());
    properties.insert(PROP_PROJECT_VERSION.to_string(), resolved.clone());
    if let Some(repo) = &ctx.deploy_repo {
        properties.insert(PROP_DEPLOY_REPO.to_string(), repo.clone());
    }
    if let Some(commit) = &ctx.commit {
        properties.insert(PROP_LEGACY_COMMIT.to_string(), commit.clone());
    }

    Ok(BuildInfo {
        version: BUILD_INFO_SCHEMA_VERSION.to_string(),
        name: package.name.clone(),
        number: ctx.build_number.clone(),
        started: started.format(STARTED_FORMAT).to_string(),
        url: ctx.build_url.clone(),
        vcs_revision: ctx.commit.clone(),
        vcs_url: ctx.vcs_url(),
        modules: vec![BuildModule {
            id: format!("{MODULE_GROUP_ID}:{}:{resolved}", package.name),
            properties: ModuleProperties {
                artifacts_to_download,
            },
            artifacts,
        }],
        properties,
    })
}
