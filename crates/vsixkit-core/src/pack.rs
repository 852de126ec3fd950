//! Packaging glue: package-manager installs and the external `tfx`
//! packaging binary.
//!
//! Everything here is a thin wrapper over [`crate::process::run`]; the
//! external tools own the real work.

use std::path::Path;

use crate::ci::CiContext;
use crate::error::Result;
use crate::manifest::{ExtensionManifest, PackageManifest};
use crate::process::{RunOptions, run};
use crate::version::resolve_version;

/// Install a package's dependencies in its manifest directory.
pub fn npm_install(package_path: &Path) -> Result<()> {
    let dir = package_path.parent().unwrap_or(Path::new("."));
    run("npm install", &RunOptions::in_dir(dir))?;
    Ok(())
}

/// Install a task package after validating its manifest.
///
/// Task manifests declaring dev dependencies are rejected before any
/// install runs.
pub fn install_task(package_path: &Path) -> Result<()> {
    let manifest = PackageManifest::load(package_path)?;
    manifest.ensure_no_dev_dependencies(package_path)?;
    npm_install(package_path)
}

/// File name of the `.vsix` produced for this package/extension pair.
///
/// The embedded version is the resolved release version, so the name is
/// stable for a given manifest and CI context.
pub fn vsix_file_name(
    package: &PackageManifest,
    extension: &ExtensionManifest,
    ctx: &CiContext,
) -> String {
    format!(
        "{}-{}-{}.vsix",
        package.name,
        resolve_version(&extension.version, ctx),
        extension.id
    )
}

/// Package an extension directory with the external `tfx` binary.
///
/// The produced `.vsix` lands in `out_dir` under the name computed by
/// [`vsix_file_name`]. `extra_args` is passed through to `tfx` verbatim.
pub fn package_extension(
    tfx: &Path,
    extension_dir: &Path,
    package: &PackageManifest,
    extension: &ExtensionManifest,
    ctx: &CiContext,
    out_dir: &Path,
    extra_args: &str,
) -> Result<()> {
    let out_path = out_dir.join(vsix_file_name(package, extension, ctx));
    let command = format!(
        "\"{}\" extension create --output-path \"{}\" {}",
        tfx.display(),
        out_path.display(),
        extra_args
    );
    run(&command, &RunOptions::in_dir(extension_dir))?;
    Ok(())
}
