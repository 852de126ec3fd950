use std::collections::BTreeMap;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vsixkit_core::ci::CiContext;
use vsixkit_core::manifest::{ExtensionManifest, PackageManifest};
use vsixkit_core::scan::{AnalysisPreset, ScannerCli, build_request, dispatch};
use vsixkit_core::{descriptor, pack};

mod args;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = args::Args::parse();

    // Single environment snapshot for the whole invocation; nothing
    // below reads the environment again.
    let ctx = CiContext::from_env();

    // The one place the process is allowed to terminate on failure.
    if let Err(err) = run(args, &ctx) {
        eprintln!("ERROR: {err:#}");
        std::process::exit(1);
    }
}

fn run(args: args::Args, ctx: &CiContext) -> Result<()> {
    match args.command {
        args::Command::BuildInfo {
            package_manifest,
            extension_manifest,
            product,
            build_dir,
            out,
        } => {
            let package = PackageManifest::load(&package_manifest)?;
            let extension = ExtensionManifest::load(&extension_manifest)?;

            let info = descriptor::assemble(&package, &extension, &product, &build_dir, ctx)?;
            let output = serde_json::to_string_pretty(&info)?;

            match out {
                Some(path) => std::fs::write(path, output)?,
                None => println!("{output}"),
            }
        }

        args::Command::Package {
            extension_dir,
            package_manifest,
            tfx,
            out_dir,
            extra_args,
        } => {
            let package = PackageManifest::load(&package_manifest)?;
            let extension = ExtensionManifest::load(&extension_dir.join("vss-extension.json"))?;

            pack::package_extension(
                &tfx,
                &extension_dir,
                &package,
                &extension,
                ctx,
                &out_dir,
                &extra_args,
            )?;
        }

        args::Command::Install { package_manifest } => {
            pack::install_task(&package_manifest)?;
        }

        args::Command::Scan {
            target,
            scanner,
            options,
        } => {
            let preset = match target {
                args::Target::Server => AnalysisPreset::server(),
                args::Target::Cloud => AnalysisPreset::cloud(),
            };
            let overrides: BTreeMap<String, String> = options.into_iter().collect();

            let request = build_request(&preset, ctx, &overrides)?;
            let client = ScannerCli::new(scanner);

            dispatch(&client, &request, |outcome| {
                if outcome.is_ok() {
                    info!("analysis submitted to {}", request.server_url);
                }
            })?;
        }
    }

    Ok(())
}
