use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "vsixkit",
    version,
    about = "Build metadata and packaging helper for VSIX extensions"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Assemble the build-info descriptor for a packaged extension
    BuildInfo {
        /// Path to package.json
        #[arg(long, default_value = "package.json")]
        package_manifest: PathBuf,

        /// Path to the extension manifest
        #[arg(long, default_value = "vss-extension.json")]
        extension_manifest: PathBuf,

        /// Product tag embedded in artifact file names
        #[arg(long)]
        product: String,

        /// Build output directory scanned for artifacts
        #[arg(long, default_value = "build")]
        build_dir: PathBuf,

        /// Write the descriptor to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Package an extension directory with the external tfx binary
    Package {
        /// Extension directory containing the extension manifest
        extension_dir: PathBuf,

        /// Path to package.json
        #[arg(long, default_value = "package.json")]
        package_manifest: PathBuf,

        /// Path to the tfx binary
        #[arg(long, default_value = "node_modules/.bin/tfx")]
        tfx: PathBuf,

        /// Directory receiving the packaged .vsix
        #[arg(long, default_value = "build")]
        out_dir: PathBuf,

        /// Extra arguments passed through to tfx
        #[arg(long, default_value = "")]
        extra_args: String,
    },

    /// Install a task package after validating its manifest
    Install {
        /// Path to the task package.json
        package_manifest: PathBuf,
    },

    /// Run the quality analysis for one target
    Scan {
        /// Analysis target
        #[arg(long, value_enum)]
        target: Target,

        /// Path to the scanner binary
        #[arg(long, default_value = "scanner")]
        scanner: PathBuf,

        /// Additional key=value analysis options
        #[arg(short = 'D', value_name = "KEY=VALUE", value_parser = parse_key_val)]
        options: Vec<(String, String)>,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Target {
    Server,
    Cloud,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {s:?}"))?;
    Ok((key.to_string(), value.to_string()))
}
