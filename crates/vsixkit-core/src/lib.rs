pub mod artifact;
pub mod ci;
pub mod descriptor;
pub mod error;
pub mod manifest;
pub mod pack;
pub mod process;
pub mod scan;
pub mod version;

pub use error::{Error, Result};

pub const TOOL_NAME: &str = "vsixkit";

/// Schema version of the build-info descriptor consumed downstream.
/// This must be bumped only when the descriptor JSON shape changes.
pub const BUILD_INFO_SCHEMA_VERSION: &str = "1.0.1";

/// Pre-release marker on manifest versions that must be resolved
/// against CI context before release.
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Group segment of module identifiers in the descriptor.
pub const MODULE_GROUP_ID: &str = "org.vsixkit.extensions";
