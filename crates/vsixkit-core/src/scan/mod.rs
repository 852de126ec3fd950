pub mod client;
pub mod options;

pub use client::{AnalysisClient, ScannerCli, dispatch};
pub use options::{AnalysisPreset, AnalysisRequest, build_request, merge_options};
