//! Analysis configuration layering.
//!
//! Three configuration layers feed one analysis run: the fixed project
//! identity of the selected preset, common settings shared by every
//! preset, and caller-supplied overrides. They are merged by a pure
//! function over an explicit, named precedence order instead of
//! emerging from call-site spread order.

use std::collections::BTreeMap;

use crate::ci::CiContext;
use crate::error::{Error, Result};

pub const KEY_PROJECT_KEY: &str = "analysis.projectKey";
pub const KEY_PROJECT_NAME: &str = "analysis.projectName";
pub const KEY_EXCLUSIONS: &str = "analysis.exclusions";

/// Configuration layers in merge order; later layers override earlier
/// ones for identical keys, except for [`PROTECTED_IDENTITY_KEYS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayer {
    FixedIdentity,
    CommonSettings,
    CallerOverrides,
}

pub const MERGE_PRECEDENCE: [ConfigLayer; 3] = [
    ConfigLayer::FixedIdentity,
    ConfigLayer::CommonSettings,
    ConfigLayer::CallerOverrides,
];

/// Identity keys that later layers must not clobber. A project rescoped
/// mid-merge would report its results against the wrong analysis
/// project.
pub const PROTECTED_IDENTITY_KEYS: [&str; 2] = [KEY_PROJECT_KEY, KEY_PROJECT_NAME];

/// Fixed project identity for one analysis target.
///
/// Two presets exist, one per extension flavor; callers select one by
/// entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPreset {
    pub project_key: String,
    pub project_name: String,
    pub exclusions: String,
}

impl AnalysisPreset {
    /// Identity for the server-flavored extension.
    pub fn server() -> Self {
        Self {
            project_key: "org.vsixkit.extensions:quality-extension".into(),
            project_name: "Azure DevOps extension for Quality Server".into(),
            exclusions: "build/**, extensions/cloud/**, coverage/**, node_modules/**, \
                         **/node_modules/**, **/__tests__/**"
                .into(),
        }
    }

    /// Identity for the cloud-flavored extension.
    pub fn cloud() -> Self {
        Self {
            project_key: "org.vsixkit.extensions:quality-extension-cloud".into(),
            project_name: "Azure DevOps extension for Quality Cloud".into(),
            exclusions: "build/**, extensions/server/**, coverage/**, node_modules/**, \
                         **/node_modules/**, **/__tests__/**"
                .into(),
        }
    }

    /// The identity as a configuration layer.
    pub fn as_layer(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (KEY_PROJECT_KEY.to_string(), self.project_key.clone()),
            (KEY_PROJECT_NAME.to_string(), self.project_name.clone()),
            (KEY_EXCLUSIONS.to_string(), self.exclusions.clone()),
        ])
    }
}

/// Settings shared by both presets, partly sourced from the CI context.
pub fn common_settings(ctx: &CiContext) -> BTreeMap<String, String> {
    let mut settings = BTreeMap::from([
        (
            "analysis.coverage.exclusions".to_string(),
            "build/**, config/**, coverage/**, extensions/**, scripts/**, **/__tests__/**"
                .to_string(),
        ),
        ("analysis.tests".to_string(), ".".to_string()),
        (
            "analysis.test.inclusions".to_string(),
            "**/__tests__/**".to_string(),
        ),
        (
            "analysis.eslint.reportPaths".to_string(),
            "eslint-report.json".to_string(),
        ),
        (
            "analysis.typescript.lcov.reportPaths".to_string(),
            "coverage/lcov.info".to_string(),
        ),
    ]);

    if let Some(id) = ctx.build_identifier() {
        settings.insert("analysis.buildNumber".to_string(), id.to_string());
        settings.insert("analysis.pipeline".to_string(), id.to_string());
    }
    if let Some(repo) = &ctx.repo_full_name {
        settings.insert("analysis.repository".to_string(), repo.clone());
    }

    settings
}

/// Shallow-merge the three configuration layers.
///
/// Layers apply in [`MERGE_PRECEDENCE`] order; a later layer wins for
/// identical keys. The one exception: entries colliding with a
/// [`PROTECTED_IDENTITY_KEYS`] key defined by the identity layer are
/// discarded, so a caller override can never rescope the project.
pub fn merge_options(
    identity: &BTreeMap<String, String>,
    common: &BTreeMap<String, String>,
    overrides: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut merged = identity.clone();

    for layer in [common, overrides] {
        for (key, value) in layer {
            let protected = PROTECTED_IDENTITY_KEYS.contains(&key.as_str())
                && identity.contains_key(key);
            if protected {
                continue;
            }
            merged.insert(key.clone(), value.clone());
        }
    }

    merged
}

/// Fully merged input for one analysis run.
///
/// This is handed unmodified to the analysis client; building the
/// request never invokes the client itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub server_url: String,
    pub token: Option<String>,
    pub options: BTreeMap<String, String>,
}

/// Merge the preset identity, common settings and caller overrides,
/// and resolve the analysis endpoint from the CI context.
///
/// The server URL and token each fall back from the primary signal to
/// the external-PR signal. No URL from either source is a fatal
/// configuration error; a missing token is left to the server to
/// reject.
pub fn build_request(
    preset: &AnalysisPreset,
    ctx: &CiContext,
    overrides: &BTreeMap<String, String>,
) -> Result<AnalysisRequest> {
    let server_url = ctx
        .analysis_server_url()
        .ok_or_else(|| Error::Config("no analysis server URL configured".into()))?
        .to_string();

    Ok(AnalysisRequest {
        server_url,
        token: ctx.analysis_access_token().map(str::to_string),
        options: merge_options(&preset.as_layer(), &common_settings(ctx), overrides),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn later_layers_win_for_ordinary_keys() {
        let merged = merge_options(
            &layer(&[("k", "A")]),
            &layer(&[("k", "B")]),
            &layer(&[("k", "C")]),
        );

        assert_eq!(merged.get("k").map(String::as_str), Some("C"));
    }

    #[test]
    fn common_wins_over_identity_without_override() {
        let merged = merge_options(
            &layer(&[("k", "A")]),
            &layer(&[("k", "B")]),
            &BTreeMap::new(),
        );

        assert_eq!(merged.get("k").map(String::as_str), Some("B"));
    }

    #[test]
    fn project_identity_keys_are_override_proof() {
        let preset = AnalysisPreset::server();
        let merged = merge_options(
            &preset.as_layer(),
            &BTreeMap::new(),
            &layer(&[
                (KEY_PROJECT_KEY, "hijacked:key"),
                (KEY_PROJECT_NAME, "Hijacked"),
                (KEY_EXCLUSIONS, "none/**"),
            ]),
        );

        assert_eq!(
            merged.get(KEY_PROJECT_KEY),
            Some(&preset.project_key)
        );
        assert_eq!(
            merged.get(KEY_PROJECT_NAME),
            Some(&preset.project_name)
        );
        // Exclusions are identity-owned but not protected.
        assert_eq!(merged.get(KEY_EXCLUSIONS).map(String::as_str), Some("none/**"));
    }

    #[test]
    fn merge_is_pure_and_leaves_layers_untouched() {
        let identity = layer(&[("a", "1")]);
        let common = layer(&[("b", "2")]);
        let overrides = layer(&[("c", "3")]);

        let merged = merge_options(&identity, &common, &overrides);

        assert_eq!(merged.len(), 3);
        assert_eq!(identity.len(), 1);
        assert_eq!(common.len(), 1);
        assert_eq!(overrides.len(), 1);
    }

    #[test]
    fn presets_differ_in_key_name_and_exclusions() {
        let server = AnalysisPreset::server();
        let cloud = AnalysisPreset::cloud();

        assert_ne!(server.project_key, cloud.project_key);
        assert_ne!(server.project_name, cloud.project_name);
        assert!(server.exclusions.contains("extensions/cloud/**"));
        assert!(cloud.exclusions.contains("extensions/server/**"));
    }

    #[test]
    fn common_settings_pick_up_ci_identifiers() {
        let ctx = CiContext {
            build_number: Some("42".into()),
            repo_full_name: Some("acme/prod".into()),
            ..Default::default()
        };

        let settings = common_settings(&ctx);

        assert_eq!(
            settings.get("analysis.buildNumber").map(String::as_str),
            Some("42")
        );
        assert_eq!(
            settings.get("analysis.pipeline").map(String::as_str),
            Some("42")
        );
        assert_eq!(
            settings.get("analysis.repository").map(String::as_str),
            Some("acme/prod")
        );
    }

    #[test]
    fn common_settings_omit_absent_ci_identifiers() {
        let settings = common_settings(&CiContext::default());

        assert!(!settings.contains_key("analysis.buildNumber"));
        assert!(!settings.contains_key("analysis.pipeline"));
        assert!(!settings.contains_key("analysis.repository"));
    }

    #[test]
    fn build_request_requires_a_server_url() {
        let err = build_request(
            &AnalysisPreset::server(),
            &CiContext::default(),
            &BTreeMap::new(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn build_request_resolves_endpoint_with_fallback() {
        let ctx = CiContext {
            analysis_host_url_external: Some("https://pr.example.org".into()),
            analysis_token_external: Some("tok".into()),
            ..Default::default()
        };

        let request = build_request(
            &AnalysisPreset::cloud(),
            &ctx,
            &BTreeMap::new(),
        )
        .unwrap();

        assert_eq!(request.server_url, "https://pr.example.org");
        assert_eq!(request.token.as_deref(), Some("tok"));
        assert_eq!(
            request.options.get(KEY_PROJECT_KEY).map(String::as_str),
            Some("org.vsixkit.extensions:quality-extension-cloud")
        );
    }
}
