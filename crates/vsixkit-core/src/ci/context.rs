//! CI environment snapshot.
//!
//! All environment signals consumed by the build are captured here once,
//! at program start, and threaded explicitly into the components that
//! need them. Nothing below this module reads the process environment.

/// Immutable snapshot of the CI environment signals for one invocation.
///
/// Exactly one of `build_number` / `azdo_build_id` is expected to be
/// populated per invocation (two possible CI providers). Both absent is
/// a valid, if incomplete, state: version resolution then leaves the
/// pre-release marker in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiContext {
    /// Primary build-number signal (Cirrus CI).
    pub build_number: Option<String>,

    /// Build-id signal from the second provider (Azure Pipelines).
    pub azdo_build_id: Option<String>,

    /// URL of the CI run that produced the build.
    pub build_url: Option<String>,

    /// Repository in `<org>/<repo>` form.
    pub repo_full_name: Option<String>,

    /// Commit id of the built revision.
    pub commit: Option<String>,

    /// Target deploy repository for produced artifacts.
    pub deploy_repo: Option<String>,

    /// Primary analysis-server URL.
    pub analysis_host_url: Option<String>,

    /// Primary analysis access token.
    pub analysis_token: Option<String>,

    /// Analysis-server URL fallback used for external PRs.
    pub analysis_host_url_external: Option<String>,

    /// Analysis token fallback used for external PRs.
    pub analysis_token_external: Option<String>,
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

impl CiContext {
    /// Snapshot the CI environment.
    ///
    /// Call this once at program start; empty variables are treated as
    /// absent.
    pub fn from_env() -> Self {
        Self {
            build_number: var("BUILD_NUMBER"),
            azdo_build_id: var("BUILD_BUILDID"),
            build_url: var("CI_BUILD_URL"),
            repo_full_name: var("CIRRUS_REPO_FULL_NAME"),
            commit: var("CIRRUS_CHANGE_IN_REPO"),
            deploy_repo: var("ARTIFACTORY_DEPLOY_REPO"),
            analysis_host_url: var("ANALYSIS_HOST_URL"),
            analysis_token: var("ANALYSIS_TOKEN"),
            analysis_host_url_external: var("ANALYSIS_HOST_URL_EXTERNAL_PR"),
            analysis_token_external: var("ANALYSIS_TOKEN_EXTERNAL_PR"),
        }
    }

    /// The effective CI build identifier, checked in fixed priority
    /// order: the primary build-number signal first, then the
    /// second-provider build id.
    pub fn build_identifier(&self) -> Option<&str> {
        self.build_number
            .as_deref()
            .or(self.azdo_build_id.as_deref())
    }

    /// VCS URL synthesized from the repository full name.
    pub fn vcs_url(&self) -> Option<String> {
        self.repo_full_name
            .as_deref()
            .map(|repo| format!("https://github.com/{repo}.git"))
    }

    /// Analysis-server URL, primary signal first, else the external-PR
    /// fallback.
    pub fn analysis_server_url(&self) -> Option<&str> {
        self.analysis_host_url
            .as_deref()
            .or(self.analysis_host_url_external.as_deref())
    }

    /// Analysis access token with the same two-source fallback as
    /// [`CiContext::analysis_server_url`].
    pub fn analysis_access_token(&self) -> Option<&str> {
        self.analysis_token
            .as_deref()
            .or(self.analysis_token_external.as_deref())
    }
}
