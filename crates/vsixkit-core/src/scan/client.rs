//! Seam to the external analysis client.
//!
//! The option merger only builds [`AnalysisRequest`] values; invoking
//! the client is the caller's business, mediated by this trait so the
//! dispatch path stays unit-testable.

use std::path::PathBuf;

use crate::error::Result;
use crate::process::{RunOptions, run};
use crate::scan::options::AnalysisRequest;

/// External analysis client.
pub trait AnalysisClient {
    /// Run one analysis with the fully merged request.
    fn execute(&self, request: &AnalysisRequest) -> Result<()>;
}

/// Hand `request` unmodified to `client`, then invoke the completion
/// callback with the outcome before propagating it.
pub fn dispatch<C, F>(client: &C, request: &AnalysisRequest, on_complete: F) -> Result<()>
where
    C: AnalysisClient,
    F: FnOnce(&Result<()>),
{
    let result = client.execute(request);
    on_complete(&result);
    result
}

/// Analysis client backed by an external scanner binary.
#[derive(Debug, Clone)]
pub struct ScannerCli {
    pub binary: PathBuf,
}

impl ScannerCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl AnalysisClient for ScannerCli {
    fn execute(&self, request: &AnalysisRequest) -> Result<()> {
        let mut command = format!(
            "\"{}\" -D\"analysis.host.url={}\"",
            self.binary.display(),
            request.server_url
        );
        if let Some(token) = &request.token {
            command.push_str(&format!(" -D\"analysis.token={token}\""));
        }
        for (key, value) in &request.options {
            command.push_str(&format!(" -D\"{key}={value}\""));
        }

        run(&command, &RunOptions::default())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    struct FakeClient {
        fail: bool,
        seen: RefCell<Vec<AnalysisRequest>>,
    }

    impl FakeClient {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl AnalysisClient for FakeClient {
        fn execute(&self, request: &AnalysisRequest) -> Result<()> {
            self.seen.borrow_mut().push(request.clone());
            if self.fail {
                Err(Error::Config("scanner rejected the request".into()))
            } else {
                Ok(())
            }
        }
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            server_url: "https://analysis.example.org".into(),
            token: Some("tok".into()),
            options: BTreeMap::from([("analysis.projectKey".into(), "k".into())]),
        }
    }

    #[test]
    fn dispatch_hands_request_through_unmodified() {
        let client = FakeClient::new(false);
        let req = request();

        dispatch(&client, &req, |_| {}).unwrap();

        assert_eq!(client.seen.borrow().as_slice(), &[req]);
    }

    #[test]
    fn completion_callback_sees_success() {
        let client = FakeClient::new(false);
        let mut completed_ok = None;

        dispatch(&client, &request(), |outcome| {
            completed_ok = Some(outcome.is_ok());
        })
        .unwrap();

        assert_eq!(completed_ok, Some(true));
    }

    #[test]
    fn completion_callback_sees_failure_before_propagation() {
        let client = FakeClient::new(true);
        let mut completed_ok = None;

        let result = dispatch(&client, &request(), |outcome| {
            completed_ok = Some(outcome.is_ok());
        });

        assert_eq!(completed_ok, Some(false));
        assert!(result.is_err());
    }
}
