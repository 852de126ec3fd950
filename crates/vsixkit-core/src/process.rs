//! Synchronous external command execution.
//!
//! Commands run through the platform shell and block until completion.
//! A non-zero exit is surfaced as [`Error::CommandFailed`] carrying the
//! captured output; callers propagate it to the CLI boundary, which is
//! the only place allowed to terminate the process.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::info;

use crate::error::{Error, Result};

/// Execution options for [`run`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Working directory; the current directory when unset.
    pub cwd: Option<PathBuf>,

    /// Capture stdout/stderr instead of streaming them live.
    pub capture: bool,
}

impl RunOptions {
    /// Capture output and return it instead of streaming live.
    pub fn capture() -> Self {
        Self {
            capture: true,
            ..Default::default()
        }
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(dir.into()),
            ..Default::default()
        }
    }

    pub fn with_cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }
}

#[cfg(unix)]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command_line);
    cmd
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command_line);
    cmd
}

/// Run `command_line` through the shell and wait for it to finish.
///
/// The command line is always logged before execution. On success,
/// returns the trimmed captured stdout, or an empty string when output
/// was streamed live. A non-zero exit never returns success: the error
/// carries the exit status and any captured output so the boundary can
/// surface it.
pub fn run(command_line: &str, options: &RunOptions) -> Result<String> {
    info!("> {command_line}");

    let mut cmd = shell_command(command_line);
    if let Some(dir) = &options.cwd {
        cmd.current_dir(dir);
    }

    if options.capture {
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    }

    let output = cmd.output()?;

    if !output.status.success() {
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(Error::CommandFailed {
            command: command_line.to_string(),
            status: output.status.code().unwrap_or(-1),
            output: combined,
        });
    }

    if options.capture {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_trimmed_stdout() {
        let out = run("printf '  hello  '", &RunOptions::capture()).unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    fn streamed_output_returns_empty_string() {
        let out = run("true", &RunOptions::default()).unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn nonzero_exit_is_an_error() {
        let err = run("exit 3", &RunOptions::default()).unwrap_err();

        match err {
            Error::CommandFailed { status, command, .. } => {
                assert_eq!(status, 3);
                assert_eq!(command, "exit 3");
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[test]
    fn captured_output_included_in_failure() {
        let err = run("echo boom; exit 1", &RunOptions::capture()).unwrap_err();

        match err {
            Error::CommandFailed { output, .. } => assert!(output.contains("boom")),
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[test]
    fn runs_in_requested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = run("pwd", &RunOptions::capture().with_cwd(dir.path())).unwrap();

        // Canonicalize both sides; temp dirs may live behind symlinks.
        let reported = std::fs::canonicalize(&out).unwrap();
        let expected = std::fs::canonicalize(dir.path()).unwrap();
        assert_eq!(reported, expected);
    }
}
