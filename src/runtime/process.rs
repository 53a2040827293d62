//! External process execution.

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;
use std::process::{Command, ExitStatus};

use super::RealRuntime;

/// Exit status of a finished process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    pub success: bool,
    /// None when the process was terminated by a signal
    pub code: Option<i32>,
}

impl ProcessStatus {
    pub fn from_code(code: i32) -> Self {
        Self {
            success: code == 0,
            code: Some(code),
        }
    }
}

impl From<ExitStatus> for ProcessStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status {}", code),
            None => write!(f, "termination by signal"),
        }
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub status: ProcessStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Render a command line for log and error messages.
pub fn display_command(program: &Path, args: &[String]) -> String {
    let mut line = program.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn output_impl(&self, program: &Path, args: &[String]) -> Result<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("Failed to run {:?}", program))?;

        Ok(ProcessOutput {
            status: output.status.into(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn status_impl(&self, program: &Path, args: &[String]) -> Result<ProcessStatus> {
        let status = Command::new(program)
            .args(args)
            .status()
            .with_context(|| format!("Failed to run {:?}", program))?;
        Ok(status.into())
    }
}
