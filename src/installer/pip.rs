use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::runtime::{Runtime, display_command};

use super::PackageManager;

/// Runs `<interpreter> -m pip ...`.
pub struct Pip<'a, R: Runtime> {
    runtime: &'a R,
    interpreter: PathBuf,
}

impl<'a, R: Runtime> Pip<'a, R> {
    pub fn new(runtime: &'a R, interpreter: PathBuf) -> Self {
        Self {
            runtime,
            interpreter,
        }
    }

    fn run(&self, args: &[&str]) -> Result<()> {
        let mut full = vec!["-m".to_string(), "pip".to_string()];
        full.extend(args.iter().map(|a| a.to_string()));
        let command = display_command(&self.interpreter, &full);

        debug!("Running {}", command);
        let status = self.runtime.status(&self.interpreter, &full)?;
        if !status.success {
            return Err(Error::CommandFailed {
                command,
                status: status.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl<R: Runtime> PackageManager for Pip<'_, R> {
    #[tracing::instrument(skip(self))]
    fn install(&self, archive: &Path) -> Result<()> {
        let archive = archive.to_string_lossy();
        self.run(&["install", archive.as_ref()])
    }

    #[tracing::instrument(skip(self))]
    fn uninstall(&self, name: &str) -> Result<()> {
        self.run(&["uninstall", "--yes", name])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{MockRuntime, ProcessStatus};
    use mockall::predicate::eq;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_install_runs_pip() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_status()
            .with(
                eq(PathBuf::from("/venv/bin/python")),
                eq(args(&["-m", "pip", "install", "/tmp/x/foo-0.0.0-py3-none-any.whl"])),
            )
            .times(1)
            .returning(|_, _| Ok(ProcessStatus::from_code(0)));

        let pip = Pip::new(&runtime, PathBuf::from("/venv/bin/python"));
        pip.install(Path::new("/tmp/x/foo-0.0.0-py3-none-any.whl"))
            .unwrap();
    }

    #[test]
    fn test_uninstall_runs_pip_without_prompt() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_status()
            .with(
                eq(PathBuf::from("python3")),
                eq(args(&["-m", "pip", "uninstall", "--yes", "foo"])),
            )
            .times(1)
            .returning(|_, _| Ok(ProcessStatus::from_code(0)));

        let pip = Pip::new(&runtime, PathBuf::from("python3"));
        pip.uninstall("foo").unwrap();
    }

    #[test]
    fn test_nonzero_exit_is_command_failure() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_status()
            .returning(|_, _| Ok(ProcessStatus::from_code(1)));

        let pip = Pip::new(&runtime, PathBuf::from("python3"));
        let err = pip.uninstall("foo").unwrap_err();

        match err.downcast_ref::<Error>() {
            Some(Error::CommandFailed { command, status }) => {
                assert_eq!(command, "python3 -m pip uninstall --yes foo");
                assert_eq!(status, "exit status 1");
            }
            other => panic!("Expected CommandFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_spawn_failure_propagates() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_status()
            .returning(|_, _| Err(anyhow::anyhow!("Failed to run \"python3\"")));

        let pip = Pip::new(&runtime, PathBuf::from("python3"));
        assert!(pip.install(Path::new("foo.whl")).is_err());
    }
}
