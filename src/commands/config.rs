use log::debug;
use std::path::PathBuf;

use crate::runtime::Runtime;

/// Command-line values that take precedence over the environment.
///
/// The interpreter override also carries `TRANSIENT_PACKAGE_PYTHON`, which
/// the command line reads as the default of `--interpreter`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConfigOverrides {
    pub interpreter: Option<PathBuf>,
    pub site_packages: Vec<PathBuf>,
}

/// Resolved description of the Python environment being modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Interpreter used to run pip and, without site-packages, metadata queries
    pub interpreter: PathBuf,
    /// Directories read directly for installed metadata
    pub site_packages: Vec<PathBuf>,
}

impl Config {
    /// Resolve the configuration.
    ///
    /// The interpreter is taken from the override, then the active virtual
    /// environment, and finally the platform default (`python3`, or `python`
    /// on Windows).
    pub fn load<R: Runtime>(runtime: &R, overrides: ConfigOverrides) -> Self {
        let interpreter = overrides
            .interpreter
            .or_else(|| non_empty_var(runtime, "VIRTUAL_ENV").map(venv_interpreter))
            .unwrap_or_else(|| PathBuf::from(default_interpreter()));
        debug!("Using interpreter {:?}", interpreter);

        Self {
            interpreter,
            site_packages: overrides.site_packages,
        }
    }
}

fn non_empty_var<R: Runtime>(runtime: &R, key: &str) -> Option<String> {
    runtime.env_var(key).ok().filter(|value| !value.is_empty())
}

fn venv_interpreter(venv: String) -> PathBuf {
    let venv = PathBuf::from(venv);
    if cfg!(windows) {
        venv.join("Scripts").join("python.exe")
    } else {
        venv.join("bin").join("python")
    }
}

fn default_interpreter() -> &'static str {
    if cfg!(windows) { "python" } else { "python3" }
}
