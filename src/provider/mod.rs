//! Installed package metadata.
//!
//! The orchestrator only ever asks one question: is this distribution
//! installed, and if so what are its version and `WHEEL` text. Two providers
//! answer it:
//!
//! - [`DistInfoProvider`] reads `*.dist-info` directories straight from
//!   site-packages directories given on the command line.
//! - [`InterpreterProvider`] asks a Python interpreter through
//!   `importlib.metadata`, which works for any environment that interpreter
//!   belongs to.

mod dist_info;
mod interpreter;

use anyhow::Result;
use std::path::PathBuf;

use crate::runtime::Runtime;
use crate::wheel::is_transient;

pub use dist_info::DistInfoProvider;
pub use interpreter::{InterpreterProvider, QUERY_SCRIPT};

/// An installed distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub name: String,
    pub version: String,
    /// Contents of the `WHEEL` metadata member, if the distribution has one
    pub wheel: Option<String>,
}

impl Distribution {
    /// Returns true if this distribution was generated by this tool.
    pub fn is_transient(&self) -> bool {
        self.wheel.as_deref().is_some_and(is_transient)
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait MetadataProvider {
    /// Look up an installed distribution by name. `Ok(None)` means not installed.
    fn distribution(&self, name: &str) -> Result<Option<Distribution>>;
}

/// Provider chosen for the configured environment.
pub enum EnvironmentProvider<'a, R: Runtime> {
    DistInfo(DistInfoProvider<'a, R>),
    Interpreter(InterpreterProvider<'a, R>),
}

impl<R: Runtime> MetadataProvider for EnvironmentProvider<'_, R> {
    fn distribution(&self, name: &str) -> Result<Option<Distribution>> {
        match self {
            Self::DistInfo(provider) => provider.distribution(name),
            Self::Interpreter(provider) => provider.distribution(name),
        }
    }
}

/// Read site-packages directly when they are given, otherwise ask the interpreter.
pub fn select_provider<'a, R: Runtime>(
    runtime: &'a R,
    interpreter: PathBuf,
    site_packages: &[PathBuf],
) -> EnvironmentProvider<'a, R> {
    if site_packages.is_empty() {
        EnvironmentProvider::Interpreter(InterpreterProvider::new(runtime, interpreter))
    } else {
        EnvironmentProvider::DistInfo(DistInfoProvider::new(runtime, site_packages.to_vec()))
    }
}
