//! Lifecycle commands: create, install and uninstall transient packages.
//!
//! Each command returns its failure to the caller; only `main` decides the
//! exit status.

pub mod config;
mod create;
mod install;
mod services;
mod uninstall;

use crate::package::{DEFAULT_VERSION, Requirement};
use crate::wheel::WheelSpec;

pub use config::{Config, ConfigOverrides};
pub use create::create;
pub use install::{install, locate_wheel, run_install};
pub use uninstall::{run_uninstall, uninstall};

/// What a transient package replaces and what it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientRequest {
    /// Name of the transient package, i.e. the package being replaced
    pub source: String,
    pub source_version: Option<String>,
    /// Name of the package the transient package depends on
    pub target: String,
    /// Bare version or specifier for the target
    pub target_version: Option<String>,
    pub tag: String,
}

impl TransientRequest {
    pub fn requirement(&self) -> Requirement {
        Requirement::new(self.target.clone(), self.target_version.as_deref())
    }

    pub fn wheel_spec(&self) -> WheelSpec {
        WheelSpec::new(
            self.source.clone(),
            self.source_version
                .clone()
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            vec![self.requirement().to_string()],
        )
        .with_tag(self.tag.clone())
    }
}
